//! Reusable Dioxus RSX components for the nationality dashboard.

mod chart_container;
mod chart_header;
mod dataset_radio;
mod error_display;
mod loading_spinner;
mod nationality_picker;
mod tabs;
mod top_n_slider;

pub use chart_container::ChartContainer;
pub use chart_header::ChartHeader;
pub use dataset_radio::DatasetRadio;
pub use error_display::ErrorDisplay;
pub use loading_spinner::LoadingSpinner;
pub use nationality_picker::{toggle_selection, NationalityPicker};
pub use tabs::DashboardTabs;
pub use top_n_slider::{slider_marks, TopNSlider};
