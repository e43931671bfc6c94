//! Application state managed via Dioxus context.
//!
//! `AppState` bundles all reactive signals into a single struct provided via
//! `use_context_provider`. Child components retrieve it with `use_context::<AppState>()`.

use dioxus::prelude::*;
use nat_data::views::TOP_N_DEFAULT;
use nat_data::Dashboard;
use nat_db::DatasetKind;

/// The two chart tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashboardTab {
    #[default]
    Top,
    Selected,
}

impl DashboardTab {
    pub const ALL: [DashboardTab; 2] = [DashboardTab::Top, DashboardTab::Selected];

    pub fn label(self) -> &'static str {
        match self {
            DashboardTab::Top => "Top nationalités",
            DashboardTab::Selected => "Nationalités sélectionnées",
        }
    }

    /// DOM id of the chart container shown in this tab.
    pub fn chart_id(self) -> &'static str {
        match self {
            DashboardTab::Top => "graph-top",
            DashboardTab::Selected => "graph-selected",
        }
    }
}

/// Shared application state of the dashboard.
#[derive(Clone, Copy)]
pub struct AppState {
    /// Loaded datasets and handlers (None until loaded)
    pub dashboard: Signal<Option<Dashboard>>,
    /// Whether the datasets are still loading
    pub loading: Signal<bool>,
    /// Fatal load error; when set nothing else is rendered
    pub error_msg: Signal<Option<String>>,
    /// Dataset chosen with the radio control
    pub dataset: Signal<DatasetKind>,
    /// Value of the top-N slider
    pub top_n: Signal<u32>,
    /// Every nationality of the active dataset
    pub nationality_options: Signal<Vec<String>>,
    /// Nationalities ticked in the picker; empty means all
    pub selected_nationalities: Signal<Vec<String>>,
    pub active_tab: Signal<DashboardTab>,
}

impl AppState {
    /// Create a new AppState with default signal values.
    pub fn new() -> Self {
        Self {
            dashboard: Signal::new(None),
            loading: Signal::new(true),
            error_msg: Signal::new(None),
            dataset: Signal::new(DatasetKind::default()),
            top_n: Signal::new(TOP_N_DEFAULT),
            nationality_options: Signal::new(Vec::new()),
            selected_nationalities: Signal::new(Vec::new()),
            active_tab: Signal::new(DashboardTab::default()),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tabs_have_distinct_chart_ids() {
        assert_ne!(DashboardTab::Top.chart_id(), DashboardTab::Selected.chart_id());
        assert_eq!(DashboardTab::default(), DashboardTab::Top);
    }
}
