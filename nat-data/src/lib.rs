//! Derived chart views for the nationality dashboard.
//!
//! This crate turns the loaded filings into what the UI shows:
//! - `views`: the dashboard handlers (dropdown, selected chart, top-N chart)
//! - `figure`: serializable line-chart descriptions for the D3.js bridge
//! - `format`: thousands grouping and hover labels

pub mod figure;
pub mod format;
pub mod views;

pub use figure::Figure;
pub use views::{Dashboard, DropdownState};
