//! Shared Dioxus components and D3.js bridge for the nationality dashboard.
//!
//! This crate provides:
//! - `fetch`: loads the dataset CSVs served next to the page, when present
//! - `js_bridge`: Rust wrappers that hand [`nat_data::Figure`]s to the D3.js renderer
//! - `state`: reactive `AppState` with Dioxus Signals
//! - `components`: the dashboard controls (dataset radio, top-N slider,
//!   nationality picker, tabs) and chart containers

pub mod components;
pub mod fetch;
pub mod js_bridge;
pub mod state;
