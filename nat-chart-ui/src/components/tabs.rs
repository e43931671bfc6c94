//! Tab bar switching between the two charts.

use crate::state::{AppState, DashboardTab};
use dioxus::prelude::*;

#[component]
pub fn DashboardTabs() -> Element {
    let state = use_context::<AppState>();
    let active = (state.active_tab)();

    rsx! {
        div {
            style: "display: flex; border-bottom: 1px solid #d6d6d6;",
            for tab in DashboardTab::ALL {
                TabButton {
                    tab: tab,
                    active: tab == active,
                }
            }
        }
    }
}

#[component]
fn TabButton(tab: DashboardTab, active: bool) -> Element {
    let mut state = use_context::<AppState>();
    let label = tab.label();
    let style = if active {
        "flex: 1; padding: 12px; border: 1px solid #d6d6d6; border-bottom: 2px solid #1975FA; background: white; font-weight: bold; cursor: pointer;"
    } else {
        "flex: 1; padding: 12px; border: 1px solid #d6d6d6; background: #f9f9f9; cursor: pointer;"
    };

    rsx! {
        button {
            style: "{style}",
            onclick: move |_| state.active_tab.set(tab),
            "{label}"
        }
    }
}
