//! Chart container component.

use dioxus::prelude::*;
use nat_data::figure::CHART_HEIGHT;

#[derive(Props, Clone, PartialEq)]
pub struct ChartContainerProps {
    /// The DOM id D3 renders into
    pub id: String,
    #[props(default = CHART_HEIGHT)]
    pub height: u32,
}

/// A fixed-height div the D3.js renderer draws into.
#[component]
pub fn ChartContainer(props: ChartContainerProps) -> Element {
    let style = format!("min-height: {}px; position: relative; width: 100%;", props.height);

    rsx! {
        div {
            style: "{style}",
            div {
                id: "{props.id}",
                style: "width: 100%;",
            }
        }
    }
}
