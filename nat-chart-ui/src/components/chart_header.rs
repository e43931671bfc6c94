//! Page header.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ChartHeaderProps {
    pub title: String,
    /// Optional line under the title
    #[props(default = String::new())]
    pub subtitle: String,
}

/// Centered page title with an optional subtitle.
#[component]
pub fn ChartHeader(props: ChartHeaderProps) -> Element {
    rsx! {
        div {
            style: "text-align: center; margin: 20px 0 30px 0;",
            h1 {
                style: "margin: 0; font-size: 26px;",
                "{props.title}"
            }
            if !props.subtitle.is_empty() {
                p {
                    style: "margin: 6px 0 0 0; font-size: 13px; color: #666;",
                    "{props.subtitle}"
                }
            }
        }
    }
}
