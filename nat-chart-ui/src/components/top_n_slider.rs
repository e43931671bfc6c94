//! Slider choosing how many top nationalities to chart.

use crate::state::AppState;
use dioxus::prelude::*;
use nat_data::views::{TOP_N_MAX, TOP_N_MIN};

/// Values labelled under the slider: every other step from the minimum.
pub fn slider_marks() -> Vec<u32> {
    (TOP_N_MIN..=TOP_N_MAX).step_by(2).collect()
}

/// Integer slider bound to `AppState::top_n`, clamped to the allowed range.
#[component]
pub fn TopNSlider() -> Element {
    let mut state = use_context::<AppState>();
    let value = (state.top_n)();
    let marks = slider_marks();

    let on_input = move |evt: Event<FormData>| {
        if let Ok(n) = evt.value().parse::<u32>() {
            state.top_n.set(n.clamp(TOP_N_MIN, TOP_N_MAX));
        }
    };

    rsx! {
        div {
            style: "padding: 20px 10px;",
            label {
                r#for: "top-n-slider",
                style: "font-weight: bold; display: block; margin-bottom: 8px;",
                "Nombre de nationalités les plus populaires: {value}"
            }
            input {
                id: "top-n-slider",
                r#type: "range",
                min: "{TOP_N_MIN}",
                max: "{TOP_N_MAX}",
                step: "1",
                value: "{value}",
                style: "width: 100%;",
                oninput: on_input,
            }
            div {
                style: "display: flex; justify-content: space-between; font-size: 11px; color: #666;",
                for mark in marks {
                    span { key: "{mark}", "{mark}" }
                }
            }
        }
    }
}
