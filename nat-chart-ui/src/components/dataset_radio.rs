//! Radio control choosing the active dataset.

use crate::state::AppState;
use dioxus::prelude::*;
use nat_db::DatasetKind;

/// Three-way dataset selector (`auto`, `societe`, `tout`).
/// Writes the chosen dataset to `AppState::dataset`.
#[component]
pub fn DatasetRadio() -> Element {
    let state = use_context::<AppState>();
    let current = (state.dataset)();

    rsx! {
        div {
            style: "margin-bottom: 20px; padding: 10px 10px;",
            label {
                style: "font-weight: bold; display: block; margin-bottom: 6px;",
                "Sélectionner le type de données:"
            }
            for kind in DatasetKind::ALL {
                DatasetOption {
                    key: "{kind}",
                    kind: kind,
                    checked: kind == current,
                }
            }
        }
    }
}

#[component]
fn DatasetOption(kind: DatasetKind, checked: bool) -> Element {
    let mut state = use_context::<AppState>();
    let token = kind.token();
    let label = kind.label();

    rsx! {
        label {
            style: "display: inline-block; margin-right: 15px; cursor: pointer;",
            input {
                r#type: "radio",
                name: "dataset-radio",
                value: "{token}",
                checked: checked,
                onchange: move |_| state.dataset.set(kind),
            }
            " {label}"
        }
    }
}
