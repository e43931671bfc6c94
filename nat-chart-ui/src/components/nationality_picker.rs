//! Multi-select of nationalities for the selected-nationalities chart.
//!
//! Options come from `AppState::nationality_options` (filled by the dropdown
//! handler on every dataset switch). An empty selection charts every
//! nationality.

use crate::state::AppState;
use dioxus::prelude::*;

/// Add `name` to the selection, or remove it if already selected.
pub fn toggle_selection(selection: &mut Vec<String>, name: &str) {
    match selection.iter().position(|n| n == name) {
        Some(pos) => {
            selection.remove(pos);
        }
        None => selection.push(name.to_string()),
    }
}

#[component]
pub fn NationalityPicker() -> Element {
    let mut state = use_context::<AppState>();
    let options = state.nationality_options.read().clone();
    let selected = state.selected_nationalities.read().clone();
    let selected_count = selected.len();

    rsx! {
        div {
            style: "padding: 20px 10px;",
            div {
                style: "display: flex; align-items: center; gap: 12px; margin-bottom: 8px;",
                label {
                    style: "font-weight: bold;",
                    "Sélectionner les nationalités: ({selected_count})"
                }
                button {
                    disabled: selected.is_empty(),
                    onclick: move |_| state.selected_nationalities.set(Vec::new()),
                    "Tout effacer"
                }
            }
            if selected.is_empty() {
                p {
                    style: "margin: 0 0 8px 0; font-size: 12px; color: #666;",
                    "Aucune sélection : toutes les nationalités sont affichées."
                }
            }
            div {
                style: "max-height: 180px; overflow-y: auto; display: flex; flex-wrap: wrap; gap: 4px 14px; padding: 8px; border: 1px solid #ddd; border-radius: 4px;",
                for name in options {
                    NationalityCheckbox {
                        key: "{name}",
                        checked: selected.contains(&name),
                        name: name.clone(),
                    }
                }
            }
        }
    }
}

#[component]
fn NationalityCheckbox(name: String, checked: bool) -> Element {
    let mut state = use_context::<AppState>();
    let toggled = name.clone();

    rsx! {
        label {
            style: "font-size: 13px; cursor: pointer; white-space: nowrap;",
            input {
                r#type: "checkbox",
                checked: checked,
                onchange: move |_| toggle_selection(&mut state.selected_nationalities.write(), &toggled),
            }
            " {name}"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_adds_then_removes() {
        let mut selection = vec!["Belge".to_string()];
        toggle_selection(&mut selection, "Suisse");
        assert_eq!(selection, vec!["Belge", "Suisse"]);
        toggle_selection(&mut selection, "Belge");
        assert_eq!(selection, vec!["Suisse"]);
    }
}
