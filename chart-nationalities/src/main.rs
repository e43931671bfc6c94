//! Évolution des nationalités (2015-2024)
//!
//! Interactive dashboard over three filing datasets (auto-entrepreneurs,
//! companies, combined). A radio control picks the dataset; one tab charts
//! the top-N nationalities by mean yearly count, the other charts a
//! user-picked set of nationalities.
//!
//! Data flow:
//! 1. `build.rs` copies the three CSVs into `OUT_DIR`.
//! 2. `include_str!` embeds them into the WASM binary.
//! 3. On mount, the app asks its origin for the CSVs (`nat-cli serve`
//!    exposes the files it loaded under `/data/`). If all three are served
//!    they are used; otherwise the embedded copies are. Either way the CSVs
//!    go into an in-memory SQLite database.
//! 4. Effects re-run the dashboard handlers whenever the controls they read
//!    change, and hand the resulting figures to D3.js.

use dioxus::prelude::*;
use nat_chart_ui::components::{
    ChartContainer, ChartHeader, DashboardTabs, DatasetRadio, ErrorDisplay, LoadingSpinner,
    NationalityPicker, TopNSlider,
};
use nat_chart_ui::{fetch, js_bridge};
use nat_chart_ui::state::{AppState, DashboardTab};
use nat_data::Dashboard;
use nat_db::{Database, DatasetKind};

const AUTO_CSV: &str = include_str!(concat!(env!("OUT_DIR"), "/data-auto-entreprise-nationalite.csv"));
const SOCIETE_CSV: &str = include_str!(concat!(env!("OUT_DIR"), "/data-societe-nationalite.csv"));
const TOUT_CSV: &str = include_str!(concat!(env!("OUT_DIR"), "/data-tout-confondu-nationalite.csv"));

const D3_SRC: &str = "https://cdn.jsdelivr.net/npm/d3@7";

const PAGE_TITLE: &str = "Évolution des nationalités (2015-2024)";
const HEADING: &str = "Évolution du nombre d'itérations par nationalité (2015-2024)";

fn embedded_csv(kind: DatasetKind) -> &'static str {
    match kind {
        DatasetKind::Auto => AUTO_CSV,
        DatasetKind::Societe => SOCIETE_CSV,
        DatasetKind::Tout => TOUT_CSV,
    }
}

/// Where the loaded CSVs came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DataOrigin {
    Served,
    Embedded,
}

/// Use the served CSVs when every dataset was served with content, else
/// the embedded copies for all three.
fn select_sources(served: Vec<(DatasetKind, Option<String>)>) -> (DataOrigin, Vec<(DatasetKind, String)>) {
    let complete = served.len() == DatasetKind::ALL.len()
        && served
            .iter()
            .all(|(_, text)| text.as_deref().is_some_and(|t| !t.trim().is_empty()));
    if complete {
        let sources = served
            .into_iter()
            .filter_map(|(kind, text)| text.map(|t| (kind, t)))
            .collect();
        (DataOrigin::Served, sources)
    } else {
        let sources = DatasetKind::ALL
            .into_iter()
            .map(|kind| (kind, embedded_csv(kind).to_string()))
            .collect();
        (DataOrigin::Embedded, sources)
    }
}

/// Load all three datasets; any missing or malformed file fails the whole load.
fn load_dashboard(sources: &[(DatasetKind, String)]) -> anyhow::Result<Dashboard> {
    for (kind, csv) in sources {
        if csv.trim().is_empty() {
            anyhow::bail!("fichier de données manquant ou vide : {}", kind.file_name());
        }
    }
    let db = Database::from_sources(sources.iter().map(|(kind, csv)| (*kind, csv.as_str())))?;
    for kind in DatasetKind::ALL {
        let summary = db.query_summary(kind)?;
        log::info!(
            "[NAT] {}: {} records, {} nationalities, years {}..{}",
            summary.label,
            summary.records,
            summary.nationalities,
            summary.first_year.as_deref().unwrap_or("-"),
            summary.last_year.as_deref().unwrap_or("-"),
        );
    }
    Ok(Dashboard::new(db))
}

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    log::info!("Démarrage de l'application {}", PAGE_TITLE);
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("nationalities-root"))
        .launch(App);
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(AppState::new);

    // Load the datasets once on mount
    use_effect(move || {
        spawn(async move {
            let served = fetch::fetch_served_datasets().await;
            let (origin, sources) = select_sources(served);
            log::info!("[NAT] using {:?} datasets", origin);
            match load_dashboard(&sources) {
                Ok(dashboard) => state.dashboard.set(Some(dashboard)),
                Err(e) => {
                    log::error!("Failed to load datasets: {:#}", e);
                    state
                        .error_msg
                        .set(Some(format!("Impossible de charger les données : {:#}", e)));
                }
            }
            state.loading.set(false);
        });
    });

    // Dropdown handler: every dataset switch resets the nationality selection
    use_effect(move || {
        let dataset = (state.dataset)();
        let Some(dashboard) = state.dashboard.read().clone() else {
            return;
        };
        match dashboard.dropdown(dataset) {
            Ok(dropdown) => {
                state.nationality_options.set(dropdown.options);
                state.selected_nationalities.set(dropdown.selected);
            }
            Err(e) => log::error!("[NAT] dropdown({}) failed: {:#}", dataset, e),
        }
    });

    // Top-N chart
    use_effect(move || {
        if (state.active_tab)() != DashboardTab::Top {
            return;
        }
        let dataset = (state.dataset)();
        let top_n = (state.top_n)();
        let Some(dashboard) = state.dashboard.read().clone() else {
            return;
        };
        js_bridge::init_charts();
        match dashboard.top_figure(dataset, top_n) {
            Ok(figure) => js_bridge::render_figure(DashboardTab::Top.chart_id(), &figure),
            Err(e) => {
                log::error!("[NAT] top_figure({}, {}) failed: {:#}", dataset, top_n, e);
                js_bridge::destroy_chart(DashboardTab::Top.chart_id());
            }
        }
    });

    // Selected-nationalities chart
    use_effect(move || {
        if (state.active_tab)() != DashboardTab::Selected {
            return;
        }
        let dataset = (state.dataset)();
        let selection = state.selected_nationalities.read().clone();
        let Some(dashboard) = state.dashboard.read().clone() else {
            return;
        };
        js_bridge::init_charts();
        match dashboard.selected_figure(dataset, &selection) {
            Ok(figure) => js_bridge::render_figure(DashboardTab::Selected.chart_id(), &figure),
            Err(e) => {
                log::error!("[NAT] selected_figure({}) failed: {:#}", dataset, e);
                js_bridge::destroy_chart(DashboardTab::Selected.chart_id());
            }
        }
    });

    let active_tab = (state.active_tab)();

    rsx! {
        document::Title { "{PAGE_TITLE}" }
        document::Script { src: D3_SRC }

        div {
            style: "font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;",

            ChartHeader { title: HEADING.to_string() }

            if let Some(err) = (state.error_msg)() {
                ErrorDisplay { message: err }
            } else if (state.loading)() {
                LoadingSpinner {}
            } else {
                DatasetRadio {}

                div {
                    style: "padding: 0 10px;",
                    DashboardTabs {}
                    if active_tab == DashboardTab::Top {
                        TopNSlider {}
                        ChartContainer { id: DashboardTab::Top.chart_id().to_string() }
                    } else {
                        NationalityPicker {}
                        ChartContainer { id: DashboardTab::Selected.chart_id().to_string() }
                    }
                }
            }

            footer {
                p {
                    style: "text-align: center; margin-top: 30px; margin-bottom: 20px; color: #666;",
                    "Visualisation interactive des nationalités avec Dioxus et D3.js."
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn embedded() -> Vec<(DatasetKind, String)> {
        select_sources(Vec::new()).1
    }

    #[test]
    fn embedded_datasets_load() {
        let dashboard = load_dashboard(&embedded()).expect("fixtures should load");
        for kind in DatasetKind::ALL {
            let dropdown = dashboard.dropdown(kind).unwrap();
            assert!(!dropdown.options.is_empty(), "{kind} should have nationalities");
            assert_eq!(dropdown.selected.len(), 5);
        }
    }

    #[test]
    fn default_view_renders_top_five() {
        let dashboard = load_dashboard(&embedded()).unwrap();
        let figure = dashboard
            .top_figure(DatasetKind::default(), nat_data::views::TOP_N_DEFAULT)
            .unwrap();
        assert_eq!(figure.series.len(), 5);
        assert!(figure.title.starts_with("Tout confondu - Top 5"));
    }

    #[test]
    fn served_datasets_replace_embedded_ones() {
        let csv = "nationalite,annee,iterations\nMonégasque,2015,3\n";
        let served = DatasetKind::ALL
            .into_iter()
            .map(|kind| (kind, Some(csv.to_string())))
            .collect();
        let (origin, sources) = select_sources(served);
        assert_eq!(origin, DataOrigin::Served);

        let dashboard = load_dashboard(&sources).unwrap();
        let dropdown = dashboard.dropdown(DatasetKind::Auto).unwrap();
        assert_eq!(dropdown.options, vec!["Monégasque"]);
    }

    #[test]
    fn partially_served_datasets_fall_back_to_embedded() {
        let served = vec![
            (DatasetKind::Auto, Some("nationalite,annee,iterations\nBelge,2015,1\n".to_string())),
            (DatasetKind::Societe, None),
            (DatasetKind::Tout, Some("  ".to_string())),
        ];
        let (origin, sources) = select_sources(served);
        assert_eq!(origin, DataOrigin::Embedded);
        assert_eq!(sources.len(), 3);
        assert_eq!(sources[0].1, embedded_csv(DatasetKind::Auto));
    }
}
