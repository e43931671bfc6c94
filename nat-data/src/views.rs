//! Reactive update handlers of the dashboard.
//!
//! Each handler is a pure function of the current control values and the
//! loaded (immutable) database. Nothing is cached: every call recomputes its
//! view, so calling a handler twice with the same inputs yields the same
//! result.

use crate::figure::{Figure, SELECTED_STYLE, TOP_STYLE};
use nat_db::models::{FilingRecord, NationalityMean};
use nat_db::{Database, DatasetKind};
use serde::Serialize;

/// Number of nationalities pre-selected after a dataset switch.
pub const DEFAULT_SELECTION_SIZE: usize = 5;

/// Bounds and default of the top-N slider.
pub const TOP_N_MIN: u32 = 1;
pub const TOP_N_MAX: u32 = 20;
pub const TOP_N_DEFAULT: u32 = 5;

/// Options and selection of the nationality multi-select.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DropdownState {
    /// Every nationality of the active dataset, sorted.
    pub options: Vec<String>,
    /// The first [`DEFAULT_SELECTION_SIZE`] options.
    pub selected: Vec<String>,
}

/// A dataset resolved from its selector token.
#[derive(Clone, Copy)]
pub struct ActiveDataset<'a> {
    db: &'a Database,
    kind: DatasetKind,
}

impl<'a> ActiveDataset<'a> {
    pub fn kind(&self) -> DatasetKind {
        self.kind
    }

    /// Chart title prefix, e.g. "Sociétés".
    pub fn label(&self) -> &'static str {
        self.kind.label()
    }

    pub fn records(&self) -> anyhow::Result<Vec<FilingRecord>> {
        self.db.query_records(self.kind)
    }

    pub fn nationalities(&self) -> anyhow::Result<Vec<String>> {
        self.db.query_nationalities(self.kind)
    }
}

/// The loaded datasets plus the dashboard's handlers.
///
/// Cheap to clone; clones share the same database.
#[derive(Clone, Debug)]
pub struct Dashboard {
    db: Database,
}

impl Dashboard {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Resolve the radio selector value to its dataset.
    pub fn resolve(&self, kind: DatasetKind) -> ActiveDataset<'_> {
        ActiveDataset { db: &self.db, kind }
    }

    /// Dropdown handler, run on every dataset switch.
    ///
    /// Reset policy: the returned selection always replaces whatever the user
    /// had picked before the switch.
    pub fn dropdown(&self, kind: DatasetKind) -> anyhow::Result<DropdownState> {
        let options = self.resolve(kind).nationalities()?;
        let selected = options.iter().take(DEFAULT_SELECTION_SIZE).cloned().collect();
        Ok(DropdownState { options, selected })
    }

    /// Selected-nationalities chart handler.
    ///
    /// An empty selection means every nationality of the dataset. Duplicate
    /// names are ignored and names absent from the dataset produce no series.
    pub fn selected_figure(&self, kind: DatasetKind, selection: &[String]) -> anyhow::Result<Figure> {
        let active = self.resolve(kind);
        let mut names: Vec<String> = selection.to_vec();
        names.sort();
        names.dedup();
        if names.is_empty() {
            names = active.nationalities()?;
        }

        let records = self.db.query_records_for(kind, &names)?;
        let title = format!(
            "{} - Évolution des {} nationalités sélectionnées",
            active.label(),
            names.len()
        );
        let figure = Figure::from_records(title, &records, SELECTED_STYLE);
        log::info!(
            "[NAT] view: selected_figure({}) -> {} series",
            kind,
            figure.series.len()
        );
        Ok(figure)
    }

    /// The `n` nationalities with the highest mean count (at least one).
    ///
    /// Equal means rank alphabetically.
    pub fn top_ranking(&self, kind: DatasetKind, n: u32) -> anyhow::Result<Vec<NationalityMean>> {
        self.db.query_top_nationalities(kind, n.max(TOP_N_MIN) as usize)
    }

    /// Top-N chart handler: the `n` highest-mean nationalities across years.
    pub fn top_figure(&self, kind: DatasetKind, n: u32) -> anyhow::Result<Figure> {
        let n = n.max(TOP_N_MIN);
        let names: Vec<String> = self
            .top_ranking(kind, n)?
            .into_iter()
            .map(|m| m.nationality)
            .collect();
        let records = self.db.query_records_for(kind, &names)?;
        let title = format!(
            "{} - Top {} des nationalités par nombre d'itérations",
            kind.label(),
            n
        );
        let figure = Figure::from_records(title, &records, TOP_STYLE);
        log::info!(
            "[NAT] view: top_figure({}, {}) -> {} series",
            kind,
            n,
            figure.series.len()
        );
        Ok(figure)
    }
}
