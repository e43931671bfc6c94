//! Query result model structs.
//!
//! All structs derive `Serialize` so they can be handed to the D3.js bridge
//! or returned by the JSON API unchanged.

use crate::dataset::DatasetKind;
use serde::Serialize;

/// One CSV row: the filing count of a nationality for one year.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FilingRecord {
    pub nationality: String,
    /// Year as a discrete category (e.g. "2015").
    pub year: String,
    pub iteration_count: u64,
}

/// Average yearly filing count of one nationality, the top-N ranking key.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NationalityMean {
    pub nationality: String,
    /// Arithmetic mean of `iteration_count` over every row of the nationality.
    pub mean: f64,
    /// Number of rows the mean was taken over.
    pub years: u32,
}

/// Row/nationality/year coverage of one loaded dataset.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DatasetSummary {
    pub dataset: DatasetKind,
    pub label: String,
    pub records: u64,
    pub nationalities: u64,
    /// Earliest year, `None` for an empty dataset.
    pub first_year: Option<String>,
    /// Latest year, `None` for an empty dataset.
    pub last_year: Option<String>,
}
