/// Error types for dataset loading
use crate::dataset::DatasetKind;
use thiserror::Error;

/// A dataset CSV that cannot be loaded.
///
/// Loading is all-or-nothing: the first malformed row aborts the load of
/// that dataset.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The header row lacks one of the required columns
    #[error("{dataset}: missing required column '{column}'")]
    MissingColumn {
        dataset: DatasetKind,
        column: &'static str,
    },

    /// A required cell is blank
    #[error("{dataset}, line {line}: empty value in column '{column}'")]
    EmptyValue {
        dataset: DatasetKind,
        line: u64,
        column: &'static str,
    },

    /// The count cell is not a non-negative integer
    #[error("{dataset}, line {line}: invalid count '{value}' (expected a non-negative integer)")]
    InvalidCount {
        dataset: DatasetKind,
        line: u64,
        value: String,
    },

    /// The CSV reader rejected the input (ragged row, bad UTF-8, ...)
    #[error("{dataset}: failed to parse CSV: {source}")]
    Csv {
        dataset: DatasetKind,
        #[source]
        source: csv::Error,
    },
}
