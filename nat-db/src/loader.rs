//! CSV loading for the filings table.
//!
//! # CSV Format
//!
//! Header row required, columns in any order, names matched case-insensitively:
//!
//! - `nationalite` - nationality label
//! - `annee` - year, kept as text
//! - `iterations` or `nombre_dirigeants` - non-negative filing count
//!
//! ```text
//! nationalite,annee,iterations
//! Belge,2015,1520
//! Belge,2016,1684
//! ```

use crate::dataset::DatasetKind;
use crate::error::LoadError;
use crate::Database;
use rusqlite::params;

const NATIONALITY_COLUMN: &str = "nationalite";
const YEAR_COLUMN: &str = "annee";
/// Accepted names for the count column, in lookup order.
const COUNT_COLUMNS: [&str; 2] = ["iterations", "nombre_dirigeants"];

/// Positions of the three required columns within a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnIndex {
    nationality: usize,
    year: usize,
    count: usize,
    /// The count column name found in the header.
    count_column: &'static str,
}

impl ColumnIndex {
    fn from_headers(dataset: DatasetKind, headers: &csv::StringRecord) -> Result<Self, LoadError> {
        let normalized: Vec<String> = headers
            .iter()
            .map(|h| h.trim().trim_matches('"').to_lowercase())
            .collect();
        let find = |name: &str| normalized.iter().position(|h| h == name);

        let nationality = find(NATIONALITY_COLUMN).ok_or(LoadError::MissingColumn {
            dataset,
            column: NATIONALITY_COLUMN,
        })?;
        let year = find(YEAR_COLUMN).ok_or(LoadError::MissingColumn {
            dataset,
            column: YEAR_COLUMN,
        })?;
        let (count, count_column) = COUNT_COLUMNS
            .iter()
            .find_map(|&name| find(name).map(|index| (index, name)))
            .ok_or(LoadError::MissingColumn {
                dataset,
                column: COUNT_COLUMNS[0],
            })?;

        Ok(Self {
            nationality,
            year,
            count,
            count_column,
        })
    }
}

impl Database {
    /// Load one dataset from CSV text, replacing any rows previously loaded
    /// for it. Returns the number of records stored.
    ///
    /// The load runs in a single transaction: on error nothing from this
    /// CSV is kept.
    pub fn load_dataset(&self, dataset: DatasetKind, csv_data: &str) -> anyhow::Result<usize> {
        let conn = self.conn.borrow();
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(csv_data.as_bytes());

        let headers = rdr
            .headers()
            .map_err(|source| LoadError::Csv { dataset, source })?;
        let columns = ColumnIndex::from_headers(dataset, headers)?;

        let tx = conn.unchecked_transaction()?;
        tx.execute("DELETE FROM filings WHERE dataset = ?1", params![dataset.token()])?;

        let mut count = 0usize;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO filings (dataset, nationality, year, iteration_count)
                 VALUES (?1, ?2, ?3, ?4)",
            )?;
            for result in rdr.records() {
                let record = result.map_err(|source| LoadError::Csv { dataset, source })?;
                let line = record.position().map(|p| p.line()).unwrap_or(0);

                let nationality = required_field(&record, columns.nationality, dataset, line, NATIONALITY_COLUMN)?;
                let year = required_field(&record, columns.year, dataset, line, YEAR_COLUMN)?;
                let raw_count = required_field(&record, columns.count, dataset, line, columns.count_column)?;
                let iteration_count = parse_count(raw_count).ok_or_else(|| LoadError::InvalidCount {
                    dataset,
                    line,
                    value: raw_count.to_string(),
                })?;

                stmt.execute(params![dataset.token(), nationality, year, iteration_count])?;
                count += 1;
            }
        }
        tx.commit()?;

        log::info!("[NAT] loader: Loaded {} records into '{}'", count, dataset);
        Ok(count)
    }
}

fn required_field<'r>(
    record: &'r csv::StringRecord,
    index: usize,
    dataset: DatasetKind,
    line: u64,
    column: &'static str,
) -> Result<&'r str, LoadError> {
    match record.get(index).map(|v| v.trim_matches('"').trim()) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(LoadError::EmptyValue {
            dataset,
            line,
            column,
        }),
    }
}

/// Counts are stored as SQLite INTEGER, so anything above `i64::MAX` is
/// rejected along with negatives and non-integers.
fn parse_count(raw: &str) -> Option<i64> {
    raw.parse::<u64>().ok().and_then(|v| i64::try_from(v).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(csv: &str) -> anyhow::Result<usize> {
        let db = Database::new().unwrap();
        db.load_dataset(DatasetKind::Tout, csv)
    }

    fn load_error(csv: &str) -> LoadError {
        load(csv)
            .unwrap_err()
            .downcast::<LoadError>()
            .expect("expected a LoadError")
    }

    #[test]
    fn loads_dash_export_format() {
        let csv = "nationalite,annee,iterations\nBelge,2015,10\nBelge,2016,20\n";
        assert_eq!(load(csv).unwrap(), 2);
    }

    #[test]
    fn accepts_count_alias_and_any_column_order() {
        let db = Database::new().unwrap();
        let csv = "\"Annee\",\"Nationalite\",\"NOMBRE_DIRIGEANTS\"\n\"2015\",\"Belge\",\"7\"\n";
        assert_eq!(db.load_dataset(DatasetKind::Auto, csv).unwrap(), 1);

        let records = db.query_records(DatasetKind::Auto).unwrap();
        assert_eq!(records[0].nationality, "Belge");
        assert_eq!(records[0].year, "2015");
        assert_eq!(records[0].iteration_count, 7);
    }

    #[test]
    fn extra_columns_and_blank_lines_are_ignored() {
        let csv = "id,nationalite,annee,iterations,source\n1,Belge,2015,10,x\n\n2,Suisse,2015,4,y\n";
        assert_eq!(load(csv).unwrap(), 2);
    }

    #[test]
    fn header_only_file_is_an_empty_dataset() {
        assert_eq!(load("nationalite,annee,iterations\n").unwrap(), 0);
    }

    #[test]
    fn missing_column_is_fatal() {
        match load_error("nationalite,iterations\nBelge,10\n") {
            LoadError::MissingColumn { column, .. } => assert_eq!(column, "annee"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_input_reports_missing_column() {
        assert!(matches!(
            load_error(""),
            LoadError::MissingColumn { column: "nationalite", .. }
        ));
    }

    #[test]
    fn invalid_count_reports_line_number() {
        let csv = "nationalite,annee,iterations\nBelge,2015,10\nBelge,2016,-3\n";
        match load_error(csv) {
            LoadError::InvalidCount { line, value, .. } => {
                assert_eq!(line, 3);
                assert_eq!(value, "-3");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn fractional_count_is_rejected() {
        let csv = "nationalite,annee,iterations\nBelge,2015,1.5\n";
        assert!(matches!(load_error(csv), LoadError::InvalidCount { .. }));
    }

    #[test]
    fn empty_nationality_is_rejected() {
        let csv = "nationalite,annee,iterations\n,2015,1\n";
        assert!(matches!(
            load_error(csv),
            LoadError::EmptyValue { column: "nationalite", line: 2, .. }
        ));
    }

    #[test]
    fn empty_count_names_the_matched_column() {
        let csv = "nationalite,annee,nombre_dirigeants\nBelge,2015,\n";
        match load_error(csv) {
            LoadError::EmptyValue { column, line, .. } => {
                assert_eq!(column, "nombre_dirigeants");
                assert_eq!(line, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn ragged_row_is_a_csv_error() {
        let csv = "nationalite,annee,iterations\nBelge,2015\n";
        assert!(matches!(load_error(csv), LoadError::Csv { .. }));
    }

    #[test]
    fn failed_load_keeps_nothing() {
        let db = Database::new().unwrap();
        let csv = "nationalite,annee,iterations\nBelge,2015,10\nBelge,2016,oops\n";
        assert!(db.load_dataset(DatasetKind::Tout, csv).is_err());
        assert!(db.query_records(DatasetKind::Tout).unwrap().is_empty());
    }

    #[test]
    fn reloading_replaces_previous_rows() {
        let db = Database::new().unwrap();
        db.load_dataset(DatasetKind::Tout, "nationalite,annee,iterations\nBelge,2015,10\n")
            .unwrap();
        db.load_dataset(DatasetKind::Tout, "nationalite,annee,iterations\nSuisse,2015,3\n")
            .unwrap();
        assert_eq!(db.query_nationalities(DatasetKind::Tout).unwrap(), vec!["Suisse"]);
    }

    #[test]
    fn datasets_are_kept_apart() {
        let db = Database::new().unwrap();
        db.load_dataset(DatasetKind::Auto, "nationalite,annee,iterations\nBelge,2015,10\n")
            .unwrap();
        db.load_dataset(DatasetKind::Societe, "nationalite,annee,iterations\nSuisse,2015,3\n")
            .unwrap();
        assert_eq!(db.query_nationalities(DatasetKind::Auto).unwrap(), vec!["Belge"]);
        assert_eq!(db.query_nationalities(DatasetKind::Societe).unwrap(), vec!["Suisse"]);
        assert!(db.query_nationalities(DatasetKind::Tout).unwrap().is_empty());
    }
}
