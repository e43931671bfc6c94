//! Typed query methods over the filings table.
//!
//! All queries are scoped to one dataset and return structs from
//! [`crate::models`]. Years are ordered numerically when they parse as
//! integers and lexically otherwise (`ORDER BY CAST(year AS INTEGER), year`).

use crate::dataset::DatasetKind;
use crate::models::{DatasetSummary, FilingRecord, NationalityMean};
use crate::Database;
use rusqlite::{params, params_from_iter, OptionalExtension, Row};

fn filing_from_row(row: &Row<'_>) -> rusqlite::Result<FilingRecord> {
    let count: i64 = row.get(2)?;
    Ok(FilingRecord {
        nationality: row.get(0)?,
        year: row.get(1)?,
        // the table CHECK constraint keeps counts non-negative
        iteration_count: count.max(0) as u64,
    })
}

fn mean_from_row(row: &Row<'_>) -> rusqlite::Result<NationalityMean> {
    Ok(NationalityMean {
        nationality: row.get(0)?,
        mean: row.get(1)?,
        years: row.get(2)?,
    })
}

impl Database {
    /// Sorted, duplicate-free nationality names present in a dataset.
    pub fn query_nationalities(&self, dataset: DatasetKind) -> anyhow::Result<Vec<String>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT DISTINCT nationality FROM filings
             WHERE dataset = ?1
             ORDER BY nationality",
        )?;
        let rows = stmt
            .query_map(params![dataset.token()], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        log::info!(
            "[NAT] query: query_nationalities({}) returned {} names",
            dataset,
            rows.len()
        );
        Ok(rows)
    }

    /// Every record of a dataset, ordered by nationality then year.
    pub fn query_records(&self, dataset: DatasetKind) -> anyhow::Result<Vec<FilingRecord>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT nationality, year, iteration_count FROM filings
             WHERE dataset = ?1
             ORDER BY nationality, CAST(year AS INTEGER), year",
        )?;
        let rows = stmt
            .query_map(params![dataset.token()], filing_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "[NAT] query: query_records({}) returned {} records",
            dataset,
            rows.len()
        );
        Ok(rows)
    }

    /// Records whose nationality is one of `nationalities`, ordered by
    /// nationality then year. An empty slice matches nothing.
    pub fn query_records_for(
        &self,
        dataset: DatasetKind,
        nationalities: &[String],
    ) -> anyhow::Result<Vec<FilingRecord>> {
        if nationalities.is_empty() {
            return Ok(Vec::new());
        }
        let placeholders = vec!["?"; nationalities.len()].join(", ");
        let sql = format!(
            "SELECT nationality, year, iteration_count FROM filings
             WHERE dataset = ? AND nationality IN ({placeholders})
             ORDER BY nationality, CAST(year AS INTEGER), year"
        );

        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(&sql)?;
        let bound = std::iter::once(dataset.token()).chain(nationalities.iter().map(String::as_str));
        let rows = stmt
            .query_map(params_from_iter(bound), filing_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "[NAT] query: query_records_for({}, {} names) returned {} records",
            dataset,
            nationalities.len(),
            rows.len()
        );
        Ok(rows)
    }

    /// Mean filing count per nationality, highest mean first.
    ///
    /// Equal means are ordered alphabetically by nationality.
    pub fn query_nationality_means(&self, dataset: DatasetKind) -> anyhow::Result<Vec<NationalityMean>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT nationality, AVG(iteration_count) AS mean, COUNT(*) AS years
             FROM filings
             WHERE dataset = ?1
             GROUP BY nationality
             ORDER BY mean DESC, nationality",
        )?;
        let rows = stmt
            .query_map(params![dataset.token()], mean_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "[NAT] query: query_nationality_means({}) returned {} rows",
            dataset,
            rows.len()
        );
        Ok(rows)
    }

    /// The `limit` nationalities with the highest mean filing count.
    ///
    /// Same ordering as [`query_nationality_means`](Self::query_nationality_means);
    /// a limit above the number of nationalities returns all of them.
    pub fn query_top_nationalities(
        &self,
        dataset: DatasetKind,
        limit: usize,
    ) -> anyhow::Result<Vec<NationalityMean>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT nationality, AVG(iteration_count) AS mean, COUNT(*) AS years
             FROM filings
             WHERE dataset = ?1
             GROUP BY nationality
             ORDER BY mean DESC, nationality
             LIMIT ?2",
        )?;
        let rows = stmt
            .query_map(params![dataset.token(), limit], mean_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "[NAT] query: query_top_nationalities({}, {}) returned {} rows",
            dataset,
            limit,
            rows.len()
        );
        Ok(rows)
    }

    /// Record, nationality and year coverage of a dataset.
    pub fn query_summary(&self, dataset: DatasetKind) -> anyhow::Result<DatasetSummary> {
        let conn = self.conn.borrow();
        let (records, nationalities): (i64, i64) = conn.query_row(
            "SELECT COUNT(*), COUNT(DISTINCT nationality) FROM filings WHERE dataset = ?1",
            params![dataset.token()],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        let year_at = |direction: &str| -> rusqlite::Result<Option<String>> {
            let sql = format!(
                "SELECT year FROM filings WHERE dataset = ?1
                 ORDER BY CAST(year AS INTEGER) {direction}, year {direction}
                 LIMIT 1"
            );
            conn.query_row(&sql, params![dataset.token()], |row| row.get(0))
                .optional()
        };
        let first_year = year_at("ASC")?;
        let last_year = year_at("DESC")?;

        Ok(DatasetSummary {
            dataset,
            label: dataset.label().to_string(),
            records: records.max(0) as u64,
            nationalities: nationalities.max(0) as u64,
            first_year,
            last_year,
        })
    }
}
