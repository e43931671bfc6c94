//! SQL schema for the in-memory filings store.
//!
//! All three datasets share one table, partitioned by the `dataset` column
//! which holds the selector token (`auto`, `societe`, `tout`).

/// Returns the full SQL schema as a single batch string.
///
/// `filings` holds one row per CSV record. `(dataset, nationality, year)` is
/// not unique: a duplicated pair is kept and counted by the averages.
///
/// `year` is stored as TEXT so years stay discrete categories; queries order
/// them with `CAST(year AS INTEGER), year`.
pub fn create_schema() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS filings (
        dataset TEXT NOT NULL,
        nationality TEXT NOT NULL,
        year TEXT NOT NULL,
        iteration_count INTEGER NOT NULL CHECK (iteration_count >= 0)
    );
    CREATE INDEX IF NOT EXISTS idx_filings_dataset ON filings(dataset);
    CREATE INDEX IF NOT EXISTS idx_filings_dataset_nationality ON filings(dataset, nationality);
    "#
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    fn object_exists(conn: &Connection, kind: &str, name: &str) -> bool {
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = ?1 AND name = ?2",
                [kind, name],
                |row| row.get(0),
            )
            .unwrap();
        count == 1
    }

    #[test]
    fn schema_creates_table_and_indexes() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(create_schema())
            .expect("Schema SQL should be valid");

        assert!(object_exists(&conn, "table", "filings"));
        assert!(object_exists(&conn, "index", "idx_filings_dataset"));
        assert!(object_exists(&conn, "index", "idx_filings_dataset_nationality"));
    }

    #[test]
    fn schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(create_schema()).unwrap();
        conn.execute_batch(create_schema())
            .expect("Applying schema twice should succeed due to IF NOT EXISTS");
    }

    #[test]
    fn negative_counts_are_rejected_by_the_table() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(create_schema()).unwrap();
        let result = conn.execute(
            "INSERT INTO filings (dataset, nationality, year, iteration_count)
             VALUES ('tout', 'Belge', '2015', -1)",
            [],
        );
        assert!(result.is_err());
    }
}
