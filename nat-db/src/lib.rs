//! In-memory SQLite store for the nationality filings datasets.
//!
//! The three CSV exports (auto-entrepreneurs, companies, combined) are loaded
//! once into a single in-memory SQLite table and queried read-only afterwards.
//! Grouping, averaging and top-N selection are plain SQL.
//!
//! # Architecture
//!
//! - `Rc<RefCell<Connection>>` wrapper, cheap to clone, single-threaded
//!   (WASM UI thread or one `LocalSet` on the native server)
//! - CSV text is handed in by the caller: embedded with `include_str!` in the
//!   web app, read from disk by the CLI
//! - Typed query methods returning serializable structs
//!
//! # Usage
//!
//! ```rust
//! use nat_db::{Database, DatasetKind};
//!
//! let db = Database::new().unwrap();
//! db.load_dataset(DatasetKind::Tout, "nationalite,annee,iterations\nBelge,2015,10\nBelge,2016,20\n").unwrap();
//!
//! let names = db.query_nationalities(DatasetKind::Tout).unwrap();
//! assert_eq!(names, vec!["Belge"]);
//! let top = db.query_top_nationalities(DatasetKind::Tout, 5).unwrap();
//! assert!((top[0].mean - 15.0).abs() < 1e-9);
//! ```

pub mod dataset;
pub mod error;
mod loader;
pub mod models;
mod queries;
pub mod schema;

pub use dataset::{DatasetKind, UnknownDataset};
pub use error::LoadError;

use rusqlite::Connection;
use std::cell::RefCell;
use std::rc::Rc;

/// In-memory SQLite database holding all three datasets.
///
/// Clones share the same connection.
#[derive(Clone, Debug)]
pub struct Database {
    conn: Rc<RefCell<Connection>>,
}

impl Database {
    /// Create a new, empty in-memory database with the schema applied.
    pub fn new() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(schema::create_schema())?;
        Ok(Self {
            conn: Rc::new(RefCell::new(conn)),
        })
    }

    /// Create a database and load every dataset from `sources`.
    ///
    /// Fails on the first dataset that does not load.
    pub fn from_sources<'a, I>(sources: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (DatasetKind, &'a str)>,
    {
        let db = Self::new()?;
        for (dataset, csv_data) in sources {
            db.load_dataset(dataset, csv_data)?;
        }
        Ok(db)
    }
}
