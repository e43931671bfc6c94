//! Loading the three dataset files from disk.

use crate::DataArgs;
use anyhow::Context;
use log::info;
use nat_data::Dashboard;
use nat_db::{Database, DatasetKind};
use std::path::PathBuf;

impl DataArgs {
    /// Path of the CSV file for `kind`: the explicit override if given,
    /// else the conventional file name inside `data_dir`.
    pub fn path_for(&self, kind: DatasetKind) -> PathBuf {
        let explicit = match kind {
            DatasetKind::Auto => &self.auto_csv,
            DatasetKind::Societe => &self.societe_csv,
            DatasetKind::Tout => &self.tout_csv,
        };
        explicit
            .clone()
            .unwrap_or_else(|| self.data_dir.join(kind.file_name()))
    }
}

/// The loaded database plus the CSV text each dataset was loaded from.
#[derive(Debug)]
pub struct LoadedData {
    pub database: Database,
    pub csv: Vec<(DatasetKind, String)>,
}

/// Read and load all three datasets. Fails on the first unreadable or
/// malformed file.
pub fn load_data(args: &DataArgs) -> anyhow::Result<LoadedData> {
    let database = Database::new()?;
    let mut csv = Vec::with_capacity(DatasetKind::ALL.len());
    for kind in DatasetKind::ALL {
        let path = args.path_for(kind);
        let csv_data = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {} dataset from {}", kind, path.display()))?;
        let count = database
            .load_dataset(kind, &csv_data)
            .with_context(|| format!("Invalid data in {}", path.display()))?;
        info!("Loaded {} records from {}", count, path.display());
        csv.push((kind, csv_data));
    }
    Ok(LoadedData { database, csv })
}

pub fn load_database(args: &DataArgs) -> anyhow::Result<Database> {
    Ok(load_data(args)?.database)
}

pub fn load_dashboard(args: &DataArgs) -> anyhow::Result<Dashboard> {
    Ok(Dashboard::new(load_database(args)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const CSV: &str = "nationalite,annee,iterations\nBelge,2015,10\nBelge,2016,20\n";

    fn args_for(dir: &TempDir) -> DataArgs {
        DataArgs {
            data_dir: dir.path().to_path_buf(),
            auto_csv: None,
            societe_csv: None,
            tout_csv: None,
        }
    }

    fn write_all(dir: &TempDir) {
        for kind in DatasetKind::ALL {
            fs::write(dir.path().join(kind.file_name()), CSV).unwrap();
        }
    }

    #[test]
    fn test_path_for_uses_data_dir_and_overrides() {
        let mut args = DataArgs {
            data_dir: PathBuf::from("data"),
            auto_csv: None,
            societe_csv: None,
            tout_csv: None,
        };
        assert_eq!(
            args.path_for(DatasetKind::Societe),
            PathBuf::from("data/data-societe-nationalite.csv")
        );
        args.societe_csv = Some(PathBuf::from("/tmp/s.csv"));
        assert_eq!(args.path_for(DatasetKind::Societe), PathBuf::from("/tmp/s.csv"));
    }

    #[test]
    fn test_load_all_datasets() {
        let dir = TempDir::new().unwrap();
        write_all(&dir);
        let db = load_database(&args_for(&dir)).unwrap();
        for kind in DatasetKind::ALL {
            assert_eq!(db.query_records(kind).unwrap().len(), 2);
        }
    }

    #[test]
    fn test_load_data_keeps_file_text() {
        let dir = TempDir::new().unwrap();
        write_all(&dir);
        let loaded = load_data(&args_for(&dir)).unwrap();
        let kinds: Vec<DatasetKind> = loaded.csv.iter().map(|(k, _)| *k).collect();
        assert_eq!(kinds, DatasetKind::ALL.to_vec());
        assert!(loaded.csv.iter().all(|(_, text)| text == CSV));
    }

    #[test]
    fn test_missing_file_names_path() {
        let dir = TempDir::new().unwrap();
        write_all(&dir);
        fs::remove_file(dir.path().join(DatasetKind::Tout.file_name())).unwrap();

        let err = load_database(&args_for(&dir)).unwrap_err();
        let msg = format!("{:#}", err);
        assert!(msg.contains("data-tout-confondu-nationalite.csv"), "got: {msg}");
    }

    #[test]
    fn test_malformed_file_fails() {
        let dir = TempDir::new().unwrap();
        write_all(&dir);
        fs::write(
            dir.path().join(DatasetKind::Auto.file_name()),
            "nationalite,annee,iterations\nBelge,2015,beaucoup\n",
        )
        .unwrap();

        let err = load_database(&args_for(&dir)).unwrap_err();
        let msg = format!("{:#}", err);
        assert!(msg.contains("Invalid data in"), "got: {msg}");
        assert!(msg.contains("line 2"), "got: {msg}");
    }
}
