//! The three named datasets and their selector tokens.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the three pre-aggregated filing datasets.
///
/// The token (`auto`, `societe`, `tout`) is what the dataset radio control
/// emits and what the CLI and HTTP API accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetKind {
    /// Filings by auto-entrepreneurs.
    Auto,
    /// Filings by companies.
    Societe,
    /// Both populations combined.
    #[default]
    Tout,
}

impl DatasetKind {
    /// All datasets, in the order the radio control lists them.
    pub const ALL: [DatasetKind; 3] = [DatasetKind::Auto, DatasetKind::Societe, DatasetKind::Tout];

    /// Selector token stored in the database and emitted by the UI.
    pub fn token(self) -> &'static str {
        match self {
            DatasetKind::Auto => "auto",
            DatasetKind::Societe => "societe",
            DatasetKind::Tout => "tout",
        }
    }

    /// Human-readable label used as chart title prefix and radio label.
    pub fn label(self) -> &'static str {
        match self {
            DatasetKind::Auto => "Auto-entrepreneurs",
            DatasetKind::Societe => "Sociétés",
            DatasetKind::Tout => "Tout confondu",
        }
    }

    /// Conventional file name of the dataset's CSV export.
    pub fn file_name(self) -> &'static str {
        match self {
            DatasetKind::Auto => "data-auto-entreprise-nationalite.csv",
            DatasetKind::Societe => "data-societe-nationalite.csv",
            DatasetKind::Tout => "data-tout-confondu-nationalite.csv",
        }
    }

    /// URL path under which `nat-cli serve` exposes the loaded CSV text.
    pub fn served_path(self) -> String {
        format!("/data/{}", self.file_name())
    }

    /// Dataset whose CSV is exposed at `path`, if any.
    pub fn from_served_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.served_path() == path)
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.token() == token)
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Returned when a selector token names none of the three datasets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDataset(pub String);

impl fmt::Display for UnknownDataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown dataset '{}' (expected one of: auto, societe, tout)",
            self.0
        )
    }
}

impl std::error::Error for UnknownDataset {}

impl FromStr for DatasetKind {
    type Err = UnknownDataset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s.trim()).ok_or_else(|| UnknownDataset(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_round_trip() {
        for kind in DatasetKind::ALL {
            assert_eq!(DatasetKind::from_token(kind.token()), Some(kind));
            assert_eq!(kind.to_string().parse::<DatasetKind>(), Ok(kind));
        }
    }

    #[test]
    fn default_is_combined_dataset() {
        assert_eq!(DatasetKind::default(), DatasetKind::Tout);
    }

    #[test]
    fn labels_are_stable() {
        assert_eq!(DatasetKind::Auto.label(), "Auto-entrepreneurs");
        assert_eq!(DatasetKind::Societe.label(), "Sociétés");
        assert_eq!(DatasetKind::Tout.label(), "Tout confondu");
    }

    #[test]
    fn unknown_token_is_rejected() {
        let err = "everything".parse::<DatasetKind>().unwrap_err();
        assert_eq!(err, UnknownDataset("everything".to_string()));
        assert!(err.to_string().contains("auto, societe, tout"));
    }

    #[test]
    fn served_paths_map_back_to_datasets() {
        assert_eq!(
            DatasetKind::Societe.served_path(),
            "/data/data-societe-nationalite.csv"
        );
        for kind in DatasetKind::ALL {
            assert_eq!(DatasetKind::from_served_path(&kind.served_path()), Some(kind));
        }
        assert_eq!(DatasetKind::from_served_path("/data/other.csv"), None);
    }

    #[test]
    fn serializes_as_token() {
        let json = serde_json::to_string(&DatasetKind::Societe).unwrap();
        assert_eq!(json, "\"societe\"");
    }
}
