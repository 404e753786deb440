//! Local match storage.
//!
//! Matches live in a single JSONL file under the data directory, one record
//! per line. The store is the only writer; analytics read full snapshots.

mod jsonl;
mod match_store;

pub use jsonl::*;
pub use match_store::*;

use std::path::PathBuf;
use thiserror::Error;

use crate::models::MatchId;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Match already stored: {0}")]
    DuplicateId(MatchId),
}

/// Configuration for storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// File holding every recorded match.
    pub fn matches_path(&self) -> PathBuf {
        self.data_dir.join("matches.jsonl")
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_config_paths() {
        let config = StorageConfig::new(PathBuf::from("/data"));
        assert_eq!(config.matches_path(), PathBuf::from("/data/matches.jsonl"));
    }

    #[test]
    fn test_storage_config_default() {
        let config = StorageConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("./data"));
    }

    #[test]
    fn test_duplicate_error_message() {
        let err = StorageError::DuplicateId(MatchId::from("m-1"));
        assert_eq!(err.to_string(), "Match already stored: m-1");
    }
}
