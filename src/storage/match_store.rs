//! Record store for matches.

use tracing::info;

use super::{JsonlReader, JsonlWriter, StorageConfig, StorageError};
use crate::models::{Match, MatchId};

/// Source of truth for recorded matches.
///
/// `list` always returns a full snapshot, newest date first; callers
/// recompute analytics from it after every change.
pub trait MatchStore: Send + Sync {
    /// All matches, newest date first.
    fn list(&self) -> Result<Vec<Match>, StorageError>;

    /// Store a new match. Fails if the id is already present.
    fn append(&self, record: Match) -> Result<(), StorageError>;

    /// Remove a match by id; returns whether anything was removed.
    fn delete(&self, id: &MatchId) -> Result<bool, StorageError>;

    fn get(&self, id: &MatchId) -> Result<Option<Match>, StorageError> {
        Ok(self.list()?.into_iter().find(|m| &m.id == id))
    }
}

/// Match store backed by `<data_dir>/matches.jsonl`.
///
/// Records are appended in insertion order; `list` reverses that so the
/// latest entry wins ties on the same date.
pub struct LocalMatchStore {
    reader: JsonlReader<Match>,
    writer: JsonlWriter<Match>,
}

impl LocalMatchStore {
    pub fn new(config: &StorageConfig) -> Self {
        let path = config.matches_path();
        Self {
            reader: JsonlReader::new(path.clone()),
            writer: JsonlWriter::new(path),
        }
    }

    /// Records in file (insertion) order.
    fn read_raw(&self) -> Result<Vec<Match>, StorageError> {
        self.reader.read_all()
    }
}

/// Newest date first; equal dates keep the given order.
fn sort_newest_first(matches: &mut [Match]) {
    matches.sort_by(|a, b| b.date.cmp(&a.date));
}

impl MatchStore for LocalMatchStore {
    fn list(&self) -> Result<Vec<Match>, StorageError> {
        let mut matches = self.read_raw()?;
        matches.reverse();
        sort_newest_first(&mut matches);
        Ok(matches)
    }

    fn append(&self, record: Match) -> Result<(), StorageError> {
        if self.read_raw()?.iter().any(|m| m.id == record.id) {
            return Err(StorageError::DuplicateId(record.id));
        }

        self.writer.append(&record)?;
        info!(
            "Recorded match {} vs {} ({})",
            record.id, record.opponent, record.date
        );
        Ok(())
    }

    fn delete(&self, id: &MatchId) -> Result<bool, StorageError> {
        if !self.reader.exists() {
            return Ok(false);
        }

        // works on raw lines so records this build cannot decode survive
        let lines = self.reader.read_lines()?;
        let before = lines.len();
        let kept: Vec<String> = lines
            .into_iter()
            .filter(|line| stored_id(line).as_deref() != Some(id.as_str()))
            .collect();

        if kept.len() == before {
            return Ok(false);
        }

        self.writer.write_lines(&kept)?;
        info!("Deleted match {} from {:?}", id, self.reader.path());
        Ok(true)
    }
}

/// The `id` of a stored line, if it is a JSON object carrying one.
fn stored_id(line: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(line).ok()?;
    value.get("id")?.as_str().map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Draft, Side};
    use tempfile::TempDir;

    fn store(temp_dir: &TempDir) -> LocalMatchStore {
        LocalMatchStore::new(&StorageConfig::new(temp_dir.path().to_path_buf()))
    }

    fn record(id: &str, date: &str) -> Match {
        Match::new(
            MatchId::from(id),
            date,
            "ONIC",
            Draft::from_heroes(["Layla", "Paquito", "Ling", "Lunox", "Angela"]),
            Draft::from_heroes(["Moskov", "Yu Zhong", "Fanny", "Valentina", "Tigreal"]),
            Side::Own,
        )
    }

    fn ids(matches: &[Match]) -> Vec<&str> {
        matches.iter().map(|m| m.id.as_str()).collect()
    }

    #[test]
    fn test_empty_store_lists_nothing() {
        let temp_dir = TempDir::new().unwrap();
        assert!(store(&temp_dir).list().unwrap().is_empty());
    }

    #[test]
    fn test_list_newest_date_first() {
        let temp_dir = TempDir::new().unwrap();
        let store = store(&temp_dir);

        store.append(record("a", "2025-01-02")).unwrap();
        store.append(record("b", "2025-03-01")).unwrap();
        store.append(record("c", "2025-01-02")).unwrap();
        store.append(record("d", "2024-12-31")).unwrap();

        // same-date entries: later insert first
        assert_eq!(ids(&store.list().unwrap()), vec!["b", "c", "a", "d"]);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let store = store(&temp_dir);

        store.append(record("a", "2025-01-01")).unwrap();
        let err = store.append(record("a", "2025-01-05")).unwrap_err();

        assert!(matches!(err, StorageError::DuplicateId(id) if id.as_str() == "a"));
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn test_delete_by_id() {
        let temp_dir = TempDir::new().unwrap();
        let store = store(&temp_dir);

        store.append(record("a", "2025-01-01")).unwrap();
        store.append(record("b", "2025-01-02")).unwrap();

        assert!(store.delete(&MatchId::from("a")).unwrap());
        assert!(!store.delete(&MatchId::from("a")).unwrap());
        assert_eq!(ids(&store.list().unwrap()), vec!["b"]);
    }

    #[test]
    fn test_delete_keeps_unreadable_lines() {
        let temp_dir = TempDir::new().unwrap();
        let store = store(&temp_dir);
        store.append(record("a", "2025-01-01")).unwrap();
        store.append(record("b", "2025-01-02")).unwrap();

        let path = temp_dir.path().join("matches.jsonl");
        let legacy = r#"{"id":"legacy","winner":"Draw"}"#;
        let mut contents = std::fs::read_to_string(&path).unwrap();
        contents.push_str(legacy);
        contents.push_str("\nnot-json\n");
        std::fs::write(&path, contents).unwrap();

        assert!(store.delete(&MatchId::from("a")).unwrap());

        let lines: Vec<String> = std::fs::read_to_string(&path)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("\"id\":\"b\""));
        assert_eq!(lines[1], legacy);
        assert_eq!(lines[2], "not-json");
        assert_eq!(ids(&store.list().unwrap()), vec!["b"]);
    }

    #[test]
    fn test_delete_on_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        assert!(!store(&temp_dir).delete(&MatchId::from("x")).unwrap());
    }

    #[test]
    fn test_get() {
        let temp_dir = TempDir::new().unwrap();
        let store = store(&temp_dir);
        store.append(record("a", "2025-01-01")).unwrap();

        let found = store.get(&MatchId::from("a")).unwrap().unwrap();
        assert_eq!(found.opponent, "ONIC");
        assert!(store.get(&MatchId::from("zzz")).unwrap().is_none());
    }

    #[test]
    fn test_persists_across_instances() {
        let temp_dir = TempDir::new().unwrap();
        store(&temp_dir).append(record("a", "2025-01-01")).unwrap();

        let reopened = store(&temp_dir);
        assert_eq!(ids(&reopened.list().unwrap()), vec!["a"]);
    }
}
