//! # Local Snapshot Store
//!
//! String-keyed JSON snapshot persistence over a local data directory.
//! Each key maps to a single `<dir>/<key>.json` file holding the full
//! serialized contents of one collection; every write replaces the whole
//! snapshot. A missing or malformed snapshot reads back as "no data" so
//! callers can fall back to their defaults.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

use anyhow::{Context, Result};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

/// Well-known snapshot keys.
pub mod keys {
    pub const HEALTH_LOGS: &str = "health_logs";
    pub const REMINDERS: &str = "reminders";
    pub const USER_PROFILE: &str = "user_profile";
}

/// Snapshot store rooted at a data directory.
///
/// Cloning is cheap; clones share the same directory.
#[derive(Debug, Clone)]
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    /// Open a store at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("creating data directory {}", dir.display()))?;
        Ok(LocalStore { dir })
    }

    /// Load the snapshot stored under `key`.
    ///
    /// Absent or malformed snapshots yield `None`; a parse failure is
    /// logged but never surfaced as an error.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.path_for(key);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) => {
                debug!("no snapshot for '{}': {}", key, e);
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("discarding malformed snapshot '{}': {}", key, e);
                None
            }
        }
    }

    /// Serialize `value` and replace the snapshot under `key`.
    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let path = self.path_for(key);
        let json = serde_json::to_string_pretty(value)
            .with_context(|| format!("serializing snapshot '{}'", key))?;
        fs::write(&path, json)
            .with_context(|| format!("writing snapshot {}", path.display()))?;
        debug!("persisted snapshot '{}'", key);
        Ok(())
    }

    /// Remove the snapshot under `key`. Idempotent.
    pub fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("removing snapshot {}", path.display())),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Entry {
        id: String,
        count: u32,
    }

    fn temp_store() -> (tempfile::TempDir, LocalStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();
        (dir, store)
    }

    #[test]
    fn test_save_load_round_trip() {
        let (_dir, store) = temp_store();
        let entries = vec![
            Entry { id: "a".into(), count: 1 },
            Entry { id: "b".into(), count: 2 },
        ];
        store.save("entries", &entries).unwrap();
        let loaded: Vec<Entry> = store.load("entries").unwrap();
        assert_eq!(loaded, entries);
    }

    #[test]
    fn test_absent_key_is_none() {
        let (_dir, store) = temp_store();
        let loaded: Option<Vec<Entry>> = store.load("missing");
        assert!(loaded.is_none());
    }

    #[test]
    fn test_malformed_snapshot_is_none() {
        let (dir, store) = temp_store();
        std::fs::write(dir.path().join("entries.json"), "{not json").unwrap();
        let loaded: Option<Vec<Entry>> = store.load("entries");
        assert!(loaded.is_none());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let (_dir, store) = temp_store();
        store.save("entries", &vec![Entry { id: "a".into(), count: 1 }]).unwrap();
        store.remove("entries").unwrap();
        store.remove("entries").unwrap();
        let loaded: Option<Vec<Entry>> = store.load("entries");
        assert!(loaded.is_none());
    }

    #[test]
    fn test_save_replaces_whole_snapshot() {
        let (_dir, store) = temp_store();
        store.save("entries", &vec![Entry { id: "a".into(), count: 1 }]).unwrap();
        store.save("entries", &vec![Entry { id: "b".into(), count: 2 }]).unwrap();
        let loaded: Vec<Entry> = store.load("entries").unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, "b");
    }
}
