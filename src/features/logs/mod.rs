//! # Medical Log Book
//!
//! Append-only health log entries (symptoms, medication, checkups),
//! presented newest first and mirrored to the local snapshot store on
//! every mutation. Entries are never edited in place.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

use chrono::{NaiveDate, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::storage::{keys, LocalStore};

/// Category of a log entry. Wire field is `type` with the legacy names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogKind {
    Symptom,
    Medicine,
    Checkup,
    Other,
}

impl LogKind {
    pub fn label(&self) -> &'static str {
        match self {
            LogKind::Symptom => "Symptom",
            LogKind::Medicine => "Medicine",
            LogKind::Checkup => "Checkup",
            LogKind::Other => "Other",
        }
    }

    pub fn all() -> &'static [LogKind] {
        &[LogKind::Symptom, LogKind::Medicine, LogKind::Checkup, LogKind::Other]
    }
}

/// Subjective severity of the logged event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Critical => "Critical",
        }
    }

    pub fn all() -> &'static [Severity] {
        &[Severity::Low, Severity::Medium, Severity::High, Severity::Critical]
    }
}

/// One immutable health log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthLog {
    pub id: String,
    pub user_id: String,
    /// Calendar day of the event, no time component.
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: LogKind,
    pub title: String,
    pub description: String,
    pub severity: Severity,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

/// Newest-first log collection owned by one signed-in profile.
pub struct LogBook {
    entries: Vec<HealthLog>,
    owner: String,
    store: LocalStore,
}

impl LogBook {
    /// Load the persisted snapshot for `owner`; absent or malformed
    /// snapshots start empty.
    pub fn load(store: LocalStore, owner: &str) -> Self {
        let entries = store.load::<Vec<HealthLog>>(keys::HEALTH_LOGS).unwrap_or_default();
        info!("loaded {} health log(s)", entries.len());
        LogBook {
            entries,
            owner: owner.to_string(),
            store,
        }
    }

    /// Append a new entry at the front (newest-first order).
    pub fn add(
        &mut self,
        date: NaiveDate,
        kind: LogKind,
        title: &str,
        description: &str,
        severity: Severity,
    ) -> HealthLog {
        let entry = HealthLog {
            id: Uuid::new_v4().to_string(),
            user_id: self.owner.clone(),
            date,
            kind,
            title: title.to_string(),
            description: description.to_string(),
            severity,
            created_at: Utc::now().to_rfc3339(),
        };
        self.entries.insert(0, entry.clone());
        self.persist();
        info!("added health log '{}'", entry.title);
        entry
    }

    /// Remove the entry if present. Idempotent.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|l| l.id != id);
        if self.entries.len() == before {
            return false;
        }
        self.persist();
        true
    }

    /// Entries newest first.
    pub fn list(&self) -> &[HealthLog] {
        &self.entries
    }

    fn persist(&self) {
        if let Err(e) = self.store.save(keys::HEALTH_LOGS, &self.entries) {
            warn!("failed to persist health log snapshot: {:#}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, LocalStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();
        (dir, store)
    }

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_starts_empty_without_snapshot() {
        let (_dir, store) = temp_store();
        let logs = LogBook::load(store, "u-1");
        assert!(logs.list().is_empty());
    }

    #[test]
    fn test_add_prepends_newest_first() {
        let (_dir, store) = temp_store();
        let mut logs = LogBook::load(store, "u-1");
        logs.add(day("2024-03-01"), LogKind::Symptom, "Headache", "dull", Severity::Low);
        logs.add(day("2024-03-02"), LogKind::Medicine, "Aspirin", "500mg", Severity::Medium);

        assert_eq!(logs.list().len(), 2);
        assert_eq!(logs.list()[0].title, "Aspirin");
        assert_eq!(logs.list()[1].title, "Headache");
        assert_eq!(logs.list()[0].user_id, "u-1");
        assert!(!logs.list()[0].created_at.is_empty());
    }

    #[test]
    fn test_delete_is_idempotent() {
        let (_dir, store) = temp_store();
        let mut logs = LogBook::load(store, "u-1");
        let entry = logs.add(day("2024-03-01"), LogKind::Checkup, "Annual", "", Severity::Low);

        assert!(logs.delete(&entry.id));
        assert!(!logs.delete(&entry.id));
        assert!(logs.list().is_empty());
    }

    #[test]
    fn test_snapshot_round_trips() {
        let (_dir, store) = temp_store();
        let mut logs = LogBook::load(store.clone(), "u-1");
        logs.add(day("2024-03-01"), LogKind::Other, "Slept badly", "4 hours", Severity::High);
        let expected: Vec<HealthLog> = logs.list().to_vec();

        let reloaded = LogBook::load(store, "u-1");
        assert_eq!(reloaded.list(), expected.as_slice());
    }

    #[test]
    fn test_wire_format_uses_legacy_names() {
        let entry = HealthLog {
            id: "l1".into(),
            user_id: "u-1".into(),
            date: day("2024-03-01"),
            kind: LogKind::Symptom,
            title: "Headache".into(),
            description: String::new(),
            severity: Severity::Critical,
            created_at: "2024-03-01T10:00:00Z".into(),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "symptom");
        assert_eq!(json["severity"], "critical");
        assert_eq!(json["date"], "2024-03-01");
    }
}
