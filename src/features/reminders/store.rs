//! # Reminder Store
//!
//! In-memory ordered collection of reminder records, mirrored to the
//! local snapshot store on every mutation. Insertion order is preserved;
//! mutations are limited to toggling the active flag and deletion.

use anyhow::{bail, Result};
use log::{info, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use uuid::Uuid;

use crate::storage::{keys, LocalStore};

/// What a reminder is nagging about.
///
/// Serialized with the legacy wire names so existing snapshots keep
/// loading (`water` / `medicine` under the `type` field).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReminderKind {
    #[serde(rename = "water")]
    Hydration,
    #[serde(rename = "medicine")]
    Medication,
}

impl ReminderKind {
    pub fn label(&self) -> &'static str {
        match self {
            ReminderKind::Hydration => "Hydration",
            ReminderKind::Medication => "Medication",
        }
    }

    /// Body text for a raised alert.
    pub fn alert_body(&self) -> &'static str {
        match self {
            ReminderKind::Hydration => "Time to drink a glass of water!",
            ReminderKind::Medication => "It's time for your scheduled medication.",
        }
    }
}

/// A scheduled daily alert definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub kind: ReminderKind,
    pub title: String,
    /// Time of day, `HH:MM`, 24-hour, local wall clock. Always valid.
    pub time: String,
    /// Accepted and displayed, but not consumed by tick matching.
    pub interval_minutes: u32,
    pub is_active: bool,
}

/// Syntactic `HH:MM` check (24-hour, zero-padded).
pub fn is_valid_time(time: &str) -> bool {
    static TIME_RE: OnceLock<Regex> = OnceLock::new();
    TIME_RE
        .get_or_init(|| Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$").expect("time pattern"))
        .is_match(time)
}

/// Ordered reminder collection owned by one signed-in profile.
pub struct ReminderStore {
    entries: Vec<Reminder>,
    owner: String,
    store: LocalStore,
}

impl ReminderStore {
    /// Load the persisted snapshot for `owner`, or seed the default
    /// hydration reminder when the snapshot is absent or malformed.
    pub fn load(store: LocalStore, owner: &str) -> Self {
        let entries = store
            .load::<Vec<Reminder>>(keys::REMINDERS)
            .unwrap_or_else(|| vec![Self::seed_reminder(owner)]);
        info!("loaded {} reminder(s)", entries.len());
        ReminderStore {
            entries,
            owner: owner.to_string(),
            store,
        }
    }

    fn seed_reminder(owner: &str) -> Reminder {
        Reminder {
            id: Uuid::new_v4().to_string(),
            user_id: owner.to_string(),
            kind: ReminderKind::Hydration,
            title: "Daily Hydration".to_string(),
            time: "09:00".to_string(),
            interval_minutes: 60,
            is_active: true,
        }
    }

    /// Create a new reminder. `time` must be a valid `HH:MM` string;
    /// duplicates of existing time/title pairs are accepted.
    pub fn add(
        &mut self,
        kind: ReminderKind,
        title: &str,
        time: &str,
        interval_minutes: u32,
    ) -> Result<Reminder> {
        if !is_valid_time(time) {
            bail!("invalid time '{}': expected HH:MM (24-hour)", time);
        }
        let reminder = Reminder {
            id: Uuid::new_v4().to_string(),
            user_id: self.owner.clone(),
            kind,
            title: title.to_string(),
            time: time.to_string(),
            interval_minutes,
            is_active: true,
        };
        self.entries.push(reminder.clone());
        self.persist();
        info!("added reminder '{}' at {}", reminder.title, reminder.time);
        Ok(reminder)
    }

    /// Flip the active flag. Returns false (no-op) for unknown ids.
    pub fn toggle(&mut self, id: &str) -> bool {
        match self.entries.iter_mut().find(|r| r.id == id) {
            Some(reminder) => {
                reminder.is_active = !reminder.is_active;
                self.persist();
                true
            }
            None => false,
        }
    }

    /// Remove the reminder if present. Idempotent.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|r| r.id != id);
        if self.entries.len() == before {
            return false;
        }
        self.persist();
        true
    }

    /// Current snapshot in insertion order.
    pub fn list(&self) -> &[Reminder] {
        &self.entries
    }

    /// Full snapshot write. A failed write leaves memory and disk
    /// diverged until the next successful mutation.
    fn persist(&self) {
        if let Err(e) = self.store.save(keys::REMINDERS, &self.entries) {
            warn!("failed to persist reminders snapshot: {:#}", e);
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

    #[test]
    fn test_seeds_default_when_snapshot_absent() {
        let (_dir, store) = temp_store();
        let reminders = ReminderStore::load(store, "u-1");
        assert_eq!(reminders.list().len(), 1);
        let seed = &reminders.list()[0];
        assert_eq!(seed.kind, ReminderKind::Hydration);
        assert_eq!(seed.time, "09:00");
        assert!(seed.is_active);
    }

    #[test]
    fn test_seeds_default_when_snapshot_malformed() {
        let (dir, store) = temp_store();
        std::fs::write(dir.path().join("reminders.json"), "[{broken").unwrap();
        let reminders = ReminderStore::load(store, "u-1");
        assert_eq!(reminders.list().len(), 1);
        assert_eq!(reminders.list()[0].time, "09:00");
    }

    #[test]
    fn test_add_grows_list_with_generated_id() {
        let (_dir, store) = temp_store();
        let mut reminders = ReminderStore::load(store, "u-1");
        let before = reminders.list().len();

        let added = reminders
            .add(ReminderKind::Medication, "Aspirin", "14:30", 0)
            .unwrap();

        assert_eq!(reminders.list().len(), before + 1);
        assert!(!added.id.is_empty());
        assert!(added.is_active);
        assert_eq!(added.user_id, "u-1");
        assert_eq!(reminders.list().last().unwrap().id, added.id);
    }

    #[test]
    fn test_add_rejects_invalid_time() {
        let (_dir, store) = temp_store();
        let mut reminders = ReminderStore::load(store, "u-1");
        for bad in ["24:00", "9:00", "12:60", "noon", "", "12:5", "12:345"] {
            assert!(
                reminders.add(ReminderKind::Hydration, "x", bad, 0).is_err(),
                "accepted '{}'",
                bad
            );
        }
    }

    #[test]
    fn test_add_accepts_duplicates() {
        let (_dir, store) = temp_store();
        let mut reminders = ReminderStore::load(store, "u-1");
        reminders.add(ReminderKind::Hydration, "Drink", "10:00", 0).unwrap();
        reminders.add(ReminderKind::Hydration, "Drink", "10:00", 0).unwrap();
        let dupes: Vec<_> = reminders.list().iter().filter(|r| r.time == "10:00").collect();
        assert_eq!(dupes.len(), 2);
        assert_ne!(dupes[0].id, dupes[1].id);
    }

    #[test]
    fn test_toggle_twice_restores_state() {
        let (_dir, store) = temp_store();
        let mut reminders = ReminderStore::load(store, "u-1");
        let id = reminders.list()[0].id.clone();
        let original = reminders.list()[0].is_active;

        assert!(reminders.toggle(&id));
        assert_eq!(reminders.list()[0].is_active, !original);
        assert!(reminders.toggle(&id));
        assert_eq!(reminders.list()[0].is_active, original);
    }

    #[test]
    fn test_toggle_unknown_id_is_noop() {
        let (_dir, store) = temp_store();
        let mut reminders = ReminderStore::load(store, "u-1");
        assert!(!reminders.toggle("nope"));
    }

    #[test]
    fn test_delete_is_idempotent() {
        let (_dir, store) = temp_store();
        let mut reminders = ReminderStore::load(store, "u-1");
        let id = reminders.list()[0].id.clone();

        assert!(reminders.delete(&id));
        assert!(reminders.list().is_empty());
        assert!(!reminders.delete(&id));
        assert!(reminders.list().is_empty());
    }

    #[test]
    fn test_delete_unknown_id_leaves_collection_unchanged() {
        let (_dir, store) = temp_store();
        let mut reminders = ReminderStore::load(store, "u-1");
        let snapshot: Vec<Reminder> = reminders.list().to_vec();
        assert!(!reminders.delete("missing"));
        assert_eq!(reminders.list(), snapshot.as_slice());
    }

    #[test]
    fn test_persisted_snapshot_round_trips() {
        let (_dir, store) = temp_store();
        let mut reminders = ReminderStore::load(store.clone(), "u-1");
        reminders.add(ReminderKind::Medication, "Aspirin", "14:30", 30).unwrap();
        let expected: Vec<Reminder> = reminders.list().to_vec();

        let reloaded = ReminderStore::load(store, "u-1");
        assert_eq!(reloaded.list(), expected.as_slice());
    }

    #[test]
    fn test_wire_format_uses_legacy_names() {
        let reminder = Reminder {
            id: "r1".into(),
            user_id: "u-1".into(),
            kind: ReminderKind::Hydration,
            title: "Daily Hydration".into(),
            time: "09:00".into(),
            interval_minutes: 60,
            is_active: true,
        };
        let json = serde_json::to_value(&reminder).unwrap();
        assert_eq!(json["type"], "water");
        assert_eq!(json["is_active"], true);
        assert_eq!(json["interval_minutes"], 60);
    }

    #[test]
    fn test_is_valid_time_boundaries() {
        assert!(is_valid_time("00:00"));
        assert!(is_valid_time("23:59"));
        assert!(is_valid_time("09:05"));
        assert!(!is_valid_time("24:00"));
        assert!(!is_valid_time("23:60"));
    }
}
