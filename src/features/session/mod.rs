//! # Session Context
//!
//! Explicit session object owning the signed-in profile and both data
//! collections. There is no ambient process-wide state: the session is
//! created at sign-in (or resumed from the profile snapshot), passed to
//! whoever needs it, and torn down at sign-out.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

use anyhow::Result;
use chrono::Utc;
use log::info;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::features::logs::LogBook;
use crate::features::reminders::ReminderStore;
use crate::storage::{keys, LocalStore};

/// The signed-in user's identity record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub email: String,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// RFC 3339.
    pub updated_at: String,
}

/// One signed-in session: profile plus exclusively-owned collections.
pub struct Session {
    pub profile: Profile,
    pub reminders: ReminderStore,
    pub logs: LogBook,
    store: LocalStore,
}

impl Session {
    /// Resume a previous session from the persisted profile snapshot.
    pub fn resume(store: LocalStore) -> Option<Session> {
        let profile: Profile = store.load(keys::USER_PROFILE)?;
        info!("resumed session for {}", profile.email);
        Some(Self::open(store, profile))
    }

    /// Start a session from locally entered values, persisting a fresh
    /// profile snapshot.
    pub fn sign_in(
        store: LocalStore,
        full_name: &str,
        email: &str,
        avatar_url: Option<String>,
    ) -> Session {
        let profile = Profile {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            full_name: full_name.to_string(),
            avatar_url,
            updated_at: Utc::now().to_rfc3339(),
        };
        if let Err(e) = store.save(keys::USER_PROFILE, &profile) {
            log::warn!("failed to persist profile snapshot: {:#}", e);
        }
        info!("signed in as {}", profile.email);
        Self::open(store, profile)
    }

    fn open(store: LocalStore, profile: Profile) -> Session {
        let reminders = ReminderStore::load(store.clone(), &profile.id);
        let logs = LogBook::load(store.clone(), &profile.id);
        Session {
            profile,
            reminders,
            logs,
            store,
        }
    }

    /// Tear the session down. The profile snapshot is removed; the log
    /// and reminder snapshots stay on disk for the next sign-in.
    pub fn sign_out(self) -> Result<()> {
        info!("signing out {}", self.profile.email);
        self.store.remove(keys::USER_PROFILE)
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
    fn test_sign_in_persists_profile() {
        let (_dir, store) = temp_store();
        let session = Session::sign_in(store.clone(), "Sarah Jones", "sarah@example.com", None);
        assert!(!session.profile.id.is_empty());

        let stored: Profile = store.load(keys::USER_PROFILE).unwrap();
        assert_eq!(stored, session.profile);
    }

    #[test]
    fn test_resume_round_trips_profile() {
        let (_dir, store) = temp_store();
        let original = Session::sign_in(store.clone(), "Guest User", "guest@vitality.ai", None);
        let expected = original.profile.clone();

        let resumed = Session::resume(store).unwrap();
        assert_eq!(resumed.profile, expected);
    }

    #[test]
    fn test_resume_without_profile_is_none() {
        let (_dir, store) = temp_store();
        assert!(Session::resume(store).is_none());
    }

    #[test]
    fn test_sign_out_clears_profile_but_keeps_collections() {
        let (_dir, store) = temp_store();
        let mut session = Session::sign_in(store.clone(), "Sarah", "sarah@example.com", None);
        session
            .logs
            .add(
                chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                crate::features::logs::LogKind::Symptom,
                "Headache",
                "",
                crate::features::logs::Severity::Low,
            );

        session.sign_out().unwrap();

        let profile: Option<Profile> = store.load(keys::USER_PROFILE);
        assert!(profile.is_none());
        // Collections survive for the next sign-in.
        let logs: Vec<serde_json::Value> = store.load(keys::HEALTH_LOGS).unwrap();
        assert_eq!(logs.len(), 1);
    }
}
