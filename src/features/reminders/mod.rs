//! # Reminders Feature
//!
//! Daily health reminders: a snapshot-backed store plus a best-effort
//! minute-tick scheduler.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod scheduler;
pub mod store;

pub use scheduler::{current_minute, due_reminders, minute_key, ReminderScheduler, SchedulerState};
pub use store::{Reminder, ReminderKind, ReminderStore};
