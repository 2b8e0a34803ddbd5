//! # Features Layer
//!
//! All feature modules: session lifecycle, the medical log book, the
//! reminder store and scheduler, and the AI symptom analyzer.

pub mod analysis;
pub mod logs;
pub mod reminders;
pub mod session;

// Re-export feature items for convenient access
pub use analysis::{OpenAiAnalyzer, SymptomAnalysis, SymptomAnalyzer, ANALYSIS_FAILED};
pub use logs::{HealthLog, LogBook, LogKind, Severity};
pub use reminders::{Reminder, ReminderKind, ReminderScheduler, ReminderStore, SchedulerState};
pub use session::{Profile, Session};
