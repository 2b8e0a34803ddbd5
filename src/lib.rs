// Core layer - configuration
pub mod core;

// Storage layer - local JSON snapshot persistence
pub mod storage;

// Features layer - session, logs, reminders, analysis
pub mod features;

// TUI layer - terminal user interface
pub mod tui;

// Re-export core config for convenience
pub use core::Config;

// Re-export feature items
pub use features::{
    // Analysis
    OpenAiAnalyzer, SymptomAnalysis, SymptomAnalyzer,
    // Logs
    HealthLog, LogBook, LogKind, Severity,
    // Reminders
    Reminder, ReminderKind, ReminderScheduler, ReminderStore, SchedulerState,
    // Session
    Profile, Session,
};

// Re-export storage items
pub use storage::LocalStore;
