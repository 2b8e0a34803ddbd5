//! # TUI Module
//!
//! Terminal user interface: dashboard, symptom checker, medical history,
//! and reminder management screens.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod app;
pub mod event;
pub mod ui;

pub use app::{App, Screen};
pub use event::{Event, EventHandler};
