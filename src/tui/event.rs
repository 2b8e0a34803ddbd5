//! # TUI Event Handling
//!
//! Keyboard input, redraw ticks, scheduler fires, and analysis results.

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;
use tokio::sync::mpsc;

use crate::features::analysis::SymptomAnalysis;
use crate::tui::Screen;

/// TUI events
#[derive(Debug)]
pub enum Event {
    /// Keyboard input
    Key(KeyEvent),
    /// Terminal resize
    Resize(u16, u16),
    /// Tick for periodic redraws
    Tick,
    /// 60-second scheduler fire: evaluate reminders
    Minute,
    /// Completed symptom analysis (flat error string on failure)
    Analysis(Result<SymptomAnalysis, String>),
}

/// Event handler that combines keyboard, scheduler, and tick events
pub struct EventHandler {
    /// Event receiver
    rx: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    /// Create a new event handler. The returned sender feeds external
    /// events (scheduler fires, analysis results) into the same queue.
    pub fn new(tick_rate: Duration) -> (Self, mpsc::UnboundedSender<Event>) {
        let (tx, rx) = mpsc::unbounded_channel();

        // Spawn keyboard event handler
        let key_tx = tx.clone();
        std::thread::spawn(move || {
            loop {
                if event::poll(tick_rate).unwrap_or(false) {
                    match event::read() {
                        Ok(CrosstermEvent::Key(key)) => {
                            if key_tx.send(Event::Key(key)).is_err() {
                                break;
                            }
                        }
                        Ok(CrosstermEvent::Resize(w, h)) => {
                            if key_tx.send(Event::Resize(w, h)).is_err() {
                                break;
                            }
                        }
                        _ => {}
                    }
                } else {
                    // Send tick on poll timeout
                    if key_tx.send(Event::Tick).is_err() {
                        break;
                    }
                }
            }
        });

        (EventHandler { rx }, tx)
    }

    /// Receive the next event
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

/// Key action result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// No action
    None,
    /// Quit the application
    Quit,
    /// Switch to screen
    SwitchScreen(Screen),
    /// Move selection up
    Up,
    /// Move selection down
    Down,
    /// Go back / Cancel
    Back,
    /// Open the add form on the current screen
    StartAdd,
    /// Start editing the symptom text box
    StartInput,
    /// Submit the open form or text box
    SubmitInput,
    /// Cancel the open form or text box
    CancelInput,
    /// Move to the next form field
    NextField,
    /// Move to the previous form field
    PrevField,
    /// Cycle the active enum field backwards
    CycleLeft,
    /// Cycle the active enum field forwards
    CycleRight,
    /// Character input
    Char(char),
    /// Backspace
    Backspace,
    /// Toggle the selected reminder
    Toggle,
    /// Delete the selected item
    Delete,
    /// Grant alert delivery for this session
    GrantAlerts,
    /// Sign out of the session
    SignOut,
    /// Continue as guest (sign-in screen)
    Guest,
}

/// Map a key event to an action
pub fn map_key_event(key: KeyEvent, in_edit_mode: bool) -> KeyAction {
    if in_edit_mode {
        // In edit mode, keys go into the active field
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => KeyAction::Quit,
            (KeyCode::Char('g'), KeyModifiers::CONTROL) => KeyAction::Guest,
            (KeyCode::Esc, _) => KeyAction::CancelInput,
            (KeyCode::Enter, _) => KeyAction::SubmitInput,
            (KeyCode::Tab, _) => KeyAction::NextField,
            (KeyCode::BackTab, _) => KeyAction::PrevField,
            (KeyCode::Left, _) => KeyAction::CycleLeft,
            (KeyCode::Right, _) => KeyAction::CycleRight,
            (KeyCode::Backspace, _) => KeyAction::Backspace,
            (KeyCode::Char(c), _) => KeyAction::Char(c),
            _ => KeyAction::None,
        }
    } else {
        // Normal mode navigation
        match (key.code, key.modifiers) {
            // Quit
            (KeyCode::Char('q'), KeyModifiers::NONE) => KeyAction::Quit,
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => KeyAction::Quit,

            // Screen switching
            (KeyCode::Char('1'), KeyModifiers::NONE) => KeyAction::SwitchScreen(Screen::Dashboard),
            (KeyCode::Char('2'), KeyModifiers::NONE) => KeyAction::SwitchScreen(Screen::Symptoms),
            (KeyCode::Char('3'), KeyModifiers::NONE) => KeyAction::SwitchScreen(Screen::History),
            (KeyCode::Char('4'), KeyModifiers::NONE) => KeyAction::SwitchScreen(Screen::Reminders),
            (KeyCode::Char('?'), KeyModifiers::NONE) => KeyAction::SwitchScreen(Screen::Help),

            // Navigation
            (KeyCode::Up, _) | (KeyCode::Char('k'), KeyModifiers::NONE) => KeyAction::Up,
            (KeyCode::Down, _) | (KeyCode::Char('j'), KeyModifiers::NONE) => KeyAction::Down,
            (KeyCode::Esc, _) => KeyAction::Back,

            // Forms and text input
            (KeyCode::Char('a'), KeyModifiers::NONE) => KeyAction::StartAdd,
            (KeyCode::Char('i'), KeyModifiers::NONE) => KeyAction::StartInput,
            (KeyCode::Char('/'), KeyModifiers::NONE) => KeyAction::StartInput,

            // Actions
            (KeyCode::Char('t'), KeyModifiers::NONE) => KeyAction::Toggle,
            (KeyCode::Char('d'), KeyModifiers::NONE) => KeyAction::Delete,
            (KeyCode::Char('p'), KeyModifiers::NONE) => KeyAction::GrantAlerts,
            (KeyCode::Char('x'), KeyModifiers::NONE) => KeyAction::SignOut,

            _ => KeyAction::None,
        }
    }
}
