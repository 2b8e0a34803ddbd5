//! # TUI Application Core
//!
//! Main application state and screen navigation.

use log::debug;

use crate::features::analysis::SymptomAnalysis;
use crate::features::logs::{LogKind, Severity};
use crate::features::reminders::{due_reminders, Reminder, ReminderKind};
use crate::features::session::Session;
use crate::storage::LocalStore;

/// Available screens in the TUI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Dashboard,
    Symptoms,
    History,
    Reminders,
    Help,
}

impl Screen {
    pub fn title(&self) -> &'static str {
        match self {
            Screen::Login => "Sign In",
            Screen::Dashboard => "Dashboard",
            Screen::Symptoms => "Symptom Checker",
            Screen::History => "Medical History",
            Screen::Reminders => "Reminders",
            Screen::Help => "Help",
        }
    }

    pub fn key(&self) -> char {
        match self {
            Screen::Login => '-',
            Screen::Dashboard => '1',
            Screen::Symptoms => '2',
            Screen::History => '3',
            Screen::Reminders => '4',
            Screen::Help => '?',
        }
    }

    /// Screens reachable from the tab bar once a session exists.
    pub fn tabs() -> &'static [Screen] {
        &[
            Screen::Dashboard,
            Screen::Symptoms,
            Screen::History,
            Screen::Reminders,
            Screen::Help,
        ]
    }
}

/// Input mode for text entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

/// Sign-in form (locally entered values)
#[derive(Debug, Default)]
pub struct LoginForm {
    pub full_name: String,
    pub email: String,
    pub field: usize,
}

impl LoginForm {
    pub const FIELDS: usize = 2;

    pub fn active_buffer(&mut self) -> &mut String {
        match self.field {
            0 => &mut self.full_name,
            _ => &mut self.email,
        }
    }

    pub fn next_field(&mut self) {
        self.field = (self.field + 1) % Self::FIELDS;
    }

    pub fn prev_field(&mut self) {
        self.field = (self.field + Self::FIELDS - 1) % Self::FIELDS;
    }
}

/// New-reminder form
#[derive(Debug)]
pub struct ReminderForm {
    pub kind: ReminderKind,
    pub title: String,
    pub time: String,
    pub interval: String,
    pub field: usize,
    pub error: Option<String>,
}

impl Default for ReminderForm {
    fn default() -> Self {
        ReminderForm {
            kind: ReminderKind::Hydration,
            title: String::new(),
            time: "09:00".to_string(),
            interval: "60".to_string(),
            field: 0,
            error: None,
        }
    }
}

impl ReminderForm {
    pub const FIELDS: usize = 4;

    pub fn next_field(&mut self) {
        self.field = (self.field + 1) % Self::FIELDS;
    }

    pub fn prev_field(&mut self) {
        self.field = (self.field + Self::FIELDS - 1) % Self::FIELDS;
    }

    /// Text buffer behind the active field, if it is a text field.
    pub fn active_buffer(&mut self) -> Option<&mut String> {
        match self.field {
            1 => Some(&mut self.title),
            2 => Some(&mut self.time),
            3 => Some(&mut self.interval),
            _ => None,
        }
    }

    pub fn cycle_kind(&mut self) {
        if self.field == 0 {
            self.kind = match self.kind {
                ReminderKind::Hydration => ReminderKind::Medication,
                ReminderKind::Medication => ReminderKind::Hydration,
            };
        }
    }
}

/// New-log-entry form
#[derive(Debug)]
pub struct LogForm {
    pub date: String,
    pub kind: LogKind,
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub field: usize,
    pub error: Option<String>,
}

impl LogForm {
    pub const FIELDS: usize = 5;

    pub fn today() -> Self {
        LogForm {
            date: chrono::Local::now().date_naive().to_string(),
            kind: LogKind::Symptom,
            title: String::new(),
            description: String::new(),
            severity: Severity::Low,
            field: 0,
            error: None,
        }
    }

    pub fn next_field(&mut self) {
        self.field = (self.field + 1) % Self::FIELDS;
    }

    pub fn prev_field(&mut self) {
        self.field = (self.field + Self::FIELDS - 1) % Self::FIELDS;
    }

    pub fn active_buffer(&mut self) -> Option<&mut String> {
        match self.field {
            0 => Some(&mut self.date),
            2 => Some(&mut self.title),
            3 => Some(&mut self.description),
            _ => None,
        }
    }

    /// Cycle enum fields (kind on field 1, severity on field 4).
    pub fn cycle(&mut self, forward: bool) {
        match self.field {
            1 => {
                let kinds = LogKind::all();
                let pos = kinds.iter().position(|k| *k == self.kind).unwrap_or(0);
                let next = if forward {
                    (pos + 1) % kinds.len()
                } else {
                    (pos + kinds.len() - 1) % kinds.len()
                };
                self.kind = kinds[next];
            }
            4 => {
                let levels = Severity::all();
                let pos = levels.iter().position(|s| *s == self.severity).unwrap_or(0);
                let next = if forward {
                    (pos + 1) % levels.len()
                } else {
                    (pos + levels.len() - 1) % levels.len()
                };
                self.severity = levels[next];
            }
            _ => {}
        }
    }
}

/// State of the in-flight symptom analysis
#[derive(Debug, Default)]
pub enum AnalysisState {
    #[default]
    Idle,
    Loading,
    Done(SymptomAnalysis),
    Failed(String),
}

/// Main application state
pub struct App {
    /// Current screen
    pub current_screen: Screen,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Active session, if signed in
    pub session: Option<Session>,
    /// Alert permission, granted per session and never persisted
    pub alerts_granted: bool,
    /// Recent alert feed (newest last)
    pub alerts: Vec<String>,
    /// Selected index for lists
    pub selected_index: usize,
    /// Sign-in form
    pub login_form: LoginForm,
    /// New-reminder form, when open
    pub reminder_form: Option<ReminderForm>,
    /// New-log form, when open
    pub log_form: Option<LogForm>,
    /// Free-text symptom entry
    pub symptom_input: String,
    /// Whether the symptom text box is being edited
    pub symptom_editing: bool,
    /// Symptom analysis state
    pub analysis: AnalysisState,
    /// Error message to display
    pub error_message: Option<String>,
    /// Status message to display
    pub status_message: Option<String>,
    /// Snapshot store, kept for sign-in after a sign-out
    store: LocalStore,
}

impl App {
    /// Build the app, resuming a persisted session when one exists.
    pub fn new(store: LocalStore) -> Self {
        let session = Session::resume(store.clone());
        let current_screen = if session.is_some() {
            Screen::Dashboard
        } else {
            Screen::Login
        };
        App {
            current_screen,
            should_quit: false,
            session,
            alerts_granted: false,
            alerts: Vec::new(),
            selected_index: 0,
            login_form: LoginForm::default(),
            reminder_form: None,
            log_form: None,
            symptom_input: String::new(),
            symptom_editing: false,
            analysis: AnalysisState::Idle,
            error_message: None,
            status_message: None,
            store,
        }
    }

    /// Whether keyboard input currently goes into a text buffer.
    pub fn in_edit_mode(&self) -> bool {
        self.input_mode() == InputMode::Editing
    }

    pub fn input_mode(&self) -> InputMode {
        if self.current_screen == Screen::Login
            || self.reminder_form.is_some()
            || self.log_form.is_some()
            || self.symptom_editing
        {
            InputMode::Editing
        } else {
            InputMode::Normal
        }
    }

    /// Switch to a different screen
    pub fn switch_screen(&mut self, screen: Screen) {
        if self.session.is_none() && screen != Screen::Login {
            return;
        }
        self.current_screen = screen;
        self.selected_index = 0;
        self.reminder_form = None;
        self.log_form = None;
        self.symptom_editing = false;
        self.error_message = None;
        self.status_message = None;
    }

    // ------------------------------------------------------------------
    // Session lifecycle
    // ------------------------------------------------------------------

    /// Submit the sign-in form. Keeps the form open when a required
    /// field is empty.
    pub fn sign_in_from_form(&mut self) -> bool {
        let name = self.login_form.full_name.trim().to_string();
        let email = self.login_form.email.trim().to_string();
        if name.is_empty() || email.is_empty() {
            self.error_message = Some("Name and email are required".to_string());
            return false;
        }
        self.start_session(Session::sign_in(self.store.clone(), &name, &email, None));
        true
    }

    /// Guest shortcut on the sign-in screen.
    pub fn sign_in_guest(&mut self) {
        let session = Session::sign_in(self.store.clone(), "Guest User", "guest@vitality.ai", None);
        self.start_session(session);
    }

    fn start_session(&mut self, session: Session) {
        self.session = Some(session);
        self.login_form = LoginForm::default();
        self.error_message = None;
        self.switch_screen(Screen::Dashboard);
    }

    /// Tear down the session and return to the sign-in screen.
    pub fn sign_out(&mut self) {
        if let Some(session) = self.session.take() {
            if let Err(e) = session.sign_out() {
                log::warn!("sign-out cleanup failed: {:#}", e);
            }
        }
        self.alerts_granted = false;
        self.alerts.clear();
        self.analysis = AnalysisState::Idle;
        self.symptom_input.clear();
        self.current_screen = Screen::Login;
        self.selected_index = 0;
        self.reminder_form = None;
        self.log_form = None;
        self.symptom_editing = false;
        self.error_message = None;
        self.status_message = None;
    }

    // ------------------------------------------------------------------
    // Reminders
    // ------------------------------------------------------------------

    pub fn open_reminder_form(&mut self) {
        self.reminder_form = Some(ReminderForm::default());
    }

    /// Submit the new-reminder form. An invalid time or interval keeps
    /// the form open with the validation message.
    pub fn submit_reminder_form(&mut self) {
        let Some(form) = self.reminder_form.as_mut() else {
            return;
        };
        if form.title.trim().is_empty() {
            form.error = Some("Title is required".to_string());
            return;
        }
        let interval: u32 = match form.interval.trim().parse() {
            Ok(v) => v,
            Err(_) => {
                form.error = Some("Interval must be a non-negative number".to_string());
                return;
            }
        };
        let (kind, title, time) = (form.kind, form.title.trim().to_string(), form.time.clone());
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match session.reminders.add(kind, &title, &time, interval) {
            Ok(reminder) => {
                self.reminder_form = None;
                self.status_message = Some(format!("Reminder '{}' scheduled", reminder.title));
            }
            Err(e) => {
                if let Some(form) = self.reminder_form.as_mut() {
                    form.error = Some(e.to_string());
                }
            }
        }
    }

    pub fn toggle_selected_reminder(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if let Some(reminder) = session.reminders.list().get(self.selected_index) {
            let id = reminder.id.clone();
            session.reminders.toggle(&id);
        }
    }

    pub fn delete_selected_reminder(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if let Some(reminder) = session.reminders.list().get(self.selected_index) {
            let id = reminder.id.clone();
            session.reminders.delete(&id);
        }
        let len = session.reminders.list().len();
        self.selected_index = self.selected_index.min(len.saturating_sub(1));
    }

    /// Grant alert delivery for the rest of this session.
    pub fn grant_alerts(&mut self) {
        self.alerts_granted = true;
        self.status_message = Some("Alerts enabled for this session".to_string());
    }

    /// Evaluate all reminders against the `HH:MM` key of the current
    /// tick. Returns the number of alert attempts made.
    pub fn evaluate_reminders(&mut self, hhmm: &str) -> usize {
        let due: Vec<Reminder> = match &self.session {
            Some(session) => due_reminders(session.reminders.list(), hhmm)
                .into_iter()
                .cloned()
                .collect(),
            None => return 0,
        };
        if due.is_empty() {
            return 0;
        }
        if !self.alerts_granted {
            debug!("skipping {} due reminder(s): alerts not granted", due.len());
            return 0;
        }
        for reminder in &due {
            self.push_alert(format!(
                "{}: {}",
                reminder.title,
                reminder.kind.alert_body()
            ));
        }
        self.status_message = Some(format!("{}: {}", due[0].title, due[0].kind.alert_body()));
        due.len()
    }

    /// Add an entry to the alert feed, keeping the last 100.
    pub fn push_alert(&mut self, msg: String) {
        let timestamp = chrono::Local::now().format("%H:%M:%S").to_string();
        self.alerts.push(format!("[{}] {}", timestamp, msg));
        if self.alerts.len() > 100 {
            self.alerts.remove(0);
        }
    }

    // ------------------------------------------------------------------
    // Medical history
    // ------------------------------------------------------------------

    pub fn open_log_form(&mut self) {
        self.log_form = Some(LogForm::today());
    }

    /// Submit the new-log form. A bad date or empty title keeps the
    /// form open with the validation message.
    pub fn submit_log_form(&mut self) {
        let Some(form) = self.log_form.as_mut() else {
            return;
        };
        if form.title.trim().is_empty() {
            form.error = Some("Title is required".to_string());
            return;
        }
        let date = match chrono::NaiveDate::parse_from_str(form.date.trim(), "%Y-%m-%d") {
            Ok(d) => d,
            Err(_) => {
                form.error = Some("Date must be YYYY-MM-DD".to_string());
                return;
            }
        };
        let (kind, title, description, severity) = (
            form.kind,
            form.title.trim().to_string(),
            form.description.trim().to_string(),
            form.severity,
        );
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.logs.add(date, kind, &title, &description, severity);
        self.log_form = None;
        self.status_message = Some(format!("Logged '{}'", title));
    }

    pub fn delete_selected_log(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if let Some(entry) = session.logs.list().get(self.selected_index) {
            let id = entry.id.clone();
            session.logs.delete(&id);
        }
        let len = session.logs.list().len();
        self.selected_index = self.selected_index.min(len.saturating_sub(1));
    }

    // ------------------------------------------------------------------
    // Navigation helpers
    // ------------------------------------------------------------------

    /// Move selection up
    pub fn select_previous(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// Move selection down
    pub fn select_next(&mut self, max: usize) {
        if self.selected_index < max.saturating_sub(1) {
            self.selected_index += 1;
        }
    }

    /// Length of the list on the current screen, for selection bounds.
    pub fn current_list_len(&self) -> usize {
        let Some(session) = &self.session else {
            return 0;
        };
        match self.current_screen {
            Screen::History => session.logs.list().len(),
            Screen::Reminders => session.reminders.list().len(),
            _ => 0,
        }
    }

    /// Clear error message
    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    /// Clear status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::reminders::ReminderKind;

    fn temp_app() -> (tempfile::TempDir, App) {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();
        (dir, App::new(store))
    }

    fn signed_in_app() -> (tempfile::TempDir, App) {
        let (dir, mut app) = temp_app();
        app.sign_in_guest();
        (dir, app)
    }

    #[test]
    fn test_starts_on_login_without_profile() {
        let (_dir, app) = temp_app();
        assert_eq!(app.current_screen, Screen::Login);
        assert!(app.session.is_none());
        assert!(app.in_edit_mode());
    }

    #[test]
    fn test_sign_in_requires_both_fields() {
        let (_dir, mut app) = temp_app();
        app.login_form.full_name = "Sarah".into();
        assert!(!app.sign_in_from_form());
        assert_eq!(app.current_screen, Screen::Login);
        assert!(app.error_message.is_some());

        app.login_form.email = "sarah@example.com".into();
        assert!(app.sign_in_from_form());
        assert_eq!(app.current_screen, Screen::Dashboard);
    }

    #[test]
    fn test_resume_skips_login() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();
        {
            let mut first = App::new(store.clone());
            first.sign_in_guest();
        }
        let resumed = App::new(store);
        assert_eq!(resumed.current_screen, Screen::Dashboard);
        assert!(resumed.session.is_some());
    }

    #[test]
    fn test_sign_out_resets_session_state() {
        let (_dir, mut app) = signed_in_app();
        app.grant_alerts();
        app.push_alert("x".into());
        app.sign_out();

        assert!(app.session.is_none());
        assert!(!app.alerts_granted);
        assert!(app.alerts.is_empty());
        assert_eq!(app.current_screen, Screen::Login);
    }

    #[test]
    fn test_switch_screen_blocked_without_session() {
        let (_dir, mut app) = temp_app();
        app.switch_screen(Screen::Dashboard);
        assert_eq!(app.current_screen, Screen::Login);
    }

    #[test]
    fn test_submit_reminder_form_happy_path() {
        let (_dir, mut app) = signed_in_app();
        app.open_reminder_form();
        {
            let form = app.reminder_form.as_mut().unwrap();
            form.kind = ReminderKind::Medication;
            form.title = "Aspirin".into();
            form.time = "14:30".into();
            form.interval = "0".into();
        }
        let before = app.session.as_ref().unwrap().reminders.list().len();
        app.submit_reminder_form();

        assert!(app.reminder_form.is_none());
        let reminders = app.session.as_ref().unwrap().reminders.list();
        assert_eq!(reminders.len(), before + 1);
        assert_eq!(reminders.last().unwrap().time, "14:30");
    }

    #[test]
    fn test_submit_reminder_form_keeps_open_on_bad_time() {
        let (_dir, mut app) = signed_in_app();
        app.open_reminder_form();
        {
            let form = app.reminder_form.as_mut().unwrap();
            form.title = "Aspirin".into();
            form.time = "25:70".into();
        }
        app.submit_reminder_form();

        let form = app.reminder_form.as_ref().expect("form stays open");
        assert!(form.error.is_some());
    }

    #[test]
    fn test_evaluate_reminders_gated_on_grant() {
        let (_dir, mut app) = signed_in_app();
        // The seeded default reminder fires at 09:00.
        assert_eq!(app.evaluate_reminders("09:00"), 0);
        assert!(app.alerts.is_empty());

        app.grant_alerts();
        assert_eq!(app.evaluate_reminders("09:00"), 1);
        assert_eq!(app.alerts.len(), 1);
        assert_eq!(app.evaluate_reminders("09:01"), 0);
    }

    #[test]
    fn test_evaluate_skips_inactive() {
        let (_dir, mut app) = signed_in_app();
        app.grant_alerts();
        app.selected_index = 0;
        app.toggle_selected_reminder();
        assert_eq!(app.evaluate_reminders("09:00"), 0);
    }

    #[test]
    fn test_submit_log_form_validates_date() {
        let (_dir, mut app) = signed_in_app();
        app.open_log_form();
        {
            let form = app.log_form.as_mut().unwrap();
            form.title = "Headache".into();
            form.date = "03/01/2024".into();
        }
        app.submit_log_form();
        assert!(app.log_form.as_ref().unwrap().error.is_some());

        app.log_form.as_mut().unwrap().date = "2024-03-01".into();
        app.submit_log_form();
        assert!(app.log_form.is_none());
        assert_eq!(app.session.as_ref().unwrap().logs.list().len(), 1);
    }

    #[test]
    fn test_delete_selected_clamps_selection() {
        let (_dir, mut app) = signed_in_app();
        app.selected_index = 0;
        app.delete_selected_reminder();
        assert_eq!(app.session.as_ref().unwrap().reminders.list().len(), 0);
        assert_eq!(app.selected_index, 0);
        // Deleting from an empty list is a no-op.
        app.delete_selected_reminder();
    }

    #[test]
    fn test_alert_feed_caps_at_100() {
        let (_dir, mut app) = signed_in_app();
        for i in 0..120 {
            app.push_alert(format!("alert {}", i));
        }
        assert_eq!(app.alerts.len(), 100);
        assert!(app.alerts.last().unwrap().contains("alert 119"));
    }
}
