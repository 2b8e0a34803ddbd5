//! # Vitality
//!
//! Terminal personal health tracker: dashboard, AI symptom checker,
//! medical log book, and daily reminders.
//!
//! Usage: `cargo run --bin vitality`

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{error, info};
use ratatui::prelude::*;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use vitality::features::analysis::{OpenAiAnalyzer, SymptomAnalyzer};
use vitality::features::reminders::{current_minute, ReminderScheduler};
use vitality::storage::LocalStore;
use vitality::tui::app::AnalysisState;
use vitality::tui::event::{map_key_event, KeyAction};
use vitality::tui::{App, Event, EventHandler, Screen};
use vitality::Config;

/// TUI refresh rate
const TICK_RATE: Duration = Duration::from_millis(250);

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = Config::from_env();
    info!("starting Vitality (data dir: {})", config.data_dir.display());

    // The openai crate reads the key from env vars, not from our config.
    // Set both OPENAI_API_KEY and OPENAI_KEY for compatibility
    if let Some(key) = &config.openai_key {
        std::env::set_var("OPENAI_API_KEY", key);
        std::env::set_var("OPENAI_KEY", key);
    }
    let analyzer: Arc<dyn SymptomAnalyzer> = Arc::new(OpenAiAnalyzer::new(
        config.openai_model.clone(),
        config.openai_key.is_some(),
    ));

    let store = LocalStore::open(&config.data_dir)?;
    let mut app = App::new(store);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create event handler
    let (mut events, event_tx) = EventHandler::new(TICK_RATE);

    // Arm the scheduler when a session was resumed
    let mut scheduler = ReminderScheduler::new();
    if app.session.is_some() {
        arm_scheduler(&mut scheduler, &event_tx);
    }

    // Main loop
    let result = run_app(&mut terminal, &mut app, &mut events, &event_tx, &mut scheduler, analyzer).await;

    scheduler.disarm();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        error!("application error: {}", e);
        return Err(e);
    }

    info!("Vitality shutdown complete");
    Ok(())
}

fn arm_scheduler(
    scheduler: &mut ReminderScheduler,
    event_tx: &tokio::sync::mpsc::UnboundedSender<Event>,
) {
    let tx = event_tx.clone();
    scheduler.arm(move || {
        let _ = tx.send(Event::Minute);
    });
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
    event_tx: &tokio::sync::mpsc::UnboundedSender<Event>,
    scheduler: &mut ReminderScheduler,
    analyzer: Arc<dyn SymptomAnalyzer>,
) -> Result<()> {
    loop {
        // Draw UI
        terminal.draw(|frame| {
            vitality::tui::ui::render(frame, app);
        })?;

        // Handle events
        if let Some(event) = events.next().await {
            match event {
                Event::Key(key) => {
                    let action = map_key_event(key, app.in_edit_mode());
                    handle_action(app, action, event_tx, scheduler, &analyzer);
                }
                Event::Minute => {
                    app.evaluate_reminders(&current_minute());
                }
                Event::Analysis(result) => {
                    app.analysis = match result {
                        Ok(analysis) => AnalysisState::Done(analysis),
                        Err(msg) => AnalysisState::Failed(msg),
                    };
                }
                Event::Tick | Event::Resize(_, _) => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_action(
    app: &mut App,
    action: KeyAction,
    event_tx: &tokio::sync::mpsc::UnboundedSender<Event>,
    scheduler: &mut ReminderScheduler,
    analyzer: &Arc<dyn SymptomAnalyzer>,
) {
    if action == KeyAction::Quit {
        app.should_quit = true;
        return;
    }

    if app.in_edit_mode() {
        handle_edit_action(app, action, event_tx, scheduler, analyzer);
    } else {
        handle_normal_action(app, action, scheduler);
    }
}

fn handle_edit_action(
    app: &mut App,
    action: KeyAction,
    event_tx: &tokio::sync::mpsc::UnboundedSender<Event>,
    scheduler: &mut ReminderScheduler,
    analyzer: &Arc<dyn SymptomAnalyzer>,
) {
    // Sign-in screen
    if app.current_screen == Screen::Login {
        match action {
            KeyAction::Char(c) => app.login_form.active_buffer().push(c),
            KeyAction::Backspace => {
                app.login_form.active_buffer().pop();
            }
            KeyAction::NextField => app.login_form.next_field(),
            KeyAction::PrevField => app.login_form.prev_field(),
            KeyAction::SubmitInput => {
                if app.sign_in_from_form() {
                    arm_scheduler(scheduler, event_tx);
                }
            }
            KeyAction::Guest => {
                app.sign_in_guest();
                arm_scheduler(scheduler, event_tx);
            }
            KeyAction::CancelInput => app.clear_error(),
            _ => {}
        }
        return;
    }

    // Reminder form
    if app.reminder_form.is_some() {
        let form = app.reminder_form.as_mut().expect("checked above");
        match action {
            KeyAction::Char(c) => {
                if let Some(buffer) = form.active_buffer() {
                    buffer.push(c);
                }
            }
            KeyAction::Backspace => {
                if let Some(buffer) = form.active_buffer() {
                    buffer.pop();
                }
            }
            KeyAction::NextField => form.next_field(),
            KeyAction::PrevField => form.prev_field(),
            KeyAction::CycleLeft | KeyAction::CycleRight => form.cycle_kind(),
            KeyAction::SubmitInput => app.submit_reminder_form(),
            KeyAction::CancelInput => app.reminder_form = None,
            _ => {}
        }
        return;
    }

    // Log form
    if app.log_form.is_some() {
        let form = app.log_form.as_mut().expect("checked above");
        match action {
            KeyAction::Char(c) => {
                if let Some(buffer) = form.active_buffer() {
                    buffer.push(c);
                }
            }
            KeyAction::Backspace => {
                if let Some(buffer) = form.active_buffer() {
                    buffer.pop();
                }
            }
            KeyAction::NextField => form.next_field(),
            KeyAction::PrevField => form.prev_field(),
            KeyAction::CycleLeft => form.cycle(false),
            KeyAction::CycleRight => form.cycle(true),
            KeyAction::SubmitInput => app.submit_log_form(),
            KeyAction::CancelInput => app.log_form = None,
            _ => {}
        }
        return;
    }

    // Symptom text box
    if app.symptom_editing {
        match action {
            KeyAction::Char(c) => app.symptom_input.push(c),
            KeyAction::Backspace => {
                app.symptom_input.pop();
            }
            KeyAction::SubmitInput => {
                app.symptom_editing = false;
                spawn_analysis(app, event_tx, analyzer);
            }
            KeyAction::CancelInput => app.symptom_editing = false,
            _ => {}
        }
    }
}

fn handle_normal_action(app: &mut App, action: KeyAction, scheduler: &mut ReminderScheduler) {
    match action {
        KeyAction::SwitchScreen(screen) => app.switch_screen(screen),
        KeyAction::Up => app.select_previous(),
        KeyAction::Down => {
            let len = app.current_list_len();
            app.select_next(len);
        }
        KeyAction::StartAdd => match app.current_screen {
            Screen::History => app.open_log_form(),
            Screen::Reminders => app.open_reminder_form(),
            _ => {}
        },
        KeyAction::StartInput => {
            if app.current_screen == Screen::Symptoms {
                app.symptom_editing = true;
            }
        }
        KeyAction::Toggle => {
            if app.current_screen == Screen::Reminders {
                app.toggle_selected_reminder();
            }
        }
        KeyAction::Delete => match app.current_screen {
            Screen::History => app.delete_selected_log(),
            Screen::Reminders => app.delete_selected_reminder(),
            _ => {}
        },
        KeyAction::GrantAlerts => app.grant_alerts(),
        KeyAction::SignOut => {
            scheduler.disarm();
            app.sign_out();
        }
        KeyAction::Back => {
            app.clear_error();
            app.clear_status();
        }
        _ => {}
    }
}

/// Kick off one symptom analysis. The result comes back through the
/// event queue; no timeout and no retry.
fn spawn_analysis(
    app: &mut App,
    event_tx: &tokio::sync::mpsc::UnboundedSender<Event>,
    analyzer: &Arc<dyn SymptomAnalyzer>,
) {
    let symptoms = app.symptom_input.trim().to_string();
    if symptoms.is_empty() {
        return;
    }
    if matches!(app.analysis, AnalysisState::Loading) {
        return;
    }
    app.analysis = AnalysisState::Loading;

    let analyzer = Arc::clone(analyzer);
    let tx = event_tx.clone();
    tokio::spawn(async move {
        let result = analyzer
            .analyze(&symptoms)
            .await
            .map_err(|e| e.to_string());
        let _ = tx.send(Event::Analysis(result));
    });
}
