//! # TUI UI Components
//!
//! Ratatui-based UI rendering for each screen.

mod dashboard;
mod help;
mod history;
mod login;
mod reminders;
mod symptoms;

pub use dashboard::render_dashboard;
pub use help::render_help;
pub use history::render_history;
pub use login::render_login;
pub use reminders::render_reminders;
pub use symptoms::render_symptoms;

use crate::tui::app::InputMode;
use crate::tui::{App, Screen};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};

/// Main render function - dispatches to screen-specific renderers
pub fn render(frame: &mut Frame, app: &App) {
    if app.current_screen == Screen::Login {
        render_login(frame, app, frame.area());
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    // Render tab bar
    render_tabs(frame, app, chunks[0]);

    // Render current screen
    match app.current_screen {
        Screen::Login => unreachable!("login renders full-screen"),
        Screen::Dashboard => render_dashboard(frame, app, chunks[1]),
        Screen::Symptoms => render_symptoms(frame, app, chunks[1]),
        Screen::History => render_history(frame, app, chunks[1]),
        Screen::Reminders => render_reminders(frame, app, chunks[1]),
        Screen::Help => render_help(frame, app, chunks[1]),
    }

    // Render status bar
    render_status_bar(frame, app, chunks[2]);
}

/// Render the tab bar
fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = Screen::tabs()
        .iter()
        .map(|s| {
            let style = if *s == app.current_screen {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            Line::from(format!("[{}] {}", s.key(), s.title())).style(style)
        })
        .collect();

    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL).title(" Vitality "))
        .select(
            Screen::tabs()
                .iter()
                .position(|s| *s == app.current_screen)
                .unwrap_or(0),
        )
        .style(Style::default().fg(Color::White))
        .highlight_style(Style::default().fg(Color::Yellow));

    frame.render_widget(tabs, area);
}

/// Render the status bar
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let alerts_status = if app.alerts_granted {
        Span::styled("● Alerts on", Style::default().fg(Color::Green))
    } else {
        Span::styled("● Alerts off", Style::default().fg(Color::Yellow))
    };

    let mode_status = match app.input_mode() {
        InputMode::Normal => Span::raw(""),
        InputMode::Editing => Span::styled(
            " [EDITING] ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
    };

    let help_hint = Span::styled(" q:Quit ?:Help x:Sign out ", Style::default().fg(Color::DarkGray));

    // Error or status message
    let message = if let Some(err) = &app.error_message {
        Span::styled(format!(" Error: {} ", err), Style::default().fg(Color::Red))
    } else if let Some(status) = &app.status_message {
        Span::styled(format!(" {} ", status), Style::default().fg(Color::Green))
    } else {
        Span::raw("")
    };

    let status_line = Line::from(vec![
        alerts_status,
        Span::raw(" | "),
        mode_status,
        message,
        Span::raw(" "),
        help_hint,
    ]);

    let paragraph = Paragraph::new(status_line).style(Style::default().bg(Color::DarkGray));

    frame.render_widget(paragraph, area);
}

/// Helper to create a block with title
pub fn titled_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", title))
}

/// Helper to truncate text. Counts chars, not bytes, so multi-byte
/// input never splits mid-character.
pub fn truncate_text(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Severity color shared by the history list and the dashboard.
pub fn severity_color(severity: crate::features::logs::Severity) -> Color {
    use crate::features::logs::Severity;
    match severity {
        Severity::Low => Color::Green,
        Severity::Medium => Color::Yellow,
        Severity::High => Color::LightRed,
        Severity::Critical => Color::Red,
    }
}

/// Render a labeled form field line with the active field highlighted.
pub fn form_field<'a>(label: &'a str, value: String, active: bool) -> Line<'a> {
    let label_style = if active {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let value_span = if active {
        Span::styled(format!("{}_", value), Style::default().fg(Color::White))
    } else {
        Span::styled(value, Style::default().fg(Color::White))
    };
    Line::from(vec![
        Span::styled(format!("{:<14}", label), label_style),
        value_span,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text_short_input_unchanged() {
        assert_eq!(truncate_text("Drink water", 30), "Drink water");
    }

    #[test]
    fn test_truncate_text_long_input_shortened() {
        let long = "a".repeat(40);
        assert_eq!(truncate_text(&long, 30), format!("{}...", "a".repeat(27)));
    }

    #[test]
    fn test_truncate_text_multibyte_input() {
        // Accented titles must truncate on char boundaries, not bytes.
        let long = "é".repeat(40);
        assert_eq!(truncate_text(&long, 30), format!("{}...", "é".repeat(27)));

        let exact = "é".repeat(30);
        assert_eq!(truncate_text(&exact, 30), exact);
    }
}
