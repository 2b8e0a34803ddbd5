//! # Help UI
//!
//! Keyboard reference.

use crate::tui::ui::titled_block;
use crate::tui::App;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Render the help screen
pub fn render_help(frame: &mut Frame, _app: &App, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            "Global",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from("  1-4        Switch screen (Dashboard, Symptoms, History, Reminders)"),
        Line::from("  ?          This help screen"),
        Line::from("  q, Ctrl-C  Quit"),
        Line::from("  x          Sign out"),
        Line::from(""),
        Line::from(Span::styled(
            "Symptom Checker",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from("  i or /     Edit the symptom description"),
        Line::from("  Enter      Run the AI analysis"),
        Line::from("  Esc        Stop editing"),
        Line::from(""),
        Line::from(Span::styled(
            "Medical History",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from("  a          Add a log entry"),
        Line::from("  d          Delete the selected entry"),
        Line::from("  Up/Down    Move selection"),
        Line::from(""),
        Line::from(Span::styled(
            "Reminders",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from("  a          Add a reminder"),
        Line::from("  t          Toggle the selected reminder"),
        Line::from("  d          Delete the selected reminder"),
        Line::from("  p          Enable alert delivery for this session"),
        Line::from(""),
        Line::from(Span::styled(
            "Forms",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from("  Tab/Shift-Tab   Next / previous field"),
        Line::from("  Left/Right      Cycle kind or severity"),
        Line::from("  Enter           Save"),
        Line::from("  Esc             Cancel"),
    ];

    let paragraph = Paragraph::new(lines).block(titled_block("Help"));
    frame.render_widget(paragraph, area);
}
