//! # Sign-In UI
//!
//! Full-screen sign-in form with locally entered values and a guest
//! shortcut.

use crate::tui::ui::{form_field, titled_block};
use crate::tui::App;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Render the sign-in screen
pub fn render_login(frame: &mut Frame, app: &App, area: Rect) {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(12),
            Constraint::Min(0),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(52),
            Constraint::Min(0),
        ])
        .split(vertical[1]);
    let card = horizontal[1];

    let form = &app.login_form;
    let mut lines = vec![
        Line::from(Span::styled(
            "Vitality",
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Your personal health assistant",
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        form_field("Full name", form.full_name.clone(), form.field == 0),
        form_field("Email", form.email.clone(), form.field == 1),
        Line::from(""),
    ];

    if let Some(err) = &app.error_message {
        lines.push(Line::from(Span::styled(
            err.clone(),
            Style::default().fg(Color::Red),
        )));
    }

    lines.push(Line::from(Span::styled(
        "Enter: sign in   Tab: next field   Ctrl-G: continue as guest",
        Style::default().fg(Color::DarkGray),
    )));

    let paragraph = Paragraph::new(lines).block(titled_block("Sign In"));
    frame.render_widget(paragraph, card);
}
