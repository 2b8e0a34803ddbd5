//! # Medical History UI
//!
//! Newest-first log list with severity coloring plus the add-entry form.

use crate::tui::app::LogForm;
use crate::tui::ui::{form_field, severity_color, titled_block, truncate_text};
use crate::tui::App;
use ratatui::prelude::*;
use ratatui::widgets::{List, ListItem, ListState, Paragraph};

/// Render the medical history screen
pub fn render_history(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(form) = &app.log_form {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(11), Constraint::Min(0)])
            .split(area);
        render_form(frame, form, chunks[0]);
        render_list(frame, app, chunks[1]);
    } else {
        render_list(frame, app, area);
    }
}

fn render_form(frame: &mut Frame, form: &LogForm, area: Rect) {
    let mut lines = vec![
        form_field("Date", form.date.clone(), form.field == 0),
        form_field("Kind", format!("< {} >", form.kind.label()), form.field == 1),
        form_field("Title", form.title.clone(), form.field == 2),
        form_field("Description", form.description.clone(), form.field == 3),
        form_field("Severity", format!("< {} >", form.severity.label()), form.field == 4),
        Line::from(""),
    ];
    if let Some(err) = &form.error {
        lines.push(Line::from(Span::styled(
            err.clone(),
            Style::default().fg(Color::Red),
        )));
    }
    lines.push(Line::from(Span::styled(
        "Enter: save   Tab: next field   Left/Right: cycle   Esc: cancel",
        Style::default().fg(Color::DarkGray),
    )));

    let paragraph = Paragraph::new(lines).block(titled_block("New Log Entry"));
    frame.render_widget(paragraph, area);
}

fn render_list(frame: &mut Frame, app: &App, area: Rect) {
    let logs: Vec<_> = app
        .session
        .iter()
        .flat_map(|s| s.logs.list().iter())
        .collect();

    if logs.is_empty() {
        let paragraph = Paragraph::new(Span::styled(
            "No log entries. Press a to add one.",
            Style::default().fg(Color::DarkGray),
        ))
        .block(titled_block("Health & Medicine Logs"));
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = logs
        .iter()
        .map(|l| {
            ListItem::new(Line::from(vec![
                Span::styled(l.date.to_string(), Style::default().fg(Color::DarkGray)),
                Span::raw("  "),
                Span::styled(
                    format!("{:<9}", l.kind.label()),
                    Style::default().fg(Color::Cyan),
                ),
                Span::styled(
                    format!("{:<9}", l.severity.label()),
                    Style::default().fg(severity_color(l.severity)),
                ),
                Span::styled(
                    truncate_text(&l.title, 32),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(
                    truncate_text(&l.description, 40),
                    Style::default().fg(Color::Gray),
                ),
            ]))
        })
        .collect();

    let mut state = ListState::default();
    state.select(Some(app.selected_index.min(logs.len().saturating_sub(1))));

    let list = List::new(items)
        .block(titled_block("Health & Medicine Logs (a:add d:delete)"))
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut state);
}
