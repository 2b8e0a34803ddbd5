//! # Reminders UI
//!
//! Reminder list with active/paused markers, the permission banner, and
//! the add-reminder form.

use crate::tui::app::ReminderForm;
use crate::tui::ui::{form_field, titled_block, truncate_text};
use crate::tui::App;
use ratatui::prelude::*;
use ratatui::widgets::{List, ListItem, ListState, Paragraph};

/// Render the reminders screen
pub fn render_reminders(frame: &mut Frame, app: &App, area: Rect) {
    let mut constraints = vec![];
    if !app.alerts_granted {
        constraints.push(Constraint::Length(3)); // Permission banner
    }
    if app.reminder_form.is_some() {
        constraints.push(Constraint::Length(10)); // Add form
    }
    constraints.push(Constraint::Min(0)); // List

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let mut idx = 0;
    if !app.alerts_granted {
        render_permission_banner(frame, chunks[idx]);
        idx += 1;
    }
    if let Some(form) = &app.reminder_form {
        render_form(frame, form, chunks[idx]);
        idx += 1;
    }
    render_list(frame, app, chunks[idx]);
}

fn render_permission_banner(frame: &mut Frame, area: Rect) {
    let paragraph = Paragraph::new(Line::from(vec![
        Span::styled(
            "Alerts are disabled. ",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "Press p to enable alert delivery for this session.",
            Style::default().fg(Color::Yellow),
        ),
    ]))
    .block(titled_block("Notifications"));
    frame.render_widget(paragraph, area);
}

fn render_form(frame: &mut Frame, form: &ReminderForm, area: Rect) {
    let mut lines = vec![
        form_field("Kind", format!("< {} >", form.kind.label()), form.field == 0),
        form_field("Title", form.title.clone(), form.field == 1),
        form_field("Time (HH:MM)", form.time.clone(), form.field == 2),
        form_field("Interval min", form.interval.clone(), form.field == 3),
        Line::from(""),
    ];
    if let Some(err) = &form.error {
        lines.push(Line::from(Span::styled(
            err.clone(),
            Style::default().fg(Color::Red),
        )));
    }
    lines.push(Line::from(Span::styled(
        "Enter: save   Tab: next field   Left/Right: cycle kind   Esc: cancel",
        Style::default().fg(Color::DarkGray),
    )));

    let paragraph = Paragraph::new(lines).block(titled_block("New Reminder"));
    frame.render_widget(paragraph, area);
}

fn render_list(frame: &mut Frame, app: &App, area: Rect) {
    let reminders: Vec<_> = app
        .session
        .iter()
        .flat_map(|s| s.reminders.list().iter())
        .collect();

    if reminders.is_empty() {
        let paragraph = Paragraph::new(Span::styled(
            "No reminders set. Press a to schedule one.",
            Style::default().fg(Color::DarkGray),
        ))
        .block(titled_block("Health Reminders"));
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = reminders
        .iter()
        .map(|r| {
            let marker = if r.is_active {
                Span::styled("[on] ", Style::default().fg(Color::Green))
            } else {
                Span::styled("[off]", Style::default().fg(Color::DarkGray))
            };
            let interval = if r.interval_minutes > 0 {
                format!("  every {}m", r.interval_minutes)
            } else {
                "  once daily".to_string()
            };
            let base = if r.is_active {
                Style::default()
            } else {
                Style::default().fg(Color::DarkGray)
            };
            ListItem::new(Line::from(vec![
                marker,
                Span::raw(" "),
                Span::styled(r.time.clone(), base.fg(Color::Cyan)),
                Span::raw("  "),
                Span::styled(truncate_text(&r.title, 30), base.add_modifier(Modifier::BOLD)),
                Span::styled(format!("  [{}]", r.kind.label()), base),
                Span::styled(interval, base.fg(Color::Gray)),
            ]))
        })
        .collect();

    let mut state = ListState::default();
    state.select(Some(app.selected_index.min(reminders.len().saturating_sub(1))));

    let list = List::new(items)
        .block(titled_block("Health Reminders (a:add t:toggle d:delete)"))
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut state);
}
