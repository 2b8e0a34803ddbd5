//! # Dashboard UI
//!
//! Health overview: totals, today's active reminders, recent medical
//! entries, and the alert feed.

use crate::tui::ui::{severity_color, titled_block, truncate_text};
use crate::tui::App;
use ratatui::prelude::*;
use ratatui::widgets::{List, ListItem, Paragraph};

/// Render the dashboard screen
pub fn render_dashboard(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let left_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Overview totals
            Constraint::Min(0),    // Active reminders
        ])
        .split(chunks[0]);

    let right_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(50), // Recent entries
            Constraint::Percentage(50), // Alert feed
        ])
        .split(chunks[1]);

    render_overview(frame, app, left_chunks[0]);
    render_active_reminders(frame, app, left_chunks[1]);
    render_recent_entries(frame, app, right_chunks[0]);
    render_alert_feed(frame, app, right_chunks[1]);
}

fn render_overview(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = vec![];

    if let Some(session) = &app.session {
        lines.push(Line::from(vec![
            Span::raw("Signed in:  "),
            Span::styled(
                session.profile.full_name.clone(),
                Style::default().fg(Color::Cyan),
            ),
        ]));
        lines.push(Line::from(vec![
            Span::raw("Records:    "),
            Span::styled(
                format!("{}", session.logs.list().len()),
                Style::default().fg(Color::Yellow),
            ),
        ]));
        let active = session
            .reminders
            .list()
            .iter()
            .filter(|r| r.is_active)
            .count();
        lines.push(Line::from(vec![
            Span::raw("Reminders:  "),
            Span::styled(format!("{} active", active), Style::default().fg(Color::Yellow)),
        ]));
        let alerts_status = if app.alerts_granted {
            Span::styled("enabled", Style::default().fg(Color::Green))
        } else {
            Span::styled("disabled (press p on Reminders)", Style::default().fg(Color::Yellow))
        };
        lines.push(Line::from(vec![Span::raw("Alerts:     "), alerts_status]));
    }

    let paragraph = Paragraph::new(lines).block(titled_block("Health Overview"));
    frame.render_widget(paragraph, area);
}

fn render_active_reminders(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .session
        .iter()
        .flat_map(|s| s.reminders.list().iter())
        .filter(|r| r.is_active)
        .map(|r| {
            ListItem::new(Line::from(vec![
                Span::styled(r.time.clone(), Style::default().fg(Color::Cyan)),
                Span::raw("  "),
                Span::raw(r.title.clone()),
                Span::styled(
                    format!("  [{}]", r.kind.label()),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    let list = if items.is_empty() {
        List::new(vec![ListItem::new(Span::styled(
            "No active reminders for today.",
            Style::default().fg(Color::DarkGray),
        ))])
    } else {
        List::new(items)
    };

    frame.render_widget(list.block(titled_block("Today's Reminders")), area);
}

fn render_recent_entries(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .session
        .iter()
        .flat_map(|s| s.logs.list().iter())
        .take(3)
        .map(|l| {
            ListItem::new(Line::from(vec![
                Span::styled(l.date.to_string(), Style::default().fg(Color::DarkGray)),
                Span::raw("  "),
                Span::styled(
                    truncate_text(&l.title, 30),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  {}", l.severity.label()),
                    Style::default().fg(severity_color(l.severity)),
                ),
            ]))
        })
        .collect();

    let list = if items.is_empty() {
        List::new(vec![ListItem::new(Span::styled(
            "No medical records found.",
            Style::default().fg(Color::DarkGray),
        ))])
    } else {
        List::new(items)
    };

    frame.render_widget(list.block(titled_block("Recent Medical Entries")), area);
}

fn render_alert_feed(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .alerts
        .iter()
        .rev()
        .map(|a| ListItem::new(truncate_text(a, area.width.saturating_sub(4) as usize)))
        .collect();

    let list = if items.is_empty() {
        List::new(vec![ListItem::new(Span::styled(
            "No alerts raised this session.",
            Style::default().fg(Color::DarkGray),
        ))])
    } else {
        List::new(items)
    };

    frame.render_widget(list.block(titled_block("Alerts")), area);
}
