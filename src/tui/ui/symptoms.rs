//! # Symptom Checker UI
//!
//! Free-text symptom entry and the structured analysis result panels.

use crate::tui::app::AnalysisState;
use crate::tui::ui::titled_block;
use crate::tui::App;
use ratatui::prelude::*;
use ratatui::widgets::{List, ListItem, Paragraph, Wrap};

/// Render the symptom checker screen
pub fn render_symptoms(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Input box
            Constraint::Min(0),    // Result
        ])
        .split(area);

    render_input(frame, app, chunks[0]);
    render_result(frame, app, chunks[1]);
}

fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let text = if app.symptom_editing {
        format!("{}_", app.symptom_input)
    } else if app.symptom_input.is_empty() {
        "Press i to describe how you feel, Enter to analyze.".to_string()
    } else {
        app.symptom_input.clone()
    };

    let style = if app.symptom_editing {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::Gray)
    };

    let paragraph = Paragraph::new(text)
        .style(style)
        .wrap(Wrap { trim: false })
        .block(titled_block("Describe your symptoms"));
    frame.render_widget(paragraph, area);
}

fn render_result(frame: &mut Frame, app: &App, area: Rect) {
    match &app.analysis {
        AnalysisState::Idle => {
            let paragraph = Paragraph::new(Span::styled(
                "No analysis yet.",
                Style::default().fg(Color::DarkGray),
            ))
            .block(titled_block("Assessment"));
            frame.render_widget(paragraph, area);
        }
        AnalysisState::Loading => {
            let paragraph = Paragraph::new(Span::styled(
                "Analyzing symptoms...",
                Style::default().fg(Color::Yellow),
            ))
            .block(titled_block("Assessment"));
            frame.render_widget(paragraph, area);
        }
        AnalysisState::Failed(msg) => {
            let paragraph = Paragraph::new(Span::styled(
                msg.clone(),
                Style::default().fg(Color::Red),
            ))
            .wrap(Wrap { trim: true })
            .block(titled_block("Assessment"));
            frame.render_widget(paragraph, area);
        }
        AnalysisState::Done(analysis) => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Percentage(35), // Assessment
                    Constraint::Percentage(45), // Recommendations / cautions
                    Constraint::Min(2),         // Disclaimer
                ])
                .split(area);

            let assessment = Paragraph::new(analysis.assessment.clone())
                .wrap(Wrap { trim: true })
                .block(titled_block("Assessment Summary"));
            frame.render_widget(assessment, chunks[0]);

            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(chunks[1]);

            let recommendations: Vec<ListItem> = analysis
                .recommendations
                .iter()
                .map(|r| ListItem::new(format!("* {}", r)))
                .collect();
            frame.render_widget(
                List::new(recommendations).block(titled_block("Recommendations")),
                columns[0],
            );

            let cautions: Vec<ListItem> = analysis
                .cautions
                .iter()
                .map(|c| {
                    ListItem::new(Span::styled(
                        format!("! {}", c),
                        Style::default().fg(Color::LightRed),
                    ))
                })
                .collect();
            frame.render_widget(
                List::new(cautions).block(titled_block("Important Cautions")),
                columns[1],
            );

            let disclaimer = Paragraph::new(Span::styled(
                analysis.disclaimer.clone(),
                Style::default().fg(Color::DarkGray),
            ))
            .wrap(Wrap { trim: true });
            frame.render_widget(disclaimer, chunks[2]);
        }
    }
}
