//! Dashboard date controls component
//!
//! Renders the start and end inputs with the valid range beside them

use super::super::state::DashboardState;
use crate::consts::cli_consts::DISPLAY_DATE_FORMAT;
use crate::date_range::DateField;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

pub fn render_controls(f: &mut Frame, area: Rect, state: &DashboardState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(20),
            Constraint::Length(20),
            Constraint::Fill(1),
        ])
        .split(area);

    render_input(f, chunks[0], state, DateField::Start, "Start date");
    render_input(f, chunks[1], state, DateField::End, "End date");
    render_range_hint(f, chunks[2], state);
}

fn render_input(
    f: &mut Frame,
    area: Rect,
    state: &DashboardState,
    field: DateField,
    title: &str,
) {
    let focused = state.focus == field;
    let border_color = if focused { Color::LightYellow } else { Color::Cyan };

    let mut spans = vec![Span::styled(
        state.input(field).to_string(),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )];
    // Blinking cursor on the focused field
    if focused && state.tick % 10 < 5 {
        spans.push(Span::styled("_", Style::default().fg(Color::LightYellow)));
    }

    let input = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .title(title.to_string())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color)),
    );
    f.render_widget(input, area);
}

fn render_range_hint(f: &mut Frame, area: Rect, state: &DashboardState) {
    let controller = state.model.controller();
    let range_text = match controller.bounds() {
        Some(bounds) => format!(
            "Available: {} - {}",
            bounds.min().format(DISPLAY_DATE_FORMAT),
            bounds.max().format(DISPLAY_DATE_FORMAT)
        ),
        None => "Available: unknown".to_string(),
    };

    let mut lines = vec![Line::from(vec![
        Span::styled(range_text, Style::default().fg(Color::Gray)),
        Span::styled(
            format!("  (max {} days)", controller.max_range_days()),
            Style::default().fg(Color::DarkGray),
        ),
    ])];
    if let Some(error) = controller.error() {
        lines.push(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(Color::LightRed),
        )));
    }

    let hint = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(hint, area);
}
