//! Dashboard header component
//!
//! Renders the title and request status gauge

use super::super::state::DashboardState;
use crate::loader::RequestState;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Paragraph};

/// Render header with title and request status.
pub fn render_header(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let header_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(2)])
        .split(area);

    let title = Paragraph::new(format!("WIND POWER DASHBOARD v{}", env!("CARGO_PKG_VERSION")))
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_type(BorderType::Thick),
        );
    f.render_widget(title, header_chunks[0]);

    let (progress_text, gauge_color, progress_percent) = status(state);

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .gauge_style(
            Style::default()
                .fg(gauge_color)
                .add_modifier(Modifier::BOLD),
        )
        .percent(progress_percent)
        .label(progress_text);

    f.render_widget(gauge, header_chunks[1]);
}

/// Gauge label, color and fill for the current request state.
fn status(state: &DashboardState) -> (String, Color, u16) {
    let loader = state.model.loader();
    // Loops every 20 ticks while a request is in flight
    let animated = ((state.tick % 20) as f64 / 20.0 * 100.0) as u16;

    if loader.bounds_state().is_loading() {
        return (
            "LOADING - Discovering available dates".to_string(),
            Color::LightBlue,
            animated,
        );
    }
    if loader.series_state().is_loading() {
        return (
            "LOADING - Fetching wind data".to_string(),
            Color::LightGreen,
            animated,
        );
    }
    if loader.bounds_state().error().is_some() {
        return (
            "OFFLINE - Press R to retry".to_string(),
            Color::LightRed,
            100,
        );
    }
    match (loader.series_state(), state.model.controller().selection()) {
        (RequestState::Error(_), _) => (
            "FAILED - Last fetch failed".to_string(),
            Color::LightRed,
            100,
        ),
        (_, Some(selection)) => (format!("READY - {}", selection), Color::LightBlue, 100),
        (_, None) => ("IDLE".to_string(), Color::DarkGray, 0),
    }
}
