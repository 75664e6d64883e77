//! Dashboard chart component
//!
//! Renders the wind power series, or the text that stands in for it

use super::super::state::DashboardState;
use crate::dashboard::{ChartView, NO_DATA_TEXT, prompt_text};
use crate::series::FetchedSeries;

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Axis, Block, BorderType, Borders, Chart, Dataset, GraphType, Padding, Paragraph, Wrap,
};

pub fn render_chart_panel(f: &mut Frame, area: Rect, state: &DashboardState) {
    let block = Block::default()
        .title("WIND POWER (MW)")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::horizontal(1));

    let (text, color) = match state.model.view() {
        ChartView::Chart(series) => {
            render_series_chart(f, area, series, block);
            return;
        }
        ChartView::Loading => {
            let dots = ".".repeat(state.tick / 5 % 4);
            (format!("Loading{}", dots), Color::LightBlue)
        }
        ChartView::Error(message) => (message, Color::LightRed),
        ChartView::Prompt {
            bounds,
            max_range_days,
        } => (prompt_text(bounds, max_range_days), Color::Gray),
        ChartView::NoData => (NO_DATA_TEXT.to_string(), Color::Gray),
    };

    let paragraph = Paragraph::new(Line::from(Span::styled(text, Style::default().fg(color))))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(block);
    f.render_widget(paragraph, area);
}

fn render_series_chart(f: &mut Frame, area: Rect, series: &FetchedSeries, block: Block) {
    let points = series.chart_points();
    let Some(summary) = series.summary() else {
        return;
    };

    let x_max = points.last().map(|(x, _)| *x).unwrap_or(0.0).max(1.0);
    // Anchor at zero, and keep a flat series visible
    let y_min = summary.min_mw.min(0.0);
    let y_max = (summary.max_mw * 1.05).max(y_min + 1.0);

    let dataset = Dataset::default()
        .name("wind_mw")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::LightGreen))
        .data(&points);

    let x_axis = Axis::default()
        .style(Style::default().fg(Color::Gray))
        .bounds([0.0, x_max])
        .labels([
            Span::raw(summary.first_at.format("%d/%m %H:%M").to_string()),
            Span::raw(summary.last_at.format("%d/%m %H:%M").to_string()),
        ]);

    let y_axis = Axis::default()
        .style(Style::default().fg(Color::Gray))
        .bounds([y_min, y_max])
        .labels([
            Span::raw(format!("{:.0}", y_min)),
            Span::styled(
                format!("{:.0}", y_max),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(x_axis)
        .y_axis(y_axis);
    f.render_widget(chart, area);
}
