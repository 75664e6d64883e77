//! Dashboard info panel component
//!
//! Renders the connection details and the summary of the shown series

use super::super::state::DashboardState;
use super::super::utils::format_uptime;
use crate::consts::cli_consts::DISPLAY_DATE_FORMAT;

use ratatui::Frame;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};

fn labelled<'a>(label: &'a str, value: String, color: Color) -> Line<'a> {
    Line::from(vec![
        Span::styled(label, Style::default().fg(Color::Gray)),
        Span::styled(value, Style::default().fg(color)),
    ])
}

/// Render info panel with the API details and series summary.
pub fn render_info_panel(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let mut info_lines = vec![
        labelled("API: ", state.api_url.clone(), Color::LightBlue),
        labelled(
            "Uptime: ",
            format_uptime(state.start_time.elapsed()),
            Color::LightGreen,
        ),
        Line::from(""),
    ];

    match state.model.loader().retained_series().map(|s| (s, s.summary())) {
        Some((series, Some(summary))) => {
            info_lines.push(labelled(
                "Range: ",
                format!(
                    "{} - {} ({}d)",
                    series.selection.start().format(DISPLAY_DATE_FORMAT),
                    series.selection.end().format(DISPLAY_DATE_FORMAT),
                    series.selection.span_days()
                ),
                Color::Cyan,
            ));
            info_lines.push(labelled("Samples: ", summary.count.to_string(), Color::White));
            info_lines.push(Line::from(vec![
                Span::styled("Peak: ", Style::default().fg(Color::Gray)),
                Span::styled(
                    format!("{:.1} MW", summary.max_mw),
                    Style::default()
                        .fg(Color::LightYellow)
                        .add_modifier(Modifier::BOLD),
                ),
            ]));
            info_lines.push(labelled(
                "Peak at: ",
                summary.peak_at.format("%d/%m/%Y %H:%M").to_string(),
                Color::LightYellow,
            ));
            info_lines.push(labelled("Mean: ", format!("{:.1} MW", summary.mean_mw), Color::White));
            info_lines.push(labelled("Min: ", format!("{:.1} MW", summary.min_mw), Color::White));
        }
        Some((series, None)) => {
            info_lines.push(labelled("Range: ", series.selection.to_string(), Color::Cyan));
            info_lines.push(labelled("Samples: ", "0".to_string(), Color::Gray));
        }
        None => info_lines.push(labelled("Series: ", "not fetched".to_string(), Color::Gray)),
    }

    let info_block = Block::default()
        .title("SUMMARY")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::uniform(1));

    let info_paragraph = Paragraph::new(info_lines)
        .block(info_block)
        .wrap(Wrap { trim: true });
    f.render_widget(info_paragraph, area);
}
