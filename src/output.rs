//! Console rendering of a fetched series for headless use.

use crate::consts::cli_consts::DISPLAY_DATE_FORMAT;
use crate::dashboard::NO_DATA_TEXT;
use crate::series::FetchedSeries;
use chrono::SecondsFormat;
use clap::ValueEnum;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// `timestamp,wind_mw` rows with a header line.
    #[default]
    Csv,
    /// A JSON array of samples.
    Json,
    /// Aggregate figures for the selection.
    Summary,
}

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub fn render_series(series: &FetchedSeries, format: OutputFormat) -> Result<String, OutputError> {
    match format {
        OutputFormat::Csv => render_csv(series),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&series.samples)?),
        OutputFormat::Summary => Ok(render_summary(series)),
    }
}

fn render_csv(series: &FetchedSeries) -> Result<String, OutputError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["timestamp", "wind_mw"])?;
    for sample in &series.samples {
        writer.write_record([
            sample.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
            sample.wind_mw.to_string(),
        ])?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}

fn render_summary(series: &FetchedSeries) -> String {
    let selection = series.selection;
    let header = format!(
        "Wind power {} - {}",
        selection.start().format(DISPLAY_DATE_FORMAT),
        selection.end().format(DISPLAY_DATE_FORMAT)
    );
    let Some(summary) = series.summary() else {
        return format!("{}\n{}\n", header, NO_DATA_TEXT);
    };
    format!(
        "{}\nSamples: {}\nMin: {:.1} MW\nMax: {:.1} MW (at {})\nMean: {:.1} MW\n",
        header,
        summary.count,
        summary.min_mw,
        summary.max_mw,
        summary.peak_at.format("%d/%m/%Y %H:%M"),
        summary.mean_mw
    )
}
