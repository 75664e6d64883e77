//! Headless mode execution

use super::{
    SessionData,
    messages::{print_session_exit_success, print_session_starting},
};
use crate::dashboard::{Dashboard, Msg};
use crate::date_range::{RangeError, validate_order_and_span};
use crate::events::Event;
use crate::output::{OutputFormat, render_series};
use crate::print_cmd_error;
use crate::series::FetchedSeries;
use chrono::NaiveDate;
use std::error::Error;
use thiserror::Error;
use tokio::sync::mpsc;

#[derive(Debug, Error)]
pub enum HeadlessError {
    #[error("Invalid date range: {0}")]
    Range(#[from] RangeError),

    #[error("Failed to discover dates: {0}")]
    Bounds(String),

    #[error("Failed to fetch wind data: {0}")]
    Series(String),

    #[error("Interrupted")]
    Interrupted,

    #[error("Effect channel closed unexpectedly")]
    ChannelClosed,
}

/// Runs the application in headless mode
///
/// This function handles:
/// 1. Checking the requested range before any request is made
/// 2. Bound discovery and validation against the bounds
/// 3. The series fetch and printing of the result to stdout
///
/// Activity events are printed to stderr while the requests run.
pub async fn run_headless_mode(
    session: SessionData,
    start: NaiveDate,
    end: NaiveDate,
    format: OutputFormat,
) -> Result<(), Box<dyn Error>> {
    print_session_starting("headless", &session.api_url);

    let result = fetch_headless(session, start, end, |event| {
        if event.should_display() {
            eprintln!("{}", event);
        }
    })
    .await;
    let series = match result {
        Ok(series) => series,
        Err(e) => {
            print_cmd_error!("Fetch failed", e.to_string().as_str());
            return Err(e.into());
        }
    };

    let rendered = render_series(&series, format)?;
    println!("{}", rendered.trim_end());
    print_session_exit_success();
    Ok(())
}

/// Drives the dashboard model to a single fetched series.
pub async fn fetch_headless(
    mut session: SessionData,
    start: NaiveDate,
    end: NaiveDate,
    mut on_event: impl FnMut(&Event),
) -> Result<FetchedSeries, HeadlessError> {
    validate_order_and_span(start, end, session.dashboard.controller().max_range_days())?;

    let effects = session.dashboard.update(Msg::Start);
    session.runner.spawn_all(effects);

    let result = loop {
        let msg = tokio::select! {
            Some(event) = session.event_receiver.recv() => {
                on_event(&event);
                continue;
            }
            msg = session.msg_receiver.recv() => msg.ok_or(HeadlessError::ChannelClosed)?,
            _ = tokio::signal::ctrl_c() => break Err(HeadlessError::Interrupted),
        };

        let finished = matches!(msg, Msg::SeriesLoaded { .. });
        let bounds_arrived = matches!(msg, Msg::BoundsLoaded(_));
        session.dashboard.update(msg);
        for event in session.dashboard.take_events() {
            on_event(&event);
        }

        if bounds_arrived {
            if let Err(e) = start_fetch(&mut session, start, end) {
                break Err(e);
            }
        }
        if finished {
            break finished_series(&session.dashboard);
        }
    };

    drain_events(&mut session.event_receiver, &mut on_event);
    result
}

fn start_fetch(
    session: &mut SessionData,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<(), HeadlessError> {
    if let Some(message) = session.dashboard.loader().bounds_state().error() {
        return Err(HeadlessError::Bounds(message.to_string()));
    }
    session.dashboard.select(start, end)?;
    let effects = session.dashboard.update(Msg::Fetch);
    session.runner.spawn_all(effects);
    Ok(())
}

fn finished_series(dashboard: &Dashboard) -> Result<FetchedSeries, HeadlessError> {
    if let Some(message) = dashboard.loader().series_state().error() {
        return Err(HeadlessError::Series(message.to_string()));
    }
    dashboard
        .loader()
        .series_state()
        .ready()
        .map(|series| series.as_ref().clone())
        .ok_or(HeadlessError::ChannelClosed)
}

fn drain_events(receiver: &mut mpsc::Receiver<Event>, on_event: &mut impl FnMut(&Event)) {
    while let Ok(event) = receiver.try_recv() {
        on_event(&event);
    }
}
