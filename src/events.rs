//! Event System
//!
//! Activity events emitted by the dashboard and its effects, shown in the
//! activity log (TUI) or printed to the console (headless).

use crate::logging::{LogLevel, event_threshold};
use chrono::Local;
use std::fmt::Display;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Source {
    /// Discovery of the dataset's date bounds.
    Bounds,
    /// Series requests for a selection.
    Series,
    /// Edits to the date selection.
    Selection,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum EventType {
    Success,
    Error,
    Refresh,
    Edit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub source: Source,
    pub msg: String,
    pub timestamp: String,
    pub event_type: EventType,
    pub log_level: LogLevel,
}

impl Event {
    fn new(source: Source, msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self {
            source,
            msg,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            event_type,
            log_level,
        }
    }

    pub fn bounds_with_level(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Source::Bounds, msg, event_type, log_level)
    }

    pub fn series_with_level(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Source::Series, msg, event_type, log_level)
    }

    pub fn selection_with_level(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Source::Selection, msg, event_type, log_level)
    }

    /// Whether the event is shown under the `RUST_LOG` threshold.
    pub fn should_display(&self) -> bool {
        self.displays_at(event_threshold())
    }

    /// Success and info events always show; quieter ones need a lower threshold.
    pub fn displays_at(&self, threshold: LogLevel) -> bool {
        self.event_type == EventType::Success
            || self.log_level >= LogLevel::Info
            || self.log_level >= threshold
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}] {}", self.event_type, self.timestamp, self.msg)
    }
}
