//! Dashboard model
//!
//! Combines the date range controller and the data loader behind a single
//! transition function: every user action or effect result is a [`Msg`], and
//! applying it returns the effects that still need to run.

use crate::consts::cli_consts::{DISPLAY_DATE_FORMAT, INPUT_DATE_FORMAT};
use crate::date_range::{
    DateBounds, DateField, DateRangeController, EditOutcome, RangeError, Selection, offset_date,
};
use crate::error_classifier::ErrorClassifier;
use crate::events::{Event, EventType};
use crate::loader::{DataLoader, Effect};
use crate::logging::LogLevel;
use crate::series::{FetchedSeries, Sample};
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Application start: discover the dataset bounds.
    Start,
    /// The text of a date field changed.
    EditDate { field: DateField, text: String },
    /// Move one date by a number of days.
    StepDate { field: DateField, days: i64 },
    /// Move the whole window by its own length.
    ShiftWindow { forward: bool },
    /// The user asked for the series of the current selection.
    Fetch,
    /// Try bound discovery again after a failure.
    RetryBounds,
    BoundsLoaded(Result<DateBounds, String>),
    SeriesLoaded {
        selection: Selection,
        result: Result<Vec<Sample>, String>,
    },
}

/// What the chart area shows, in order of precedence.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartView<'a> {
    Loading,
    Error(String),
    Prompt {
        bounds: Option<DateBounds>,
        max_range_days: u32,
    },
    NoData,
    Chart(&'a FetchedSeries),
}

/// Text shown before anything has been fetched.
pub fn prompt_text(bounds: Option<DateBounds>, max_range_days: u32) -> String {
    let mut text = format!(
        "Choose dates within a valid range (up to {} days) and press Enter to fetch.",
        max_range_days
    );
    if let Some(bounds) = bounds {
        text.push_str(&format!(
            " Dates must be between {} and {}",
            bounds.min().format(DISPLAY_DATE_FORMAT),
            bounds.max().format(DISPLAY_DATE_FORMAT)
        ));
    }
    text
}

pub const NO_DATA_TEXT: &str = "No data available";

#[derive(Debug)]
pub struct Dashboard {
    controller: DateRangeController,
    loader: DataLoader,
    classifier: ErrorClassifier,
    outbox: Vec<Event>,
}

impl Dashboard {
    pub fn new(max_range_days: u32) -> Self {
        Self {
            controller: DateRangeController::new(max_range_days),
            loader: DataLoader::new(),
            classifier: ErrorClassifier::new(),
            outbox: Vec::new(),
        }
    }

    pub fn controller(&self) -> &DateRangeController {
        &self.controller
    }

    pub fn loader(&self) -> &DataLoader {
        &self.loader
    }

    pub fn can_fetch(&self) -> bool {
        self.controller.can_fetch()
    }

    /// Selection events produced since the last call.
    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.outbox)
    }

    pub fn update(&mut self, msg: Msg) -> Vec<Effect> {
        match msg {
            Msg::Start => {
                if self.controller.bounds().is_some() || self.loader.bounds_state().is_loading() {
                    return Vec::new();
                }
                vec![self.loader.discover_bounds()]
            }
            Msg::RetryBounds => {
                if self.loader.bounds_state().error().is_none() {
                    return Vec::new();
                }
                vec![self.loader.discover_bounds()]
            }
            Msg::EditDate { field, text } => {
                match NaiveDate::parse_from_str(text.trim(), INPUT_DATE_FORMAT) {
                    Ok(date) => self.edit(field, date),
                    // A half-typed date is treated like an out-of-range one.
                    Err(_) => self.loader.clear_series(),
                }
                Vec::new()
            }
            Msg::StepDate { field, days } => {
                if let Some(date) = self.controller.date(field).and_then(|d| offset_date(d, days))
                {
                    self.edit(field, date);
                }
                Vec::new()
            }
            Msg::ShiftWindow { forward } => {
                let span = match (self.controller.start(), self.controller.end()) {
                    (Some(start), Some(end)) => (end - start).num_days().max(1),
                    _ => return Vec::new(),
                };
                let days = if forward { span } else { -span };
                match self.controller.shift(days) {
                    Ok(selection) => {
                        self.loader.dismiss_series_error();
                        self.record_selection(format!("Selection moved to {}", selection));
                    }
                    Err(e) => self.record_range_error(&e),
                }
                Vec::new()
            }
            Msg::Fetch => match self.controller.selection() {
                Some(selection) if !self.loader.bounds_state().is_loading() => {
                    vec![self.loader.fetch_series(selection)]
                }
                _ => Vec::new(),
            },
            Msg::BoundsLoaded(result) => {
                self.loader.bounds_loaded(result.clone());
                if let Ok(bounds) = result {
                    match self.controller.initialize(bounds) {
                        Ok(selection) => {
                            self.record_selection(format!("Default selection {}", selection))
                        }
                        Err(e) => self.record_range_error(&e),
                    }
                }
                Vec::new()
            }
            Msg::SeriesLoaded { selection, result } => {
                self.loader.series_loaded(selection, result);
                Vec::new()
            }
        }
    }

    /// Validates and applies a whole selection at once.
    pub fn select(&mut self, start: NaiveDate, end: NaiveDate) -> Result<Selection, RangeError> {
        let selection = self.controller.select(start, end)?;
        self.loader.dismiss_series_error();
        Ok(selection)
    }

    fn edit(&mut self, field: DateField, date: NaiveDate) {
        match self.controller.set_date(field, date) {
            EditOutcome::Accepted => {
                self.loader.dismiss_series_error();
                let label = match field {
                    DateField::Start => "Start",
                    DateField::End => "End",
                };
                self.record_selection(format!("{} date set to {}", label, date));
            }
            EditOutcome::OutOfBounds => self.loader.clear_series(),
            EditOutcome::Rejected(e) => self.record_range_error(&e),
        }
    }

    fn record_selection(&mut self, msg: String) {
        self.outbox
            .push(Event::selection_with_level(msg, EventType::Edit, LogLevel::Debug));
    }

    fn record_range_error(&mut self, error: &RangeError) {
        let level = self.classifier.classify_range_error(error);
        self.outbox.push(Event::selection_with_level(
            error.to_string(),
            EventType::Error,
            level,
        ));
    }

    pub fn view(&self) -> ChartView<'_> {
        if self.loader.is_loading() {
            return ChartView::Loading;
        }
        if let Some(error) = self.controller.error() {
            return ChartView::Error(error.to_string());
        }
        if let Some(message) = self
            .loader
            .series_state()
            .error()
            .or_else(|| self.loader.bounds_state().error())
        {
            return ChartView::Error(message.to_string());
        }
        match self.loader.retained_series() {
            None => ChartView::Prompt {
                bounds: self.controller.bounds(),
                max_range_days: self.controller.max_range_days(),
            },
            Some(series) if series.is_empty() => ChartView::NoData,
            Some(series) => ChartView::Chart(series),
        }
    }
}
