//! Date range selection
//!
//! Holds the allowed bounds and the user's selection, and validates every edit
//! against bounds, ordering and the maximum span.

use chrono::{Days, NaiveDate};
use std::fmt::{Display, Formatter};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("Start date cannot be after end date")]
    StartAfterEnd,

    #[error("End date cannot be before start date")]
    EndBeforeStart,

    #[error("Date range cannot exceed {max_days} days")]
    SpanExceeded { max_days: u32 },

    #[error("Date {date} is outside the available range {bounds}")]
    OutOfBounds { date: NaiveDate, bounds: DateBounds },

    #[error("Invalid bounds: minimum {min} is after maximum {max}")]
    InvalidBounds { min: NaiveDate, max: NaiveDate },

    #[error("Date bounds have already been set")]
    AlreadyInitialized,

    #[error("Date bounds are not known yet")]
    Uninitialized,
}

/// Earliest and latest selectable dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateBounds {
    min: NaiveDate,
    max: NaiveDate,
}

impl DateBounds {
    pub fn new(min: NaiveDate, max: NaiveDate) -> Result<Self, RangeError> {
        if min > max {
            return Err(RangeError::InvalidBounds { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> NaiveDate {
        self.min
    }

    pub fn max(&self) -> NaiveDate {
        self.max
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.min <= date && date <= self.max
    }
}

impl Display for DateBounds {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.min, self.max)
    }
}

/// A validated (start, end) pair. Only produced by the validation functions below.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    start: NaiveDate,
    end: NaiveDate,
}

impl Selection {
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days between start and end.
    pub fn span_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

impl Display for Selection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// The fixed limits every selection is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeLimits {
    pub bounds: DateBounds,
    pub max_range_days: u32,
}

impl RangeLimits {
    pub fn new(bounds: DateBounds, max_range_days: u32) -> Self {
        Self {
            bounds,
            max_range_days,
        }
    }

    /// `(min, min(min + max_range_days, max))`
    pub fn default_selection(&self) -> Selection {
        let end = self
            .bounds
            .min
            .checked_add_days(Days::new(u64::from(self.max_range_days)))
            .map_or(self.bounds.max, |end| end.min(self.bounds.max));
        Selection {
            start: self.bounds.min,
            end,
        }
    }

    fn check_in_bounds(&self, date: NaiveDate) -> Result<(), RangeError> {
        if self.bounds.contains(date) {
            Ok(())
        } else {
            Err(RangeError::OutOfBounds {
                date,
                bounds: self.bounds,
            })
        }
    }

    fn check_span(&self, start: NaiveDate, end: NaiveDate) -> Result<(), RangeError> {
        if (end - start).num_days() > i64::from(self.max_range_days) {
            return Err(RangeError::SpanExceeded {
                max_days: self.max_range_days,
            });
        }
        Ok(())
    }
}

/// Checks a new start date against the limits and the current end date.
pub fn validate_start(
    limits: &RangeLimits,
    candidate: NaiveDate,
    end: Option<NaiveDate>,
) -> Result<(), RangeError> {
    limits.check_in_bounds(candidate)?;
    if let Some(end) = end {
        if candidate > end {
            return Err(RangeError::StartAfterEnd);
        }
        limits.check_span(candidate, end)?;
    }
    Ok(())
}

/// Checks a new end date against the limits and the current start date.
pub fn validate_end(
    limits: &RangeLimits,
    candidate: NaiveDate,
    start: Option<NaiveDate>,
) -> Result<(), RangeError> {
    limits.check_in_bounds(candidate)?;
    if let Some(start) = start {
        if candidate < start {
            return Err(RangeError::EndBeforeStart);
        }
        limits.check_span(start, candidate)?;
    }
    Ok(())
}

/// Checks ordering and span of a pair; needs no bounds.
pub fn validate_order_and_span(
    start: NaiveDate,
    end: NaiveDate,
    max_range_days: u32,
) -> Result<(), RangeError> {
    if start > end {
        return Err(RangeError::StartAfterEnd);
    }
    if (end - start).num_days() > i64::from(max_range_days) {
        return Err(RangeError::SpanExceeded {
            max_days: max_range_days,
        });
    }
    Ok(())
}

/// Checks a whole pair at once.
pub fn validate_selection(
    limits: &RangeLimits,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Selection, RangeError> {
    limits.check_in_bounds(start)?;
    limits.check_in_bounds(end)?;
    validate_order_and_span(start, end, limits.max_range_days)?;
    Ok(Selection { start, end })
}

/// Result of a single-date edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// The date was stored and any previous error cleared.
    Accepted,
    /// The date lies outside the bounds (or is not a date yet). Nothing changed and no
    /// error is raised; the displayed series should be blanked.
    OutOfBounds,
    /// The edit broke ordering or span; the error is now the current error.
    Rejected(RangeError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    Start,
    End,
}

impl DateField {
    pub fn toggle(self) -> Self {
        match self {
            DateField::Start => DateField::End,
            DateField::End => DateField::Start,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DateRangeController {
    max_range_days: u32,
    bounds: Option<DateBounds>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    error: Option<RangeError>,
}

impl DateRangeController {
    pub fn new(max_range_days: u32) -> Self {
        Self {
            max_range_days,
            bounds: None,
            start: None,
            end: None,
            error: None,
        }
    }

    /// Sets the bounds once and seeds the default selection.
    pub fn initialize(&mut self, bounds: DateBounds) -> Result<Selection, RangeError> {
        if self.bounds.is_some() {
            return Err(RangeError::AlreadyInitialized);
        }
        let selection = RangeLimits::new(bounds, self.max_range_days).default_selection();
        self.bounds = Some(bounds);
        self.start = Some(selection.start);
        self.end = Some(selection.end);
        self.error = None;
        Ok(selection)
    }

    pub fn limits(&self) -> Option<RangeLimits> {
        self.bounds
            .map(|bounds| RangeLimits::new(bounds, self.max_range_days))
    }

    pub fn bounds(&self) -> Option<DateBounds> {
        self.bounds
    }

    pub fn max_range_days(&self) -> u32 {
        self.max_range_days
    }

    pub fn start(&self) -> Option<NaiveDate> {
        self.start
    }

    pub fn end(&self) -> Option<NaiveDate> {
        self.end
    }

    pub fn date(&self, field: DateField) -> Option<NaiveDate> {
        match field {
            DateField::Start => self.start,
            DateField::End => self.end,
        }
    }

    pub fn error(&self) -> Option<&RangeError> {
        self.error.as_ref()
    }

    pub fn set_start(&mut self, candidate: NaiveDate) -> EditOutcome {
        let Some(limits) = self.limits() else {
            return EditOutcome::OutOfBounds;
        };
        let result = validate_start(&limits, candidate, self.end);
        self.apply_edit(result, |this| this.start = Some(candidate))
    }

    pub fn set_end(&mut self, candidate: NaiveDate) -> EditOutcome {
        let Some(limits) = self.limits() else {
            return EditOutcome::OutOfBounds;
        };
        let result = validate_end(&limits, candidate, self.start);
        self.apply_edit(result, |this| this.end = Some(candidate))
    }

    pub fn set_date(&mut self, field: DateField, candidate: NaiveDate) -> EditOutcome {
        match field {
            DateField::Start => self.set_start(candidate),
            DateField::End => self.set_end(candidate),
        }
    }

    fn apply_edit(
        &mut self,
        result: Result<(), RangeError>,
        store: impl FnOnce(&mut Self),
    ) -> EditOutcome {
        match result {
            Ok(()) => {
                store(self);
                self.error = None;
                EditOutcome::Accepted
            }
            Err(RangeError::OutOfBounds { .. }) => EditOutcome::OutOfBounds,
            Err(e) => {
                self.error = Some(e.clone());
                EditOutcome::Rejected(e)
            }
        }
    }

    /// Replaces the whole selection after validating the pair.
    ///
    /// Unlike single-date edits, out-of-bound dates are reported as an error, but
    /// they do not become the current error.
    pub fn select(&mut self, start: NaiveDate, end: NaiveDate) -> Result<Selection, RangeError> {
        let limits = self.limits().ok_or(RangeError::Uninitialized)?;
        match validate_selection(&limits, start, end) {
            Ok(selection) => {
                self.start = Some(selection.start);
                self.end = Some(selection.end);
                self.error = None;
                Ok(selection)
            }
            Err(e @ RangeError::OutOfBounds { .. }) => Err(e),
            Err(e) => {
                self.error = Some(e.clone());
                Err(e)
            }
        }
    }

    /// Moves the selection window by `days`, keeping its span and staying within bounds.
    pub fn shift(&mut self, days: i64) -> Result<Selection, RangeError> {
        let limits = self.limits().ok_or(RangeError::Uninitialized)?;
        let (Some(start), Some(end)) = (self.start, self.end) else {
            return Err(RangeError::Uninitialized);
        };
        let span = end - start;
        let bounds = limits.bounds;

        let mut new_start = offset_date(start, days).unwrap_or(if days < 0 {
            bounds.min
        } else {
            bounds.max
        });
        if new_start < bounds.min {
            new_start = bounds.min;
        }
        let mut new_end = new_start + span;
        if new_end > bounds.max {
            new_end = bounds.max;
            new_start = (new_end - span).max(bounds.min);
        }
        self.select(new_start, new_end)
    }

    /// True iff both dates are set, correctly ordered, and no error is pending.
    pub fn can_fetch(&self) -> bool {
        match (self.start, self.end) {
            (Some(start), Some(end)) => start <= end && self.error.is_none(),
            _ => false,
        }
    }

    /// The selection to hand to the loader, if fetching is allowed.
    pub fn selection(&self) -> Option<Selection> {
        if !self.can_fetch() {
            return None;
        }
        let limits = self.limits()?;
        validate_selection(&limits, self.start?, self.end?).ok()
    }
}

/// Adds a signed number of days; `None` on overflow.
pub fn offset_date(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    if days >= 0 {
        date.checked_add_days(Days::new(days.unsigned_abs()))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    }
}
