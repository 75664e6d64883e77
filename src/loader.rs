//! Data loading state
//!
//! Request state machines for bound discovery and series retrieval. The loader never
//! performs I/O itself: each transition that needs the network returns an [`Effect`]
//! for the runtime to execute.

use crate::date_range::{DateBounds, Selection};
use crate::series::{FetchedSeries, Sample};
use std::sync::Arc;

/// Lifecycle of one kind of request.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestState<T> {
    Idle,
    Loading,
    Error(String),
    Ready(T),
}

impl<T> Default for RequestState<T> {
    fn default() -> Self {
        RequestState::Idle
    }
}

impl<T> RequestState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            RequestState::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            RequestState::Ready(value) => Some(value),
            _ => None,
        }
    }

    /// `Idle | Ready | Error -> Loading`
    fn begin(&mut self) {
        *self = RequestState::Loading;
    }

    /// `Loading -> Ready | Error`
    fn resolve(&mut self, result: Result<T, String>) {
        *self = match result {
            Ok(value) => RequestState::Ready(value),
            Err(message) => RequestState::Error(message),
        };
    }
}

/// External work requested by a state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    DiscoverBounds,
    FetchSeries(Selection),
}

#[derive(Debug, Default)]
pub struct DataLoader {
    bounds: RequestState<DateBounds>,
    series: RequestState<Arc<FetchedSeries>>,
    /// Last successfully fetched series. Survives failed fetches.
    retained: Option<Arc<FetchedSeries>>,
}

impl DataLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bounds_state(&self) -> &RequestState<DateBounds> {
        &self.bounds
    }

    pub fn series_state(&self) -> &RequestState<Arc<FetchedSeries>> {
        &self.series
    }

    pub fn retained_series(&self) -> Option<&FetchedSeries> {
        self.retained.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.bounds.is_loading() || self.series.is_loading()
    }

    pub fn discover_bounds(&mut self) -> Effect {
        self.bounds.begin();
        Effect::DiscoverBounds
    }

    pub fn fetch_series(&mut self, selection: Selection) -> Effect {
        self.series.begin();
        Effect::FetchSeries(selection)
    }

    pub fn bounds_loaded(&mut self, result: Result<DateBounds, String>) {
        self.bounds.resolve(result);
    }

    /// Applies a series result. Results are applied in arrival order, so when two
    /// fetches overlap the one that resolves last is what remains.
    pub fn series_loaded(&mut self, selection: Selection, result: Result<Vec<Sample>, String>) {
        let result = result.map(|samples| Arc::new(FetchedSeries::new(selection, samples)));
        if let Ok(series) = &result {
            self.retained = Some(Arc::clone(series));
        }
        self.series.resolve(result);
    }

    /// Forgets the retained series, as if nothing had been fetched yet.
    pub fn clear_series(&mut self) {
        self.retained = None;
        if matches!(self.series, RequestState::Ready(_)) {
            self.series = RequestState::Idle;
        }
    }

    /// Drops a series error so the retained series is shown again.
    pub fn dismiss_series_error(&mut self) {
        if matches!(self.series, RequestState::Error(_)) {
            self.series = RequestState::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date_range::DateRangeController;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn selection() -> Selection {
        let mut controller = DateRangeController::new(30);
        let bounds = DateBounds::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
        )
        .unwrap();
        controller.initialize(bounds).unwrap()
    }

    fn samples() -> Vec<Sample> {
        vec![Sample {
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            wind_mw: 100.0,
        }]
    }

    #[test]
    fn test_bounds_lifecycle() {
        let mut loader = DataLoader::new();
        assert_eq!(loader.bounds_state(), &RequestState::Idle);

        assert_eq!(loader.discover_bounds(), Effect::DiscoverBounds);
        assert!(loader.is_loading());

        loader.bounds_loaded(Err("connection refused".to_string()));
        assert_eq!(loader.bounds_state().error(), Some("connection refused"));
        assert!(!loader.is_loading());

        loader.discover_bounds();
        let bounds = selection();
        let bounds = DateBounds::new(bounds.start(), bounds.end()).unwrap();
        loader.bounds_loaded(Ok(bounds));
        assert_eq!(loader.bounds_state().ready(), Some(&bounds));
    }

    #[test]
    fn test_series_lifecycle() {
        let mut loader = DataLoader::new();
        let selection = selection();

        assert_eq!(loader.fetch_series(selection), Effect::FetchSeries(selection));
        assert!(loader.series_state().is_loading());

        loader.series_loaded(selection, Ok(samples()));
        let ready = loader.series_state().ready().unwrap();
        assert_eq!(ready.selection, selection);
        assert_eq!(loader.retained_series().map(|s| s.samples.len()), Some(1));
    }

    #[test]
    fn test_empty_series_is_distinct_from_not_fetched() {
        let mut loader = DataLoader::new();
        let selection = selection();
        assert!(loader.retained_series().is_none());

        loader.fetch_series(selection);
        loader.series_loaded(selection, Ok(Vec::new()));
        assert!(loader.retained_series().unwrap().is_empty());
    }

    #[test]
    fn test_failed_fetch_keeps_previous_series() {
        let mut loader = DataLoader::new();
        let selection = selection();
        loader.fetch_series(selection);
        loader.series_loaded(selection, Ok(samples()));

        loader.fetch_series(selection);
        loader.series_loaded(selection, Err("timed out".to_string()));
        assert_eq!(loader.series_state().error(), Some("timed out"));
        assert_eq!(loader.retained_series().map(|s| s.samples.len()), Some(1));

        loader.dismiss_series_error();
        assert_eq!(loader.series_state(), &RequestState::Idle);
        assert!(loader.retained_series().is_some());
    }

    #[test]
    fn test_clear_series() {
        let mut loader = DataLoader::new();
        let selection = selection();
        loader.fetch_series(selection);
        loader.series_loaded(selection, Ok(samples()));

        loader.clear_series();
        assert!(loader.retained_series().is_none());
        assert_eq!(loader.series_state(), &RequestState::Idle);
    }

    #[test]
    fn test_last_to_resolve_wins() {
        let mut loader = DataLoader::new();
        let selection = selection();
        loader.fetch_series(selection);
        loader.fetch_series(selection);

        loader.series_loaded(selection, Ok(samples()));
        loader.series_loaded(selection, Ok(Vec::new()));
        assert!(loader.retained_series().unwrap().is_empty());
    }
}
