use crate::api::error::ApiError;
use crate::date_range::{DateBounds, Selection};
use crate::environment::Environment;
use crate::series::Sample;

pub(crate) mod client;
pub use client::WindApiClient;
pub mod error;

#[cfg(test)]
use mockall::{automock, predicate::*};

/// The wind data service. These are the only network operations in the dashboard.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait WindApi: Send + Sync {
    fn environment(&self) -> &Environment;

    /// Get the earliest and latest dates available in the dataset.
    async fn discover_bounds(&self) -> Result<DateBounds, ApiError>;

    /// Get the samples between the selection's start and end dates.
    async fn fetch_series(&self, selection: Selection) -> Result<Vec<Sample>, ApiError>;
}
