//! Effect execution
//!
//! Runs the network effects requested by the dashboard model as tokio tasks and
//! sends their results back as [`Msg`]s, reporting progress as activity events.

use crate::api::WindApi;
use crate::api::error::ApiError;
use crate::dashboard::Msg;
use crate::error_classifier::ErrorClassifier;
use crate::events::{Event, EventType};
use crate::loader::Effect;
use crate::logging::LogLevel;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Sends activity events to the UI or console.
#[derive(Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Send a generic event
    pub async fn send_event(&self, event: Event) {
        let _ = self.sender.send(event).await;
    }

    pub async fn send_bounds_event(
        &self,
        message: String,
        event_type: EventType,
        log_level: LogLevel,
    ) {
        self.send_event(Event::bounds_with_level(message, event_type, log_level))
            .await;
    }

    pub async fn send_series_event(
        &self,
        message: String,
        event_type: EventType,
        log_level: LogLevel,
    ) {
        self.send_event(Event::series_with_level(message, event_type, log_level))
            .await;
    }
}

/// Short, user-facing text for a failed request.
pub fn describe_api_error(error: &ApiError) -> String {
    match error {
        e if e.is_timeout() => "Request timed out".to_string(),
        ApiError::Reqwest(e) if e.is_connect() => {
            "Could not connect to the wind data service".to_string()
        }
        ApiError::Reqwest(_) => "Network error".to_string(),
        ApiError::Http { status, .. } => format!("Request failed with status code {}", status),
        ApiError::Decode(_) => "Unexpected response from the wind data service".to_string(),
        ApiError::InvalidDate(msg) => format!("Invalid date from the wind data service: {}", msg),
    }
}

/// Performs one effect against the API and returns the message carrying its result.
pub async fn execute_effect(
    api: &dyn WindApi,
    effect: Effect,
    events: &EventSender,
    classifier: &ErrorClassifier,
) -> Msg {
    match effect {
        Effect::DiscoverBounds => {
            events
                .send_bounds_event(
                    format!("Discovering available dates at {}", api.environment().api_url()),
                    EventType::Refresh,
                    LogLevel::Info,
                )
                .await;
            let result = match api.discover_bounds().await {
                Ok(bounds) => {
                    events
                        .send_bounds_event(
                            format!("Data available from {}", bounds),
                            EventType::Success,
                            LogLevel::Info,
                        )
                        .await;
                    Ok(bounds)
                }
                Err(e) => {
                    events
                        .send_bounds_event(
                            format!("Failed to discover dates: {}", e),
                            EventType::Error,
                            classifier.classify_api_error(&e),
                        )
                        .await;
                    Err(describe_api_error(&e))
                }
            };
            Msg::BoundsLoaded(result)
        }
        Effect::FetchSeries(selection) => {
            events
                .send_series_event(
                    format!("Fetching wind data for {}", selection),
                    EventType::Refresh,
                    LogLevel::Info,
                )
                .await;
            let result = match api.fetch_series(selection).await {
                Ok(samples) => {
                    events
                        .send_series_event(
                            format!("Fetched {} samples for {}", samples.len(), selection),
                            EventType::Success,
                            LogLevel::Info,
                        )
                        .await;
                    Ok(samples)
                }
                Err(e) => {
                    events
                        .send_series_event(
                            format!("Failed to fetch wind data: {}", e),
                            EventType::Error,
                            classifier.classify_api_error(&e),
                        )
                        .await;
                    Err(describe_api_error(&e))
                }
            };
            Msg::SeriesLoaded { selection, result }
        }
    }
}

/// Spawns effects and routes their results to the message channel.
#[derive(Clone)]
pub struct EffectRunner {
    api: Arc<dyn WindApi>,
    msg_sender: mpsc::Sender<Msg>,
    events: EventSender,
    classifier: ErrorClassifier,
}

impl EffectRunner {
    pub fn new(api: Arc<dyn WindApi>, msg_sender: mpsc::Sender<Msg>, events: EventSender) -> Self {
        Self {
            api,
            msg_sender,
            events,
            classifier: ErrorClassifier::new(),
        }
    }

    pub fn spawn(&self, effect: Effect) -> JoinHandle<()> {
        let runner = self.clone();
        tokio::spawn(async move {
            let msg =
                execute_effect(runner.api.as_ref(), effect, &runner.events, &runner.classifier)
                    .await;
            let _ = runner.msg_sender.send(msg).await;
        })
    }

    pub fn spawn_all(&self, effects: Vec<Effect>) -> Vec<JoinHandle<()>> {
        effects.into_iter().map(|effect| self.spawn(effect)).collect()
    }
}
