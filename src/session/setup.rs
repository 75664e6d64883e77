//! Session setup and initialization

use crate::api::{WindApi, WindApiClient};
use crate::config::ResolvedSettings;
use crate::consts::cli_consts::EVENT_QUEUE_SIZE;
use crate::dashboard::{Dashboard, Msg};
use crate::events::Event;
use crate::runtime::{EffectRunner, EventSender};
use std::error::Error;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Session data for both TUI and headless modes
pub struct SessionData {
    /// The dashboard model, before the start message is applied
    pub dashboard: Dashboard,
    /// Executes the effects requested by the model
    pub runner: EffectRunner,
    /// Effect results, to be applied to the model
    pub msg_receiver: mpsc::Receiver<Msg>,
    /// Activity events emitted while effects run
    pub event_receiver: mpsc::Receiver<Event>,
    /// Base URL of the API (for display purposes)
    pub api_url: String,
}

/// Sets up a session against the real wind API.
pub fn setup_session(settings: &ResolvedSettings) -> Result<SessionData, Box<dyn Error>> {
    let client = WindApiClient::new(settings.environment.clone())?;
    Ok(setup_session_with_api(
        Arc::new(client),
        settings.max_range_days,
    ))
}

/// Sets up a session over any API implementation.
///
/// This function handles the common setup required for both TUI and headless modes:
/// 1. Creates the message and event channels
/// 2. Wraps the API in an effect runner
/// 3. Creates the dashboard model
pub fn setup_session_with_api(api: Arc<dyn WindApi>, max_range_days: u32) -> SessionData {
    let (msg_sender, msg_receiver) = mpsc::channel::<Msg>(EVENT_QUEUE_SIZE);
    let (event_sender, event_receiver) = mpsc::channel::<Event>(EVENT_QUEUE_SIZE);
    let api_url = api.environment().api_url();

    SessionData {
        dashboard: Dashboard::new(max_range_days),
        runner: EffectRunner::new(api, msg_sender, EventSender::new(event_sender)),
        msg_receiver,
        event_receiver,
        api_url,
    }
}
