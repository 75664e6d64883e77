//! Dashboard state management
//!
//! Contains the dashboard screen state: the model plus what only the terminal needs

use crate::consts::cli_consts::{INPUT_DATE_FORMAT, MAX_ACTIVITY_LOGS};
use crate::dashboard::Dashboard;
use crate::date_range::DateField;
use crate::events::Event as ActivityEvent;
use crate::ui::app::UIConfig;

use std::collections::VecDeque;
use std::time::Instant;

/// Dashboard screen state.
#[derive(Debug)]
pub struct DashboardState {
    /// Selection, requests and chart view.
    pub model: Dashboard,
    /// Text currently shown in the start field.
    pub start_input: String,
    /// Text currently shown in the end field.
    pub end_input: String,
    /// Field receiving typed characters.
    pub focus: DateField,
    /// Base URL of the wind data service.
    pub api_url: String,
    /// The start time of the application, used for computing uptime.
    pub start_time: Instant,
    /// Queue of events waiting to be processed
    pub pending_events: VecDeque<ActivityEvent>,
    /// Activity logs for display
    pub activity_logs: VecDeque<ActivityEvent>,
    /// Whether to enable background colors
    pub with_background_color: bool,
    /// Animation tick counter
    pub tick: usize,
}

impl DashboardState {
    pub fn new(model: Dashboard, start_time: Instant, ui_config: UIConfig) -> Self {
        let mut state = Self {
            model,
            start_input: String::new(),
            end_input: String::new(),
            focus: DateField::Start,
            api_url: ui_config.api_url,
            start_time,
            pending_events: VecDeque::new(),
            activity_logs: VecDeque::new(),
            with_background_color: ui_config.with_background_color,
            tick: 0,
        };
        state.sync_inputs();
        state
    }

    pub fn input(&self, field: DateField) -> &str {
        match field {
            DateField::Start => &self.start_input,
            DateField::End => &self.end_input,
        }
    }

    pub fn input_mut(&mut self, field: DateField) -> &mut String {
        match field {
            DateField::Start => &mut self.start_input,
            DateField::End => &mut self.end_input,
        }
    }

    /// Rewrites a field's text from the model's date, or empties it when unset.
    pub fn sync_input(&mut self, field: DateField) {
        let text = self
            .model
            .controller()
            .date(field)
            .map(|d| d.format(INPUT_DATE_FORMAT).to_string())
            .unwrap_or_default();
        *self.input_mut(field) = text;
    }

    pub fn sync_inputs(&mut self) {
        self.sync_input(DateField::Start);
        self.sync_input(DateField::End);
    }

    /// Add an event to activity logs with size limit
    pub fn add_to_activity_log(&mut self, event: ActivityEvent) {
        if self.activity_logs.len() >= MAX_ACTIVITY_LOGS {
            self.activity_logs.pop_front();
        }
        self.activity_logs.push_back(event);
    }

    /// Add an event to the processing queue
    pub fn add_event(&mut self, event: ActivityEvent) {
        self.pending_events.push_back(event);
    }
}
