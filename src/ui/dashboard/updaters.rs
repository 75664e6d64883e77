//! Dashboard state update logic
//!
//! Key handling and application of messages to the dashboard state

use super::state::DashboardState;

use crate::dashboard::Msg;
use crate::loader::Effect;
use crossterm::event::{KeyCode, KeyEvent};

/// Length of a fully typed `YYYY-MM-DD` date.
const DATE_INPUT_LEN: usize = 10;

impl DashboardState {
    /// Advance the animation tick and move queued events into the activity log.
    pub fn update(&mut self) {
        self.tick += 1;

        let selection_events = self.model.take_events();
        self.pending_events.extend(selection_events);

        while let Some(event) = self.pending_events.pop_front() {
            self.add_to_activity_log(event);
        }
    }

    /// Apply a message to the model and keep the input fields in step with it.
    pub fn apply(&mut self, msg: Msg) -> Vec<Effect> {
        // Only messages that move the dates rewrite the fields. Request results
        // arrive at any time and must not clobber text the user is typing.
        let resync = matches!(
            msg,
            Msg::StepDate { .. } | Msg::ShiftWindow { .. } | Msg::BoundsLoaded(_)
        );
        let effects = self.model.update(msg);
        if resync {
            self.sync_inputs();
        }
        effects
    }

    /// Translate a key press into a dashboard message.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Msg> {
        let field = self.focus;
        match key.code {
            KeyCode::Tab | KeyCode::BackTab => {
                // Leaving a half-typed field restores the last accepted date.
                self.sync_input(field);
                self.focus = field.toggle();
                None
            }
            KeyCode::Char(c) if c.is_ascii_digit() || c == '-' => {
                let input = self.input_mut(field);
                if input.len() >= DATE_INPUT_LEN {
                    return None;
                }
                input.push(c);
                Some(Msg::EditDate {
                    field,
                    text: input.clone(),
                })
            }
            KeyCode::Backspace => {
                let input = self.input_mut(field);
                input.pop()?;
                Some(Msg::EditDate {
                    field,
                    text: input.clone(),
                })
            }
            KeyCode::Up => Some(Msg::StepDate { field, days: 1 }),
            KeyCode::Down => Some(Msg::StepDate { field, days: -1 }),
            KeyCode::PageUp => Some(Msg::ShiftWindow { forward: false }),
            KeyCode::PageDown => Some(Msg::ShiftWindow { forward: true }),
            KeyCode::Enter => Some(Msg::Fetch),
            KeyCode::Char('r') => Some(Msg::RetryBounds),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::Dashboard;
    use crate::date_range::{DateBounds, DateField};
    use crate::events::{Event, EventType};
    use crate::logging::LogLevel;
    use crate::ui::UIConfig;
    use chrono::NaiveDate;
    use crossterm::event::KeyModifiers;
    use std::time::Instant;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ready_state() -> DashboardState {
        let config = UIConfig::new(false, "http://127.0.0.1:8000/api".to_string());
        let mut state = DashboardState::new(Dashboard::new(30), Instant::now(), config);
        state.apply(Msg::Start);
        let bounds = DateBounds::new(d(2024, 1, 1), d(2024, 12, 31)).unwrap();
        state.apply(Msg::BoundsLoaded(Ok(bounds)));
        state
    }

    fn type_text(state: &mut DashboardState, text: &str) {
        for c in text.chars() {
            if let Some(msg) = state.handle_key(key(KeyCode::Char(c))) {
                state.apply(msg);
            }
        }
    }

    fn clear_field(state: &mut DashboardState) {
        while let Some(msg) = state.handle_key(key(KeyCode::Backspace)) {
            state.apply(msg);
        }
    }

    #[test]
    fn test_inputs_follow_default_selection() {
        let state = ready_state();
        assert_eq!(state.start_input, "2024-01-01");
        assert_eq!(state.end_input, "2024-01-31");
    }

    #[test]
    fn test_typing_a_date_updates_model() {
        let mut state = ready_state();
        state.handle_key(key(KeyCode::Tab));
        assert_eq!(state.focus, DateField::End);

        clear_field(&mut state);
        type_text(&mut state, "2024-01-15");
        assert_eq!(state.end_input, "2024-01-15");
        assert_eq!(state.model.controller().end(), Some(d(2024, 1, 15)));

        // Field is full
        assert!(state.handle_key(key(KeyCode::Char('1'))).is_none());
    }

    #[test]
    fn test_tab_restores_half_typed_field() {
        let mut state = ready_state();
        clear_field(&mut state);
        type_text(&mut state, "2024-0");
        assert_eq!(state.start_input, "2024-0");

        state.handle_key(key(KeyCode::Tab));
        assert_eq!(state.start_input, "2024-01-01");
    }

    #[test]
    fn test_step_keys_resync_inputs() {
        let mut state = ready_state();
        let msg = state.handle_key(key(KeyCode::Up)).unwrap();
        assert_eq!(msg, Msg::StepDate {
            field: DateField::Start,
            days: 1
        });
        state.apply(msg);
        assert_eq!(state.start_input, "2024-01-02");
    }

    #[test]
    fn test_request_results_keep_half_typed_text() {
        let mut state = ready_state();
        let effects = state.apply(Msg::Fetch);
        let [Effect::FetchSeries(selection)] = effects.as_slice() else {
            panic!("expected a single fetch effect, got {:?}", effects);
        };
        let selection = *selection;

        clear_field(&mut state);
        type_text(&mut state, "2024-0");

        state.apply(Msg::SeriesLoaded {
            selection,
            result: Ok(Vec::new()),
        });
        assert_eq!(state.start_input, "2024-0");
        assert_eq!(state.end_input, "2024-01-31");

        state.apply(Msg::SeriesLoaded {
            selection,
            result: Err("Request timed out".to_string()),
        });
        assert_eq!(state.start_input, "2024-0");
    }

    #[test]
    fn test_action_keys() {
        let mut state = ready_state();
        assert_eq!(state.handle_key(key(KeyCode::Enter)), Some(Msg::Fetch));
        assert_eq!(state.handle_key(key(KeyCode::Char('r'))), Some(Msg::RetryBounds));
        assert_eq!(
            state.handle_key(key(KeyCode::PageDown)),
            Some(Msg::ShiftWindow { forward: true })
        );
        assert!(state.handle_key(key(KeyCode::Char('x'))).is_none());
    }

    #[test]
    fn test_update_moves_events_to_activity_log() {
        let mut state = ready_state();
        state.add_event(Event::bounds_with_level(
            "Found dates".to_string(),
            EventType::Success,
            LogLevel::Info,
        ));
        state.update();
        assert!(state.pending_events.is_empty());
        assert!(state.activity_logs.iter().any(|e| e.msg == "Found dates"));
        assert_eq!(state.tick, 1);
    }
}
