//! Main application state and UI loop
//!
//! Contains the App struct and main UI event handling logic

use crate::consts::cli_consts::ui::{POLL_INTERVAL, SPLASH_DURATION};
use crate::dashboard::Msg;
use crate::events::Event as ActivityEvent;
use crate::runtime::EffectRunner;
use crate::session::SessionData;
use crate::ui::dashboard::{DashboardState, render_dashboard};
use crate::ui::splash::render_splash;
use crossterm::event::{self, Event, KeyCode};
use ratatui::{Frame, Terminal, backend::Backend};
use std::time::Instant;
use tokio::sync::mpsc;

/// UI configuration data grouped by concern
#[derive(Debug, Clone)]
pub struct UIConfig {
    pub with_background_color: bool,
    pub api_url: String,
}

impl UIConfig {
    pub fn new(with_background_color: bool, api_url: String) -> Self {
        Self {
            with_background_color,
            api_url,
        }
    }
}

/// The different screens in the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Splash screen shown at the start of the application.
    Splash,
    /// Dashboard screen with the date controls and chart.
    Dashboard,
}

/// Application state
pub struct App {
    /// The current screen being displayed in the application.
    current_screen: Screen,

    /// Dashboard state. Bound discovery runs behind the splash screen.
    state: Box<DashboardState>,

    /// Executes effects requested by the model.
    runner: EffectRunner,

    /// Receives effect results.
    msg_receiver: mpsc::Receiver<Msg>,

    /// Receives activity events from running effects.
    event_receiver: mpsc::Receiver<ActivityEvent>,
}

impl App {
    /// Creates a new instance of the application.
    pub fn new(session: SessionData, ui_config: UIConfig) -> Self {
        Self {
            current_screen: Screen::Splash,
            state: Box::new(DashboardState::new(
                session.dashboard,
                Instant::now(),
                ui_config,
            )),
            runner: session.runner,
            msg_receiver: session.msg_receiver,
            event_receiver: session.event_receiver,
        }
    }

    /// Applies a message to the dashboard and runs whatever it asks for.
    fn dispatch(&mut self, msg: Msg) {
        let effects = self.state.apply(msg);
        self.runner.spawn_all(effects);
    }
}

/// Runs the application UI in a loop, handling events and rendering the appropriate screen.
pub async fn run<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> std::io::Result<()> {
    let splash_start = Instant::now();
    app.dispatch(Msg::Start);

    // UI event loop
    loop {
        // Apply effect results in arrival order
        while let Ok(msg) = app.msg_receiver.try_recv() {
            app.dispatch(msg);
        }

        // Queue all incoming events for processing
        while let Ok(event) = app.event_receiver.try_recv() {
            app.state.add_event(event);
        }

        app.state.update();
        terminal.draw(|f| render(f, app.current_screen, &app.state))?;

        if app.current_screen == Screen::Splash && splash_start.elapsed() >= SPLASH_DURATION {
            app.current_screen = Screen::Dashboard;
            continue;
        }

        // Poll for key events. Effect tasks keep running on the runtime meanwhile.
        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                // Skip events that are not KeyEventKind::Press
                if key.kind == event::KeyEventKind::Release {
                    continue;
                }

                // Handle exit events
                if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
                    return Ok(());
                }

                match app.current_screen {
                    // Any key press will skip the splash screen
                    Screen::Splash => app.current_screen = Screen::Dashboard,
                    Screen::Dashboard => {
                        if let Some(msg) = app.state.handle_key(key) {
                            app.dispatch(msg);
                        }
                    }
                }
            }
        }
        tokio::task::yield_now().await;
    }
}

/// Renders the current screen based on the application state.
fn render(f: &mut Frame, screen: Screen, state: &DashboardState) {
    match screen {
        Screen::Splash => render_splash(f),
        Screen::Dashboard => render_dashboard(f, state),
    }
}
