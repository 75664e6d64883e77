pub mod cli_consts {
    //! Dashboard Configuration Constants
    //!
    //! This module contains all configuration constants for the dashboard,
    //! organized by functional area for clarity and maintainability.

    // =============================================================================
    // DATE RANGE CONFIGURATION
    // =============================================================================

    /// Default maximum span of a selection, in days.
    /// Can be overridden from the config file or `--max-range-days`.
    pub const MAX_RANGE_DAYS: u32 = 30;

    /// Display format for dates shown to the user (DD/MM/YYYY).
    pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

    /// Format of dates typed by the user and sent to the API.
    pub const INPUT_DATE_FORMAT: &str = "%Y-%m-%d";

    // =============================================================================
    // QUEUE CONFIGURATION
    // =============================================================================

    /// The maximum number of events to keep in the activity logs.
    pub const MAX_ACTIVITY_LOGS: usize = 100;

    /// Buffer size of the channels carrying effect results and activity events.
    pub const EVENT_QUEUE_SIZE: usize = 100;

    // =============================================================================
    // NETWORK CONFIGURATION
    // =============================================================================

    pub mod network {
        use std::time::Duration;

        /// Base URL of the wind data service when nothing else is configured.
        pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/api";

        /// Whole-request timeout (seconds)
        pub const REQUEST_TIMEOUT_SECS: u64 = 15;

        /// Connection establishment timeout (seconds)
        pub const CONNECT_TIMEOUT_SECS: u64 = 10;

        pub const fn request_timeout() -> Duration {
            Duration::from_secs(REQUEST_TIMEOUT_SECS)
        }

        pub const fn connect_timeout() -> Duration {
            Duration::from_secs(CONNECT_TIMEOUT_SECS)
        }
    }

    // =============================================================================
    // UI CONFIGURATION
    // =============================================================================

    pub mod ui {
        use std::time::Duration;

        /// How long the splash screen stays up unless a key is pressed.
        pub const SPLASH_DURATION: Duration = Duration::from_secs(2);

        /// Key polling interval for the UI loop.
        pub const POLL_INTERVAL: Duration = Duration::from_millis(100);
    }
}
