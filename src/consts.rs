pub mod cli_consts {
    //! Client Configuration Constants
    //!
    //! Tunables for the lot client, organized by functional area.

    // =============================================================================
    // QUEUE CONFIGURATION
    // =============================================================================

    /// The maximum number of events to keep in the activity logs.
    pub const MAX_ACTIVITY_LOGS: usize = 100;

    /// Maximum number of buffered events from the workers to the UI.
    pub const EVENT_QUEUE_SIZE: usize = 100;

    /// Maximum number of pending user commands.
    pub const COMMAND_QUEUE_SIZE: usize = 32;

    // =============================================================================
    // REFRESH CONFIGURATION
    // =============================================================================

    pub mod refresh {
        /// Default time between two vehicle list refreshes (seconds)
        pub const DEFAULT_INTERVAL_SECS: u64 = 5;

        /// Shortest refresh interval accepted from the command line or config (seconds)
        pub const MIN_INTERVAL_SECS: u64 = 1;
    }

    // =============================================================================
    // UI CONFIGURATION
    // =============================================================================

    pub mod ui {
        use std::time::Duration;

        /// How long the splash screen stays up before the dashboard (milliseconds)
        pub const SPLASH_DURATION_MS: u64 = 1500;

        /// How long an alert stays visible on the dashboard (seconds)
        pub const ALERT_DURATION_SECS: u64 = 4;

        /// Maximum plate length accepted by the input field
        pub const MAX_PLATE_CHARS: usize = 16;

        pub const fn splash_duration() -> Duration {
            Duration::from_millis(SPLASH_DURATION_MS)
        }

        pub const fn alert_duration() -> Duration {
            Duration::from_secs(ALERT_DURATION_SECS)
        }
    }

    // =============================================================================
    // NETWORK CONFIGURATION
    // =============================================================================

    pub mod http {
        use std::time::Duration;

        /// Connection timeout for lot server requests (seconds)
        pub const CONNECT_TIMEOUT_SECS: u64 = 10;

        /// Whole-request timeout for lot server requests (seconds)
        pub const REQUEST_TIMEOUT_SECS: u64 = 10;

        pub const fn connect_timeout() -> Duration {
            Duration::from_secs(CONNECT_TIMEOUT_SECS)
        }

        pub const fn request_timeout() -> Duration {
            Duration::from_secs(REQUEST_TIMEOUT_SECS)
        }
    }
}
