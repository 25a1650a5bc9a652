use crate::server::error::ServerError;
use crate::workers::controller::ControllerError;
use log::Level;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::Trace,
            LogLevel::Debug => Level::Debug,
            LogLevel::Info => Level::Info,
            LogLevel::Warn => Level::Warn,
            LogLevel::Error => Level::Error,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ErrorClassifier;

impl ErrorClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify_server_error(&self, error: &ServerError) -> LogLevel {
        match error {
            // Critical: the server refuses us outright
            ServerError::Http { status, .. } if *status == 401 => LogLevel::Error,
            ServerError::Http { status, .. } if *status == 403 => LogLevel::Error,

            // Server restarting or overloaded, next refresh will likely succeed
            ServerError::Http { status, .. } if (500..=599).contains(status) => LogLevel::Warn,

            // Malformed payloads mean client and server disagree on the contract
            ServerError::Decode(_) => LogLevel::Error,

            // Network issues - usually temporary
            _ => LogLevel::Warn,
        }
    }

    pub fn classify_controller_error(&self, error: &ControllerError) -> LogLevel {
        match error {
            ControllerError::EmptyPlate => LogLevel::Warn,
            ControllerError::Server(e) => self.classify_server_error(e),
        }
    }
}

impl Default for ErrorClassifier {
    fn default() -> Self {
        Self::new()
    }
}
