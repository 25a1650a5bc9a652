//! Event System
//!
//! Types and implementations for worker events and logging

use crate::error_classifier::LogLevel;
use crate::logging::activity_threshold;
use crate::lot::LotBoard;
use chrono::Local;
use std::fmt::Display;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Worker {
    /// Fetches the vehicle list and renders it.
    Refresher,
    /// Applies add, remove and exit requests.
    Mutator,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum EventType {
    Success,
    Error,
    Refresh,
    /// A blocking message for the user, e.g. a validation failure.
    Alert,
    /// A fresh board to display.
    Render,
    /// The plate input should be emptied.
    FormCleared,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub worker: Worker,
    pub msg: String,
    pub timestamp: String,
    pub event_type: EventType,
    pub log_level: LogLevel,
    /// Board carried by render events
    pub board: Option<LotBoard>,
}

impl Event {
    fn new(worker: Worker, msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self {
            worker,
            msg,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            event_type,
            log_level,
            board: None,
        }
    }

    pub fn render(board: LotBoard) -> Self {
        let msg = format!("Rendered {} vehicles", board.total());
        Self {
            board: Some(board),
            ..Self::new(Worker::Refresher, msg, EventType::Render, LogLevel::Debug)
        }
    }

    pub fn alert(msg: String) -> Self {
        Self::new(Worker::Mutator, msg, EventType::Alert, LogLevel::Warn)
    }

    /// The message is the plate that was parked.
    pub fn form_cleared(plate: String) -> Self {
        Self::new(Worker::Mutator, plate, EventType::FormCleared, LogLevel::Debug)
    }

    pub fn refresher_with_level(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Worker::Refresher, msg, event_type, log_level)
    }

    pub fn mutator_with_level(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Worker::Mutator, msg, event_type, log_level)
    }

    pub fn should_display(&self) -> bool {
        // Render and form events drive the UI and are not shown in logs
        if matches!(
            self.event_type,
            EventType::Render | EventType::FormCleared
        ) {
            return false;
        }
        // Always show success, alert and info level events
        if matches!(self.event_type, EventType::Success | EventType::Alert)
            || self.log_level >= LogLevel::Info
        {
            return true;
        }
        self.log_level >= activity_threshold()
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}] {}", self.event_type, self.timestamp, self.msg)
    }
}
