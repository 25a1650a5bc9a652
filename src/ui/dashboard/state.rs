//! Dashboard state management
//!
//! Contains the main dashboard state struct and related enums

use crate::consts::cli_consts::MAX_ACTIVITY_LOGS;
use crate::consts::cli_consts::ui::alert_duration;
use crate::environment::Environment;
use crate::events::Event as WorkerEvent;
use crate::lot::{LotBoard, Machine, VehicleForm, VehicleItem};
use crate::ui::app::UIConfig;

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Where key presses go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Moving between vehicles and acting on the selected one.
    #[default]
    Browse,
    /// Typing into the add-vehicle form.
    EditPlate,
}

/// A message shown above the form until it expires.
#[derive(Debug, Clone)]
pub struct Alert {
    pub message: String,
    pub shown_at: Instant,
}

impl Alert {
    pub fn is_expired(&self) -> bool {
        self.shown_at.elapsed() >= alert_duration()
    }
}

#[derive(Debug)]
pub struct DashboardState {
    /// The lot server the client is talking to.
    pub environment: Environment,
    /// The start time of the application, used for computing uptime.
    pub start_time: Instant,
    /// Time between two automatic refreshes.
    pub refresh_interval: Duration,
    /// Whether to enable background colors
    pub with_background_color: bool,

    /// Last rendered snapshot of the lot.
    pub board: LotBoard,
    /// When the last board arrived, for the refresh countdown.
    pub last_refresh: Option<Instant>,
    /// Wall-clock time of the last board, for display.
    pub last_refresh_timestamp: Option<String>,

    /// Queue of events waiting to be processed
    pub pending_events: VecDeque<WorkerEvent>,
    /// Activity logs for display
    pub activity_logs: VecDeque<WorkerEvent>,

    /// Add-vehicle form contents.
    pub form: VehicleForm,
    /// Form sent to the server and not yet answered.
    pub pending_add: Option<VehicleForm>,
    pub input_mode: InputMode,
    /// Machine column holding the selection.
    pub selected_machine: Machine,
    /// Row of the selected vehicle within its column.
    pub selected_row: usize,
    pub alert: Option<Alert>,

    /// Animation tick counter
    pub tick: usize,
}

impl DashboardState {
    /// Creates a new instance of the dashboard state.
    pub fn new(environment: Environment, start_time: Instant, ui_config: UIConfig) -> Self {
        Self {
            environment,
            start_time,
            refresh_interval: ui_config.refresh_interval,
            with_background_color: ui_config.with_background_color,
            board: LotBoard::default(),
            last_refresh: None,
            last_refresh_timestamp: None,
            pending_events: VecDeque::new(),
            activity_logs: VecDeque::new(),
            form: VehicleForm::default(),
            pending_add: None,
            input_mode: InputMode::Browse,
            selected_machine: Machine::One,
            selected_row: 0,
            alert: None,
            tick: 0,
        }
    }

    /// Add an event to activity logs with size limit
    pub fn add_to_activity_log(&mut self, event: WorkerEvent) {
        if self.activity_logs.len() >= MAX_ACTIVITY_LOGS {
            self.activity_logs.pop_front();
        }
        self.activity_logs.push_back(event);
    }

    /// Add an event to the processing queue
    pub fn add_event(&mut self, event: WorkerEvent) {
        self.pending_events.push_back(event);
    }

    /// The vehicle under the cursor, if the selected column has any.
    pub fn selected_vehicle(&self) -> Option<&VehicleItem> {
        self.board
            .list(self.selected_machine)
            .vehicles
            .get(self.selected_row)
    }

    pub fn show_alert(&mut self, message: impl Into<String>) {
        self.alert = Some(Alert {
            message: message.into(),
            shown_at: Instant::now(),
        });
    }

    /// Alert text while it is still visible.
    pub fn active_alert(&self) -> Option<&str> {
        self.alert
            .as_ref()
            .filter(|alert| !alert.is_expired())
            .map(|alert| alert.message.as_str())
    }

    /// Keeps the selected row inside the selected column.
    pub fn clamp_selection(&mut self) {
        let len = self.board.list(self.selected_machine).vehicles.len();
        self.selected_row = self.selected_row.min(len.saturating_sub(1));
    }

    /// Fraction of the refresh interval elapsed since the last board arrived.
    pub fn refresh_progress(&self) -> f64 {
        match self.last_refresh {
            Some(at) if !self.refresh_interval.is_zero() => {
                (at.elapsed().as_secs_f64() / self.refresh_interval.as_secs_f64()).min(1.0)
            }
            _ => 0.0,
        }
    }
}
