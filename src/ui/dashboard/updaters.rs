//! Dashboard state update logic
//!
//! Contains all methods for updating dashboard state from events

use super::state::DashboardState;

use crate::events::{Event as WorkerEvent, EventType, Worker};
use chrono::Local;
use std::time::Instant;

impl DashboardState {
    /// Update the dashboard state with new tick and queued events.
    pub fn update(&mut self) {
        self.tick += 1;

        // Process all queued events one by one
        while let Some(event) = self.pending_events.pop_front() {
            self.process_event(&event);

            // Render and form events only drive the screen
            if !matches!(event.event_type, EventType::Render | EventType::FormCleared) {
                self.add_to_activity_log(event);
            }
        }

        if self.alert.as_ref().is_some_and(|alert| alert.is_expired()) {
            self.alert = None;
        }
    }

    /// Process a single event and update relevant state
    fn process_event(&mut self, event: &WorkerEvent) {
        match event.event_type {
            EventType::Render => {
                if let Some(board) = &event.board {
                    self.board = board.clone();
                    self.last_refresh = Some(Instant::now());
                    self.last_refresh_timestamp =
                        Some(Local::now().format("%H:%M:%S").to_string());
                    self.clamp_selection();
                }
            }
            EventType::FormCleared => {
                // Keep whatever was typed after the parked plate was submitted
                if self.form.plate.trim() == event.msg {
                    self.form.plate.clear();
                }
                self.pending_add = None;
            }
            EventType::Alert => {
                self.pending_add = None;
                self.show_alert(event.msg.clone());
            }
            EventType::Error if event.worker == Worker::Mutator => self.pending_add = None,
            EventType::Success | EventType::Error | EventType::Refresh => {}
        }
    }
}
