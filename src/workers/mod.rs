//! Lot client workers
//!
//! The controller, its periodic refresh, and the command loop fed by the UI.

pub mod commands;
pub mod controller;
pub mod core;
pub mod guard;
pub mod refresher;

pub use commands::Command;
pub use controller::{ControllerError, LotController, MutationOutcome};
pub use refresher::RefreshHandle;
