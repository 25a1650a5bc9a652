//! Parking lot domain types.

mod board;
mod form;
mod machine;
mod vehicle;

pub use board::{LotBoard, MachineList, VehicleItem};
pub use form::VehicleForm;
pub use machine::Machine;
pub use vehicle::{VehicleId, VehicleRecord};

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LotError {
    #[error("Plate number is required")]
    EmptyPlate,

    #[error("Unknown machine '{0}', expected 1, 2 or 3")]
    UnknownMachine(String),

    #[error("Invalid vehicle id '{0}'")]
    InvalidVehicleId(String),
}
