//! The add-vehicle input controls.

use super::{LotError, Machine};

/// Plate, small-vehicle checkbox and machine selection as entered by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VehicleForm {
    pub plate: String,
    pub small: bool,
    pub machine: Machine,
}

impl VehicleForm {
    pub fn new(plate: impl Into<String>, small: bool, machine: Machine) -> Self {
        Self {
            plate: plate.into(),
            small,
            machine,
        }
    }

    /// Returns the trimmed plate, or an error when nothing but whitespace was entered.
    pub fn validated_plate(&self) -> Result<&str, LotError> {
        let plate = self.plate.trim();
        if plate.is_empty() {
            return Err(LotError::EmptyPlate);
        }
        Ok(plate)
    }
}
