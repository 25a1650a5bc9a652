//! JSON bodies exchanged with the lot server.

use crate::lot::{Machine, VehicleId};
use serde::{Deserialize, Serialize};

/// Body of `POST /add`. The machine is sent as a string, like a form select value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddVehicleRequest {
    pub plate: String,
    pub small: bool,
    pub machine: String,
}

impl AddVehicleRequest {
    pub fn new(plate: impl Into<String>, small: bool, machine: Machine) -> Self {
        Self {
            plate: plate.into(),
            small,
            machine: machine.to_string(),
        }
    }
}

/// Body of `POST /remove`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RemoveVehicleRequest {
    pub id: VehicleId,
}

/// Reply to every mutation endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MutationResponse {
    pub success: bool,
    #[serde(default)]
    pub msg: Option<String>,
}

#[cfg(test)]
impl MutationResponse {
    pub fn accepted() -> Self {
        Self {
            success: true,
            msg: None,
        }
    }

    pub fn rejected() -> Self {
        Self {
            success: false,
            msg: None,
        }
    }
}
