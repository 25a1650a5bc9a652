//! Per-machine view of one vehicle snapshot.

use super::{Machine, VehicleId, VehicleRecord};
use serde::Serialize;

/// Visual markers attached to a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Marker {
    Low,
    Small,
}

/// A vehicle as shown in a machine list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VehicleItem {
    pub id: VehicleId,
    pub label: String,
    pub low: bool,
    pub small: bool,
    pub exit_order: u32,
}

impl VehicleItem {
    pub fn markers(&self) -> Vec<Marker> {
        let mut markers = Vec::with_capacity(2);
        if self.low {
            markers.push(Marker::Low);
        }
        if self.small {
            markers.push(Marker::Small);
        }
        markers
    }

    /// Whether the vehicle is waiting in its machine's exit queue.
    pub fn is_queued(&self) -> bool {
        self.exit_order > 0
    }
}

impl From<VehicleRecord> for VehicleItem {
    fn from(record: VehicleRecord) -> Self {
        Self {
            id: record.id,
            label: record.plate,
            low: record.low,
            small: record.small,
            exit_order: record.exit_order,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MachineList {
    pub machine: Machine,
    pub vehicles: Vec<VehicleItem>,
}

/// The three machine lists derived from a single `/list` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LotBoard {
    pub machines: [MachineList; 3],
}

impl Default for LotBoard {
    fn default() -> Self {
        Self {
            machines: Machine::ALL.map(|machine| MachineList {
                machine,
                vehicles: Vec::new(),
            }),
        }
    }
}

impl LotBoard {
    /// Partitions a snapshot by machine, keeping server order within each list.
    /// Records assigned to an unknown machine are dropped.
    pub fn from_records(records: Vec<VehicleRecord>) -> Self {
        let mut board = Self::default();
        for record in records {
            match Machine::try_from(record.machine) {
                Ok(machine) => board.machines[machine.index()]
                    .vehicles
                    .push(VehicleItem::from(record)),
                Err(_) => log::debug!(
                    "dropping vehicle {} on unknown machine {}",
                    record.id,
                    record.machine
                ),
            }
        }
        board
    }

    pub fn list(&self, machine: Machine) -> &MachineList {
        &self.machines[machine.index()]
    }

    pub fn total(&self) -> usize {
        self.machines.iter().map(|m| m.vehicles.len()).sum()
    }

    #[cfg(test)]
    pub fn contains(&self, id: VehicleId) -> bool {
        self.find(id).is_some()
    }

    /// Finds a vehicle and the machine it is rendered under.
    #[cfg(test)]
    pub fn find(&self, id: VehicleId) -> Option<(Machine, &VehicleItem)> {
        self.machines.iter().find_map(|list| {
            list.vehicles
                .iter()
                .find(|v| v.id == id)
                .map(|v| (list.machine, v))
        })
    }
}
