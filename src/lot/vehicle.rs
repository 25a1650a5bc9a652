//! Vehicle records as returned by `GET /list`.
//!
//! The server sends each vehicle as a positional JSON array:
//! `[id, plate, low, small, machine]`, optionally followed by the exit-queue
//! order. Flags arrive either as booleans or as 0/1 integers.

use super::LotError;
use serde::de::{self, Deserializer, IgnoredAny, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Opaque server-side handle of a parked vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VehicleId(i64);

impl VehicleId {
    pub fn new(raw: i64) -> Self {
        Self(raw)
    }
}

impl Display for VehicleId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for VehicleId {
    type Err = LotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(VehicleId::new)
            .map_err(|_| LotError::InvalidVehicleId(s.to_string()))
    }
}

/// A parked vehicle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleRecord {
    pub id: VehicleId,
    pub plate: String,
    /// Low-emission vehicle, rendered with the "low" marker.
    pub low: bool,
    /// Compact vehicle, rendered with the "small" marker.
    pub small: bool,
    /// Raw machine number, kept as sent. Only 1..=3 are rendered.
    pub machine: i64,
    /// Position in the machine's exit queue, 0 when not queued.
    pub exit_order: u32,
}

/// A boolean that the server may encode as `true`/`false` or as an integer.
struct Flag(bool);

impl<'de> Deserialize<'de> for Flag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FlagVisitor;

        impl Visitor<'_> for FlagVisitor {
            type Value = Flag;

            fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
                f.write_str("a boolean or an integer flag")
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Flag, E> {
                Ok(Flag(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Flag, E> {
                Ok(Flag(v != 0))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Flag, E> {
                Ok(Flag(v != 0))
            }
        }

        deserializer.deserialize_any(FlagVisitor)
    }
}

impl<'de> Deserialize<'de> for VehicleRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RecordVisitor;

        impl<'de> Visitor<'de> for RecordVisitor {
            type Value = VehicleRecord;

            fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
                f.write_str("a vehicle tuple [id, plate, low, small, machine, exit_order?]")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<VehicleRecord, A::Error> {
                let id: VehicleId = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let plate: String = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                let low: Flag = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(2, &self))?;
                let small: Flag = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(3, &self))?;
                let machine: i64 = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(4, &self))?;
                let exit_order: Option<u32> = seq.next_element()?;

                // Newer servers may append columns we don't know about yet.
                while seq.next_element::<IgnoredAny>()?.is_some() {}

                Ok(VehicleRecord {
                    id,
                    plate,
                    low: low.0,
                    small: small.0,
                    machine,
                    exit_order: exit_order.unwrap_or(0),
                })
            }
        }

        deserializer.deserialize_seq(RecordVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_five_element_row_with_bool_flags() {
        let record: VehicleRecord =
            serde_json::from_str(r#"[7, "12가3456", true, false, 2]"#).unwrap();
        assert_eq!(
            record,
            VehicleRecord {
                id: VehicleId::new(7),
                plate: "12가3456".to_string(),
                low: true,
                small: false,
                machine: 2,
                exit_order: 0,
            }
        );
    }

    #[test]
    fn test_decodes_integer_flags_and_exit_order() {
        let record: VehicleRecord =
            serde_json::from_str(r#"[3, "34나5678", 0, 1, 1, 2]"#).unwrap();
        assert!(!record.low);
        assert!(record.small);
        assert_eq!(record.exit_order, 2);
    }

    #[test]
    fn test_ignores_trailing_columns() {
        let record: VehicleRecord =
            serde_json::from_str(r#"[1, "A", 0, 0, 3, 0, "extra", null]"#).unwrap();
        assert_eq!(record.machine, 3);
    }

    #[test]
    fn test_out_of_range_machine_still_decodes() {
        let records: Vec<VehicleRecord> =
            serde_json::from_str(r#"[[1,"A",0,0,2,0],[2,"B",0,0,-1,0]]"#).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].machine, -1);
    }

    #[test]
    fn test_rejects_short_rows() {
        let result = serde_json::from_str::<VehicleRecord>(r#"[1, "A", 0, 0]"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_wrong_element_types() {
        assert!(serde_json::from_str::<VehicleRecord>(r#"["x", "A", 0, 0, 1]"#).is_err());
        assert!(serde_json::from_str::<VehicleRecord>(r#"[1, "A", "yes", 0, 1]"#).is_err());
        assert!(serde_json::from_str::<VehicleRecord>(r#"{"id": 1}"#).is_err());
    }

    #[test]
    fn test_vehicle_id_parses_from_cli_argument() {
        assert_eq!("42".parse::<VehicleId>().unwrap(), VehicleId::new(42));
        assert!("car-42".parse::<VehicleId>().is_err());
    }
}
