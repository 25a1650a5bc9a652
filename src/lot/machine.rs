//! Parking machines a vehicle can be assigned to.

use super::LotError;
use serde::Serialize;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// One of the three parking structures served by the lot server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
#[serde(into = "u32")]
pub enum Machine {
    #[default]
    One,
    Two,
    Three,
}

impl Machine {
    /// All machines, in display order.
    pub const ALL: [Machine; 3] = [Machine::One, Machine::Two, Machine::Three];

    /// The number the server uses for this machine.
    pub fn number(self) -> u32 {
        match self {
            Machine::One => 1,
            Machine::Two => 2,
            Machine::Three => 3,
        }
    }

    /// Zero-based position of this machine in [`Machine::ALL`].
    pub fn index(self) -> usize {
        self.number() as usize - 1
    }

    /// The machine after this one, wrapping around.
    pub fn next(self) -> Self {
        match self {
            Machine::One => Machine::Two,
            Machine::Two => Machine::Three,
            Machine::Three => Machine::One,
        }
    }

    /// The machine before this one, wrapping around.
    pub fn prev(self) -> Self {
        match self {
            Machine::One => Machine::Three,
            Machine::Two => Machine::One,
            Machine::Three => Machine::Two,
        }
    }
}

impl TryFrom<i64> for Machine {
    type Error = LotError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Machine::One),
            2 => Ok(Machine::Two),
            3 => Ok(Machine::Three),
            other => Err(LotError::UnknownMachine(other.to_string())),
        }
    }
}

impl From<Machine> for u32 {
    fn from(machine: Machine) -> Self {
        machine.number()
    }
}

impl FromStr for Machine {
    type Err = LotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let number = s
            .trim()
            .parse::<i64>()
            .map_err(|_| LotError::UnknownMachine(s.to_string()))?;
        Machine::try_from(number)
    }
}

impl Display for Machine {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.number())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_three_machines_are_known() {
        assert_eq!(Machine::try_from(1).unwrap(), Machine::One);
        assert_eq!(Machine::try_from(3).unwrap(), Machine::Three);
        assert!(Machine::try_from(0).is_err());
        assert!(Machine::try_from(4).is_err());
        assert!(Machine::try_from(-1).is_err());
    }

    #[test]
    fn test_parse_from_select_value() {
        assert_eq!("2".parse::<Machine>().unwrap(), Machine::Two);
        assert_eq!(" 3 ".parse::<Machine>().unwrap(), Machine::Three);
        assert!("two".parse::<Machine>().is_err());
        assert!("7".parse::<Machine>().is_err());
        assert!("-2".parse::<Machine>().is_err());
    }

    #[test]
    fn test_cycling_wraps_around() {
        assert_eq!(Machine::Three.next(), Machine::One);
        assert_eq!(Machine::One.prev(), Machine::Three);
        assert_eq!(Machine::Two.next().prev(), Machine::Two);
    }
}
