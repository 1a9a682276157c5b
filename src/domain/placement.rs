use std::fmt;

use serde::{Deserialize, Serialize};

/// Finishing position. Judo brackets have no 4th or 6th place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Placement {
    First,
    Second,
    Third,
    Fifth,
    Seventh,
}

pub const VALID_PLACEMENTS: [Placement; 5] = [
    Placement::First,
    Placement::Second,
    Placement::Third,
    Placement::Fifth,
    Placement::Seventh,
];

impl Placement {
    pub fn value(self) -> i64 {
        match self {
            Placement::First => 1,
            Placement::Second => 2,
            Placement::Third => 3,
            Placement::Fifth => 5,
            Placement::Seventh => 7,
        }
    }

    pub fn label(self) -> String {
        format!("{}. Platz", self.value())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid placement {0}, expected one of 1, 2, 3, 5, 7")]
pub struct InvalidPlacement(pub i64);

impl TryFrom<i64> for Placement {
    type Error = InvalidPlacement;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Placement::First),
            2 => Ok(Placement::Second),
            3 => Ok(Placement::Third),
            5 => Ok(Placement::Fifth),
            7 => Ok(Placement::Seventh),
            other => Err(InvalidPlacement(other)),
        }
    }
}

impl From<Placement> for i64 {
    fn from(placement: Placement) -> Self {
        placement.value()
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}
