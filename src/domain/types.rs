//! Shared types for the garage: floors and slot identities

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of slots on every floor
pub const SLOTS_PER_FLOOR: u8 = 6;

/// Floor of the garage
///
/// The set is fixed; the display names are the ones printed on the signs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Floor {
    #[default]
    #[serde(rename = "EG")]
    Ground,
    #[serde(rename = "1. OG")]
    First,
    #[serde(rename = "2. OG")]
    Second,
}

impl Floor {
    /// All floors in store order
    pub const ALL: [Floor; 3] = [Floor::Ground, Floor::First, Floor::Second];

    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Floor::Ground => "EG",
            Floor::First => "1. OG",
            Floor::Second => "2. OG",
        }
    }

    /// Position in `Floor::ALL`
    #[inline]
    pub fn index(&self) -> usize {
        match self {
            Floor::Ground => 0,
            Floor::First => 1,
            Floor::Second => 2,
        }
    }

    /// Next floor up, wrapping to the ground floor
    pub fn next(self) -> Floor {
        Floor::ALL[(self.index() + 1) % Floor::ALL.len()]
    }

    /// Next floor down, wrapping to the top floor
    pub fn prev(self) -> Floor {
        Floor::ALL[(self.index() + Floor::ALL.len() - 1) % Floor::ALL.len()]
    }

    /// Display names of all floors, in picker order
    pub fn names() -> [&'static str; 3] {
        Floor::ALL.map(|f| f.as_str())
    }
}

impl fmt::Display for Floor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Floor name outside the fixed set
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown floor '{0}'")]
pub struct UnknownFloor(pub String);

impl FromStr for Floor {
    type Err = UnknownFloor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Floor::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| UnknownFloor(s.to_string()))
    }
}

/// Identity of a parking slot: floor plus 1-based number on that floor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotId {
    pub floor: Floor,
    pub number: u8,
}

impl SlotId {
    pub fn new(floor: Floor, number: u8) -> Self {
        Self { floor, number }
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.floor, self.number)
    }
}
