//! Tank capacities

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected tank capacity
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("tank size {0} is not supported")]
pub struct TankSizeError(pub i64);

/// The closed set of tank capacities a ufo can carry.
///
/// Serialized as the bare capacity (`100`, `200`, `300`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum TankSize {
    Small,
    Medium,
    Large,
}

impl TankSize {
    pub const ALL: [TankSize; 3] = [TankSize::Small, TankSize::Medium, TankSize::Large];

    pub const fn capacity(self) -> i64 {
        match self {
            TankSize::Small => 100,
            TankSize::Medium => 200,
            TankSize::Large => 300,
        }
    }
}

impl TryFrom<i64> for TankSize {
    type Error = TankSizeError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        TankSize::ALL
            .into_iter()
            .find(|tank| tank.capacity() == value)
            .ok_or(TankSizeError(value))
    }
}

impl From<TankSize> for i64 {
    fn from(tank: TankSize) -> Self {
        tank.capacity()
    }
}

impl std::fmt::Display for TankSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.capacity())
    }
}
