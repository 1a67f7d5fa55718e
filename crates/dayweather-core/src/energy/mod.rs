//! Internal weather and the capacity budget it buys.
//!
//! An [`EnergyLevel`] is picked once per day. The [`CapacityPolicy`] maps
//! it to a ceiling of complexity-weighted focus work, and
//! [`capacity_info`] derives the budget view from the day's task snapshot.

mod capacity;

pub use capacity::{capacity_info, CapacityInfo, CapacityPolicy};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Self-reported capacity for the day, highest first.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EnergyLevel {
    /// Buzzing, lots to give
    Sparky,
    /// Reliable, ordinary day
    Steady,
    /// Going with it, some room
    Flowing,
    /// Hazy, keep it small
    Foggy,
    /// Recovery day, no focus work
    Resting,
}

impl EnergyLevel {
    /// All levels, highest capacity first.
    pub const ALL: [EnergyLevel; 5] = [
        EnergyLevel::Sparky,
        EnergyLevel::Steady,
        EnergyLevel::Flowing,
        EnergyLevel::Foggy,
        EnergyLevel::Resting,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EnergyLevel::Sparky => "sparky",
            EnergyLevel::Steady => "steady",
            EnergyLevel::Flowing => "flowing",
            EnergyLevel::Foggy => "foggy",
            EnergyLevel::Resting => "resting",
        }
    }

    /// Short weather-style description shown next to the level.
    pub fn forecast(&self) -> &'static str {
        match self {
            EnergyLevel::Sparky => "Bright and electric. Room for a big push.",
            EnergyLevel::Steady => "Clear skies. A solid, ordinary day.",
            EnergyLevel::Flowing => "Light breeze. Go with what feels doable.",
            EnergyLevel::Foggy => "Low visibility. One small thing is plenty.",
            EnergyLevel::Resting => "Storm shelter. Today is for recovery.",
        }
    }
}

impl fmt::Display for EnergyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnergyLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sparky" => Ok(EnergyLevel::Sparky),
            "steady" => Ok(EnergyLevel::Steady),
            "flowing" => Ok(EnergyLevel::Flowing),
            "foggy" => Ok(EnergyLevel::Foggy),
            "resting" => Ok(EnergyLevel::Resting),
            _ => Err(ValidationError::UnknownEnergy(s.to_string())),
        }
    }
}
