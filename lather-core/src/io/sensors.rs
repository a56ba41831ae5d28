//! Sensor snapshot

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Drum water level, ordered from empty to full
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum WaterLevel {
    #[default]
    Empty,
    Low,
    Med,
    High,
}

impl WaterLevel {
    /// All levels in ascending order
    pub const ALL: [WaterLevel; 4] = [
        WaterLevel::Empty,
        WaterLevel::Low,
        WaterLevel::Med,
        WaterLevel::High,
    ];

    /// Diagnostic name
    pub const fn name(self) -> &'static str {
        match self {
            WaterLevel::Empty => "EMPTY",
            WaterLevel::Low => "LOW",
            WaterLevel::Med => "MED",
            WaterLevel::High => "HIGH",
        }
    }

    /// Next level up, saturating at `High`
    pub const fn raised(self) -> Self {
        match self {
            WaterLevel::Empty => WaterLevel::Low,
            WaterLevel::Low => WaterLevel::Med,
            WaterLevel::Med | WaterLevel::High => WaterLevel::High,
        }
    }

    /// Next level down, saturating at `Empty`
    pub const fn lowered(self) -> Self {
        match self {
            WaterLevel::High => WaterLevel::Med,
            WaterLevel::Med => WaterLevel::Low,
            WaterLevel::Low | WaterLevel::Empty => WaterLevel::Empty,
        }
    }

    /// Convert from a raw probe index (0 = empty .. 3 = high)
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }
}

/// Sensor readings supplied by the caller each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sensors {
    /// Current drum water level
    pub water_level: WaterLevel,
    /// True while the drain sensor still detects water in the drum
    pub drain_check: bool,
}

impl Sensors {
    /// Sensors of an empty, dry drum
    pub const fn empty() -> Self {
        Self {
            water_level: WaterLevel::Empty,
            drain_check: false,
        }
    }
}
