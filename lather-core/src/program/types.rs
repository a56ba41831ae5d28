//! Program type definition and validation

use core::fmt;

use crate::io::WaterLevel;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Final spin duration in seconds
///
/// Hard-coded safety duration, deliberately not a program field: unlike
/// every other timing it cannot be configured.
pub const SPIN_DURATION_SEC: u16 = 7;

/// Wash program configuration
///
/// All durations are in seconds unless the field name says otherwise.
/// Tick counts are derived by multiplying with `ticks_per_second`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct Program {
    /// Number of wash cycles
    pub wash_count: u8,
    /// Number of rinse cycles
    pub rinse_count: u8,
    /// Whether to finish with a spin
    pub spin_enable: bool,
    /// Soap injection time per wash cycle
    pub soap_time_sec: u16,
    /// Agitation time per wash cycle
    pub wash_agitate_time_sec: u16,
    /// Agitation time per rinse cycle
    pub rinse_agitate_time_sec: u16,
    /// Motor on-time at the start of each agitation half-cycle (ms)
    pub agitate_run_ms: u16,
    /// Length of one agitation half-cycle (ms)
    pub agitate_cycle_ms: u16,
    /// Level that ends a fill
    pub target_water_level: WaterLevel,
    /// Max time to reach the target level before faulting
    pub water_fill_timeout_sec: u16,
    /// Max time for the drain sensor to clear before faulting
    pub drain_timeout_sec: u16,
    /// Tick frequency the caller drives the controller at
    pub ticks_per_second: u8,
}

/// Reasons a program is rejected at initialization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProgramError {
    /// `water_fill_timeout_sec` is zero
    ZeroFillTimeout,
    /// `drain_timeout_sec` is zero
    ZeroDrainTimeout,
    /// `ticks_per_second` is zero
    ZeroTickRate,
}

impl fmt::Display for ProgramError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgramError::ZeroFillTimeout => f.write_str("fill timeout must be nonzero"),
            ProgramError::ZeroDrainTimeout => f.write_str("drain timeout must be nonzero"),
            ProgramError::ZeroTickRate => f.write_str("tick rate must be nonzero"),
        }
    }
}

impl Program {
    /// Check the program for internal consistency
    ///
    /// A program is usable when both timeouts and the tick rate are nonzero.
    pub fn validate(&self) -> Result<(), ProgramError> {
        if self.water_fill_timeout_sec == 0 {
            return Err(ProgramError::ZeroFillTimeout);
        }
        if self.drain_timeout_sec == 0 {
            return Err(ProgramError::ZeroDrainTimeout);
        }
        if self.ticks_per_second == 0 {
            return Err(ProgramError::ZeroTickRate);
        }
        Ok(())
    }

    /// Check if the program passes [`Program::validate`]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Convert whole seconds to ticks
    pub fn secs_to_ticks(&self, secs: u16) -> u32 {
        u32::from(secs) * u32::from(self.ticks_per_second)
    }

    /// Convert milliseconds to ticks, rounding down
    pub fn ms_to_ticks(&self, ms: u16) -> u32 {
        u32::from(ms) * u32::from(self.ticks_per_second) / 1000
    }

    /// Fill timeout in ticks
    pub fn fill_timeout_ticks(&self) -> u32 {
        self.secs_to_ticks(self.water_fill_timeout_sec)
    }

    /// Drain timeout in ticks
    pub fn drain_timeout_ticks(&self) -> u32 {
        self.secs_to_ticks(self.drain_timeout_sec)
    }

    /// Soap injection time in ticks
    pub fn soap_ticks(&self) -> u32 {
        self.secs_to_ticks(self.soap_time_sec)
    }

    /// Agitation time in seconds for the given phase
    pub fn agitate_secs(&self, is_wash_phase: bool) -> u16 {
        if is_wash_phase {
            self.wash_agitate_time_sec
        } else {
            self.rinse_agitate_time_sec
        }
    }

    /// Agitation time in ticks for the given phase
    pub fn agitate_ticks(&self, is_wash_phase: bool) -> u32 {
        self.secs_to_ticks(self.agitate_secs(is_wash_phase))
    }

    /// Spin time in ticks
    pub fn spin_ticks(&self) -> u32 {
        self.secs_to_ticks(SPIN_DURATION_SEC)
    }

    /// Nominal duration of one wash cycle (fill, soap, agitate, drain)
    ///
    /// Fill and drain use their timeouts as stand-ins since the real
    /// durations depend on the plumbing.
    pub fn wash_cycle_secs(&self) -> u32 {
        u32::from(self.water_fill_timeout_sec)
            + u32::from(self.soap_time_sec)
            + u32::from(self.wash_agitate_time_sec)
            + u32::from(self.drain_timeout_sec)
    }

    /// Nominal duration of one rinse cycle (fill, agitate, drain)
    pub fn rinse_cycle_secs(&self) -> u32 {
        u32::from(self.water_fill_timeout_sec)
            + u32::from(self.rinse_agitate_time_sec)
            + u32::from(self.drain_timeout_sec)
    }
}
