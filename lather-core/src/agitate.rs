//! Agitation motor pattern
//!
//! One full cycle is two half-cycles. Each half starts with the motor
//! running for `run` ticks, then it rests until the half ends. The first
//! half turns clockwise, the second counter-clockwise:
//!
//! ```text
//! |<------- half ------->|<------- half ------->|
//! |== CW ==|    stop     |== CCW ==|    stop    |
//! |<-run ->|             |<-run -->|            |
//! ```

use crate::io::MotorDir;
use crate::program::Program;

/// Agitation timing in ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AgitatePattern {
    /// Motor on-time at the start of each half-cycle
    pub run_ticks: u32,
    /// Half-cycle length
    pub half_cycle_ticks: u32,
}

impl AgitatePattern {
    /// Derive the pattern from a program's millisecond settings
    pub fn from_program(program: &Program) -> Self {
        Self {
            run_ticks: program.ms_to_ticks(program.agitate_run_ms),
            half_cycle_ticks: program.ms_to_ticks(program.agitate_cycle_ms),
        }
    }

    /// Full cycle length
    pub fn full_cycle_ticks(&self) -> u32 {
        self.half_cycle_ticks.saturating_mul(2)
    }

    /// Motor direction at `state_time` ticks into agitation
    ///
    /// A half-cycle shorter than one tick yields no motion at all.
    pub fn direction_at(&self, state_time: u32) -> MotorDir {
        let full = self.full_cycle_ticks();
        if full == 0 {
            return MotorDir::Stop;
        }

        let cycle_time = state_time % full;
        if cycle_time < self.half_cycle_ticks {
            if cycle_time < self.run_ticks {
                MotorDir::Cw
            } else {
                MotorDir::Stop
            }
        } else if cycle_time - self.half_cycle_ticks < self.run_ticks {
            MotorDir::Ccw
        } else {
            MotorDir::Stop
        }
    }
}
