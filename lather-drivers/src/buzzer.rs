//! Buzzer edge detection
//!
//! The controller re-asserts `Finish` and `Error` on every tick while it
//! sits in a terminal state. A tune must play once per change, not once
//! per tick.

use lather_core::traits::Tune;
use lather_core::BuzzerMode;

/// Turns a per-tick buzzer mode into one-shot tunes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BuzzerEdge {
    last: BuzzerMode,
}

impl BuzzerEdge {
    pub const fn new() -> Self {
        Self {
            last: BuzzerMode::Off,
        }
    }

    /// Feed this tick's mode, returning a tune on an edge into a new mode
    pub fn update(&mut self, mode: BuzzerMode) -> Option<Tune> {
        let edge = mode != self.last;
        self.last = mode;
        if edge {
            Tune::for_mode(mode)
        } else {
            None
        }
    }

    /// Mode seen on the last update
    pub fn last(&self) -> BuzzerMode {
        self.last
    }
}
