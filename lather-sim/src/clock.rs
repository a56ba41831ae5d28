//! Millisecond clocks and the tick pacer

use std::cell::Cell;
use std::time::Instant;

use lather_core::Program;

/// Millisecond time source
///
/// Wraps after about 49 days; consumers compare with wrapping arithmetic.
pub trait Clock {
    fn now_ms(&self) -> u32;
}

/// Wall clock measured from creation
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    start: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> u32 {
        // Truncation is the intended wrap
        self.start.elapsed().as_millis() as u32
    }
}

/// Clock that only moves when told to
#[derive(Debug, Default)]
pub struct VirtualClock {
    now: Cell<u32>,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward
    pub fn advance(&self, ms: u32) {
        self.now.set(self.now.get().wrapping_add(ms));
    }
}

impl Clock for VirtualClock {
    fn now_ms(&self) -> u32 {
        self.now.get()
    }
}

/// Decides when the next controller tick is due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacer {
    period_ms: u32,
    last_tick_ms: u32,
}

impl Pacer {
    /// Pacer for `program`, counting from `now_ms`
    pub fn for_program(program: &Program, now_ms: u32) -> Self {
        Self {
            period_ms: 1000 / u32::from(program.ticks_per_second.max(1)),
            last_tick_ms: now_ms,
        }
    }

    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    /// Check if a tick is due, consuming it if so
    pub fn due(&mut self, now_ms: u32) -> bool {
        if now_ms.wrapping_sub(self.last_tick_ms) >= self.period_ms {
            self.last_tick_ms = now_ms;
            true
        } else {
            false
        }
    }
}
