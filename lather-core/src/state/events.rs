//! Transition records reported by the controller

use super::machine::State;

/// Branch taken when a drain completes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DrainRoute {
    /// Another wash cycle follows
    NextWash,
    /// Another rinse cycle follows
    NextRinse,
    /// Washing finished, rinse phase begins
    BeginRinse,
    /// All cycles done, final spin follows
    Spin,
    /// All cycles done, no spin
    Complete,
}

impl DrainRoute {
    /// State the controller enters for this route
    pub const fn target(self) -> State {
        match self {
            DrainRoute::NextWash | DrainRoute::NextRinse | DrainRoute::BeginRinse => State::Fill,
            DrainRoute::Spin => State::Spin,
            DrainRoute::Complete => State::Complete,
        }
    }
}

/// Why a tick changed state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Cause {
    /// Start announced
    Started,
    /// Fill reached the target level
    LevelReached,
    /// Soap time elapsed
    SoapDone,
    /// Agitation time elapsed
    AgitateDone,
    /// Drain sensor cleared
    Drained(DrainRoute),
    /// Fill timed out
    FillTimeout,
    /// Drain timed out
    DrainTimeout,
    /// Spin time elapsed
    SpinDone,
}

impl Cause {
    /// Check if this cause is a fault
    pub const fn is_fault(self) -> bool {
        matches!(self, Cause::FillTimeout | Cause::DrainTimeout)
    }
}

/// A state change produced by one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transition {
    pub from: State,
    pub to: State,
    pub cause: Cause,
}

impl Transition {
    pub const fn new(from: State, to: State, cause: Cause) -> Self {
        Self { from, to, cause }
    }
}
