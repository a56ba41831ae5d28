//! State and error code definitions
//!
//! Which outputs may be energized is a function of the current state
//! alone; the interlock in [`crate::safety`] consults these predicates.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Controller states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum State {
    /// Waiting for start
    #[default]
    Idle,
    /// Start requested; announces the run and moves to fill
    Start,
    /// Filling until the target level is reached
    Fill,
    /// Wash phase: injecting detergent
    Soap,
    /// Alternating drum rotation
    Agitate,
    /// Pumping water out until the drain sensor clears
    Drain,
    /// Final fixed-length spin
    Spin,
    /// Suspended by the user
    Paused,
    /// Program finished
    Complete,
    /// Fault detected; see the controller's error code
    Error,
}

impl State {
    /// Every state, in declaration order
    pub const ALL: [State; 10] = [
        State::Idle,
        State::Start,
        State::Fill,
        State::Soap,
        State::Agitate,
        State::Drain,
        State::Spin,
        State::Paused,
        State::Complete,
        State::Error,
    ];

    /// Diagnostic name
    pub const fn name(self) -> &'static str {
        match self {
            State::Idle => "IDLE",
            State::Start => "START",
            State::Fill => "FILL",
            State::Soap => "SOAP",
            State::Agitate => "AGITATE",
            State::Drain => "DRAIN",
            State::Spin => "SPIN",
            State::Paused => "PAUSED",
            State::Complete => "COMPLETE",
            State::Error => "ERROR",
        }
    }

    /// Check if the inlet valve may open in this state
    pub const fn inlet_allowed(self) -> bool {
        matches!(self, State::Fill)
    }

    /// Check if the soap pump may run in this state
    pub const fn soap_allowed(self) -> bool {
        matches!(self, State::Soap)
    }

    /// Check if the drain pump may run in this state
    pub const fn drain_allowed(self) -> bool {
        matches!(self, State::Drain | State::Spin)
    }

    /// Check if the drum motor may turn in this state
    pub const fn motor_allowed(self) -> bool {
        matches!(self, State::Agitate | State::Spin)
    }

    /// Check if this is a terminal state
    ///
    /// Terminal states never change on tick; only a fresh init leaves them.
    pub const fn is_terminal(self) -> bool {
        matches!(self, State::Complete | State::Error)
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fault codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ErrorCode {
    #[default]
    None,
    /// Target water level not reached within the fill timeout
    TimeoutFill,
    /// Drain sensor still reports water after the drain timeout
    TimeoutDrain,
    /// Zero timeout or zero tick rate supplied at init
    InvalidProgram,
}

impl ErrorCode {
    /// Diagnostic name
    pub const fn name(self) -> &'static str {
        match self {
            ErrorCode::None => "NONE",
            ErrorCode::TimeoutFill => "TIMEOUT_FILL",
            ErrorCode::TimeoutDrain => "TIMEOUT_DRAIN",
            ErrorCode::InvalidProgram => "INVALID_PROGRAM",
        }
    }

    /// Check if this code reports a fault
    pub const fn is_fault(self) -> bool {
        !matches!(self, ErrorCode::None)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Diagnostic name of a state
pub const fn state_name(state: State) -> &'static str {
    state.name()
}

/// Diagnostic name of an error code
pub const fn error_name(code: ErrorCode) -> &'static str {
    code.name()
}
