//! Output interlock
//!
//! Every actuator snapshot passes through [`enforce`] before it leaves the
//! controller. The rules depend only on the state, so they hold even if
//! the dispatch logic above them is wrong. Clamping is silent: a clamped
//! output is not a fault.

use crate::io::{Actuators, MotorDir};
use crate::state::State;

/// Interlock rules broken by an actuator snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Violations {
    /// Inlet open outside FILL
    pub inlet: bool,
    /// Soap pump on outside SOAP
    pub soap: bool,
    /// Drain pump on outside DRAIN/SPIN
    pub drain: bool,
    /// Motor turning outside AGITATE/SPIN
    pub motor: bool,
    /// Inlet and drain pump on together
    pub fill_and_drain: bool,
}

impl Violations {
    /// Check if no rule is broken
    pub fn is_clear(&self) -> bool {
        *self == Self::default()
    }
}

/// Report which interlock rules `actuators` breaks in `state`
pub fn violations(state: State, actuators: &Actuators) -> Violations {
    Violations {
        inlet: actuators.inlet_valve && !state.inlet_allowed(),
        soap: actuators.soap_pump && !state.soap_allowed(),
        drain: actuators.drain_pump && !state.drain_allowed(),
        motor: actuators.motor_dir.is_running() && !state.motor_allowed(),
        fill_and_drain: actuators.inlet_valve && actuators.drain_pump,
    }
}

/// Clamp `actuators` to what `state` permits
///
/// Inlet and drain are mutually exclusive; when both survive the
/// per-state rules, the drain wins.
pub fn enforce(state: State, actuators: &mut Actuators) {
    if !state.inlet_allowed() {
        actuators.inlet_valve = false;
    }
    if !state.soap_allowed() {
        actuators.soap_pump = false;
    }
    if !state.drain_allowed() {
        actuators.drain_pump = false;
    }
    if !state.motor_allowed() {
        actuators.motor_dir = MotorDir::Stop;
    }
    if actuators.inlet_valve && actuators.drain_pump {
        actuators.inlet_valve = false;
    }
}
