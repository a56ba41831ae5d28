//! Board-agnostic control core for the washing machine
//!
//! This crate contains all control logic that does not depend on
//! specific hardware implementations:
//!
//! - Wash program definition, validation and presets
//! - Sensor and actuator snapshots exchanged each tick
//! - State machine for program execution
//! - Safety interlocks applied to every actuator snapshot
//! - Remaining-time estimation for display
//! - Collaborator traits for the hardware layer
//!
//! The core owns no clock and performs no I/O. The caller decides when a
//! tick happens and moves snapshots between the core and the hardware.

#![no_std]
#![deny(unsafe_code)]

pub mod agitate;
pub mod controller;
pub mod estimate;
pub mod io;
pub mod program;
pub mod safety;
pub mod state;
pub mod traits;

pub use controller::{init, Controller, Status};
pub use estimate::time_remaining_sec;
pub use io::{Actuators, BuzzerMode, MotorDir, Sensors, WaterLevel};
pub use program::{Program, ProgramError, SPIN_DURATION_SEC};
pub use state::{error_name, state_name, Cause, DrainRoute, ErrorCode, State, Transition};
