//! State machine for program execution
//!
//! Defines the closed set of controller states and the transition records
//! the controller reports. The per-tick dispatch lives in
//! [`crate::controller`].

pub mod events;
pub mod machine;

pub use events::{Cause, DrainRoute, Transition};
pub use machine::{error_name, state_name, ErrorCode, State};
