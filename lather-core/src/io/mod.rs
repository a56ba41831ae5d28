//! Sensor and actuator snapshots
//!
//! Plain values exchanged with the hardware layer on every tick. The core
//! reads [`Sensors`] and fully overwrites [`Actuators`].

pub mod actuators;
pub mod sensors;

pub use actuators::{Actuators, BuzzerMode, MotorDir};
pub use sensors::{Sensors, WaterLevel};
