//! Actuator snapshot
//!
//! Rebuilt from scratch on every tick. Nothing carries over from the
//! previous snapshot.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Drum motor direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MotorDir {
    #[default]
    Stop,
    /// Clockwise
    Cw,
    /// Counter-clockwise
    Ccw,
}

impl MotorDir {
    /// Check if the motor is commanded to turn
    pub const fn is_running(self) -> bool {
        !matches!(self, MotorDir::Stop)
    }

    /// Diagnostic name
    pub const fn name(self) -> &'static str {
        match self {
            MotorDir::Stop => "STOP",
            MotorDir::Cw => "CW",
            MotorDir::Ccw => "CCW",
        }
    }
}

/// Buzzer signal
///
/// This is an edge-triggered request: the hardware layer plays a tune
/// when the mode changes into `Start`, `Finish` or `Error`, not for as
/// long as the mode is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BuzzerMode {
    #[default]
    Off,
    Start,
    Finish,
    Error,
}

/// Actuator commands produced by the controller each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Actuators {
    /// Water intake valve
    pub inlet_valve: bool,
    /// Detergent injection pump
    pub soap_pump: bool,
    /// Drum drain pump
    pub drain_pump: bool,
    /// Drum motor direction
    pub motor_dir: MotorDir,
    /// Buzzer signal
    pub buzzer: BuzzerMode,
}

impl Actuators {
    /// All outputs off
    pub const fn off() -> Self {
        Self {
            inlet_valve: false,
            soap_pump: false,
            drain_pump: false,
            motor_dir: MotorDir::Stop,
            buzzer: BuzzerMode::Off,
        }
    }

    /// Check if every output is off
    pub fn is_off(&self) -> bool {
        *self == Self::off()
    }
}
