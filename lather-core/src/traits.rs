//! Hardware collaborator traits
//!
//! The core never touches hardware. A board implements these traits and
//! moves snapshots between them and [`Controller::tick`].
//!
//! [`Controller::tick`]: crate::Controller::tick

use crate::io::{Actuators, BuzzerMode, Sensors};

/// Source of sensor snapshots
pub trait SensorSource {
    type Error;

    /// Read water level and drain check
    ///
    /// Takes `&mut self` because pin reads may need mutable access.
    fn read_sensors(&mut self) -> Result<Sensors, Self::Error>;
}

/// Sink for actuator snapshots
pub trait ActuatorSink {
    type Error;

    /// Drive every output to match `actuators`
    fn write_actuators(&mut self, actuators: &Actuators) -> Result<(), Self::Error>;
}

/// Buzzer melodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Tune {
    Start,
    Finished,
    Error,
}

impl Tune {
    /// Melody for a buzzer mode, `None` for silence
    pub const fn for_mode(mode: BuzzerMode) -> Option<Self> {
        match mode {
            BuzzerMode::Off => None,
            BuzzerMode::Start => Some(Tune::Start),
            BuzzerMode::Finish => Some(Tune::Finished),
            BuzzerMode::Error => Some(Tune::Error),
        }
    }
}

/// Tone output
///
/// Playback is fire-and-forget; a player that cannot sound simply drops
/// the tune.
pub trait TunePlayer {
    fn play(&mut self, tune: Tune);
}
