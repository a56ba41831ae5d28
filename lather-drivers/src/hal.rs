//! Board bundle implementing the core's collaborator traits

use embedded_hal::digital::{InputPin, OutputPin};
use lather_core::traits::{ActuatorSink, SensorSource, TunePlayer};
use lather_core::{Actuators, Sensors};

use crate::buzzer::BuzzerEdge;
use crate::level::{LevelProbe, ProbeError};
use crate::relay::{RelayBank, RelayError};

/// Relays, level probe and buzzer of one machine
pub struct Hal<O, I, T> {
    relays: RelayBank<O>,
    probe: LevelProbe<I>,
    buzzer: BuzzerEdge,
    player: T,
}

impl<O: OutputPin, I: InputPin, T: TunePlayer> Hal<O, I, T> {
    pub fn new(relays: RelayBank<O>, probe: LevelProbe<I>, player: T) -> Self {
        Self {
            relays,
            probe,
            buzzer: BuzzerEdge::new(),
            player,
        }
    }

    /// Get the relay bank
    pub fn relays(&self) -> &RelayBank<O> {
        &self.relays
    }

    /// Get the tune player
    pub fn player(&self) -> &T {
        &self.player
    }
}

impl<O: OutputPin, I: InputPin, T: TunePlayer> SensorSource for Hal<O, I, T> {
    type Error = ProbeError<I::Error>;

    fn read_sensors(&mut self) -> Result<Sensors, Self::Error> {
        self.probe.read()
    }
}

impl<O: OutputPin, I: InputPin, T: TunePlayer> ActuatorSink for Hal<O, I, T> {
    type Error = RelayError<O::Error>;

    fn write_actuators(&mut self, actuators: &Actuators) -> Result<(), Self::Error> {
        self.relays.write(actuators)?;
        if let Some(tune) = self.buzzer.update(actuators.buzzer) {
            self.player.play(tune);
        }
        Ok(())
    }
}
