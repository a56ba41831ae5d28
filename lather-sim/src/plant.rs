//! Simulated machine hardware
//!
//! [`Plant`] stands in for the drum and its sensors, [`SimOutputs`] for the
//! relay board and buzzer.

use std::convert::Infallible;

use lather_core::traits::{ActuatorSink, SensorSource, TunePlayer};
use lather_core::{Actuators, Sensors, WaterLevel};
use lather_drivers::BuzzerEdge;

/// Simulated drum
///
/// Each step the open inlet raises the level by one mark and the running
/// drain pump lowers it by one. The drain sensor sees water whenever the
/// drum is not empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Plant {
    level: WaterLevel,
}

impl Plant {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(&self) -> WaterLevel {
        self.level
    }

    /// Apply one tick of the previous outputs
    pub fn step(&mut self, actuators: &Actuators) {
        if actuators.inlet_valve {
            self.level = self.level.raised();
        }
        if actuators.drain_pump {
            self.level = self.level.lowered();
        }
    }

    pub fn sensors(&self) -> Sensors {
        Sensors {
            water_level: self.level,
            drain_check: self.level != WaterLevel::Empty,
        }
    }
}

impl SensorSource for Plant {
    type Error = Infallible;

    fn read_sensors(&mut self) -> Result<Sensors, Self::Error> {
        Ok(self.sensors())
    }
}

/// Simulated relay board and buzzer
pub struct SimOutputs<T> {
    latched: Actuators,
    buzzer: BuzzerEdge,
    player: T,
}

impl<T: TunePlayer> SimOutputs<T> {
    pub fn new(player: T) -> Self {
        Self {
            latched: Actuators::off(),
            buzzer: BuzzerEdge::new(),
            player,
        }
    }

    /// Outputs as last written
    pub fn latched(&self) -> &Actuators {
        &self.latched
    }

    pub fn player(&self) -> &T {
        &self.player
    }

    /// Drop every output, as on power-down
    pub fn reset(&mut self) {
        self.latched = Actuators::off();
        self.buzzer = BuzzerEdge::new();
    }
}

impl<T: TunePlayer> ActuatorSink for SimOutputs<T> {
    type Error = Infallible;

    fn write_actuators(&mut self, actuators: &Actuators) -> Result<(), Self::Error> {
        self.latched = *actuators;
        if let Some(tune) = self.buzzer.update(actuators.buzzer) {
            self.player.play(tune);
        }
        Ok(())
    }
}
