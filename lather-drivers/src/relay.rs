//! Relay bank for motor, valves and pumps
//!
//! Five relays drive the machine:
//!
//! | Relay | Active when |
//! |-------|-------------|
//! | Motor power | motor is not `Stop` |
//! | Motor direction | motor is `Ccw` |
//! | Inlet valve | `inlet_valve` |
//! | Drain pump | `drain_pump` |
//! | Soap pump | `soap_pump` |
//!
//! The direction relay only matters while motor power is on. It is left
//! inactive whenever the motor stops. When a write reverses the motor,
//! power is dropped first and restored after the direction relay has
//! switched, so the direction never changes under power.

use embedded_hal::digital::OutputPin;
use lather_core::{Actuators, MotorDir};

use crate::polarity::Polarity;

/// Relay channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Relay {
    MotorPower,
    MotorDir,
    Inlet,
    Drain,
    Soap,
}

impl Relay {
    /// Switch-on order: direction settles before motor power
    const MAKE_ORDER: [Relay; 5] = [
        Relay::MotorDir,
        Relay::MotorPower,
        Relay::Inlet,
        Relay::Drain,
        Relay::Soap,
    ];

    pub const ALL: [Relay; 5] = [
        Relay::MotorPower,
        Relay::MotorDir,
        Relay::Inlet,
        Relay::Drain,
        Relay::Soap,
    ];

    const fn index(self) -> usize {
        self as usize
    }
}

/// Relay pin failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RelayError<E> {
    /// Relay whose pin failed
    pub relay: Relay,
    /// Underlying pin error
    pub error: E,
}

/// Relay polarity configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RelayConfig {
    /// Polarity of the switching relays (power, inlet, drain, soap)
    pub switching: Polarity,
    /// Polarity of the direction output
    pub direction: Polarity,
}

impl Default for RelayConfig {
    /// Active-low relay module, direction pin high for CCW
    fn default() -> Self {
        Self {
            switching: Polarity::ActiveLow,
            direction: Polarity::ActiveHigh,
        }
    }
}

impl RelayConfig {
    fn polarity(&self, relay: Relay) -> Polarity {
        match relay {
            Relay::MotorDir => self.direction,
            _ => self.switching,
        }
    }
}

/// Five-channel relay bank
pub struct RelayBank<P> {
    /// Pins in [`Relay::ALL`] order
    pins: [P; 5],
    config: RelayConfig,
    /// Logical state last written to each relay
    active: [bool; 5],
}

impl<P: OutputPin> RelayBank<P> {
    /// Create a relay bank and switch every relay off
    ///
    /// `pins` are given in [`Relay::ALL`] order: motor power, motor
    /// direction, inlet, drain, soap.
    pub fn new(pins: [P; 5], config: RelayConfig) -> Result<Self, RelayError<P::Error>> {
        let mut bank = Self {
            pins,
            config,
            active: [false; 5],
        };
        for relay in Relay::ALL {
            bank.drive(relay, false)?;
        }
        Ok(bank)
    }

    /// Get the configuration
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Check if a relay is logically on
    pub fn is_active(&self, relay: Relay) -> bool {
        self.active[relay.index()]
    }

    /// Drive all relays to match an actuator snapshot
    ///
    /// Relays are switched off before others are switched on.
    pub fn write(&mut self, actuators: &Actuators) -> Result<(), RelayError<P::Error>> {
        let wanted = Self::wanted(actuators);

        let dir = Relay::MotorDir.index();
        if wanted[dir] != self.active[dir] && self.active[Relay::MotorPower.index()] {
            self.drive(Relay::MotorPower, false)?;
        }
        for relay in Relay::ALL {
            if !wanted[relay.index()] {
                self.drive(relay, false)?;
            }
        }
        for relay in Relay::MAKE_ORDER {
            if wanted[relay.index()] {
                self.drive(relay, true)?;
            }
        }
        Ok(())
    }

    /// Switch every relay off
    pub fn all_off(&mut self) -> Result<(), RelayError<P::Error>> {
        self.write(&Actuators::off())
    }

    fn wanted(actuators: &Actuators) -> [bool; 5] {
        let mut wanted = [false; 5];
        wanted[Relay::MotorPower.index()] = actuators.motor_dir.is_running();
        wanted[Relay::MotorDir.index()] = actuators.motor_dir == MotorDir::Ccw;
        wanted[Relay::Inlet.index()] = actuators.inlet_valve;
        wanted[Relay::Drain.index()] = actuators.drain_pump;
        wanted[Relay::Soap.index()] = actuators.soap_pump;
        wanted
    }

    fn drive(&mut self, relay: Relay, active: bool) -> Result<(), RelayError<P::Error>> {
        let level = self.config.polarity(relay).level(active);
        self.pins[relay.index()]
            .set_state(level)
            .map_err(|error| RelayError { relay, error })?;
        self.active[relay.index()] = active;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{BrokenOutput, MockOutput};

    fn bank() -> RelayBank<MockOutput> {
        let pins = core::array::from_fn(|_| MockOutput::default());
        RelayBank::new(pins, RelayConfig::default()).unwrap()
    }

    fn pin(bank: &RelayBank<MockOutput>, relay: Relay) -> bool {
        bank.pins[relay.index()].high
    }

    #[test]
    fn test_starts_inactive() {
        let bank = bank();
        // Active-low relays idle high, direction idles low
        assert!(pin(&bank, Relay::MotorPower));
        assert!(pin(&bank, Relay::Inlet));
        assert!(pin(&bank, Relay::Drain));
        assert!(pin(&bank, Relay::Soap));
        assert!(!pin(&bank, Relay::MotorDir));
        for relay in Relay::ALL {
            assert!(!bank.is_active(relay));
        }
    }

    #[test]
    fn test_motor_power_and_direction() {
        let mut bank = bank();

        let cw = Actuators {
            motor_dir: MotorDir::Cw,
            ..Actuators::off()
        };
        bank.write(&cw).unwrap();
        assert!(bank.is_active(Relay::MotorPower));
        assert!(!bank.is_active(Relay::MotorDir));
        assert!(!pin(&bank, Relay::MotorPower));

        let ccw = Actuators {
            motor_dir: MotorDir::Ccw,
            ..Actuators::off()
        };
        bank.write(&ccw).unwrap();
        assert!(bank.is_active(Relay::MotorPower));
        assert!(bank.is_active(Relay::MotorDir));
        assert!(pin(&bank, Relay::MotorDir));

        bank.write(&Actuators::off()).unwrap();
        assert!(!bank.is_active(Relay::MotorPower));
        assert!(!bank.is_active(Relay::MotorDir));
    }

    #[test]
    fn test_reversal_drops_power_first() {
        let mut bank = bank();
        let cw = Actuators {
            motor_dir: MotorDir::Cw,
            ..Actuators::off()
        };
        let ccw = Actuators {
            motor_dir: MotorDir::Ccw,
            ..Actuators::off()
        };
        bank.write(&cw).unwrap();

        // Active-low power: off is a rising edge, on a falling one
        bank.write(&ccw).unwrap();
        let power = &bank.pins[Relay::MotorPower.index()];
        let dir = &bank.pins[Relay::MotorDir.index()];
        assert!(power.rose_at < dir.rose_at);
        assert!(dir.rose_at < power.fell_at);
        assert!(bank.is_active(Relay::MotorPower));

        bank.write(&cw).unwrap();
        let power = &bank.pins[Relay::MotorPower.index()];
        let dir = &bank.pins[Relay::MotorDir.index()];
        assert!(power.rose_at < dir.fell_at);
        assert!(dir.fell_at < power.fell_at);
        assert!(bank.is_active(Relay::MotorPower));
        assert!(!bank.is_active(Relay::MotorDir));
    }

    #[test]
    fn test_same_direction_keeps_power() {
        let mut bank = bank();
        let cw = Actuators {
            motor_dir: MotorDir::Cw,
            ..Actuators::off()
        };
        bank.write(&cw).unwrap();
        let rose_at = bank.pins[Relay::MotorPower.index()].rose_at;

        bank.write(&cw).unwrap();
        assert_eq!(bank.pins[Relay::MotorPower.index()].rose_at, rose_at);
        assert!(!pin(&bank, Relay::MotorPower));
    }

    #[test]
    fn test_valves_and_pumps() {
        let mut bank = bank();
        let act = Actuators {
            inlet_valve: true,
            soap_pump: true,
            ..Actuators::off()
        };
        bank.write(&act).unwrap();

        assert!(bank.is_active(Relay::Inlet));
        assert!(bank.is_active(Relay::Soap));
        assert!(!bank.is_active(Relay::Drain));
        assert!(!pin(&bank, Relay::Inlet));
        assert!(pin(&bank, Relay::Drain));

        bank.all_off().unwrap();
        for relay in Relay::ALL {
            assert!(!bank.is_active(relay));
        }
    }

    #[test]
    fn test_active_high_config() {
        let pins = core::array::from_fn(|_| MockOutput::default());
        let config = RelayConfig {
            switching: Polarity::ActiveHigh,
            direction: Polarity::ActiveHigh,
        };
        let mut bank = RelayBank::new(pins, config).unwrap();
        assert!(!pin(&bank, Relay::Inlet));

        let act = Actuators {
            drain_pump: true,
            ..Actuators::off()
        };
        bank.write(&act).unwrap();
        assert!(pin(&bank, Relay::Drain));
    }

    #[test]
    fn test_pin_error_names_relay() {
        let pins = core::array::from_fn(|_| BrokenOutput);
        let err = RelayBank::new(pins, RelayConfig::default()).err().unwrap();
        assert_eq!(err.relay, Relay::MotorPower);
    }
}
