//! Float-switch water level probe
//!
//! Three float switches sit at the low, medium and high marks. A separate
//! sensor in the sump reports whether any water is left to drain.

use embedded_hal::digital::InputPin;
use lather_core::{Sensors, WaterLevel};

use crate::polarity::Polarity;

/// Probe input that failed to read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProbeInput {
    Low,
    Med,
    High,
    Drain,
}

/// Probe pin failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProbeError<E> {
    pub input: ProbeInput,
    pub error: E,
}

/// Water level and drain-check reader
pub struct LevelProbe<P> {
    low: P,
    med: P,
    high: P,
    drain: P,
    polarity: Polarity,
}

impl<P: InputPin> LevelProbe<P> {
    /// Create a probe from float switches and the drain sensor
    pub fn new(low: P, med: P, high: P, drain: P, polarity: Polarity) -> Self {
        Self {
            low,
            med,
            high,
            drain,
            polarity,
        }
    }

    /// Read a sensor snapshot
    ///
    /// The highest asserted switch wins, so a stuck lower switch cannot
    /// hide a full drum.
    pub fn read(&mut self) -> Result<Sensors, ProbeError<P::Error>> {
        let water_level = if self.sample(ProbeInput::High)? {
            WaterLevel::High
        } else if self.sample(ProbeInput::Med)? {
            WaterLevel::Med
        } else if self.sample(ProbeInput::Low)? {
            WaterLevel::Low
        } else {
            WaterLevel::Empty
        };

        Ok(Sensors {
            water_level,
            drain_check: self.sample(ProbeInput::Drain)?,
        })
    }

    fn sample(&mut self, input: ProbeInput) -> Result<bool, ProbeError<P::Error>> {
        let pin = match input {
            ProbeInput::Low => &mut self.low,
            ProbeInput::Med => &mut self.med,
            ProbeInput::High => &mut self.high,
            ProbeInput::Drain => &mut self.drain,
        };
        let high = pin.is_high().map_err(|error| ProbeError { input, error })?;
        Ok(self.polarity.is_active(high))
    }
}
