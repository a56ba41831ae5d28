//! Pin polarity

use embedded_hal::digital::PinState;

/// Electrical level that means "active"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Active when the pin is high
    ActiveHigh,
    /// Active when the pin is low (common relay modules, pull-up buttons)
    #[default]
    ActiveLow,
}

impl Polarity {
    /// Pin level for a logical state
    pub const fn level(self, active: bool) -> PinState {
        match (self, active) {
            (Polarity::ActiveHigh, true) | (Polarity::ActiveLow, false) => PinState::High,
            (Polarity::ActiveHigh, false) | (Polarity::ActiveLow, true) => PinState::Low,
        }
    }

    /// Logical state for a pin that reads `high`
    pub const fn is_active(self, high: bool) -> bool {
        match self {
            Polarity::ActiveHigh => high,
            Polarity::ActiveLow => !high,
        }
    }
}
