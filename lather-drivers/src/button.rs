//! Button debouncing
//!
//! A state change is accepted only when the previous accepted change is
//! more than [`DEBOUNCE_MS`] old. Only presses are reported; releases
//! just re-arm the button.

use embedded_hal::digital::InputPin;

use crate::polarity::Polarity;

/// Debounce window (ms)
pub const DEBOUNCE_MS: u32 = 50;

/// Front panel buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// OK / start / pause-resume / confirm
    A,
    /// Next option
    B,
    /// Abort / cancel
    C,
}

impl Button {
    pub const ALL: [Button; 3] = [Button::A, Button::B, Button::C];

    const fn index(self) -> usize {
        self as usize
    }
}

/// Press-edge detector for one button
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Debouncer {
    /// Last accepted state
    pressed: bool,
    /// Time of the last accepted change (ms)
    changed_at: u32,
}

impl Debouncer {
    pub const fn new() -> Self {
        Self {
            pressed: false,
            changed_at: 0,
        }
    }

    /// Feed a raw reading taken at `now_ms`
    ///
    /// Returns true on an accepted press. The clock may wrap.
    pub fn update(&mut self, pressed: bool, now_ms: u32) -> bool {
        if pressed == self.pressed || now_ms.wrapping_sub(self.changed_at) <= DEBOUNCE_MS {
            return false;
        }
        self.pressed = pressed;
        self.changed_at = now_ms;
        pressed
    }

    /// Last accepted state
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }
}

/// Debouncers for the three front panel buttons
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Buttons {
    debouncers: [Debouncer; 3],
}

impl Buttons {
    pub const fn new() -> Self {
        Self {
            debouncers: [Debouncer::new(); 3],
        }
    }

    /// Feed a raw reading for `button`, returning true on a press
    pub fn update(&mut self, button: Button, pressed: bool, now_ms: u32) -> bool {
        self.debouncers[button.index()].update(pressed, now_ms)
    }

    /// Read a button pin and feed it through its debouncer
    pub fn poll<P: InputPin>(
        &mut self,
        button: Button,
        pin: &mut P,
        polarity: Polarity,
        now_ms: u32,
    ) -> Result<bool, P::Error> {
        let pressed = polarity.is_active(pin.is_high()?);
        Ok(self.update(button, pressed, now_ms))
    }
}
