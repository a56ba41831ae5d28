//! Terminal front panel
//!
//! Key presses stand in for the three buttons, the status line for the
//! display and log lines for the buzzer.

use lather_core::traits::{Tune, TunePlayer};
use lather_core::{Actuators, Sensors, Status};
use lather_drivers::Button;
use tracing::info;

/// How long a key press holds its button down (ms)
///
/// Longer than the debounce window so the release registers.
pub const KEY_HOLD_MS: u32 = 100;

/// Map a key to a button
pub fn key_button(key: char) -> Option<Button> {
    match key.to_ascii_lowercase() {
        'a' => Some(Button::A),
        'b' => Some(Button::B),
        'c' => Some(Button::C),
        _ => None,
    }
}

/// Raw button levels driven by key presses
#[derive(Debug, Clone, Copy, Default)]
pub struct Keypad {
    /// Press time per button, while held
    held_since: [Option<u32>; 3],
}

impl Keypad {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hold `button` down from `now_ms`
    pub fn press(&mut self, button: Button, now_ms: u32) {
        self.held_since[index(button)] = Some(now_ms);
    }

    /// Whether `button` reads as pressed at `now_ms`
    pub fn is_down(&mut self, button: Button, now_ms: u32) -> bool {
        let slot = &mut self.held_since[index(button)];
        match *slot {
            Some(since) if now_ms.wrapping_sub(since) < KEY_HOLD_MS => true,
            Some(_) => {
                *slot = None;
                false
            }
            None => false,
        }
    }
}

fn index(button: Button) -> usize {
    match button {
        Button::A => 0,
        Button::B => 1,
        Button::C => 2,
    }
}

/// Format the one-line machine status
pub fn status_line(status: &Status, sensors: &Sensors, actuators: &Actuators) -> String {
    let remaining = status.remaining_sec;
    format!(
        "Phase: {:<5} | Status: {:<10} | Time: {:02}:{:02} | Level: {:<6} | Inlet:{} Soap:{} Drain:{} Motor:{}",
        status.phase_name(),
        status.state.name(),
        remaining / 60,
        remaining % 60,
        sensors.water_level.name(),
        u8::from(actuators.inlet_valve),
        u8::from(actuators.soap_pump),
        u8::from(actuators.drain_pump),
        actuators.motor_dir.name(),
    )
}

/// Buzzer stand-in that logs each tune
#[derive(Debug, Default)]
pub struct LogTunes {
    played: u32,
}

impl LogTunes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tunes played so far
    pub fn played(&self) -> u32 {
        self.played
    }
}

impl TunePlayer for LogTunes {
    fn play(&mut self, tune: Tune) {
        self.played += 1;
        let melody = match tune {
            Tune::Start => "start",
            Tune::Finished => "finished",
            Tune::Error => "error",
        };
        info!(melody, "buzzer");
    }
}
