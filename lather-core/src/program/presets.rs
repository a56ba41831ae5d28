//! Built-in presets and menu option tables
//!
//! Two ways to arrive at a [`Program`]: pick a complete [`WashPreset`], or
//! walk the three-step menu (wash program, water level, agitation power)
//! with a [`MenuSelection`].

use heapless::{String, Vec};

use super::types::Program;
use crate::io::WaterLevel;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum label length
pub const MAX_LABEL_LEN: usize = 16;

/// Maximum presets in a catalog
pub const MAX_PRESETS: usize = 8;

/// Named, ready-to-run program
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WashPreset {
    /// Display label
    pub label: String<MAX_LABEL_LEN>,
    /// Program to run
    pub program: Program,
}

impl WashPreset {
    /// Create a preset, truncating the label to [`MAX_LABEL_LEN`] bytes
    pub fn new(label: &str, program: Program) -> Self {
        let mut s = String::new();
        for ch in label.chars() {
            if s.push(ch).is_err() {
                break;
            }
        }
        Self { label: s, program }
    }
}

/// Agitation pattern shared by the built-in presets: 5 s half-cycles
const PRESET_CYCLE_MS: u16 = 5000;

fn preset_program(
    wash_count: u8,
    rinse_count: u8,
    soap_time_sec: u16,
    agitate_time_sec: u16,
    agitate_run_sec: u16,
    water_fill_timeout_sec: u16,
    drain_timeout_sec: u16,
) -> Program {
    Program {
        wash_count,
        rinse_count,
        spin_enable: true,
        soap_time_sec,
        wash_agitate_time_sec: agitate_time_sec,
        rinse_agitate_time_sec: agitate_time_sec,
        agitate_run_ms: agitate_run_sec * 1000,
        agitate_cycle_ms: PRESET_CYCLE_MS,
        target_water_level: WaterLevel::High,
        water_fill_timeout_sec,
        drain_timeout_sec,
        ticks_per_second: 2,
    }
}

/// Built-in preset catalog
///
/// Short demonstration programs ticked twice a second.
pub fn builtin_presets() -> Vec<WashPreset, MAX_PRESETS> {
    let mut presets = Vec::new();
    // Capacity is well above the three built-ins
    let _ = presets.push(WashPreset::new("Standard", preset_program(1, 2, 3, 20, 3, 30, 15)));
    let _ = presets.push(WashPreset::new("Quick", preset_program(1, 1, 2, 10, 4, 20, 10)));
    let _ = presets.push(WashPreset::new("Heavy Duty", preset_program(2, 2, 5, 30, 5, 40, 20)));
    presets
}

/// Wash program menu entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WashOption {
    pub name: &'static str,
    /// Wash agitation time in minutes
    pub wash_min: u16,
    /// Rinse agitation time in minutes
    pub rinse_min: u16,
    pub rinse_count: u8,
}

/// Agitation power menu entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PowerOption {
    pub name: &'static str,
    /// Motor on-time per half-cycle (ms)
    pub run_ms: u16,
    /// Half-cycle length (ms)
    pub cycle_ms: u16,
}

pub const WASH_OPTIONS: [WashOption; 3] = [
    WashOption {
        name: "Normal",
        wash_min: 15,
        rinse_min: 15,
        rinse_count: 2,
    },
    WashOption {
        name: "Short",
        wash_min: 10,
        rinse_min: 10,
        rinse_count: 2,
    },
    WashOption {
        name: "Express",
        wash_min: 7,
        rinse_min: 7,
        rinse_count: 1,
    },
];

pub const LEVEL_OPTIONS: [(&str, WaterLevel); 3] = [
    ("Low", WaterLevel::Low),
    ("Med", WaterLevel::Med),
    ("High", WaterLevel::High),
];

pub const POWER_OPTIONS: [PowerOption; 2] = [
    PowerOption {
        name: "Normal",
        run_ms: 1600,
        cycle_ms: 5000,
    },
    PowerOption {
        name: "Strong",
        run_ms: 4000,
        cycle_ms: 5000,
    },
];

/// Menu defaults for everything the three menu steps do not choose
const MENU_SOAP_SEC: u16 = 20;
const MENU_FILL_TIMEOUT_SEC: u16 = 600;
const MENU_DRAIN_TIMEOUT_SEC: u16 = 300;
const MENU_TICKS_PER_SECOND: u8 = 10;

/// Current position in the three-step menu
///
/// Each index wraps around its option table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MenuSelection {
    /// Index into [`WASH_OPTIONS`]
    pub program: u8,
    /// Index into [`LEVEL_OPTIONS`]
    pub level: u8,
    /// Index into [`POWER_OPTIONS`]
    pub power: u8,
}

impl MenuSelection {
    pub fn next_program(&mut self) {
        self.program = ((usize::from(self.program) + 1) % WASH_OPTIONS.len()) as u8;
    }

    pub fn next_level(&mut self) {
        self.level = ((usize::from(self.level) + 1) % LEVEL_OPTIONS.len()) as u8;
    }

    pub fn next_power(&mut self) {
        self.power = ((usize::from(self.power) + 1) % POWER_OPTIONS.len()) as u8;
    }

    pub fn wash_option(&self) -> WashOption {
        WASH_OPTIONS[self.program as usize % WASH_OPTIONS.len()]
    }

    pub fn level_option(&self) -> (&'static str, WaterLevel) {
        LEVEL_OPTIONS[self.level as usize % LEVEL_OPTIONS.len()]
    }

    pub fn power_option(&self) -> PowerOption {
        POWER_OPTIONS[self.power as usize % POWER_OPTIONS.len()]
    }

    /// Build the program for this selection
    ///
    /// One wash cycle, final spin, 100 ms ticks.
    pub fn build(&self) -> Program {
        let wash = self.wash_option();
        let (_, level) = self.level_option();
        let power = self.power_option();

        Program {
            wash_count: 1,
            rinse_count: wash.rinse_count,
            spin_enable: true,
            soap_time_sec: MENU_SOAP_SEC,
            wash_agitate_time_sec: wash.wash_min.saturating_mul(60),
            rinse_agitate_time_sec: wash.rinse_min.saturating_mul(60),
            agitate_run_ms: power.run_ms,
            agitate_cycle_ms: power.cycle_ms,
            target_water_level: level,
            water_fill_timeout_sec: MENU_FILL_TIMEOUT_SEC,
            drain_timeout_sec: MENU_DRAIN_TIMEOUT_SEC,
            ticks_per_second: MENU_TICKS_PER_SECOND,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_presets_are_valid() {
        let presets = builtin_presets();
        assert_eq!(presets.len(), 3);
        for preset in &presets {
            assert!(preset.program.is_valid(), "{} should be valid", preset.label);
        }
        assert_eq!(presets[0].label.as_str(), "Standard");
        assert_eq!(presets[2].label.as_str(), "Heavy Duty");
        assert_eq!(presets[2].program.wash_count, 2);
    }

    #[test]
    fn test_label_truncated() {
        let preset = WashPreset::new("A very long preset label", Program::default());
        assert_eq!(preset.label.len(), MAX_LABEL_LEN);
    }

    #[test]
    fn test_menu_wraps() {
        let mut sel = MenuSelection::default();
        for _ in 0..WASH_OPTIONS.len() {
            sel.next_program();
        }
        assert_eq!(sel.program, 0);

        sel.next_power();
        sel.next_power();
        assert_eq!(sel.power, 0);
    }

    #[test]
    fn test_menu_next_from_out_of_range_index() {
        let mut sel = MenuSelection {
            program: u8::MAX,
            level: u8::MAX,
            power: u8::MAX,
        };
        let wash = sel.wash_option();
        sel.next_program();
        sel.next_level();
        sel.next_power();

        assert_eq!(usize::from(sel.program), (usize::from(u8::MAX) + 1) % WASH_OPTIONS.len());
        assert_ne!(sel.wash_option(), wash);
        assert!(usize::from(sel.level) < LEVEL_OPTIONS.len());
        assert!(usize::from(sel.power) < POWER_OPTIONS.len());
    }

    #[test]
    fn test_menu_build() {
        let mut sel = MenuSelection::default();
        sel.next_program(); // Short
        sel.next_level(); // Med
        sel.next_power(); // Strong

        let program = sel.build();
        assert!(program.is_valid());
        assert_eq!(program.wash_count, 1);
        assert_eq!(program.rinse_count, 2);
        assert_eq!(program.wash_agitate_time_sec, 600);
        assert_eq!(program.target_water_level, WaterLevel::Med);
        assert_eq!(program.agitate_run_ms, 4000);
        assert_eq!(program.agitate_cycle_ms, 5000);
        assert_eq!(program.ticks_per_second, 10);
    }
}
