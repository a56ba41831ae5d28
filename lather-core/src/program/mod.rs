//! Wash program configuration
//!
//! A [`Program`] is the immutable recipe handed to the controller at
//! initialization. Presets and menu option tables live in [`presets`].

pub mod presets;
pub mod types;

pub use presets::{
    builtin_presets, MenuSelection, PowerOption, WashOption, WashPreset, LEVEL_OPTIONS,
    MAX_LABEL_LEN, MAX_PRESETS, POWER_OPTIONS, WASH_OPTIONS,
};
pub use types::{Program, ProgramError, SPIN_DURATION_SEC};
