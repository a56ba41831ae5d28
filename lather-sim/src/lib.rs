//! Host simulator for the washing machine controller
//!
//! Plays the part of the board around the core: a front panel with three
//! buttons, a program selector, a tick pacer, and a simulated drum that
//! fills and drains in response to the relays.

pub mod app;
pub mod clock;
pub mod config;
pub mod console;
pub mod plant;

pub use app::{menu_selection, App, MenuStep, Selector, TickReport, UiState};
pub use clock::{Clock, MonotonicClock, Pacer, VirtualClock};
pub use config::{find_preset, load_presets, parse_presets, ConfigError};
pub use plant::{Plant, SimOutputs};
