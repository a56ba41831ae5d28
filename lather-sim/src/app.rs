//! Front panel application
//!
//! Owns program selection, maps button presses to the control API and
//! ticks the controller at its program's rate. One `App` drives one
//! machine; everything it needs is held here rather than in globals.
//!
//! | UI state | A | B | C |
//! |----------|---|---|---|
//! | Startup | confirm / start | next option | |
//! | Running | pause / resume | | ask to abort |
//! | ConfirmAbort | abort | | resume |
//! | Sleep | wake | | |

use lather_core::program::{MenuSelection, WashPreset, LEVEL_OPTIONS, POWER_OPTIONS, WASH_OPTIONS};
use lather_core::traits::{ActuatorSink, SensorSource, TunePlayer};
use lather_core::{init, Actuators, Controller, ErrorCode, Program, Sensors, State, Status, Transition};
use lather_drivers::{Button, Buttons};
use tracing::{debug, info, warn};

use crate::clock::Pacer;
use crate::plant::{Plant, SimOutputs};

/// How long a finished cycle stays on screen before sleeping (ms)
pub const FINISH_HOLD_MS: u32 = 2000;

/// Front panel state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiState {
    /// Choosing a program
    Startup,
    /// Program running (or paused)
    Running,
    /// Paused, waiting for the abort to be confirmed
    ConfirmAbort,
    /// Cycle over, display off
    Sleep,
}

/// Menu step in [`Selector::Menu`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuStep {
    Program,
    Level,
    Power,
}

/// How the user picks a program
#[derive(Debug, Clone)]
pub enum Selector {
    /// Cycle through complete presets
    Presets {
        presets: Vec<WashPreset>,
        index: usize,
    },
    /// Three-step menu: wash program, water level, agitation power
    Menu {
        step: MenuStep,
        selection: MenuSelection,
    },
}

impl Selector {
    /// Menu selector starting at its first step
    pub fn menu(selection: MenuSelection) -> Self {
        Selector::Menu {
            step: MenuStep::Program,
            selection,
        }
    }

    /// Label of the current choice
    pub fn current_label(&self) -> String {
        match self {
            Selector::Presets { presets, index } => presets
                .get(*index)
                .map(|p| p.label.to_string())
                .unwrap_or_default(),
            Selector::Menu { step, selection } => match step {
                MenuStep::Program => format!("Program: {}", selection.wash_option().name),
                MenuStep::Level => format!("Water Level: {}", selection.level_option().0),
                MenuStep::Power => format!("Power: {}", selection.power_option().name),
            },
        }
    }

    /// Advance to the next option
    fn next(&mut self) {
        match self {
            Selector::Presets { presets, index } => {
                if !presets.is_empty() {
                    *index = (*index + 1) % presets.len();
                }
            }
            Selector::Menu { step, selection } => match step {
                MenuStep::Program => selection.next_program(),
                MenuStep::Level => selection.next_level(),
                MenuStep::Power => selection.next_power(),
            },
        }
    }

    /// Confirm the current choice, returning a program once one is complete
    fn confirm(&mut self) -> Option<(String, Program)> {
        match self {
            Selector::Presets { presets, index } => presets
                .get(*index)
                .map(|p| (p.label.to_string(), p.program)),
            Selector::Menu { step, selection } => match step {
                MenuStep::Program => {
                    *step = MenuStep::Level;
                    None
                }
                MenuStep::Level => {
                    *step = MenuStep::Power;
                    None
                }
                MenuStep::Power => {
                    *step = MenuStep::Program;
                    let label = format!(
                        "{}, {} Level, {} Power",
                        selection.wash_option().name,
                        selection.level_option().0,
                        selection.power_option().name
                    );
                    Some((label, selection.build()))
                }
            },
        }
    }

    /// Return to the first menu step
    fn rewind(&mut self) {
        if let Selector::Menu { step, .. } = self {
            *step = MenuStep::Program;
        }
    }
}

/// What one controller tick produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub transition: Option<Transition>,
    pub status: Status,
    pub sensors: Sensors,
    pub actuators: Actuators,
}

/// A started program
struct Session {
    label: String,
    ctrl: Controller,
    actuators: Actuators,
    pacer: Pacer,
}

/// Front panel application
pub struct App<T> {
    ui: UiState,
    selector: Selector,
    buttons: Buttons,
    session: Option<Session>,
    plant: Plant,
    outputs: SimOutputs<T>,
    /// When the controller was first seen finished
    finished_at: Option<u32>,
    ticks: u64,
}

impl<T: TunePlayer> App<T> {
    pub fn new(selector: Selector, player: T) -> Self {
        info!(choice = %selector.current_label(), "B: next, A: ok");
        Self {
            ui: UiState::Startup,
            selector,
            buttons: Buttons::new(),
            session: None,
            plant: Plant::new(),
            outputs: SimOutputs::new(player),
            finished_at: None,
            ticks: 0,
        }
    }

    pub fn ui_state(&self) -> UiState {
        self.ui
    }

    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Controller of the current or last run
    pub fn controller(&self) -> Option<&Controller> {
        self.session.as_ref().map(|s| &s.ctrl)
    }

    /// Label of the current or last run
    pub fn session_label(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.label.as_str())
    }

    /// Fault reported by the current or last run
    pub fn fault(&self) -> Option<ErrorCode> {
        self.controller()
            .map(Controller::error_code)
            .filter(|code| code.is_fault())
    }

    pub fn plant(&self) -> &Plant {
        &self.plant
    }

    pub fn outputs(&self) -> &SimOutputs<T> {
        &self.outputs
    }

    /// Controller ticks since launch
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Feed raw button levels sampled at `now_ms`
    ///
    /// Each debounced press is dispatched in A, B, C order.
    pub fn scan_buttons(&mut self, mut is_down: impl FnMut(Button) -> bool, now_ms: u32) {
        for button in Button::ALL {
            if self.buttons.update(button, is_down(button), now_ms) {
                self.press(button, now_ms);
            }
        }
    }

    /// Handle one debounced button press
    pub fn press(&mut self, button: Button, now_ms: u32) {
        match (self.ui, button) {
            (UiState::Startup, Button::A) => self.confirm(now_ms),
            (UiState::Startup, Button::B) => {
                self.selector.next();
                info!(choice = %self.selector.current_label(), "selected");
            }
            (UiState::Running, Button::A) => self.toggle_pause(),
            (UiState::Running, Button::C) => {
                if let Some(session) = self.session.as_mut() {
                    session.ctrl.pause();
                }
                self.ui = UiState::ConfirmAbort;
                info!("abort? A: yes, C: no");
            }
            (UiState::ConfirmAbort, Button::A) => {
                if let Some(session) = self.session.as_mut() {
                    session.ctrl.abort();
                }
                self.ui = UiState::Running;
                info!("aborting, draining water");
            }
            (UiState::ConfirmAbort, Button::C) => {
                if let Some(session) = self.session.as_mut() {
                    session.ctrl.resume();
                }
                self.ui = UiState::Running;
                info!("abort cancelled, resuming");
            }
            (UiState::Sleep, Button::A) => {
                self.ui = UiState::Startup;
                self.selector.rewind();
                info!(choice = %self.selector.current_label(), "waking up");
            }
            _ => {}
        }
    }

    /// Advance time to `now_ms`, ticking the controller if one is due
    pub fn poll(&mut self, now_ms: u32) -> Option<TickReport> {
        if self.ui == UiState::Running {
            self.check_finished(now_ms);
        }
        if !matches!(self.ui, UiState::Running | UiState::ConfirmAbort) {
            return None;
        }

        let session = self.session.as_mut()?;
        if !session.pacer.due(now_ms) {
            return None;
        }

        self.plant.step(self.outputs.latched());
        let sensors = self.plant.read_sensors().unwrap_or_else(|e| match e {});

        let transition = session.ctrl.tick(&sensors, &mut session.actuators);
        self.outputs
            .write_actuators(&session.actuators)
            .unwrap_or_else(|e| match e {});
        self.ticks += 1;

        if let Some(t) = transition {
            if t.cause.is_fault() {
                warn!(from = %t.from, to = %t.to, cause = ?t.cause, error = %session.ctrl.error_code(), "fault");
            } else {
                info!(from = %t.from, to = %t.to, cause = ?t.cause, "state change");
            }
        }

        Some(TickReport {
            transition,
            status: session.ctrl.status(),
            sensors,
            actuators: session.actuators,
        })
    }

    fn confirm(&mut self, now_ms: u32) {
        let Some((label, program)) = self.selector.confirm() else {
            info!(choice = %self.selector.current_label(), "B: next, A: ok");
            return;
        };

        let (mut ctrl, _, actuators) = init(program);
        if ctrl.state() == State::Error {
            warn!(label = %label, error = %ctrl.error_code(), "program rejected");
        } else {
            ctrl.start();
            info!(label = %label, "starting cycle");
        }
        debug!(program = ?program, "program");

        self.plant = Plant::new();
        self.outputs.reset();
        self.finished_at = None;
        self.session = Some(Session {
            label,
            pacer: Pacer::for_program(&program, now_ms),
            ctrl,
            actuators,
        });
        self.ui = UiState::Running;
    }

    fn toggle_pause(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.ctrl.state() == State::Paused {
            if session.ctrl.resume() {
                info!("resumed");
            }
        } else if session.ctrl.pause() {
            info!("paused");
        }
    }

    fn check_finished(&mut self, now_ms: u32) {
        let finished = self
            .session
            .as_ref()
            .is_some_and(|s| s.ctrl.state().is_terminal());
        if !finished {
            return;
        }

        let since = *self.finished_at.get_or_insert(now_ms);
        if now_ms.wrapping_sub(since) > FINISH_HOLD_MS {
            self.finished_at = None;
            self.ui = UiState::Sleep;
            info!("cycle ended, press A to wake");
        }
    }
}

/// Resolve menu option names into a selection
///
/// Unknown names leave the default choice.
pub fn menu_selection(program: Option<&str>, level: Option<&str>, power: Option<&str>) -> MenuSelection {
    let mut selection = MenuSelection::default();
    if let Some(i) = program.and_then(|name| WASH_OPTIONS.iter().position(|o| o.name.eq_ignore_ascii_case(name))) {
        selection.program = i as u8;
    }
    if let Some(i) = level.and_then(|name| LEVEL_OPTIONS.iter().position(|o| o.0.eq_ignore_ascii_case(name))) {
        selection.level = i as u8;
    }
    if let Some(i) = power.and_then(|name| POWER_OPTIONS.iter().position(|o| o.name.eq_ignore_ascii_case(name))) {
        selection.power = i as u8;
    }
    selection
}
