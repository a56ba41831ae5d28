//! Run-time controller
//!
//! The controller is the only stateful piece of the core. It is created
//! from a [`Program`], advanced one tick at a time by [`Controller::tick`]
//! and steered by the control calls in [`control`].
//!
//! A controller is not reentrant. One machine owns one controller and
//! drives it from one control loop.

mod control;
mod dispatch;

use crate::estimate;
use crate::io::{Actuators, Sensors};
use crate::program::Program;
use crate::state::{ErrorCode, State};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Washing machine controller
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Controller {
    /// Current state
    state: State,
    /// State to return to on resume (only meaningful while paused)
    prev_state: State,
    /// True while washing, false while rinsing
    is_wash_phase: bool,
    /// Completed wash cycles
    wash_done: u8,
    /// Completed rinse cycles
    rinse_done: u8,
    /// Ticks since entering the current state
    state_time: u32,
    /// Validated program (abort may disable its spin for this run)
    program: Program,
    /// Fault code, `None` unless in `Error`
    error_code: ErrorCode,
}

/// Display snapshot of a controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Status {
    pub state: State,
    pub is_wash_phase: bool,
    pub wash_done: u8,
    pub rinse_done: u8,
    pub remaining_sec: u16,
    pub error_code: ErrorCode,
}

impl Status {
    /// Phase label for display
    pub const fn phase_name(&self) -> &'static str {
        if self.is_wash_phase {
            "WASH"
        } else {
            "RINSE"
        }
    }
}

/// Create a controller with freshly reset sensors and outputs
///
/// An invalid program yields a controller already in `Error` with
/// `InvalidProgram`; check [`Controller::state`] before starting.
pub fn init(program: Program) -> (Controller, Sensors, Actuators) {
    (Controller::new(program), Sensors::empty(), Actuators::off())
}

impl Controller {
    /// Create a controller for `program`
    pub fn new(program: Program) -> Self {
        let (state, error_code) = match program.validate() {
            Ok(()) => (State::Idle, ErrorCode::None),
            Err(_) => (State::Error, ErrorCode::InvalidProgram),
        };

        Self {
            state,
            prev_state: State::Idle,
            is_wash_phase: false,
            wash_done: 0,
            rinse_done: 0,
            state_time: 0,
            program,
            error_code,
        }
    }

    /// Get current state
    pub fn state(&self) -> State {
        self.state
    }

    /// Get the state saved by the last pause
    pub fn prev_state(&self) -> State {
        self.prev_state
    }

    /// Check if the controller is in the wash phase
    pub fn is_wash_phase(&self) -> bool {
        self.is_wash_phase
    }

    /// Get completed wash cycles
    pub fn wash_done(&self) -> u8 {
        self.wash_done
    }

    /// Get completed rinse cycles
    pub fn rinse_done(&self) -> u8 {
        self.rinse_done
    }

    /// Get ticks spent in the current state
    pub fn state_time(&self) -> u32 {
        self.state_time
    }

    /// Get the program this controller runs
    pub fn program(&self) -> &Program {
        &self.program
    }

    /// Get the fault code
    pub fn error_code(&self) -> ErrorCode {
        self.error_code
    }

    /// Estimated seconds until the program finishes
    pub fn time_remaining_sec(&self) -> u16 {
        estimate::time_remaining_sec(self)
    }

    /// Snapshot for display
    pub fn status(&self) -> Status {
        Status {
            state: self.state,
            is_wash_phase: self.is_wash_phase,
            wash_done: self.wash_done,
            rinse_done: self.rinse_done,
            remaining_sec: self.time_remaining_sec(),
            error_code: self.error_code,
        }
    }

    /// Enter `next`, restarting the state timer
    fn enter(&mut self, next: State) {
        self.state = next;
        self.state_time = 0;
    }

    /// Enter `Error` with `code`
    fn fail(&mut self, code: ErrorCode) {
        self.error_code = code;
        self.enter(State::Error);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::io::WaterLevel;

    /// Test hook: place the controller directly into a state
    pub(crate) fn force(ctrl: &mut Controller, state: State, state_time: u32) {
        ctrl.state = state;
        ctrl.state_time = state_time;
    }

    /// Test hook: set phase and cycle counters
    pub(crate) fn force_phase(ctrl: &mut Controller, is_wash: bool, wash_done: u8, rinse_done: u8) {
        ctrl.is_wash_phase = is_wash;
        ctrl.wash_done = wash_done;
        ctrl.rinse_done = rinse_done;
    }

    pub(crate) fn basic_program() -> Program {
        Program {
            wash_count: 1,
            rinse_count: 1,
            spin_enable: true,
            soap_time_sec: 3,
            wash_agitate_time_sec: 5,
            rinse_agitate_time_sec: 4,
            agitate_run_ms: 3000,
            agitate_cycle_ms: 5000,
            target_water_level: WaterLevel::High,
            water_fill_timeout_sec: 10,
            drain_timeout_sec: 10,
            ticks_per_second: 1,
        }
    }

    #[test]
    fn test_init_state() {
        let (ctrl, sensors, actuators) = init(basic_program());

        assert_eq!(ctrl.state(), State::Idle);
        assert_eq!(ctrl.error_code(), ErrorCode::None);
        assert_eq!(ctrl.wash_done(), 0);
        assert_eq!(ctrl.rinse_done(), 0);
        assert_eq!(ctrl.state_time(), 0);
        assert_eq!(sensors.water_level, WaterLevel::Empty);
        assert!(!sensors.drain_check);
        assert!(actuators.is_off());
    }

    #[test]
    fn test_invalid_program_errors_immediately() {
        let program = Program {
            ticks_per_second: 0,
            ..basic_program()
        };
        let (ctrl, _, _) = init(program);

        assert_eq!(ctrl.state(), State::Error);
        assert_eq!(ctrl.error_code(), ErrorCode::InvalidProgram);
        assert_eq!(ctrl.wash_done(), 0);
        assert_eq!(ctrl.rinse_done(), 0);
        assert!(!ctrl.is_wash_phase());
    }

    #[test]
    fn test_each_zero_field_is_invalid() {
        let zero_fill = Program {
            water_fill_timeout_sec: 0,
            ..basic_program()
        };
        let zero_drain = Program {
            drain_timeout_sec: 0,
            ..basic_program()
        };

        for program in [zero_fill, zero_drain, Program::default()] {
            let ctrl = Controller::new(program);
            assert_eq!(ctrl.state(), State::Error);
            assert_eq!(ctrl.error_code(), ErrorCode::InvalidProgram);
        }
    }

    #[test]
    fn test_status_snapshot() {
        let mut ctrl = Controller::new(basic_program());
        ctrl.start();

        let status = ctrl.status();
        assert_eq!(status.state, State::Start);
        assert_eq!(status.phase_name(), "WASH");
        assert_eq!(status.error_code, ErrorCode::None);
        assert_eq!(status.remaining_sec, ctrl.time_remaining_sec());
    }
}
