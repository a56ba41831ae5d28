//! Control API
//!
//! These calls only request transitions. Outputs change on the next tick.
//! Each returns `true` when it took effect.

use super::Controller;
use crate::state::State;

impl Controller {
    /// Start the program
    ///
    /// Only effective from `Idle`.
    pub fn start(&mut self) -> bool {
        if self.state != State::Idle {
            return false;
        }

        self.is_wash_phase = true;
        self.enter(State::Start);
        true
    }

    /// Pause the running program
    ///
    /// Returns false if already paused or finished.
    pub fn pause(&mut self) -> bool {
        if matches!(self.state, State::Paused) || self.state.is_terminal() {
            return false;
        }

        self.prev_state = self.state;
        self.state = State::Paused;
        true
    }

    /// Resume from pause
    ///
    /// The state timer continues from where it was frozen.
    pub fn resume(&mut self) -> bool {
        if self.state != State::Paused {
            return false;
        }

        self.state = self.prev_state;
        true
    }

    /// Abort the program
    ///
    /// The drum is always drained first: the controller jumps to `Drain`
    /// with every cycle counted as done and spin disabled, so the drain
    /// ends in `Complete`.
    pub fn abort(&mut self) -> bool {
        if matches!(self.state, State::Idle) || self.state.is_terminal() {
            return false;
        }

        self.is_wash_phase = false;
        self.wash_done = self.program.wash_count;
        self.rinse_done = self.program.rinse_count;
        self.program.spin_enable = false;
        self.enter(State::Drain);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{basic_program, force};
    use super::*;
    use crate::io::{MotorDir, WaterLevel};
    use crate::state::{Cause, DrainRoute, ErrorCode};
    use crate::Program;

    #[test]
    fn test_start_only_from_idle() {
        let mut ctrl = Controller::new(basic_program());
        assert!(ctrl.start());
        assert_eq!(ctrl.state(), State::Start);
        assert!(ctrl.is_wash_phase());
        assert_eq!(ctrl.state_time(), 0);

        assert!(!ctrl.start());
        assert_eq!(ctrl.state(), State::Start);
    }

    #[test]
    fn test_start_rejected_after_invalid_program() {
        let mut ctrl = Controller::new(Program::default());
        assert!(!ctrl.start());
        assert_eq!(ctrl.state(), State::Error);
        assert_eq!(ctrl.error_code(), ErrorCode::InvalidProgram);
    }

    #[test]
    fn test_pause_and_resume() {
        let (mut ctrl, sensors, mut act) = crate::init(basic_program());
        force(&mut ctrl, State::Agitate, 7);

        assert!(ctrl.pause());
        assert_eq!(ctrl.state(), State::Paused);
        assert_eq!(ctrl.prev_state(), State::Agitate);
        assert!(!ctrl.pause());

        for _ in 0..20 {
            assert!(ctrl.tick(&sensors, &mut act).is_none());
        }
        assert_eq!(ctrl.state(), State::Paused);
        assert_eq!(ctrl.state_time(), 7);
        assert_eq!(act.motor_dir, MotorDir::Stop);

        assert!(ctrl.resume());
        assert_eq!(ctrl.state(), State::Agitate);
        assert_eq!(ctrl.state_time(), 7);
        assert!(!ctrl.resume());
    }

    #[test]
    fn test_pause_rejected_when_finished() {
        for state in [State::Complete, State::Error] {
            let mut ctrl = Controller::new(basic_program());
            force(&mut ctrl, state, 0);
            assert!(!ctrl.pause());
            assert_eq!(ctrl.state(), state);
        }
    }

    #[test]
    fn test_pause_from_idle_allowed() {
        let mut ctrl = Controller::new(basic_program());
        assert!(ctrl.pause());
        assert!(ctrl.resume());
        assert_eq!(ctrl.state(), State::Idle);
    }

    #[test]
    fn test_abort_ignored_when_not_running() {
        for state in [State::Idle, State::Complete, State::Error] {
            let mut ctrl = Controller::new(basic_program());
            force(&mut ctrl, state, 3);
            assert!(!ctrl.abort());
            assert_eq!(ctrl.state(), state);
            assert_eq!(ctrl.state_time(), 3);
        }
    }

    #[test]
    fn test_abort_jumps_to_drain() {
        let program = Program {
            wash_count: 3,
            rinse_count: 2,
            ..basic_program()
        };
        let mut ctrl = Controller::new(program);
        ctrl.start();
        force(&mut ctrl, State::Soap, 2);

        assert!(ctrl.abort());
        assert_eq!(ctrl.state(), State::Drain);
        assert_eq!(ctrl.state_time(), 0);
        assert!(!ctrl.is_wash_phase());
        assert_eq!(ctrl.wash_done(), 3);
        assert_eq!(ctrl.rinse_done(), 2);
        assert!(!ctrl.program().spin_enable);
    }

    #[test]
    fn test_abort_drains_then_completes() {
        let (mut ctrl, mut sensors, mut act) = crate::init(basic_program());
        ctrl.start();
        ctrl.tick(&sensors, &mut act);
        sensors.water_level = WaterLevel::Med;
        sensors.drain_check = true;
        ctrl.tick(&sensors, &mut act);

        assert!(ctrl.abort());
        ctrl.tick(&sensors, &mut act);
        assert!(act.drain_pump);
        assert!(!act.inlet_valve);

        sensors.water_level = WaterLevel::Empty;
        sensors.drain_check = false;
        let t = ctrl.tick(&sensors, &mut act);
        assert_eq!(t.map(|t| t.cause), Some(Cause::Drained(DrainRoute::Complete)));
        assert_eq!(ctrl.state(), State::Complete);
    }

    #[test]
    fn test_abort_while_paused() {
        let mut ctrl = Controller::new(basic_program());
        ctrl.start();
        force(&mut ctrl, State::Fill, 4);
        ctrl.pause();

        assert!(ctrl.abort());
        assert_eq!(ctrl.state(), State::Drain);
        assert!(!ctrl.resume());
    }

    #[test]
    fn test_abort_can_still_time_out() {
        let (mut ctrl, mut sensors, mut act) = crate::init(basic_program());
        ctrl.start();
        ctrl.abort();
        sensors.drain_check = true;

        for _ in 0..10 {
            ctrl.tick(&sensors, &mut act);
        }
        assert_eq!(ctrl.state(), State::Error);
        assert_eq!(ctrl.error_code(), ErrorCode::TimeoutDrain);
    }
}
