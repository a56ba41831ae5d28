//! Per-tick state dispatch
//!
//! Each tick starts from all-off outputs, runs the handler for the current
//! state and finally hands the snapshot to the interlock. Outputs are a
//! function of this tick only.

use super::Controller;
use crate::agitate::AgitatePattern;
use crate::io::{Actuators, BuzzerMode, MotorDir, Sensors};
use crate::safety;
use crate::state::{Cause, DrainRoute, ErrorCode, State, Transition};

impl Controller {
    /// Advance one tick
    ///
    /// `actuators` is overwritten in full. Returns the state change this
    /// tick caused, if any.
    ///
    /// While paused the tick only clears the outputs: state, timer and
    /// counters are left untouched.
    pub fn tick(&mut self, sensors: &Sensors, actuators: &mut Actuators) -> Option<Transition> {
        *actuators = Actuators::off();

        if self.state == State::Paused {
            return None;
        }

        self.state_time = self.state_time.saturating_add(1);

        let from = self.state;
        let cause = self.dispatch(sensors, actuators);

        safety::enforce(self.state, actuators);

        cause.map(|cause| Transition::new(from, self.state, cause))
    }

    fn dispatch(&mut self, sensors: &Sensors, act: &mut Actuators) -> Option<Cause> {
        match self.state {
            // Outputs are already off
            State::Idle => None,
            State::Start => {
                act.buzzer = BuzzerMode::Start;
                self.enter(State::Fill);
                Some(Cause::Started)
            }
            State::Fill => self.fill(sensors, act),
            State::Soap => self.soap(act),
            State::Agitate => self.agitate(act),
            State::Drain => self.drain(sensors, act),
            State::Spin => self.spin(act),
            // Handled before dispatch
            State::Paused => None,
            State::Complete => {
                act.buzzer = BuzzerMode::Finish;
                None
            }
            State::Error => {
                act.buzzer = BuzzerMode::Error;
                None
            }
        }
    }

    fn fill(&mut self, sensors: &Sensors, act: &mut Actuators) -> Option<Cause> {
        act.inlet_valve = true;

        if sensors.water_level >= self.program.target_water_level {
            let next = if self.is_wash_phase {
                State::Soap
            } else {
                State::Agitate
            };
            self.enter(next);
            Some(Cause::LevelReached)
        } else if self.state_time >= self.program.fill_timeout_ticks() {
            self.fail(ErrorCode::TimeoutFill);
            Some(Cause::FillTimeout)
        } else {
            None
        }
    }

    fn soap(&mut self, act: &mut Actuators) -> Option<Cause> {
        act.soap_pump = true;

        if self.state_time >= self.program.soap_ticks() {
            self.enter(State::Agitate);
            Some(Cause::SoapDone)
        } else {
            None
        }
    }

    fn agitate(&mut self, act: &mut Actuators) -> Option<Cause> {
        act.motor_dir = AgitatePattern::from_program(&self.program).direction_at(self.state_time);

        if self.state_time >= self.program.agitate_ticks(self.is_wash_phase) {
            self.enter(State::Drain);
            Some(Cause::AgitateDone)
        } else {
            None
        }
    }

    fn drain(&mut self, sensors: &Sensors, act: &mut Actuators) -> Option<Cause> {
        act.drain_pump = true;

        if !sensors.drain_check {
            let route = self.route_after_drain();
            self.enter(route.target());
            Some(Cause::Drained(route))
        } else if self.state_time >= self.program.drain_timeout_ticks() {
            self.fail(ErrorCode::TimeoutDrain);
            Some(Cause::DrainTimeout)
        } else {
            None
        }
    }

    /// Count the finished cycle and pick what follows it
    ///
    /// Counters never exceed their program count.
    fn route_after_drain(&mut self) -> DrainRoute {
        if self.is_wash_phase {
            let done = self.wash_done.saturating_add(1);
            self.wash_done = done.min(self.program.wash_count);
            if done < self.program.wash_count {
                return DrainRoute::NextWash;
            }
        } else {
            let done = self.rinse_done.saturating_add(1);
            self.rinse_done = done.min(self.program.rinse_count);
            if done < self.program.rinse_count {
                return DrainRoute::NextRinse;
            }
        }

        if self.is_wash_phase {
            self.is_wash_phase = false;
            DrainRoute::BeginRinse
        } else if self.program.spin_enable {
            DrainRoute::Spin
        } else {
            DrainRoute::Complete
        }
    }

    fn spin(&mut self, act: &mut Actuators) -> Option<Cause> {
        // No drain pump here: the preceding drain is trusted to have
        // emptied the drum
        act.motor_dir = MotorDir::Cw;

        if self.state_time >= self.program.spin_ticks() {
            self.enter(State::Complete);
            Some(Cause::SpinDone)
        } else {
            None
        }
    }
}
