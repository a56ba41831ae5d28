//! Remaining-time estimation
//!
//! Fill and drain complete on sensor readings, so their real length is not
//! known in advance. The estimate uses their configured timeouts instead,
//! which makes it an upper bound for well-behaved plumbing.

use crate::controller::Controller;
use crate::program::{Program, SPIN_DURATION_SEC};
use crate::state::State;

/// Estimated seconds until `ctrl` finishes its program
///
/// A paused controller is estimated from the state it was paused in.
/// Returns 0 when idle or finished, saturates at `u16::MAX`.
pub fn time_remaining_sec(ctrl: &Controller) -> u16 {
    let state = match ctrl.state() {
        // Counted from the paused step, not as zero
        State::Paused => ctrl.prev_state(),
        // Start lasts one tick and then fills
        State::Start => State::Fill,
        other => other,
    };
    if matches!(state, State::Idle | State::Paused) || state.is_terminal() {
        return 0;
    }

    let p = ctrl.program();
    let wash = ctrl.is_wash_phase();

    let total = current_step_secs(p, state, wash, ctrl.state_time())
        + rest_of_cycle_secs(p, state, wash)
        + later_cycles_secs(p, ctrl)
        + spin_secs(p, state);

    u16::try_from(total).unwrap_or(u16::MAX)
}

/// Nominal length of `state`, in seconds
fn nominal_secs(p: &Program, state: State, wash: bool) -> u32 {
    let secs = match state {
        State::Fill => p.water_fill_timeout_sec,
        State::Soap => p.soap_time_sec,
        State::Agitate => p.agitate_secs(wash),
        State::Drain => p.drain_timeout_sec,
        State::Spin => SPIN_DURATION_SEC,
        _ => 0,
    };
    u32::from(secs)
}

fn current_step_secs(p: &Program, state: State, wash: bool, state_time: u32) -> u32 {
    let elapsed = state_time / u32::from(p.ticks_per_second.max(1));
    nominal_secs(p, state, wash).saturating_sub(elapsed)
}

fn rest_of_cycle_secs(p: &Program, state: State, wash: bool) -> u32 {
    let drain = u32::from(p.drain_timeout_sec);
    let agitate = u32::from(p.agitate_secs(wash));
    match state {
        State::Fill if wash => u32::from(p.soap_time_sec) + agitate + drain,
        State::Fill => agitate + drain,
        State::Soap => agitate + drain,
        State::Agitate => drain,
        _ => 0,
    }
}

/// Full cycles still to run after the one in progress
fn later_cycles_secs(p: &Program, ctrl: &Controller) -> u32 {
    let (washes, rinses) = if ctrl.is_wash_phase() {
        // The whole rinse phase is still ahead
        (
            p.wash_count.saturating_sub(ctrl.wash_done()).saturating_sub(1),
            p.rinse_count,
        )
    } else {
        (
            0,
            p.rinse_count.saturating_sub(ctrl.rinse_done()).saturating_sub(1),
        )
    };

    u32::from(washes) * p.wash_cycle_secs() + u32::from(rinses) * p.rinse_cycle_secs()
}

fn spin_secs(p: &Program, state: State) -> u32 {
    if p.spin_enable && state != State::Spin {
        u32::from(SPIN_DURATION_SEC)
    } else {
        0
    }
}
