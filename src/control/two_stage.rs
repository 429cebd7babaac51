//! Two-stage bang-bang acceleration controller.
//!
//! Stage 1 turns the current roll state into a desired roll acceleration
//! with a deliberately discontinuous feedback law: a damped-oscillator
//! form while diverging, a time-to-target form while converging close to
//! the setpoint. Stage 2 nudges the active channel's duty by a fixed step
//! each tick until the measured acceleration matches the desired one,
//! a slow integral convergence toward the implied operating point.

#[allow(unused_imports)]
use num_traits::Float;

use crate::consts::MAX_CONTROL;
use crate::types::actuators::{ActuatorChannel, ActuatorCommand};

/// Denominators at or below this magnitude take the diverging branch, so
/// no non-finite value can reach the actuators.
const RATE_EPSILON: f32 = 1e-6;

#[derive(Debug, Clone, Copy)]
pub struct TwoStageLaw {
    /// Feedback time constant [s]
    pub tau: f32,
    /// Duty adjustment per tick [percentage points]
    pub step: f32,
    /// Measured roll acceleration carried from the previous tick
    prev_rollacc: f32,
}

impl Default for TwoStageLaw {
    fn default() -> Self {
        Self {
            tau: 0.5,
            step: 1.0,
            prev_rollacc: 0.0,
        }
    }
}

impl TwoStageLaw {
    pub fn set_params(&mut self, tau: f32, step: f32) {
        self.tau = tau;
        self.step = step;
    }

    /// Stage 1: desired roll acceleration from the current roll state.
    pub fn desired_acceleration(&self, roll: f32, rollspeed: f32) -> f32 {
        let diverging = roll * rollspeed > 0.0;
        let overshooting = rollspeed.abs() > RATE_EPSILON
            && -4.0 * roll / (rollspeed * self.tau) > 1.0;

        if diverging || overshooting || rollspeed.abs() <= RATE_EPSILON {
            return -(4.0 * roll + 3.0 * rollspeed) / (self.tau * self.tau);
        }

        // Converging: decelerate so the rate reaches zero on target
        let t1 = -2.0 * roll / rollspeed;
        if t1.abs() <= RATE_EPSILON {
            return -(4.0 * roll + 3.0 * rollspeed) / (self.tau * self.tau);
        }
        -rollspeed / t1
    }

    /// Stage 2: step the active channel's duty towards the desired
    /// acceleration, judged against the acceleration measured on the
    /// previous tick. Returns the desired acceleration for telemetry.
    pub fn update(
        &mut self,
        roll: f32,
        rollspeed: f32,
        rollacc: f32,
        min_control: f32,
        command: &mut ActuatorCommand,
    ) -> f32 {
        let rollacc_des = self.desired_acceleration(roll, rollspeed);

        // Right thrust produces negative roll acceleration
        let (active, idle) = if rollacc_des < 0.0 {
            (ActuatorChannel::Right, ActuatorChannel::Left)
        } else {
            (ActuatorChannel::Left, ActuatorChannel::Right)
        };

        // A degenerate floor-to-ceiling range has no duty scale; treat
        // the current duty as 0% rather than divide by it
        let span = MAX_CONTROL - min_control;
        let pcur = if span.abs() > RATE_EPSILON {
            (command.get(active) - min_control) / span * 100.0
        } else {
            0.0
        };

        let short_of_target = match active {
            ActuatorChannel::Right => self.prev_rollacc > rollacc_des,
            _ => self.prev_rollacc < rollacc_des,
        };
        let pnew = if short_of_target {
            pcur + self.step
        } else {
            pcur - self.step
        }
        .clamp(0.0, 100.0);

        command.set(active, min_control + pnew / 100.0 * span);
        command.set_raw(idle, min_control);

        self.prev_rollacc = rollacc;
        rollacc_des
    }
}
