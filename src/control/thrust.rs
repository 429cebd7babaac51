//! Thrust-to-duty mapping shared by the PID and sine modes.

use crate::consts::{MAX_CONTROL, MIN_CONTROL};
use crate::types::actuators::{ActuatorChannel, ActuatorCommand};

/// Affine calibration mapping normalized thrust to actuator duty,
/// determined empirically offline: `thrust = k_thrust * duty + b_thrust`.
#[derive(Debug, Clone, Copy)]
pub struct ThrustMap {
    k_thrust: f32,
    b_thrust: f32,
}

impl Default for ThrustMap {
    fn default() -> Self {
        // Experimental values
        Self {
            k_thrust: 0.4638,
            b_thrust: 0.421,
        }
    }
}

impl ThrustMap {
    /// Convert a signed thrust into a single-channel command. Positive
    /// net thrust only energizes `Right`, negative only `Left`; the
    /// opposing channel idles at `min_control` so it stays hot for a
    /// faster response.
    pub fn apply(&self, thrust: f32, min_control: f32, command: &mut ActuatorCommand) {
        if thrust > 0.0 {
            let duty = (thrust - self.b_thrust) / self.k_thrust;
            command.set(ActuatorChannel::Right, duty.min(MAX_CONTROL));
            command.set_raw(ActuatorChannel::Left, min_control);
        } else {
            let duty = (-thrust - self.b_thrust) / self.k_thrust;
            command.set(ActuatorChannel::Left, duty.min(MAX_CONTROL));
            command.set_raw(ActuatorChannel::Right, min_control);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn positive_thrust_drives_right_only() {
        let map = ThrustMap::default();
        let mut cmd = ActuatorCommand::default();
        map.apply(0.8, MIN_CONTROL, &mut cmd);

        assert_relative_eq!(cmd.get(ActuatorChannel::Right), (0.8 - 0.421) / 0.4638);
        assert_eq!(cmd.get(ActuatorChannel::Left), MIN_CONTROL);
    }

    #[test]
    fn negative_thrust_drives_left_only() {
        let map = ThrustMap::default();
        let mut cmd = ActuatorCommand::default();
        map.apply(-0.8, MIN_CONTROL, &mut cmd);

        assert_relative_eq!(cmd.get(ActuatorChannel::Left), (0.8 - 0.421) / 0.4638);
        assert_eq!(cmd.get(ActuatorChannel::Right), MIN_CONTROL);
    }

    #[test]
    fn driven_channel_saturates_at_ceiling() {
        let map = ThrustMap::default();
        let mut cmd = ActuatorCommand::default();
        map.apply(100.0, MIN_CONTROL, &mut cmd);

        assert_eq!(cmd.get(ActuatorChannel::Right), MAX_CONTROL);
        assert!(cmd.in_bounds());
    }

    #[test]
    fn output_stays_in_bounds_across_thrust_range() {
        let map = ThrustMap::default();
        for i in -100..=100 {
            let mut cmd = ActuatorCommand::default();
            map.apply(i as f32 * 0.1, MIN_CONTROL, &mut cmd);
            assert!(cmd.in_bounds(), "thrust = {}", i as f32 * 0.1);
        }
    }

    #[test]
    fn idle_floor_is_operator_tunable() {
        let map = ThrustMap::default();
        let mut cmd = ActuatorCommand::default();
        map.apply(1.0, -0.6, &mut cmd);

        assert_eq!(cmd.get(ActuatorChannel::Left), -0.6);
    }
}
