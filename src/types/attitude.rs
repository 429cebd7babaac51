use serde::{Deserialize, Serialize};

/// One roll-attitude measurement, delivered once per control tick.
///
/// `rollacc` is not measured directly, the control loop driver derives it
/// as `(rollspeed - prev_rollspeed) / CONTROL_DT` before the sample
/// reaches the control law engine.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AttitudeSample {
    /// Roll angle about the longitudinal axis [rad]
    pub roll: f32,
    /// Roll rate [rad/s]
    pub rollspeed: f32,
    /// Roll acceleration over the previous tick interval [rad/s^2]
    pub rollacc: f32,
}
