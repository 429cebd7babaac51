use serde::{Deserialize, Serialize};

/// Controller status record, published on anchor calibration completion
/// and on gain/parameter changes.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusRecord {
    /// Learned zero-offset subtracted from all roll readings [rad]
    pub anchor: f32,
    pub kp: f32,
    pub ki: f32,
    pub kd: f32,
    /// Roll of the most recent sample, anchor-corrected [rad]
    pub roll: f32,
    /// Roll rate of the most recent sample [rad/s]
    pub rollspeed: f32,
    /// Measured roll acceleration of the most recent sample [rad/s^2]
    pub rollacc_meas: f32,
    /// Acceleration requested by the two-stage law [rad/s^2]
    pub rollacc_des: f32,
    /// Two-stage feedback time constant [s]
    pub tau: f32,
    /// Two-stage duty adjustment step [percentage points]
    pub step: f32,
}
