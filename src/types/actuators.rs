use serde::{Deserialize, Serialize};

use crate::consts::{MAX_CONTROL, MIN_CONTROL, NUM_MOTORS};

/// Named actuator channels. `Left` and `Right` carry the roll-stabilizing
/// thrust, `Back` only exists on the three-motor frame and is driven
/// exclusively through manual overrides.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActuatorChannel {
    Left = 0,
    Right = 1,
    Back = 2,
}

impl ActuatorChannel {
    /// Map a raw channel index from a command parameter onto a channel.
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Left),
            1 => Some(Self::Right),
            2 => Some(Self::Back),
            _ => None,
        }
    }
}

/// Normalized actuator command for all channels, published once per tick.
///
/// The unidirectional-motor convention means at most one of `Left`/`Right`
/// is driven above the idle floor at a time in thrust-derived modes.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ActuatorCommand(pub [f32; NUM_MOTORS]);

impl ActuatorCommand {
    /// All channels at the given idle floor.
    pub const fn idle(floor: f32) -> Self {
        Self([floor; NUM_MOTORS])
    }

    pub fn get(&self, channel: ActuatorChannel) -> f32 {
        self.0[channel as usize]
    }

    /// Write one channel, saturated to `[MIN_CONTROL, MAX_CONTROL]`.
    pub fn set(&mut self, channel: ActuatorChannel, value: f32) {
        self.0[channel as usize] = value.clamp(MIN_CONTROL, MAX_CONTROL);
    }

    /// Write one channel without saturation. Manual overrides
    /// (`SET_PWM`) bypass clamping.
    pub fn set_raw(&mut self, channel: ActuatorChannel, value: f32) {
        self.0[channel as usize] = value;
    }

    /// Force every channel to the given idle floor.
    pub fn set_all(&mut self, value: f32) {
        self.0 = [value; NUM_MOTORS];
    }

    /// True when every channel lies within `[MIN_CONTROL, MAX_CONTROL]`.
    pub fn in_bounds(&self) -> bool {
        self.0
            .iter()
            .all(|&v| (MIN_CONTROL..=MAX_CONTROL).contains(&v))
    }
}

impl Default for ActuatorCommand {
    fn default() -> Self {
        Self::idle(MIN_CONTROL)
    }
}
