/// Number of raw actuator channels (left, right, back)
pub const NUM_MOTORS: usize = 3;

/// Lower saturation bound of a normalized actuator channel
pub const MIN_CONTROL: f32 = -1.0;

/// Upper saturation bound of a normalized actuator channel
pub const MAX_CONTROL: f32 = 1.0;

/// Rate of the roll control loop [Hz]
pub const CONTROL_FREQ: u32 = 100;

/// Fixed control tick period [s]
pub const CONTROL_DT: f32 = 1.0 / CONTROL_FREQ as f32;

/// Largest supported LED strip length
pub const MAX_LEDS: usize = 144;

/// Conversion factor from degrees to radians
pub const DEG_TO_RAD: f32 = core::f32::consts::PI / 180.0;
