pub mod color;
pub mod composer;
pub mod encoder;

use crate::consts::MAX_LEDS;
use color::LedColor;

/// Logical color buffer for the strip, rebuilt fully on every render.
/// The length always equals the configured strip length.
pub type LedFrame = heapless::Vec<LedColor, MAX_LEDS>;
