//! Builds logical color frames for the strip: a solid status fill for the
//! command heartbeat, and the attitude-driven position/tail display used
//! by the human-in-the-loop trainer.

#[allow(unused_imports)]
use num_traits::Float;

use crate::config::TrainerConfig;
use crate::consts::{DEG_TO_RAD, MAX_LEDS};

use super::color::LedColor;
use super::LedFrame;

/// Fill the whole strip with one color. The length is capped at
/// [`MAX_LEDS`], the frame capacity.
pub fn solid(color: LedColor, led_num: usize) -> LedFrame {
    let mut frame = LedFrame::new();
    for _ in 0..led_num.min(MAX_LEDS) {
        let _ = frame.push(color);
    }
    frame
}

/// Alternating solid status fill, toggled on every received command. The
/// strip visibly changing color is a liveness indicator independent of
/// the trainer display.
#[derive(Debug, Default)]
pub struct Heartbeat {
    toggle: bool,
}

impl Heartbeat {
    pub const fn new() -> Self {
        Self { toggle: false }
    }

    pub fn next_frame(&mut self, led_num: usize) -> LedFrame {
        self.toggle = !self.toggle;
        let color = if self.toggle {
            LedColor::STATUS_ODD
        } else {
            LedColor::STATUS_EVEN
        };
        solid(color, led_num)
    }
}

/// Render the trainer display for the given attitude.
///
/// The label is a fixed-width window centered on the LED index mapped
/// from `roll`, shifted (never truncated) back inside the strip when it
/// runs off either edge. The tail length is proportional to `|rollspeed|`
/// and its side follows the direction of travel, flipped by `tail_behind`
/// and again by `direct_mode`. The tail is painted after the label, so it
/// wins on overlap.
pub fn trainer_frame(cfg: &TrainerConfig, roll: f32, rollspeed: f32) -> LedFrame {
    let led_num = cfg.led_num as i32;
    let label_len = cfg.label_len as i32;

    let mid = led_num / 2;
    let rads_per_led = cfg.max_angle * DEG_TO_RAD / mid as f32;

    let bias = if cfg.direct_mode { 1.0 } else { -1.0 };
    let label = mid + (bias * roll / rads_per_led) as i32;

    // Clamp-and-shift: preserve the window width at the edges
    let mut label_begin = label - label_len / 2;
    let mut label_end = label + label_len / 2;
    if label_begin < 0 {
        label_begin = 0;
        label_end = label_begin + label_len - 1;
    }
    if label_end > led_num - 1 {
        label_end = led_num - 1;
        label_begin = label_end - label_len + 1;
    }

    let tail_len = (rollspeed.abs() / (cfg.dps_per_led * DEG_TO_RAD)) as i32;
    let tail_right = if rollspeed > 0.0 {
        cfg.direct_mode != cfg.tail_behind
    } else {
        cfg.direct_mode == cfg.tail_behind
    };
    let (mut tail_begin, mut tail_end) = if tail_right {
        (label_end + 1, label_end + tail_len)
    } else {
        (label_begin - tail_len, label_begin - 1)
    };
    tail_begin = tail_begin.max(0);
    tail_end = tail_end.min(led_num - 1);

    let mut frame = solid(LedColor::OFF, cfg.led_num);
    paint(&mut frame, label_begin, label_end, cfg.label_color);
    paint(&mut frame, tail_begin, tail_end, cfg.tail_color);
    frame
}

fn paint(frame: &mut LedFrame, begin: i32, end: i32, color: LedColor) {
    for index in begin.max(0)..=end.min(frame.len() as i32 - 1) {
        frame[index as usize] = color;
    }
}
