//! Trainer display configuration, loaded once at startup from a simple
//! key-value settings text (one `option argument` pair per line).

use serde::{Deserialize, Serialize};

use crate::consts::MAX_LEDS;
use crate::errors::ConfigError;
use crate::led::color::LedColor;

/// Longest accepted option token, including a terminator slot.
pub const OPTION_LEN: usize = 20;

/// Longest accepted argument token.
pub const ARG_LEN: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TrainerConfig {
    /// Number of LEDs on the strip
    pub led_num: usize,
    /// Roll angle displayed at the outermost LED [deg]
    pub max_angle: f32,
    /// Width of the roll position label [LEDs]
    pub label_len: usize,
    pub label_color: LedColor,
    /// Roll rate represented by one tail LED [deg/s]
    pub dps_per_led: f32,
    pub tail_color: LedColor,
    /// When set, positive roll moves the label towards higher indices
    pub direct_mode: bool,
    /// When set, the tail trails the label instead of leading it
    pub tail_behind: bool,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            led_num: 60,
            max_angle: 45.0,
            label_len: 3,
            label_color: LedColor::new(0x40, 0x00, 0x00),
            dps_per_led: 30.0,
            tail_color: LedColor::new(0x00, 0x40, 0x00),
            direct_mode: true,
            tail_behind: false,
        }
    }
}

impl TrainerConfig {
    /// Parse the settings text. Options missing from the text keep their
    /// defaults, unknown option names are accepted and ignored, malformed
    /// lines are fatal.
    pub fn from_settings(text: &str) -> Result<Self, ConfigError> {
        let mut cfg = Self::default();

        for line in text.lines() {
            let line = line.trim_end();
            if line.is_empty() {
                continue;
            }

            let (option, arg) = line.split_once(' ').ok_or(ConfigError::MissingSeparator)?;
            if option.len() > OPTION_LEN - 1 {
                return Err(ConfigError::OptionTooLong);
            }
            if arg.len() > ARG_LEN - 1 {
                return Err(ConfigError::ArgumentTooLong);
            }

            match option {
                "led_num" => cfg.led_num = parse_int(arg)?,
                "max_angle" => cfg.max_angle = parse_float(arg)?,
                "label_len" => cfg.label_len = parse_int(arg)?,
                "label_color" => cfg.label_color = LedColor::from_packed(parse_hex(arg)?),
                "dps_per_led" => cfg.dps_per_led = parse_float(arg)?,
                "tail_color" => cfg.tail_color = LedColor::from_packed(parse_hex(arg)?),
                "direct_mode" => cfg.direct_mode = parse_int(arg)? != 0,
                "tail_behind" => cfg.tail_behind = parse_int(arg)? != 0,
                _ => {}
            }
        }

        if cfg.led_num > MAX_LEDS {
            return Err(ConfigError::TooManyLeds);
        }

        Ok(cfg)
    }
}

fn parse_int(arg: &str) -> Result<usize, ConfigError> {
    arg.trim().parse().map_err(|_| ConfigError::InvalidNumber)
}

fn parse_float(arg: &str) -> Result<f32, ConfigError> {
    arg.trim().parse().map_err(|_| ConfigError::InvalidNumber)
}

fn parse_hex(arg: &str) -> Result<u32, ConfigError> {
    let arg = arg.trim();
    let arg = arg.strip_prefix("0x").unwrap_or(arg);
    u32::from_str_radix(arg, 16).map_err(|_| ConfigError::InvalidNumber)
}
