use serde::{Deserialize, Serialize};

/// A single LED color, stored in the strip's on-wire channel order
/// (green, red, blue for WS2812-class strips).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LedColor {
    pub g: u8,
    pub r: u8,
    pub b: u8,
}

impl LedColor {
    pub const OFF: Self = Self::new(0, 0, 0);

    /// Heartbeat status colors, alternated on every received command.
    pub const STATUS_EVEN: Self = Self::new(0x20, 0x00, 0x00);
    pub const STATUS_ODD: Self = Self::new(0x00, 0x00, 0x20);

    pub const fn new(g: u8, r: u8, b: u8) -> Self {
        Self { g, r, b }
    }

    /// Unpack a 24-bit color as the settings file encodes it: byte 0 is
    /// the first wire channel (green), byte 1 red, byte 2 blue.
    pub const fn from_packed(packed: u32) -> Self {
        Self {
            g: (packed & 0xff) as u8,
            r: ((packed >> 8) & 0xff) as u8,
            b: ((packed >> 16) & 0xff) as u8,
        }
    }

    /// Channel bytes in wire order.
    pub const fn as_bytes(&self) -> [u8; 3] {
        [self.g, self.r, self.b]
    }
}
