//! Bit-level encoder for the addressable-LED wire protocol.
//!
//! The strip is driven over a plain serial transport whose minimum
//! granularity is one byte duration. At the 10.5 MHz transport clock one
//! transmitted byte (~760 ns) approximates one protocol bit slot, so each
//! logical color bit becomes one fixed pattern byte: a mostly-high byte
//! for a 1-bit, a half-high byte for a 0-bit. This produces the
//! short-high/long-low duty-cycle illusion the strip samples.

use crate::consts::MAX_LEDS;
use crate::errors::EncodeError;

use super::LedFrame;

/// Symbol transmitted for a logical 1-bit (7 of 8 transport bits high).
pub const SYMBOL_HIGH: u8 = 0xFE;

/// Symbol transmitted for a logical 0-bit (4 of 8 transport bits high).
pub const SYMBOL_LOW: u8 = 0xF0;

/// Symbol buffer large enough for a full frame: 3 color bytes per LED,
/// 8 symbols per byte.
pub const SYMBOL_BUF_LEN: usize = MAX_LEDS * 3 * 8;

pub type SymbolBuf = heapless::Vec<u8, SYMBOL_BUF_LEN>;

/// Encode a sequence of logical bytes into wire symbols, most significant
/// bit first. Output length is exactly 8x the input length.
pub fn encode_into<const N: usize>(
    bytes: &[u8],
    out: &mut heapless::Vec<u8, N>,
) -> Result<(), EncodeError> {
    for &byte in bytes {
        for j in 0..8 {
            let symbol = if byte & (1 << (7 - j)) != 0 {
                SYMBOL_HIGH
            } else {
                SYMBOL_LOW
            };
            out.push(symbol).map_err(|_| EncodeError::BufferOverflow)?;
        }
    }
    Ok(())
}

/// Encode a full logical frame into a fresh symbol buffer.
pub fn encode_frame(frame: &LedFrame) -> Result<SymbolBuf, EncodeError> {
    let mut out = SymbolBuf::new();
    for color in frame {
        encode_into(&color.as_bytes(), &mut out)?;
    }
    Ok(out)
}
