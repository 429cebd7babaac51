use serde::{Deserialize, Serialize};
use thiserror::Error;

#[non_exhaustive]
#[derive(Error, Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DucklingError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("LED encoding error: {0}")]
    Encode(#[from] EncodeError),
    #[error("Device error: {0}")]
    Device(#[from] DeviceError),
}

/// Errors produced while reading the trainer settings text. All of these
/// are fatal at startup, the driver is expected to abort with a message.
#[non_exhaustive]
#[derive(Error, Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    #[error("Settings line is missing the option/argument separator.")]
    MissingSeparator,
    #[error("Option token exceeds the maximum supported length.")]
    OptionTooLong,
    #[error("Argument token exceeds the maximum supported length.")]
    ArgumentTooLong,
    #[error("Argument could not be parsed as a number.")]
    InvalidNumber,
    #[error("Configured LED count exceeds the supported maximum.")]
    TooManyLeds,
}

#[non_exhaustive]
#[derive(Error, Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncodeError {
    #[error("Output buffer cannot hold the encoded symbol stream.")]
    BufferOverflow,
}

/// Transport-level failures reported by [`LedStrip`] implementations.
/// LED writes are best-effort, these are logged but never retried.
///
/// [`LedStrip`]: crate::hw_abstraction::LedStrip
#[non_exhaustive]
#[derive(Error, Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceError {
    #[error("The serial bus rejected the transfer.")]
    BusError,
    #[error("The device did not accept the transfer in time.")]
    Timeout,
}
