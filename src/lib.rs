#![no_std]

//! Control-law and signaling core of the "duckling" self-balancing
//! platform. The crate consumes periodic roll-attitude samples, runs one
//! of several selectable control laws to produce actuator commands, and
//! drives an addressable RGB LED strip both as a status indicator and as
//! a real-time visual telemetry channel for a human-in-the-loop trainer.

#[cfg(test)]
extern crate std;

// Export the logging macros for either defmt or log
#[macro_use]
pub mod logging;

pub mod config;
pub mod consts;
pub mod control;
pub mod errors;
pub mod functions;
pub mod hw_abstraction;
pub mod led;
pub mod signals;
pub mod tasks;
pub mod types;

#[allow(unused)]
use num_traits::Float as _;

// Re-exported for implementors
pub use embassy_futures;
pub use embassy_sync;
pub use embassy_time;
pub use heapless;
