use num_enum::TryFromPrimitive;
use serde::{Deserialize, Serialize};

/// Opcodes understood by the command interpreter. The numeric range is
/// private to this controller on the vehicle command bus.
#[derive(Debug, Copy, Clone, Eq, PartialEq, TryFromPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u32)]
pub enum Opcode {
    /// Select the active control law (param1 = mode discriminant)
    SetMode = 10001,
    /// Overwrite one actuator channel (param1 = channel, param2 = value)
    SetPwm,
    /// Overwrite the PID gains (param1..3 = kp, ki, kd)
    SetPidCoeffs,
    /// Overwrite impulse test parameters (param1 = length, param2 = amplitude)
    SetImpParams,
    /// Restart anchor calibration (param1 = sample count)
    SetAnchorRoll,
    /// Overwrite the idle floor used by the thrust mapping
    SetMinControl,
    /// Overwrite sine test parameters (param1 = magnitude, param2 = frequency)
    SetSinParams,
    /// Overwrite two-stage parameters (param1 = tau, param2 = step)
    SetTwoParams,
}

/// A discrete controller command from the telemetry bus. The opcode is
/// kept raw so unknown values can be received and absorbed.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Command {
    pub opcode: u32,
    pub param1: f32,
    pub param2: f32,
    pub param3: f32,
}

impl Command {
    pub const fn new(opcode: Opcode, param1: f32, param2: f32, param3: f32) -> Self {
        Self {
            opcode: opcode as u32,
            param1,
            param2,
            param3,
        }
    }
}
