//! Multi-mode roll-stabilization control law engine and its command
//! interpreter. The engine is an owned instance held by the control loop
//! driver, it is single-writer by design and exposes no locking.

pub mod anchor;
pub mod thrust;
pub mod two_stage;

use core::f32::consts::TAU;

use num_enum::TryFromPrimitive;
#[allow(unused_imports)]
use num_traits::Float;

use crate::consts::{CONTROL_DT, MAX_CONTROL, MIN_CONTROL};
use crate::functions::wrap;
use crate::types::actuators::{ActuatorChannel, ActuatorCommand};
use crate::types::attitude::AttitudeSample;
use crate::types::command::{Command, Opcode};
use crate::types::status::StatusRecord;

use anchor::AnchorCalibrator;
use thrust::ThrustMap;
use two_stage::TwoStageLaw;

const ID: &str = "control_law";

/// Samples averaged by the startup anchor calibration (1 s at 100 Hz).
pub const DEFAULT_ANCHOR_SAMPLES: u32 = 100;

/// Selectable control laws. `Silence` is the initial and safe-fallback
/// state, `Manual` leaves the actuator buffer to explicit `SET_PWM`
/// overrides only.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default, TryFromPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum DucklingMode {
    #[default]
    Silence = 0,
    Manual,
    Pid,
    Impulse,
    Sin,
    TwoStage,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PidGains {
    pub kp: f32,
    pub ki: f32,
    pub kd: f32,
}

/// Impulse-response test: drive `Left` at a fixed amplitude for a fixed
/// number of ticks, then fall back to `Silence`.
#[derive(Debug, Clone, Copy)]
struct ImpulseTest {
    length: u32,
    amplitude: f32,
    index: u32,
}

impl Default for ImpulseTest {
    fn default() -> Self {
        Self {
            length: 20,
            amplitude: 1.0,
            index: 0,
        }
    }
}

/// Sinusoidal excitation for frequency-response characterization.
#[derive(Debug, Clone, Copy, Default)]
struct SineTest {
    magnitude: f32,
    frequency: f32,
    phase: f32,
}

/// The controller state machine. Created once at startup, mutated only
/// by the per-tick control step and the command interpreter.
pub struct ControlLaw {
    mode: DucklingMode,
    gains: PidGains,
    roll_integral: f32,
    anchor: AnchorCalibrator,
    impulse: ImpulseTest,
    sine: SineTest,
    two_stage: TwoStageLaw,
    thrust_map: ThrustMap,
    min_control: f32,
    command: ActuatorCommand,
    last_sample: AttitudeSample,
    last_rollacc_des: f32,
    pending_status: Option<StatusRecord>,
}

impl Default for ControlLaw {
    fn default() -> Self {
        Self::new()
    }
}

impl ControlLaw {
    pub fn new() -> Self {
        Self {
            mode: DucklingMode::Silence,
            gains: PidGains::default(),
            roll_integral: 0.0,
            anchor: AnchorCalibrator::new(DEFAULT_ANCHOR_SAMPLES),
            impulse: ImpulseTest::default(),
            sine: SineTest::default(),
            two_stage: TwoStageLaw::default(),
            thrust_map: ThrustMap::default(),
            min_control: MIN_CONTROL,
            command: ActuatorCommand::idle(MIN_CONTROL),
            last_sample: AttitudeSample::default(),
            last_rollacc_des: 0.0,
            pending_status: None,
        }
    }

    pub fn mode(&self) -> DucklingMode {
        self.mode
    }

    /// The most recent actuator command.
    pub fn command(&self) -> ActuatorCommand {
        self.command
    }

    pub fn anchor_value(&self) -> f32 {
        self.anchor.value()
    }

    /// Take the status record queued by calibration completion or a
    /// parameter change, if any.
    pub fn take_status(&mut self) -> Option<StatusRecord> {
        self.pending_status.take()
    }

    /// Switch the active control law. Never rejected, every transition
    /// re-idles all channels; entering `Pid` resets the integral and
    /// entering `Impulse` restarts the step counter.
    pub fn set_mode(&mut self, mode: DucklingMode) {
        self.command.set_all(self.min_control);
        match mode {
            DucklingMode::Pid => self.roll_integral = 0.0,
            DucklingMode::Impulse => self.impulse.index = 0,
            _ => {}
        }
        self.mode = mode;
    }

    /// Run one control tick: anchor step first, then the active law.
    /// Returns the actuator command to publish.
    pub fn tick(&mut self, sample: AttitudeSample) -> ActuatorCommand {
        if !self.anchor.is_done() && self.anchor.collect(sample.roll) {
            self.roll_integral = 0.0;
            info!(
                "{}: Anchor calibration complete, offset {} rad",
                ID,
                self.anchor.value()
            );
            self.push_status();
        }

        // The anchor offset applies to every mode from here on
        let roll = self.anchor.correct(sample.roll);
        self.last_sample = AttitudeSample { roll, ..sample };

        match self.mode {
            DucklingMode::Manual => {}
            DucklingMode::Pid => {
                self.roll_integral += roll;
                let thrust = self.gains.kp * roll
                    + self.gains.ki * self.roll_integral
                    + self.gains.kd * sample.rollspeed;
                self.thrust_map
                    .apply(thrust, self.min_control, &mut self.command);
            }
            DucklingMode::Impulse => {
                if self.impulse.index + 1 < self.impulse.length {
                    self.command
                        .set(ActuatorChannel::Left, self.impulse.amplitude);
                    self.command
                        .set_raw(ActuatorChannel::Right, self.min_control);
                    self.impulse.index += 1;
                } else {
                    self.command.set_all(self.min_control);
                    self.impulse.index = 0;
                    self.mode = DucklingMode::Silence;
                    info!("{}: Impulse test complete", ID);
                }
            }
            DucklingMode::Sin => {
                self.sine.phase = wrap(
                    self.sine.phase + TAU * self.sine.frequency * CONTROL_DT,
                    0.0,
                    TAU,
                );
                let thrust = self.sine.magnitude * self.sine.phase.sin();
                self.thrust_map
                    .apply(thrust, self.min_control, &mut self.command);
            }
            DucklingMode::TwoStage => {
                self.last_rollacc_des = self.two_stage.update(
                    roll,
                    sample.rollspeed,
                    sample.rollacc,
                    self.min_control,
                    &mut self.command,
                );
            }
            DucklingMode::Silence => self.command.set_all(self.min_control),
        }

        self.command
    }

    /// Interpret one discrete command. Unknown opcodes, modes and channel
    /// indices are absorbed without a state change (availability over
    /// strictness), logged at warn level.
    pub fn handle_command(&mut self, command: &Command) {
        match Opcode::try_from(command.opcode) {
            Ok(Opcode::SetMode) => {
                match param_index(command.param1)
                    .and_then(|mode| DucklingMode::try_from(mode as u8).ok())
                {
                    Some(mode) => {
                        self.set_mode(mode);
                        info!("{}: Mode {} set", ID, command.param1);
                    }
                    None => warn!("{}: Unknown mode {}", ID, command.param1),
                }
            }
            Ok(Opcode::SetPwm) => {
                match param_index(command.param1).and_then(ActuatorChannel::from_index) {
                    // Manual overrides bypass clamping by design
                    Some(channel) => self.command.set_raw(channel, command.param2),
                    None => warn!("{}: Channel index {} out of range", ID, command.param1),
                }
            }
            Ok(Opcode::SetPidCoeffs) => {
                self.gains = PidGains {
                    kp: command.param1,
                    ki: command.param2,
                    kd: command.param3,
                };
                info!(
                    "{}: PID coeffs ({}, {}, {}) set",
                    ID, command.param1, command.param2, command.param3
                );
                self.push_status();
            }
            Ok(Opcode::SetImpParams) => {
                self.impulse.length = command.param1 as u32;
                self.impulse.amplitude = command.param2;
            }
            Ok(Opcode::SetAnchorRoll) => {
                self.anchor.restart(command.param1 as u32);
                info!(
                    "{}: Anchor calibration restarted over {} samples",
                    ID, command.param1 as u32
                );
            }
            Ok(Opcode::SetMinControl) => {
                // A floor at or above the ceiling would collapse the
                // duty range; NaN fails the comparison and is absorbed
                if (MIN_CONTROL..MAX_CONTROL).contains(&command.param1) {
                    self.min_control = command.param1;
                } else {
                    warn!(
                        "{}: Idle floor {} outside [{}, {}), ignored",
                        ID, command.param1, MIN_CONTROL, MAX_CONTROL
                    );
                }
            }
            Ok(Opcode::SetSinParams) => {
                // Phase is deliberately not reset
                self.sine.magnitude = command.param1;
                self.sine.frequency = command.param2;
            }
            Ok(Opcode::SetTwoParams) => {
                self.two_stage.set_params(command.param1, command.param2);
                info!(
                    "{}: Two-stage params ({}, {}) set",
                    ID, command.param1, command.param2
                );
                self.push_status();
            }
            Err(_) => warn!("{}: Unknown opcode {}", ID, command.opcode),
        }
    }

    fn push_status(&mut self) {
        self.pending_status = Some(StatusRecord {
            anchor: self.anchor.value(),
            kp: self.gains.kp,
            ki: self.gains.ki,
            kd: self.gains.kd,
            roll: self.last_sample.roll,
            rollspeed: self.last_sample.rollspeed,
            rollacc_meas: self.last_sample.rollacc,
            rollacc_des: self.last_rollacc_des,
            tau: self.two_stage.tau,
            step: self.two_stage.step,
        });
    }
}

/// Mode and channel parameters arrive as floats; only an exact small
/// non-negative integer addresses a valid target. A plain `as` cast
/// would saturate negative values onto index 0.
fn param_index(param: f32) -> Option<usize> {
    (param.is_finite() && param >= 0.0 && param.fract() == 0.0 && param <= u8::MAX as f32)
        .then(|| param as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::MAX_CONTROL;
    use approx::assert_relative_eq;

    fn sample(roll: f32, rollspeed: f32) -> AttitudeSample {
        AttitudeSample {
            roll,
            rollspeed,
            rollacc: 0.0,
        }
    }

    fn cmd(opcode: Opcode, p1: f32, p2: f32, p3: f32) -> Command {
        Command::new(opcode, p1, p2, p3)
    }

    #[test]
    fn starts_silent_and_idle() {
        let mut engine = ControlLaw::new();
        assert_eq!(engine.mode(), DucklingMode::Silence);

        let out = engine.tick(sample(0.3, 0.1));
        assert_eq!(out, ActuatorCommand::idle(MIN_CONTROL));
    }

    #[test]
    fn every_transition_reidles_all_channels() {
        let mut engine = ControlLaw::new();
        engine.handle_command(&cmd(Opcode::SetMode, DucklingMode::Manual as u8 as f32, 0.0, 0.0));
        engine.handle_command(&cmd(Opcode::SetPwm, 0.0, 0.7, 0.0));
        engine.handle_command(&cmd(Opcode::SetPwm, 2.0, 0.5, 0.0));
        assert_eq!(engine.command().get(ActuatorChannel::Left), 0.7);
        assert_eq!(engine.command().get(ActuatorChannel::Back), 0.5);

        for mode in [
            DucklingMode::Silence,
            DucklingMode::Pid,
            DucklingMode::Impulse,
            DucklingMode::Sin,
            DucklingMode::TwoStage,
            DucklingMode::Manual,
        ] {
            engine.set_mode(mode);
            assert_eq!(engine.command(), ActuatorCommand::idle(MIN_CONTROL));
        }
    }

    #[test]
    fn entering_pid_resets_the_integral() {
        let mut engine = ControlLaw::new();
        engine.handle_command(&cmd(Opcode::SetPidCoeffs, 0.0, 1.0, 0.0));
        engine.set_mode(DucklingMode::Pid);

        // Accumulate some integral, leave and re-enter PID
        for _ in 0..10 {
            engine.tick(sample(0.5, 0.0));
        }
        engine.set_mode(DucklingMode::Silence);
        engine.set_mode(DucklingMode::Pid);

        // First tick after re-entry sees integral = roll only
        let out = engine.tick(sample(0.8, 0.0));
        let expected = (0.8 - 0.421) / 0.4638;
        assert_relative_eq!(out.get(ActuatorChannel::Right), expected, epsilon = 1e-5);
    }

    #[test]
    fn pid_maps_thrust_onto_one_channel() {
        let mut engine = ControlLaw::new();
        engine.handle_command(&cmd(Opcode::SetPidCoeffs, 1.0, 0.0, 0.0));
        engine.set_mode(DucklingMode::Pid);

        let out = engine.tick(sample(0.8, 0.0));
        assert_relative_eq!(
            out.get(ActuatorChannel::Right),
            (0.8 - 0.421) / 0.4638,
            epsilon = 1e-5
        );
        assert_eq!(out.get(ActuatorChannel::Left), MIN_CONTROL);

        let out = engine.tick(sample(-0.8, 0.0));
        assert_relative_eq!(
            out.get(ActuatorChannel::Left),
            (0.8 - 0.421) / 0.4638,
            epsilon = 1e-5
        );
        assert_eq!(out.get(ActuatorChannel::Right), MIN_CONTROL);
    }

    #[test]
    fn pid_integral_is_unbounded_but_output_is_clamped() {
        let mut engine = ControlLaw::new();
        // Settle the anchor at zero so the long run is not re-zeroed
        engine.handle_command(&cmd(Opcode::SetAnchorRoll, 1.0, 0.0, 0.0));
        engine.tick(sample(0.0, 0.0));
        let _ = engine.take_status();

        engine.handle_command(&cmd(Opcode::SetPidCoeffs, 0.0, 1.0, 0.0));
        engine.set_mode(DucklingMode::Pid);

        for _ in 0..1000 {
            let out = engine.tick(sample(1.0, 0.0));
            assert!(out.in_bounds());
        }
        assert_eq!(engine.command().get(ActuatorChannel::Right), MAX_CONTROL);
    }

    #[test]
    fn impulse_self_terminates_after_length_ticks() {
        let mut engine = ControlLaw::new();
        engine.handle_command(&cmd(Opcode::SetImpParams, 20.0, 1.0, 0.0));
        engine.handle_command(&cmd(Opcode::SetMode, DucklingMode::Impulse as u8 as f32, 0.0, 0.0));

        for tick in 1..=19 {
            let out = engine.tick(sample(0.0, 0.0));
            assert_eq!(out.get(ActuatorChannel::Left), 1.0, "tick {tick}");
            assert_eq!(out.get(ActuatorChannel::Right), MIN_CONTROL);
            assert_eq!(engine.mode(), DucklingMode::Impulse);
        }

        // Tick 20: both channels idle, mode back to silence
        let out = engine.tick(sample(0.0, 0.0));
        assert_eq!(out, ActuatorCommand::idle(MIN_CONTROL));
        assert_eq!(engine.mode(), DucklingMode::Silence);

        // The step counter reset: a fresh impulse runs full length again
        engine.set_mode(DucklingMode::Impulse);
        let out = engine.tick(sample(0.0, 0.0));
        assert_eq!(out.get(ActuatorChannel::Left), 1.0);
    }

    #[test]
    fn sine_phase_stays_wrapped() {
        let mut engine = ControlLaw::new();
        engine.handle_command(&cmd(Opcode::SetSinParams, 0.8, 7.3, 0.0));
        engine.set_mode(DucklingMode::Sin);

        for _ in 0..5000 {
            let out = engine.tick(sample(0.0, 0.0));
            assert!(out.in_bounds());
            let phase = engine.sine.phase;
            assert!((0.0..TAU).contains(&phase), "phase = {phase}");
        }
    }

    #[test]
    fn sine_drives_alternating_channels() {
        let mut engine = ControlLaw::new();
        // 1 Hz at 100 Hz ticks: positive half-wave for 50 ticks
        engine.handle_command(&cmd(Opcode::SetSinParams, 1.0, 1.0, 0.0));
        engine.set_mode(DucklingMode::Sin);

        let quarter = engine.tick_n(25);
        assert!(quarter.get(ActuatorChannel::Right) > MIN_CONTROL);
        assert_eq!(quarter.get(ActuatorChannel::Left), MIN_CONTROL);

        let three_quarter = engine.tick_n(50);
        assert_eq!(three_quarter.get(ActuatorChannel::Right), MIN_CONTROL);
    }

    #[test]
    fn anchor_offset_applies_to_later_samples() {
        let mut engine = ControlLaw::new();
        engine.handle_command(&cmd(Opcode::SetAnchorRoll, 5.0, 0.0, 0.0));

        for _ in 0..5 {
            engine.tick(sample(0.2, 0.0));
        }
        let status = engine.take_status().expect("calibration status record");
        assert_relative_eq!(status.anchor, 0.2, epsilon = 1e-6);
        assert_relative_eq!(engine.anchor_value(), 0.2, epsilon = 1e-6);

        // A biased reading now controls as if level
        engine.handle_command(&cmd(Opcode::SetPidCoeffs, 1.0, 0.0, 0.0));
        engine.set_mode(DucklingMode::Pid);
        let out = engine.tick(sample(0.2, 0.0));
        // Zero thrust falls into the negative branch of the mapping
        assert_relative_eq!(
            out.get(ActuatorChannel::Left),
            -0.421 / 0.4638,
            epsilon = 1e-5
        );
        assert_eq!(out.get(ActuatorChannel::Right), MIN_CONTROL);
    }

    #[test]
    fn unknown_opcode_is_absorbed() {
        let mut engine = ControlLaw::new();
        engine.handle_command(&Command {
            opcode: 9999,
            param1: 3.0,
            param2: 0.0,
            param3: 0.0,
        });
        assert_eq!(engine.mode(), DucklingMode::Silence);
        assert_eq!(engine.command(), ActuatorCommand::idle(MIN_CONTROL));
    }

    #[test]
    fn unknown_mode_and_channel_are_absorbed() {
        let mut engine = ControlLaw::new();
        engine.handle_command(&cmd(Opcode::SetMode, 42.0, 0.0, 0.0));
        assert_eq!(engine.mode(), DucklingMode::Silence);

        engine.handle_command(&cmd(Opcode::SetPwm, 7.0, 0.5, 0.0));
        assert_eq!(engine.command(), ActuatorCommand::idle(MIN_CONTROL));
    }

    #[test]
    fn non_integral_indices_are_absorbed() {
        let mut engine = ControlLaw::new();
        engine.set_mode(DucklingMode::Manual);

        // A saturating cast would turn these into index 0
        engine.handle_command(&cmd(Opcode::SetMode, -1.0, 0.0, 0.0));
        assert_eq!(engine.mode(), DucklingMode::Manual);

        engine.handle_command(&cmd(Opcode::SetPwm, -1.0, 0.5, 0.0));
        engine.handle_command(&cmd(Opcode::SetPwm, 0.5, 0.5, 0.0));
        engine.handle_command(&cmd(Opcode::SetPwm, f32::NAN, 0.5, 0.0));
        assert_eq!(engine.command(), ActuatorCommand::idle(MIN_CONTROL));
    }

    #[test]
    fn manual_pwm_bypasses_clamping() {
        let mut engine = ControlLaw::new();
        engine.set_mode(DucklingMode::Manual);
        engine.handle_command(&cmd(Opcode::SetPwm, 1.0, 1.4, 0.0));

        // Manual mode performs no automatic writes on tick
        let out = engine.tick(sample(0.5, 0.5));
        assert_eq!(out.get(ActuatorChannel::Right), 1.4);
    }

    #[test]
    fn min_control_command_moves_the_idle_floor() {
        let mut engine = ControlLaw::new();
        engine.handle_command(&cmd(Opcode::SetMinControl, -0.6, 0.0, 0.0));

        let out = engine.tick(sample(0.0, 0.0));
        assert_eq!(out, ActuatorCommand::idle(-0.6));
    }

    #[test]
    fn degenerate_idle_floor_is_rejected() {
        let mut engine = ControlLaw::new();
        engine.handle_command(&cmd(Opcode::SetMinControl, MAX_CONTROL, 0.0, 0.0));
        engine.handle_command(&cmd(Opcode::SetMinControl, f32::NAN, 0.0, 0.0));
        engine.set_mode(DucklingMode::TwoStage);

        // A floor at the ceiling would zero the duty span and turn the
        // percentage conversion into 0/0
        let out = engine.tick(sample(0.3, 0.1));
        assert!(out.0.iter().all(|v| v.is_finite()));
        assert!(out.in_bounds());

        engine.set_mode(DucklingMode::Silence);
        let out = engine.tick(sample(0.0, 0.0));
        assert_eq!(out, ActuatorCommand::idle(MIN_CONTROL));
    }

    #[test]
    fn extreme_sine_frequency_still_ticks() {
        let mut engine = ControlLaw::new();
        engine.handle_command(&cmd(Opcode::SetSinParams, 1.0, 1.0e10, 0.0));
        engine.set_mode(DucklingMode::Sin);

        // One tick advances the phase by ~6.3e8 rad, far past the point
        // where subtracting TAU makes progress in f32
        for _ in 0..10 {
            let out = engine.tick(sample(0.0, 0.0));
            assert!(out.in_bounds());
            assert!((0.0..TAU).contains(&engine.sine.phase));
        }
    }

    #[test]
    fn gain_change_emits_a_status_record() {
        let mut engine = ControlLaw::new();
        assert!(engine.take_status().is_none());

        engine.handle_command(&cmd(Opcode::SetPidCoeffs, 2.0, 0.5, 0.25));
        let status = engine.take_status().expect("status record");
        assert_eq!((status.kp, status.ki, status.kd), (2.0, 0.5, 0.25));

        // Taken exactly once
        assert!(engine.take_status().is_none());
    }

    #[test]
    fn two_stage_tick_is_finite_for_degenerate_input() {
        let mut engine = ControlLaw::new();
        engine.set_mode(DucklingMode::TwoStage);

        let out = engine.tick(sample(0.0, 0.0));
        assert!(out.in_bounds());
        let out = engine.tick(sample(0.3, 0.0));
        assert!(out.in_bounds());
    }

    impl ControlLaw {
        /// Run `n` ticks of a zero attitude, returning the last command.
        fn tick_n(&mut self, n: usize) -> ActuatorCommand {
            let mut out = self.command();
            for _ in 0..n {
                out = self.tick(sample(0.0, 0.0));
            }
            out
        }
    }
}
