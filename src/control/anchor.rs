//! Anchor zero-calibration: averages the first `sample_count` roll
//! readings into an offset that compensates mechanical and sensor bias,
//! subtracted from every subsequent roll measurement.

/// Routine to learn the roll zero-offset by averaging.
#[derive(Debug, Clone, Copy)]
pub struct AnchorCalibrator {
    roll_sum: f32,
    sample_index: u32,
    sample_count: u32,
    value: f32,
    set: bool,
}

impl AnchorCalibrator {
    pub const fn new(sample_count: u32) -> Self {
        Self {
            roll_sum: 0.0,
            sample_index: 0,
            sample_count,
            value: 0.0,
            set: false,
        }
    }

    /// Restart accumulation with a new sample count. Clears the done
    /// flag, the previous anchor stops applying on the next completion.
    pub fn restart(&mut self, sample_count: u32) {
        self.roll_sum = 0.0;
        self.sample_index = 0;
        self.sample_count = sample_count;
        self.set = false;
    }

    /// Feed one raw roll sample. Returns `true` on the tick the
    /// calibration completes.
    pub fn collect(&mut self, roll: f32) -> bool {
        if self.set {
            return false;
        }

        self.roll_sum += roll;
        self.sample_index += 1;

        if self.sample_index >= self.sample_count {
            self.value = self.roll_sum / self.sample_count.max(1) as f32;
            self.set = true;
            return true;
        }
        false
    }

    pub fn is_done(&self) -> bool {
        self.set
    }

    /// The learned offset, 0.0 until calibration has completed.
    pub fn value(&self) -> f32 {
        if self.set {
            self.value
        } else {
            0.0
        }
    }

    /// Subtract the anchor from a raw roll measurement.
    pub fn correct(&self, roll: f32) -> f32 {
        roll - self.value()
    }
}
