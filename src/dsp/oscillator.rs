//! Phase-accumulated triangle/pulse oscillator.

/// Phase accumulator of a variable-slope triangle oscillator.
///
/// The phase is kept in `f64` so long runs at low frequencies don't drift.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TrianglePhase {
    phase: f64,
}

impl TrianglePhase {
    /// Current phase, always in `[0, 1)`.
    #[inline]
    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Advance by one sample and return the output in `[-1, 1]`.
    ///
    /// `duty` (clamped to `0..=1`) is the fraction of the period spent rising:
    /// 0.5 is a symmetric triangle, 0 and 1 are falling and rising saws.
    /// Negative frequencies run the phase backwards.
    #[inline]
    pub fn step(self, frequency: f32, duty: f32, sample_rate: u32) -> (Self, f32) {
        let mut phase = (self.phase + frequency as f64 / sample_rate as f64).rem_euclid(1.0);
        // rem_euclid of a tiny negative value rounds up to exactly 1.0
        if !(phase < 1.0) {
            phase = 0.0;
        }

        let d = (duty as f64).max(0.0).min(1.0);
        let out = if phase < d {
            phase / d * 2.0 - 1.0
        } else {
            (1.0 - phase) / (1.0 - d) * 2.0 - 1.0
        };

        (Self { phase }, out as f32)
    }
}
