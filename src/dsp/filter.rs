//! One-pole filter math.

use core::f32::consts::PI;

/// Added and subtracted after every update to flush denormals to zero.
const DENORMAL_GUARD: f32 = 1e-20;

/// Convert a frequency in Hz to the normalized cutoff the filters read
/// (a fraction of Nyquist, 0..=1).
#[inline]
pub fn cutoff_from_hz(hz: f32, sample_rate: u32) -> f32 {
    hz / (sample_rate as f32 * 0.5)
}

/// Feedback coefficient of a one-pole lowpass for a normalized cutoff.
///
/// `cutoff` is clamped to `0..=1` (0 Hz to Nyquist). The coefficient is the
/// exact solution for a -3 dB point at the cutoff:
/// `a = -y + sqrt(y * (y + 2))` with `y = 1 - cos(wc)`.
/// It grows monotonically from 0 (frozen output) to `2 * sqrt(2) - 2` at
/// Nyquist, so the pole `1 - a` never leaves `[0.17, 1]`.
#[inline]
pub fn one_pole_coefficient(cutoff: f32) -> f32 {
    let wc = PI * cutoff.max(0.0).min(1.0);
    let y = 1.0 - wc.cos();
    -y + (y * (y + 2.0)).sqrt()
}

/// State of a one-pole lowpass: the previous output sample.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OnePole {
    pub last_value: f32,
}

impl OnePole {
    /// Advance by one sample and return the lowpassed value.
    ///
    /// The highpass output is `input - lowpass` for the same step.
    #[inline]
    pub fn step(self, input: f32, cutoff: f32) -> (Self, f32) {
        let alpha = one_pole_coefficient(cutoff);
        let mut last_value = self.last_value + alpha * (input - self.last_value);
        last_value = last_value + DENORMAL_GUARD - DENORMAL_GUARD;
        (Self { last_value }, last_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coefficient_endpoints() {
        assert_eq!(one_pole_coefficient(0.0), 0.0);
        assert_eq!(one_pole_coefficient(-3.0), 0.0);

        let nyquist = one_pole_coefficient(1.0);
        assert!((nyquist - (2.0 * 2f32.sqrt() - 2.0)).abs() < 1e-5);
        assert_eq!(one_pole_coefficient(7.0), nyquist);
    }

    #[test]
    fn coefficient_rises_with_cutoff() {
        let mut previous = 0.0;
        for i in 1..=100 {
            let alpha = one_pole_coefficient(i as f32 / 100.0);
            assert!(alpha > previous, "not monotonic at {}", i);
            assert!(alpha < 1.0);
            previous = alpha;
        }
    }

    #[test]
    fn zero_cutoff_freezes() {
        let mut state = OnePole { last_value: 0.3 };
        for input in [1.0, -1.0, 5.0, 0.0] {
            let (next, out) = state.step(input, 0.0);
            assert_eq!(out, 0.3);
            state = next;
        }
    }

    #[test]
    fn converges_on_dc() {
        let mut state = OnePole::default();
        for _ in 0..10_000 {
            state = state.step(1.0, 0.01).0;
        }
        assert!((state.last_value - 1.0).abs() < 1e-4);
    }

    #[test]
    fn tiny_tails_flush_to_zero() {
        let mut state = OnePole { last_value: 1e-30 };
        state = state.step(0.0, 0.5).0;
        assert_eq!(state.last_value, 0.0);
    }

    #[test]
    fn stays_bounded_at_nyquist() {
        let mut state = OnePole::default();
        for s in 0..4096 {
            let input = if s % 2 == 0 { 1.0 } else { -1.0 };
            let (next, out) = state.step(input, 1.0);
            assert!(out.abs() <= 1.0);
            state = next;
        }
    }

    #[test]
    fn hz_conversion() {
        assert_eq!(cutoff_from_hz(24_000.0, 48_000), 1.0);
        assert_eq!(cutoff_from_hz(6_000.0, 48_000), 0.25);
    }
}
