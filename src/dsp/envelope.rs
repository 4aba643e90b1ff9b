//! Sample-accurate ADSR envelope state machine.

/// Gate values at or above this are note-on.
pub const GATE_THRESHOLD: f32 = 0.5;

/// Envelope stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Attack,
    Decay,
    Sustain,
    Release,
}

/// Envelope shape: stage durations in seconds and the sustain level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AdsrParams {
    pub attack: f64,
    pub decay: f64,
    pub sustain: f64,
    pub release: f64,
}

impl AdsrParams {
    pub fn new(attack: f64, decay: f64, sustain: f64, release: f64) -> Self {
        Self {
            attack,
            decay,
            sustain,
            release,
        }
    }
}

impl Default for AdsrParams {
    fn default() -> Self {
        Self::new(0.01, 0.1, 0.5, 0.2)
    }
}

/// Per-sample increments derived from [`AdsrParams`] for one block.
///
/// Every duration is floored at one sample, so zero or negative times give an
/// immediate (single-sample) transition rather than a division by zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AdsrRates {
    attack_delta: f64,
    decay_delta: f64,
    sustain: f64,
    release_samples: f64,
}

impl AdsrRates {
    pub fn new(params: &AdsrParams, sample_rate: u32) -> Self {
        let rate = sample_rate as f64;
        let sustain = params.sustain.max(0.0).min(1.0);
        Self {
            attack_delta: 1.0 / (params.attack * rate).max(1.0),
            decay_delta: -(1.0 - sustain) / (params.decay * rate).max(1.0),
            sustain,
            release_samples: (params.release * rate).max(1.0),
        }
    }
}

/// Persistent envelope state. Starts at rest: `Release` stage, value 0.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AdsrState {
    stage: Stage,
    value: f64,
    release_delta: f64,
}

impl Default for AdsrState {
    fn default() -> Self {
        Self {
            stage: Stage::Release,
            value: 0.0,
            release_delta: 0.0,
        }
    }
}

impl AdsrState {
    #[inline]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Current level, always in `[0, 1]`.
    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Advance by one sample and return the new level.
    ///
    /// A rising gate restarts the attack from the current level (no reset to
    /// zero). A falling gate computes the release slope from the current level,
    /// so release always lasts `release` seconds whatever level it starts from.
    #[inline]
    pub fn step(self, gate: f32, rates: &AdsrRates) -> (Self, f32) {
        let Self {
            mut stage,
            mut value,
            mut release_delta,
        } = self;

        if gate >= GATE_THRESHOLD {
            if stage == Stage::Release {
                stage = Stage::Attack;
            }
        } else if stage != Stage::Release {
            stage = Stage::Release;
            release_delta = -value / rates.release_samples;
        }

        match stage {
            Stage::Attack => {
                value += rates.attack_delta;
                if value >= 1.0 {
                    value = 1.0;
                    stage = Stage::Decay;
                }
            }
            Stage::Decay => {
                value += rates.decay_delta;
                if value <= rates.sustain {
                    value = rates.sustain;
                    stage = Stage::Sustain;
                }
            }
            Stage::Sustain => {}
            Stage::Release => {
                if value > 0.0 {
                    value += release_delta;
                    if value < 0.0 {
                        value = 0.0;
                    }
                }
            }
        }

        debug_assert!((0.0..=1.0).contains(&value));
        let next = Self {
            stage,
            value,
            release_delta,
        };
        (next, value as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RATE: u32 = 1_000;

    fn hold(state: &mut AdsrState, gate: f32, rates: &AdsrRates, samples: usize) -> Vec<f32> {
        (0..samples)
            .map(|_| {
                let (next, out) = state.step(gate, rates);
                *state = next;
                out
            })
            .collect()
    }

    #[test]
    fn starts_at_rest() {
        let state = AdsrState::default();
        assert_eq!(state.stage(), Stage::Release);
        assert_eq!(state.value(), 0.0);

        let rates = AdsrRates::new(&AdsrParams::default(), RATE);
        let (state, out) = state.step(0.0, &rates);
        assert_eq!(out, 0.0);
        assert_eq!(state.stage(), Stage::Release);
    }

    #[test]
    fn gate_held_reaches_sustain() {
        let params = AdsrParams::new(0.01, 0.1, 0.5, 0.2);
        let rates = AdsrRates::new(&params, RATE);
        let mut state = AdsrState::default();

        let out = hold(&mut state, 1.0, &rates, 10);
        assert!(out.windows(2).all(|w| w[1] > w[0]));

        hold(&mut state, 1.0, &rates, 1);
        assert_eq!(state.stage(), Stage::Decay);
        assert_eq!(state.value(), 1.0);

        hold(&mut state, 1.0, &rates, 101);
        assert_eq!(state.stage(), Stage::Sustain);
        assert_eq!(state.value(), 0.5);

        hold(&mut state, 1.0, &rates, 500);
        assert_eq!(state.value(), 0.5);
    }

    #[test]
    fn release_length_is_independent_of_level() {
        let params = AdsrParams::new(0.1, 0.1, 0.8, 0.2);
        let rates = AdsrRates::new(&params, RATE);

        for attack_samples in [5, 30, 77] {
            let mut state = AdsrState::default();
            hold(&mut state, 1.0, &rates, attack_samples);
            let level = state.value();
            assert!(level > 0.0 && level < 1.0);

            let out = hold(&mut state, 0.0, &rates, 200);
            assert_eq!(state.stage(), Stage::Release);
            assert!(out[198] > 0.0, "released early from {}", level);
            assert!(out[199].abs() < 1e-9, "still sounding from {}", level);

            hold(&mut state, 0.0, &rates, 1);
            assert_eq!(state.value(), 0.0);
        }
    }

    #[test]
    fn retrigger_continues_from_current_level() {
        let params = AdsrParams::new(0.1, 0.1, 0.5, 0.1);
        let rates = AdsrRates::new(&params, RATE);
        let mut state = AdsrState::default();

        hold(&mut state, 1.0, &rates, 40);
        hold(&mut state, 0.0, &rates, 50);
        let released_to = state.value();
        assert!((released_to - 0.2).abs() < 1e-9);

        let out = hold(&mut state, 1.0, &rates, 1);
        assert_eq!(state.stage(), Stage::Attack);
        assert!((out[0] as f64 - (released_to + 0.01)).abs() < 1e-6);

        // A second release recomputes its slope from the new level.
        hold(&mut state, 1.0, &rates, 9);
        let level = state.value();
        let out = hold(&mut state, 0.0, &rates, 100);
        assert!((out[0] as f64 - (level - level / 100.0)).abs() < 1e-6);
        assert!(out[98] > 0.0);
        assert!(out[99].abs() < 1e-9);
    }

    #[test]
    fn zero_times_take_one_sample() {
        let params = AdsrParams::new(0.0, 0.0, 0.25, 0.0);
        let rates = AdsrRates::new(&params, RATE);
        let mut state = AdsrState::default();

        assert_eq!(hold(&mut state, 1.0, &rates, 3), vec![1.0, 0.25, 0.25]);
        assert_eq!(state.stage(), Stage::Sustain);
        assert_eq!(hold(&mut state, 0.0, &rates, 2), vec![0.0, 0.0]);
    }

    #[test]
    fn sustain_level_is_clamped() {
        let rates = AdsrRates::new(&AdsrParams::new(0.0, 0.01, 4.0, 0.0), RATE);
        let mut state = AdsrState::default();
        hold(&mut state, 1.0, &rates, 20);
        assert_eq!(state.value(), 1.0);

        let rates = AdsrRates::new(&AdsrParams::new(0.0, 0.01, -1.0, 0.0), RATE);
        let mut state = AdsrState::default();
        hold(&mut state, 1.0, &rates, 20);
        assert_eq!(state.stage(), Stage::Sustain);
        assert_eq!(state.value(), 0.0);
    }
}
