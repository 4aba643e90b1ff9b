//! One-pole lowpass and highpass filters

use itertools::izip;

use crate::dsp::OnePole;
use crate::node::{AudioNode, Inputs, NodeKind, ProcessContext};
use crate::stream::{Stream, StreamId};

/// First-order lowpass with a per-sample cutoff.
///
/// The cutoff stream is a fraction of Nyquist (`0..=1`, clamped); use
/// [`cutoff_from_hz`](crate::dsp::cutoff_from_hz) to convert from Hz.
pub struct Lowpass {
    input: StreamId,
    cutoff: StreamId,
    filter: OnePole,
}

impl Lowpass {
    pub fn new(input: StreamId, cutoff: StreamId) -> Self {
        Self {
            input,
            cutoff,
            filter: OnePole::default(),
        }
    }

    /// The previous output sample.
    #[inline]
    pub fn last_value(&self) -> f32 {
        self.filter.last_value
    }
}

impl AudioNode for Lowpass {
    fn process(&mut self, _ctx: &ProcessContext, inputs: Inputs<'_>, output: &mut Stream) {
        let input = inputs.get(self.input);
        let cutoff = inputs.get(self.cutoff);

        let mut filter = self.filter;
        for (out, &x, &c) in izip!(output.iter_mut(), input.iter(), cutoff.iter()) {
            let (next, low) = filter.step(x, c);
            filter = next;
            *out = low;
        }
        self.filter = filter;
    }

    fn inputs(&self) -> Vec<StreamId> {
        vec![self.input, self.cutoff]
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Lowpass
    }
}

/// First-order highpass: the input minus its one-pole lowpass.
///
/// For the same input and cutoff, `lowpass + highpass` reconstructs the input.
pub struct Highpass {
    input: StreamId,
    cutoff: StreamId,
    filter: OnePole,
}

impl Highpass {
    pub fn new(input: StreamId, cutoff: StreamId) -> Self {
        Self {
            input,
            cutoff,
            filter: OnePole::default(),
        }
    }

    /// The previous lowpassed sample (not the highpass output).
    #[inline]
    pub fn last_value(&self) -> f32 {
        self.filter.last_value
    }
}

impl AudioNode for Highpass {
    fn process(&mut self, _ctx: &ProcessContext, inputs: Inputs<'_>, output: &mut Stream) {
        let input = inputs.get(self.input);
        let cutoff = inputs.get(self.cutoff);

        let mut filter = self.filter;
        for (out, &x, &c) in izip!(output.iter_mut(), input.iter(), cutoff.iter()) {
            let (next, low) = filter.step(x, c);
            filter = next;
            *out = x - low;
        }
        self.filter = filter;
    }

    fn inputs(&self) -> Vec<StreamId> {
        vec![self.input, self.cutoff]
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Highpass
    }
}
