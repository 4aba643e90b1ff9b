//! Triangle/pulse oscillator

use itertools::izip;

use crate::dsp::TrianglePhase;
use crate::node::{AudioNode, Inputs, NodeKind, ProcessContext};
use crate::stream::{Stream, StreamId};

/// A variable-slope triangle oscillator (mono source).
///
/// Reads its frequency in Hz and its duty cycle per sample, so both can be
/// modulated at audio rate. Output is in `[-1, 1]`.
pub struct Triangle {
    frequency: StreamId,
    duty: StreamId,
    osc: TrianglePhase,
}

impl Triangle {
    pub fn new(frequency: StreamId, duty: StreamId) -> Self {
        Self {
            frequency,
            duty,
            osc: TrianglePhase::default(),
        }
    }

    /// Current phase in `[0, 1)`.
    #[inline]
    pub fn phase(&self) -> f64 {
        self.osc.phase()
    }
}

impl AudioNode for Triangle {
    fn process(&mut self, ctx: &ProcessContext, inputs: Inputs<'_>, output: &mut Stream) {
        let frequency = inputs.get(self.frequency);
        let duty = inputs.get(self.duty);

        let mut osc = self.osc;
        for (out, &f, &d) in izip!(output.iter_mut(), frequency.iter(), duty.iter()) {
            let (next, sample) = osc.step(f, d, ctx.sample_rate);
            osc = next;
            *out = sample;
        }
        self.osc = osc;
    }

    fn inputs(&self) -> Vec<StreamId> {
        vec![self.frequency, self.duty]
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Triangle
    }
}
