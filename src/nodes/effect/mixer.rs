//! N-ary mixers: sum and product of streams

use crate::node::{AudioNode, Inputs, NodeKind, ProcessContext};
use crate::stream::{Stream, StreamId};

/// Sums any number of inputs sample by sample.
///
/// With no inputs the output is silence.
pub struct Add {
    inputs: Vec<StreamId>,
}

impl Add {
    pub fn new(inputs: &[StreamId]) -> Self {
        Self {
            inputs: inputs.to_vec(),
        }
    }
}

impl AudioNode for Add {
    fn process(&mut self, _ctx: &ProcessContext, inputs: Inputs<'_>, output: &mut Stream) {
        output.clear();
        for &id in &self.inputs {
            let input = inputs.get(id);
            for (out_sample, in_sample) in output.iter_mut().zip(input.iter()) {
                *out_sample += *in_sample;
            }
        }
    }

    fn inputs(&self) -> Vec<StreamId> {
        self.inputs.clone()
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Add
    }
}

/// Multiplies any number of inputs sample by sample (VCA, ring modulation).
///
/// With no inputs the output is all ones.
pub struct Multiply {
    inputs: Vec<StreamId>,
}

impl Multiply {
    pub fn new(inputs: &[StreamId]) -> Self {
        Self {
            inputs: inputs.to_vec(),
        }
    }
}

impl AudioNode for Multiply {
    fn process(&mut self, _ctx: &ProcessContext, inputs: Inputs<'_>, output: &mut Stream) {
        output.fill(1.0);
        for &id in &self.inputs {
            let input = inputs.get(id);
            for (out_sample, in_sample) in output.iter_mut().zip(input.iter()) {
                *out_sample *= *in_sample;
            }
        }
    }

    fn inputs(&self) -> Vec<StreamId> {
        self.inputs.clone()
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Multiply
    }
}
