//! Gate-driven ADSR envelope

use rtrb::Consumer;

use crate::control::{self, Control, DEFAULT_QUEUE_SIZE};
use crate::dsp::{AdsrParams, AdsrRates, AdsrState};
use crate::node::{AudioNode, Inputs, NodeKind, ProcessContext};
use crate::stream::{Stream, StreamId};

/// Messages to reshape an [`Adsr`] between blocks.
#[derive(Clone, Copy, Debug)]
pub enum AdsrMessage {
    /// Attack time in seconds
    SetAttack(f64),
    /// Decay time in seconds
    SetDecay(f64),
    /// Sustain level (0..=1)
    SetSustain(f64),
    /// Release time in seconds
    SetRelease(f64),
    SetParams(AdsrParams),
}

/// Attack/decay/sustain/release envelope following a gate stream.
///
/// The gate is read per sample (`>= 0.5` is note-on), so stage changes land on
/// the exact sample the gate moves. The shape parameters are constant over a
/// block; updates sent through the control handle apply from the next block.
pub struct Adsr {
    gate: StreamId,
    params: AdsrParams,
    state: AdsrState,
    receiver: Option<Consumer<AdsrMessage>>,
}

impl Adsr {
    pub fn new(gate: StreamId, params: AdsrParams) -> Self {
        Self {
            gate,
            params,
            state: AdsrState::default(),
            receiver: None,
        }
    }

    /// An envelope whose shape can be changed while the graph runs.
    pub fn with_control(gate: StreamId, params: AdsrParams) -> (Self, Control<AdsrMessage>) {
        let (control, receiver) = control::channel(DEFAULT_QUEUE_SIZE);
        let mut node = Self::new(gate, params);
        node.receiver = Some(receiver);
        (node, control)
    }

    #[inline]
    pub fn params(&self) -> AdsrParams {
        self.params
    }

    /// Stage and level after the last processed sample.
    #[inline]
    pub fn state(&self) -> AdsrState {
        self.state
    }

}

fn apply(params: &mut AdsrParams, msg: AdsrMessage) {
    match msg {
        AdsrMessage::SetAttack(t) => params.attack = t,
        AdsrMessage::SetDecay(t) => params.decay = t,
        AdsrMessage::SetSustain(level) => params.sustain = level,
        AdsrMessage::SetRelease(t) => params.release = t,
        AdsrMessage::SetParams(new) => *params = new,
    }
}

impl AudioNode for Adsr {
    fn process(&mut self, ctx: &ProcessContext, inputs: Inputs<'_>, output: &mut Stream) {
        for msg in control::drain(&mut self.receiver) {
            apply(&mut self.params, msg);
        }

        let rates = AdsrRates::new(&self.params, ctx.sample_rate);
        let gate = inputs.get(self.gate);

        let mut state = self.state;
        for (out, &g) in output.iter_mut().zip(gate.iter()) {
            let (next, level) = state.step(g, &rates);
            state = next;
            *out = level;
        }
        self.state = state;
    }

    fn release(&mut self) {
        self.receiver = None;
    }

    fn inputs(&self) -> Vec<StreamId> {
        vec![self.gate]
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Adsr
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;
    use crate::node::Node;

    fn envelope(graph: &Graph, id: StreamId) -> &Adsr {
        match graph.node(id).unwrap() {
            Node::Adsr(env) => env,
            _ => unreachable!(),
        }
    }

    #[test]
    fn queued_messages_apply_in_order() {
        let mut graph = Graph::new(1_000);
        let gate = graph.constant(0.0).unwrap();
        let (env, mut shape) = graph.adsr_with_control(gate, AdsrParams::default()).unwrap();

        shape.send(AdsrMessage::SetSustain(0.9)).unwrap();
        shape.send(AdsrMessage::SetParams(AdsrParams::new(0.2, 0.3, 0.4, 0.5))).unwrap();
        shape.send(AdsrMessage::SetRelease(0.05)).unwrap();
        graph.tick();

        assert_eq!(envelope(&graph, env).params(), AdsrParams::new(0.2, 0.3, 0.4, 0.05));
        assert_eq!(shape.slots(), DEFAULT_QUEUE_SIZE);
    }

    #[test]
    fn release_drops_the_queue() {
        let gate = Graph::new(1_000).constant(1.0).unwrap();
        let (mut node, shape) = Adsr::with_control(gate, AdsrParams::default());
        node.release();
        assert!(shape.is_detached());
    }
}
