//! Scalar-to-stream broadcaster

use rtrb::Consumer;

use crate::control::{self, Control, DEFAULT_QUEUE_SIZE};
use crate::node::{AudioNode, Inputs, NodeKind, ProcessContext};
use crate::stream::{Stream, StreamId};

/// Repeats one scalar value across a whole block.
///
/// The value can be changed from another thread through the [`Control`]
/// returned by [`Parameter::new`]; the newest value sent before a tick is the
/// one broadcast for that tick.
pub struct Parameter {
    value: f32,
    receiver: Option<Consumer<f32>>,
}

impl Parameter {
    /// A parameter whose value never changes.
    pub fn constant(value: f32) -> Self {
        Self {
            value,
            receiver: None,
        }
    }

    /// A parameter starting at `initial`, plus the handle that updates it.
    pub fn new(initial: f32) -> (Self, Control<f32>) {
        Self::with_queue_size(initial, DEFAULT_QUEUE_SIZE)
    }

    pub fn with_queue_size(initial: f32, queue_size: usize) -> (Self, Control<f32>) {
        let (control, receiver) = control::channel(queue_size);
        let node = Self {
            value: initial,
            receiver: Some(receiver),
        };
        (node, control)
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }
}

impl AudioNode for Parameter {
    fn process(&mut self, _ctx: &ProcessContext, _inputs: Inputs<'_>, output: &mut Stream) {
        if let Some(latest) = control::drain(&mut self.receiver).last() {
            self.value = latest;
        }
        output.fill(self.value);
    }

    fn release(&mut self) {
        self.receiver = None;
    }

    fn inputs(&self) -> Vec<StreamId> {
        Vec::new()
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Parameter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BLOCK_SIZE;

    fn ctx() -> ProcessContext {
        ProcessContext {
            sample_rate: 48_000,
            buffer_size: BLOCK_SIZE,
        }
    }

    #[test]
    fn constant_fills_block() {
        let mut node = Parameter::constant(0.75);
        let mut out = Stream::new();
        node.process(&ctx(), Inputs::new(&[]), &mut out);
        assert!(out.iter().all(|&s| s == 0.75));
    }

    #[test]
    fn latest_message_wins() {
        let (mut node, mut control) = Parameter::new(1.0);
        let mut out = Stream::new();

        control.send(2.0).ok();
        control.send(3.0).ok();
        node.process(&ctx(), Inputs::new(&[]), &mut out);
        assert!(out.iter().all(|&s| s == 3.0));

        // no news: keeps broadcasting the last value
        node.process(&ctx(), Inputs::new(&[]), &mut out);
        assert_eq!(node.value(), 3.0);
        assert!(out.iter().all(|&s| s == 3.0));
    }

    #[test]
    fn release_detaches_control() {
        let (mut node, control) = Parameter::new(0.0);
        node.release();
        assert!(control.is_detached());
    }
}
