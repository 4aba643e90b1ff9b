//! Core node trait and context types.

use core::fmt;

use crate::nodes::{Add, Adsr, Highpass, Lowpass, Multiply, Parameter, Triangle};
use crate::stream::{Stream, StreamId};

/// Information available during audio processing.
///
/// Passed to every [`AudioNode::process`] call. Both values are fixed when the
/// graph is created.
#[derive(Clone, Copy, Debug)]
pub struct ProcessContext {
    /// Sample rate of the graph in Hz (e.g., 44100, 48000)
    pub sample_rate: u32,
    /// Number of samples per block (always [`BLOCK_SIZE`](crate::BLOCK_SIZE))
    pub buffer_size: usize,
}

/// Read-only view of the streams produced earlier in the current tick.
///
/// A node only ever sees the outputs of nodes registered before it, so every
/// stream it can read has already been written this tick.
#[derive(Clone, Copy)]
pub struct Inputs<'a> {
    streams: &'a [Stream],
}

impl<'a> Inputs<'a> {
    pub(crate) fn new(streams: &'a [Stream]) -> Self {
        Self { streams }
    }

    /// The current block of `id`.
    ///
    /// `id` must have been validated against this graph when the reading node
    /// was registered.
    #[inline]
    pub fn get(&self, id: StreamId) -> &'a Stream {
        &self.streams[id.index()]
    }

    /// Number of streams visible to the node.
    #[inline]
    pub fn len(&self) -> usize {
        self.streams.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }
}

/// The capabilities every scheduled node provides.
///
/// `process` runs once per tick and must fully overwrite `output`. It must not
/// block, allocate or fail: anything that can go wrong is checked when the
/// node is registered.
///
/// Nodes are moved into the device callback along with their graph, so every
/// implementation must be `Send`. [`Node`] gets that from its variants.
#[enum_delegate::register]
pub trait AudioNode {
    /// Produce one block into `output`.
    fn process(&mut self, ctx: &ProcessContext, inputs: Inputs<'_>, output: &mut Stream);

    /// Free non-memory resources before the node is dropped on teardown.
    fn release(&mut self) {}

    /// Streams this node reads.
    fn inputs(&self) -> Vec<StreamId>;

    fn kind(&self) -> NodeKind;
}

/// Every primitive the scheduler can run.
#[enum_delegate::implement(AudioNode)]
pub enum Node {
    Parameter(Parameter),
    Add(Add),
    Multiply(Multiply),
    Lowpass(Lowpass),
    Highpass(Highpass),
    Triangle(Triangle),
    Adsr(Adsr),
}

/// Which primitive a [`Node`] is, without its state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Parameter,
    Add,
    Multiply,
    Lowpass,
    Highpass,
    Triangle,
    Adsr,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Parameter => "parameter",
            NodeKind::Add => "add",
            NodeKind::Multiply => "multiply",
            NodeKind::Lowpass => "lowpass",
            NodeKind::Highpass => "highpass",
            NodeKind::Triangle => "triangle",
            NodeKind::Adsr => "adsr",
        };
        f.write_str(name)
    }
}
