//! Audio graph - owns nodes, their output streams and the schedule

use core::sync::atomic::{AtomicU32, Ordering};

use petgraph::graph::{DiGraph, NodeIndex};
use tracing::{debug, info, warn};

use crate::control::Control;
use crate::dsp::AdsrParams;
use crate::error::{GraphError, HandleFault};
use crate::node::{AudioNode, Inputs, Node, NodeKind, ProcessContext};
use crate::nodes::{Add, Adsr, AdsrMessage, Highpass, Lowpass, Multiply, Parameter, Triangle};
use crate::stream::{Stream, StreamId, BLOCK_SIZE};

/// Nodes a graph accepts unless configured otherwise.
pub const DEFAULT_CAPACITY: usize = 512;

static NEXT_GRAPH_ID: AtomicU32 = AtomicU32::new(0);

// A graph is handed to the audio thread whole.
const _: fn() = || {
    fn assert_send<T: Send>() {}
    assert_send::<Graph>();
};

/// An ordered schedule of nodes at a fixed sample rate.
///
/// Nodes run in the order they were added, once per [`tick`](Self::tick).
/// There is no dependency sorting: a node can only be given streams that were
/// produced by nodes added *before* it, which is checked when it is added. As a
/// result every input a node reads has already been written in the same tick.
///
/// # Building a Patch
///
/// Every primitive has a factory method that registers the node and returns the
/// [`StreamId`] of its output, to be passed on to later nodes:
///
/// ```
/// use strom::{AdsrParams, Graph};
///
/// let mut graph = Graph::new(48_000);
/// let (gate, mut key) = graph.parameter(0.0)?;
/// let freq = graph.constant(220.0)?;
/// let duty = graph.constant(0.5)?;
///
/// let osc = graph.triangle(freq, duty)?;
/// let env = graph.adsr(gate, AdsrParams::new(0.01, 0.1, 0.5, 0.2))?;
/// let voice = graph.product(&[osc, env])?;
///
/// key.send(1.0).ok();
/// graph.tick();
/// assert!(graph.stream(voice)?.peak() <= 1.0);
/// # Ok::<(), strom::GraphError>(())
/// ```
///
/// # Rebuilding
///
/// [`teardown`](Self::teardown) releases every node and empties the schedule.
/// Handles minted before the teardown are rejected afterwards.
pub struct Graph {
    nodes: Vec<Node>,
    streams: Vec<Stream>,
    ctx: ProcessContext,
    capacity: usize,

    id: u32,
    generation: u32,
}

impl Graph {
    /// Create an empty graph running at `sample_rate` Hz.
    pub fn new(sample_rate: u32) -> Self {
        Self {
            nodes: Vec::new(),
            streams: Vec::new(),
            ctx: ProcessContext {
                sample_rate,
                buffer_size: BLOCK_SIZE,
            },
            capacity: DEFAULT_CAPACITY,
            id: NEXT_GRAPH_ID.fetch_add(1, Ordering::Relaxed),
            generation: 0,
        }
    }

    /// Set the maximum number of nodes (builder pattern).
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    #[inline]
    pub fn sample_rate(&self) -> u32 {
        self.ctx.sample_rate
    }

    #[inline]
    pub fn block_size(&self) -> usize {
        self.ctx.buffer_size
    }

    #[inline]
    pub fn context(&self) -> ProcessContext {
        self.ctx
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of scheduled nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Append a node to the schedule and allocate its output stream.
    ///
    /// Fails without changing the graph if the graph is full or if any of the
    /// node's inputs is not an earlier stream of this graph.
    pub fn add(&mut self, node: Node) -> Result<StreamId, GraphError> {
        let index = self.nodes.len();
        if index >= self.capacity {
            warn!(kind = %node.kind(), capacity = self.capacity, "graph full, node refused");
            return Err(GraphError::CapacityExceeded {
                capacity: self.capacity,
            });
        }

        for handle in node.inputs() {
            if let Err(fault) = self.check(handle, index) {
                warn!(kind = %node.kind(), %handle, %fault, "invalid input, node refused");
                return Err(GraphError::InvalidInputHandle { handle, fault });
            }
        }

        let id = StreamId {
            graph: self.id,
            generation: self.generation,
            index: index as u32,
        };
        debug!(kind = %node.kind(), index, "node registered");

        self.nodes.push(node);
        self.streams.push(Stream::new());
        Ok(id)
    }

    /// A stream holding `value` forever.
    pub fn constant(&mut self, value: f32) -> Result<StreamId, GraphError> {
        self.add(Node::Parameter(Parameter::constant(value)))
    }

    /// A stream broadcasting a value that can be changed through the returned
    /// handle.
    pub fn parameter(&mut self, initial: f32) -> Result<(StreamId, Control<f32>), GraphError> {
        let (node, control) = Parameter::new(initial);
        let id = self.add(Node::Parameter(node))?;
        Ok((id, control))
    }

    /// Sample-wise sum of `inputs` (silence when empty).
    pub fn sum(&mut self, inputs: &[StreamId]) -> Result<StreamId, GraphError> {
        self.add(Node::Add(Add::new(inputs)))
    }

    /// Sample-wise product of `inputs` (all ones when empty).
    pub fn product(&mut self, inputs: &[StreamId]) -> Result<StreamId, GraphError> {
        self.add(Node::Multiply(Multiply::new(inputs)))
    }

    /// One-pole lowpass of `input`; `cutoff` is a fraction of Nyquist.
    pub fn lowpass(&mut self, input: StreamId, cutoff: StreamId) -> Result<StreamId, GraphError> {
        self.add(Node::Lowpass(Lowpass::new(input, cutoff)))
    }

    /// One-pole highpass of `input`; `cutoff` is a fraction of Nyquist.
    pub fn highpass(&mut self, input: StreamId, cutoff: StreamId) -> Result<StreamId, GraphError> {
        self.add(Node::Highpass(Highpass::new(input, cutoff)))
    }

    /// Triangle/pulse oscillator; `frequency` in Hz, `duty` in `0..=1`.
    pub fn triangle(&mut self, frequency: StreamId, duty: StreamId) -> Result<StreamId, GraphError> {
        self.add(Node::Triangle(Triangle::new(frequency, duty)))
    }

    /// ADSR envelope following `gate`.
    pub fn adsr(&mut self, gate: StreamId, params: AdsrParams) -> Result<StreamId, GraphError> {
        self.add(Node::Adsr(Adsr::new(gate, params)))
    }

    /// ADSR envelope whose shape can be changed through the returned handle.
    pub fn adsr_with_control(
        &mut self,
        gate: StreamId,
        params: AdsrParams,
    ) -> Result<(StreamId, Control<AdsrMessage>), GraphError> {
        let (node, control) = Adsr::with_control(gate, params);
        let id = self.add(Node::Adsr(node))?;
        Ok((id, control))
    }

    /// Process one block: run every node once, in the order they were added.
    pub fn tick(&mut self) {
        let ctx = self.ctx;
        for (index, node) in self.nodes.iter_mut().enumerate() {
            let (done, rest) = self.streams.split_at_mut(index);
            if let Some(output) = rest.first_mut() {
                node.process(&ctx, Inputs::new(done), output);
            }
        }
    }

    /// Release every node and empty the schedule, ready for a rebuild.
    pub fn teardown(&mut self) {
        for node in self.nodes.iter_mut() {
            node.release();
        }
        info!(nodes = self.nodes.len(), generation = self.generation, "graph torn down");

        self.nodes.clear();
        self.streams.clear();
        self.generation = self.generation.wrapping_add(1);
    }

    /// The block most recently written to `id`.
    pub fn stream(&self, id: StreamId) -> Result<&Stream, GraphError> {
        let index = self.validate(id)?;
        Ok(&self.streams[index])
    }

    /// The node producing `id`.
    pub fn node(&self, id: StreamId) -> Result<&Node, GraphError> {
        let index = self.validate(id)?;
        Ok(&self.nodes[index])
    }

    /// Dependency graph of the current schedule.
    ///
    /// Node `i` of the returned graph is the `i`-th scheduled node; an edge
    /// `a -> b` means `b` reads the stream of `a`. Every edge points forward,
    /// so schedule order is always a valid topological order.
    pub fn topology(&self) -> DiGraph<NodeKind, ()> {
        let mut topo = DiGraph::with_capacity(self.nodes.len(), self.nodes.len());
        for node in &self.nodes {
            topo.add_node(node.kind());
        }
        for (reader, node) in self.nodes.iter().enumerate() {
            for input in node.inputs() {
                topo.add_edge(NodeIndex::new(input.index()), NodeIndex::new(reader), ());
            }
        }
        topo
    }

    /// Non-failing lookup for the render loop.
    #[inline]
    pub(crate) fn output(&self, id: StreamId) -> Option<&Stream> {
        self.check(id, self.nodes.len()).ok()?;
        self.streams.get(id.index())
    }

    fn validate(&self, handle: StreamId) -> Result<usize, GraphError> {
        self.check(handle, self.nodes.len())
            .map(|()| handle.index())
            .map_err(|fault| GraphError::InvalidInputHandle { handle, fault })
    }

    fn check(&self, handle: StreamId, limit: usize) -> Result<(), HandleFault> {
        if handle.graph != self.id {
            Err(HandleFault::ForeignGraph)
        } else if handle.generation != self.generation {
            Err(HandleFault::Stale)
        } else if handle.index() >= limit {
            Err(HandleFault::NotYetRegistered)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_carry_schedule_position() {
        let mut graph = Graph::new(48_000);
        let a = graph.constant(1.0).unwrap();
        let b = graph.constant(2.0).unwrap();
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.block_size(), BLOCK_SIZE);
    }

    #[test]
    fn refused_node_leaves_graph_unchanged() {
        let mut graph = Graph::new(48_000).with_capacity(1);
        graph.constant(1.0).unwrap();
        assert_eq!(
            graph.constant(2.0),
            Err(GraphError::CapacityExceeded { capacity: 1 })
        );
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.streams.len(), 1);
    }

    #[test]
    fn graph_moves_to_another_thread() {
        let mut graph = Graph::new(48_000);
        let (level, mut knob) = graph.parameter(0.0).unwrap();

        let graph = std::thread::spawn(move || {
            knob.send(0.5).unwrap();
            graph.tick();
            graph
        })
        .join()
        .unwrap();

        assert_eq!(graph.node(level).unwrap().kind(), NodeKind::Parameter);
        assert!(graph.stream(level).unwrap().iter().all(|&s| s == 0.5));
    }

    #[test]
    fn topology_edges_point_forward() {
        let mut graph = Graph::new(48_000);
        let x = graph.constant(1.0).unwrap();
        let c = graph.constant(0.5).unwrap();
        let lp = graph.lowpass(x, c).unwrap();
        graph.sum(&[x, lp]).unwrap();

        let topo = graph.topology();
        assert_eq!(topo.node_count(), 4);
        assert_eq!(topo.edge_count(), 4);
        assert_eq!(topo[NodeIndex::new(2)], NodeKind::Lowpass);
        for edge in topo.raw_edges() {
            assert!(edge.source() < edge.target());
        }
    }
}
