//! Pulling interleaved audio out of a graph

use crate::error::GraphError;
use crate::graph::Graph;
use crate::stream::{StreamId, BLOCK_SIZE};

/// Drives a [`Graph`] from a device callback.
///
/// Device callbacks ask for buffers of arbitrary length; the renderer ticks
/// the graph exactly once per [`BLOCK_SIZE`] frames and copies the selected
/// output streams into the interleaved buffer. Output channel `ch` reads
/// `outputs[ch]`, and channels past the last output repeat it (a single mono
/// output plays on every channel).
pub struct Renderer {
    graph: Graph,
    outputs: Vec<StreamId>,
    /// Next frame of the current block to copy out; 0 means a tick is due.
    cursor: usize,
}

impl Renderer {
    /// Wrap `graph`, playing the streams in `outputs`.
    ///
    /// With no outputs the renderer still ticks the graph but plays silence.
    pub fn new(graph: Graph, outputs: &[StreamId]) -> Result<Self, GraphError> {
        for &id in outputs {
            graph.stream(id)?;
        }
        Ok(Self {
            graph,
            outputs: outputs.to_vec(),
            cursor: 0,
        })
    }

    #[inline]
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Mutable access to the graph, e.g. to rebuild the patch.
    ///
    /// Output handles invalidated by a rebuild play silence until replaced
    /// with [`set_outputs`](Self::set_outputs).
    #[inline]
    pub fn graph_mut(&mut self) -> &mut Graph {
        &mut self.graph
    }

    pub fn set_outputs(&mut self, outputs: &[StreamId]) -> Result<(), GraphError> {
        for &id in outputs {
            self.graph.stream(id)?;
        }
        self.outputs = outputs.to_vec();
        Ok(())
    }

    pub fn into_graph(self) -> Graph {
        self.graph
    }

    /// Fill an interleaved buffer of `channels` channels.
    ///
    /// A trailing partial frame is left untouched.
    pub fn fill_interleaved(&mut self, out: &mut [f32], channels: usize) {
        let channels = channels.max(1);
        for frame in out.chunks_exact_mut(channels) {
            if self.cursor == 0 {
                self.graph.tick();
            }

            for (ch, sample) in frame.iter_mut().enumerate() {
                *sample = match self.outputs.len() {
                    0 => 0.0,
                    n => self
                        .graph
                        .output(self.outputs[ch.min(n - 1)])
                        .map_or(0.0, |stream| stream[self.cursor]),
                };
            }

            self.cursor = (self.cursor + 1) % BLOCK_SIZE;
        }
    }

    /// Render `blocks` whole blocks into a new interleaved buffer.
    pub fn render_blocks(&mut self, blocks: usize, channels: usize) -> Vec<f32> {
        let mut out = vec![0.0; blocks * BLOCK_SIZE * channels.max(1)];
        self.fill_interleaved(&mut out, channels);
        out
    }
}
