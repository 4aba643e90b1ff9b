//! Block buffers and the handles used to refer to them.

use core::fmt;
use core::ops::{Deref, DerefMut};

use dasp_graph::Buffer;

/// Number of samples in every [`Stream`] (the `dasp_graph` buffer length).
pub const BLOCK_SIZE: usize = 64;

/// One block of samples for one signal.
///
/// Every node owns exactly one output `Stream`, allocated when the node is
/// registered and overwritten in place on each tick. Audio and control signals
/// share the same representation.
#[derive(Clone, Default)]
pub struct Stream {
    buffer: Buffer,
}

impl Stream {
    /// A silent (all-zero) block.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set every sample to zero.
    #[inline]
    pub fn clear(&mut self) {
        self.fill(0.0);
    }

    /// Set every sample to `value`.
    #[inline]
    pub fn fill(&mut self, value: f32) {
        self.buffer.iter_mut().for_each(|s| *s = value);
    }

    /// Overwrite this block with the contents of `other`.
    #[inline]
    pub fn copy_from(&mut self, other: &Stream) {
        self.buffer.copy_from_slice(&other.buffer);
    }

    /// Largest absolute sample value in the block.
    pub fn peak(&self) -> f32 {
        self.buffer.iter().fold(0.0, |peak, s| peak.max(s.abs()))
    }
}

impl Deref for Stream {
    type Target = [f32];

    #[inline]
    fn deref(&self) -> &[f32] {
        &self.buffer
    }
}

impl DerefMut for Stream {
    #[inline]
    fn deref_mut(&mut self) -> &mut [f32] {
        &mut self.buffer
    }
}

impl fmt::Debug for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.buffer.iter()).finish()
    }
}

/// Typed handle to the output stream of a registered node.
///
/// Handles are minted by [`Graph`](crate::Graph) and remember which graph (and
/// which build of that graph) produced them, so a handle from another graph or
/// from before a teardown is rejected at construction time instead of being read.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct StreamId {
    pub(crate) graph: u32,
    pub(crate) generation: u32,
    pub(crate) index: u32,
}

impl StreamId {
    /// Position of the owning node in its graph's schedule.
    #[inline]
    pub fn index(&self) -> usize {
        self.index as usize
    }
}

impl fmt::Display for StreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stream #{} (graph {}, build {})", self.index, self.graph, self.generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_stream_is_one_silent_block() {
        let stream = Stream::new();
        assert_eq!(stream.len(), BLOCK_SIZE);
        assert!(stream.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn fill_copy_and_clear() {
        let mut a = Stream::new();
        a.fill(0.25);
        let mut b = Stream::new();
        b.copy_from(&a);
        assert!(b.iter().all(|&s| s == 0.25));

        b[3] = -0.75;
        assert_eq!(b.peak(), 0.75);

        b.clear();
        assert_eq!(b.peak(), 0.0);
    }
}
