//! Lock-free parameter handles.

use core::marker::PhantomData;

use rtrb::{Consumer, Producer, RingBuffer};

/// Pending messages each control queue can hold.
pub const DEFAULT_QUEUE_SIZE: usize = 64;

/// A handle for sending parameter updates to a node in a [`Graph`](crate::Graph).
///
/// Messages are buffered in a lock-free ring buffer and applied at the start of
/// the node's next `process` call, so they always take effect on a block
/// boundary. The handle can be moved to any thread.
///
/// ```
/// # use strom::Graph;
/// let mut graph = Graph::new(48_000);
/// let (level, mut knob) = graph.parameter(0.0).unwrap();
///
/// knob.send(0.5).ok();
/// graph.tick();
/// assert_eq!(graph.stream(level).unwrap()[0], 0.5);
/// ```
pub struct Control<M: Send + 'static> {
    sender: Producer<M>,
    _marker: PhantomData<M>,
}

impl<M: Send + 'static> Control<M> {
    /// Send a message to the node.
    ///
    /// Returns `Err(msg)` with the undelivered message if the queue is full.
    pub fn send(&mut self, msg: M) -> Result<(), M> {
        self.sender.push(msg).map_err(|rtrb::PushError::Full(m)| m)
    }

    /// Returns how many more messages fit in the queue.
    #[inline]
    pub fn slots(&self) -> usize {
        self.sender.slots()
    }

    /// Whether the receiving node has been dropped (e.g. after a teardown).
    #[inline]
    pub fn is_detached(&self) -> bool {
        self.sender.is_abandoned()
    }
}

/// Create a connected handle and the receiving end kept by the node.
pub(crate) fn channel<M: Send + 'static>(queue_size: usize) -> (Control<M>, Consumer<M>) {
    let (sender, receiver) = RingBuffer::new(queue_size.max(1));
    (
        Control {
            sender,
            _marker: PhantomData,
        },
        receiver,
    )
}

/// Drain every pending message from `receiver`.
#[inline]
pub(crate) fn drain<M>(receiver: &mut Option<Consumer<M>>) -> impl Iterator<Item = M> + '_ {
    core::iter::from_fn(move || receiver.as_mut().and_then(|r| r.pop().ok()))
}
