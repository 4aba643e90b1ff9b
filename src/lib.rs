//! Block-at-a-time audio node scheduler.
//!
//! A [`Graph`] holds an ordered list of nodes. Each node owns one output
//! [`Stream`] of [`BLOCK_SIZE`] samples and may read the streams of nodes added
//! before it. [`Graph::tick`] runs every node once, in order, producing one block.
//!
//! The built-in nodes are a scalar broadcaster, N-ary add and multiply,
//! one-pole lowpass/highpass filters, a triangle/pulse oscillator and an ADSR
//! envelope. Their per-sample math lives in [`dsp`] as pure step functions.
//!
//! All checks happen while the graph is built; ticking never fails.

pub mod control;
pub mod dsp;
mod error;
mod graph;
mod node;
pub mod nodes;
mod render;
mod stream;

#[cfg(feature = "cpal_sink")]
mod device;

pub use control::Control;
pub use dsp::{AdsrParams, Stage};
pub use error::{GraphError, HandleFault};
pub use graph::{Graph, DEFAULT_CAPACITY};
pub use node::{AudioNode, Inputs, Node, NodeKind, ProcessContext};
pub use render::Renderer;
pub use stream::{Stream, StreamId, BLOCK_SIZE};

#[cfg(feature = "cpal_sink")]
pub use device::{CpalDevice, Playback};
#[cfg(feature = "cpal_sink")]
pub use error::DeviceError;
