//! Error types for graph construction and device output.

use core::fmt;

use thiserror::Error;

use crate::stream::StreamId;

/// Why a [`StreamId`] was refused.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum HandleFault {
    /// The handle was minted by a different graph.
    ForeignGraph,
    /// The graph has been torn down since the handle was minted.
    Stale,
    /// The handle does not refer to a node registered before this one.
    NotYetRegistered,
}

impl fmt::Display for HandleFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandleFault::ForeignGraph => f.write_str("belongs to another graph"),
            HandleFault::Stale => f.write_str("outlived a teardown of its graph"),
            HandleFault::NotYetRegistered => f.write_str("is not produced by an earlier node"),
        }
    }
}

/// Errors raised while building a graph.
///
/// Every variant is raised before the node is scheduled, so a failed
/// registration leaves the graph unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("graph is full ({capacity} nodes)")]
    CapacityExceeded { capacity: usize },
    #[error("input {handle} {fault}")]
    InvalidInputHandle { handle: StreamId, fault: HandleFault },
}

/// Errors raised while opening an output device.
#[cfg(feature = "cpal_sink")]
#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("no audio output device available")]
    NoDevice,
    #[error("unsupported sample format {0:?} (only f32 output is supported)")]
    UnsupportedFormat(cpal::SampleFormat),
    #[error(transparent)]
    Build(#[from] cpal::BuildStreamError),
    #[error(transparent)]
    Play(#[from] cpal::PlayStreamError),
}
