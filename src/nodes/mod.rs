//! Built-in nodes.
//!
//! Nodes are organized into two categories:
//!
//! ## Sources ([`source`])
//!
//! Generate a stream without reading audio:
//! - [`Parameter`] - Broadcast a scalar (fixed or live-controlled) across a block
//! - [`Triangle`] - Triangle/pulse oscillator with per-sample frequency and duty
//!
//! ## Effects ([`effect`])
//!
//! Derive a stream from earlier streams:
//! - [`Add`] / [`Multiply`] - N-ary sum and product
//! - [`Lowpass`] / [`Highpass`] - One-pole filters with per-sample cutoff
//! - [`Adsr`] - Gate-driven envelope
//!
//! # Message Types
//!
//! Nodes created with a control handle accept messages between blocks:
//! - `f32` - New value for a [`Parameter`]
//! - [`AdsrMessage`] - Reshape an [`Adsr`]

pub mod effect;
pub mod source;

// Re-export common types at the top level for convenience
pub use effect::{Add, Adsr, AdsrMessage, Highpass, Lowpass, Multiply};
pub use source::{Parameter, Triangle};
