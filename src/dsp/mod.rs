//! Per-sample DSP math, separated from the graph plumbing.
//!
//! Each primitive is a plain `Copy` state with a `step` function taking the
//! state and one sample of input and returning the next state and the output
//! sample. The graph nodes in [`crate::nodes`] run these over a block and keep
//! the state between ticks; tests can drive them directly.

/// Sample-accurate ADSR state machine.
pub mod envelope;
/// One-pole coefficient math and filter state.
pub mod filter;
/// Triangle/pulse phase accumulator.
pub mod oscillator;

pub use envelope::{AdsrParams, AdsrRates, AdsrState, Stage, GATE_THRESHOLD};
pub use filter::{cutoff_from_hz, one_pole_coefficient, OnePole};
pub use oscillator::TrianglePhase;
