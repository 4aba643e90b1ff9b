//! Offline example: render an enveloped triangle voice and print its level
//!
//! Run with: cargo run --example envelope_scope
//!
//! Holds the gate for half a second, releases it, and draws the per-block peak
//! of the envelope and the filtered voice as a text scope.

use strom::nodes::AdsrMessage;
use strom::{AdsrParams, AudioNode, Graph, NodeKind};

const SAMPLE_RATE: u32 = 8_000;

fn bar(level: f32, width: usize) -> String {
    let filled = (level.clamp(0.0, 1.0) * width as f32).round() as usize;
    format!("{:<width$}", "#".repeat(filled), width = width)
}

fn main() -> Result<(), strom::GraphError> {
    tracing_subscriber::fmt::init();

    let mut graph = Graph::new(SAMPLE_RATE).with_capacity(16);
    let (gate, mut key) = graph.parameter(0.0)?;
    let freq = graph.constant(110.0)?;
    let duty = graph.constant(0.25)?;
    let cutoff = graph.constant(0.1)?;

    let osc = graph.triangle(freq, duty)?;
    let (env, mut shape) = graph.adsr_with_control(gate, AdsrParams::new(0.05, 0.15, 0.6, 0.3))?;
    let filtered = graph.lowpass(osc, cutoff)?;
    let voice = graph.product(&[filtered, env])?;

    let topo = graph.topology();
    println!("patch:");
    for index in topo.node_indices() {
        let readers: Vec<_> = topo.neighbors(index).map(|n| n.index()).collect();
        println!("  [{}] {:<9} -> {:?}", index.index(), topo[index].to_string(), readers);
    }
    assert_eq!(graph.node(voice)?.kind(), NodeKind::Multiply);

    let hold_blocks = SAMPLE_RATE as usize / 2 / graph.block_size();
    let release_blocks = hold_blocks;

    println!("\n block  envelope{:24}voice", "");
    key.send(1.0).ok();
    for block in 0..hold_blocks + release_blocks {
        if block == hold_blocks {
            key.send(0.0).ok();
        }
        if block == hold_blocks / 2 {
            // a slower release for the tail
            shape.send(AdsrMessage::SetRelease(0.4)).ok();
        }

        graph.tick();
        let e = graph.stream(env)?.peak();
        let v = graph.stream(voice)?.peak();
        if block % 2 == 0 {
            println!("{:>6}  {} {:.3}  {}", block, bar(e, 24), e, bar(v, 24));
        }
    }

    graph.teardown();
    Ok(())
}
