//! Play a gated triangle voice on the default output device
//!
//! Run with: cargo run --example triangle_voice --features cpal_sink
//!
//! Taps out a short arpeggio by sending gate and frequency messages to the
//! running graph from the main thread.

use std::thread::sleep;
use std::time::Duration;

use strom::{AdsrParams, CpalDevice, Graph, Renderer};

fn main() {
    tracing_subscriber::fmt::init();

    let device = match CpalDevice::try_default_output() {
        Ok(device) => device,
        Err(err) => {
            eprintln!("{}", err);
            return;
        }
    };
    println!(
        "Using: {} @ {}Hz, {} ch",
        device.name(),
        device.sample_rate(),
        device.channels()
    );

    let mut graph = Graph::new(device.sample_rate());
    let (gate, mut key) = graph.parameter(0.0).unwrap();
    let (freq, mut pitch) = graph.parameter(220.0).unwrap();
    let duty = graph.constant(0.5).unwrap();
    let cutoff = graph.constant(0.15).unwrap();
    let level = graph.constant(0.25).unwrap();

    let osc = graph.triangle(freq, duty).unwrap();
    let env = graph.adsr(gate, AdsrParams::new(0.005, 0.08, 0.4, 0.25)).unwrap();
    let filtered = graph.lowpass(osc, cutoff).unwrap();
    let voice = graph.product(&[filtered, env, level]).unwrap();

    let renderer = Renderer::new(graph, &[voice]).unwrap();
    let _playback = match device.play(renderer) {
        Ok(playback) => playback,
        Err(err) => {
            eprintln!("Could not start playback: {}", err);
            return;
        }
    };

    for note in [220.0, 277.18, 329.63, 440.0, 329.63, 277.18, 220.0] {
        pitch.send(note).ok();
        key.send(1.0).ok();
        sleep(Duration::from_millis(200));
        key.send(0.0).ok();
        sleep(Duration::from_millis(100));
    }
    sleep(Duration::from_millis(500));
}
