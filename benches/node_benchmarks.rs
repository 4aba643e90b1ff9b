use criterion::{black_box, criterion_group, criterion_main, Criterion};
use strom::dsp::{OnePole, TrianglePhase};
use strom::{AdsrParams, Graph};

pub fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("TrianglePhase::step() x64", |b| {
        let mut osc = TrianglePhase::default();
        b.iter(move || {
            for _ in 0..64 {
                let (next, out) = osc.step(black_box(440.0), black_box(0.5), 48_000);
                osc = next;
                black_box(out);
            }
        })
    });

    c.bench_function("OnePole::step() x64", |b| {
        let mut filter = OnePole::default();
        b.iter(move || {
            for i in 0..64 {
                let (next, out) = filter.step(black_box(i as f32), black_box(0.1));
                filter = next;
                black_box(out);
            }
        })
    });

    c.bench_function("Graph::tick() voice", |b| {
        let mut graph = Graph::new(48_000);
        let (gate, mut key) = graph.parameter(1.0).unwrap();
        let freq = graph.constant(220.0).unwrap();
        let duty = graph.constant(0.3).unwrap();
        let cutoff = graph.constant(0.2).unwrap();

        let osc = graph.triangle(freq, duty).unwrap();
        let env = graph.adsr(gate, AdsrParams::default()).unwrap();
        let filtered = graph.lowpass(osc, cutoff).unwrap();
        graph.product(&[filtered, env]).unwrap();
        key.send(1.0).unwrap();

        b.iter(|| graph.tick())
    });

    c.bench_function("Graph::tick() 32 voices", |b| {
        let mut graph = Graph::new(48_000);
        let gate = graph.constant(1.0).unwrap();
        let duty = graph.constant(0.5).unwrap();
        let mut voices = Vec::new();
        for v in 0..32 {
            let freq = graph.constant(110.0 * (1.0 + v as f32 / 12.0)).unwrap();
            let osc = graph.triangle(freq, duty).unwrap();
            let env = graph.adsr(gate, AdsrParams::default()).unwrap();
            voices.push(graph.product(&[osc, env]).unwrap());
        }
        graph.sum(&voices).unwrap();

        b.iter(|| graph.tick())
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
