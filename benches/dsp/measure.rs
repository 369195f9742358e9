//! Benchmarks for measurement extraction.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use pvrsd_scope::{
    cursor_delta, extract_measurements, CursorPair, Synthesizer, WaveformKind, WaveformSpec,
};

pub fn bench_measure(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/measure");
    let mut synth = Synthesizer::seeded(0);

    // Sine crosses zero regularly; noise flips sign on roughly every sample.
    for kind in [WaveformKind::Sine, WaveformKind::Noise] {
        let spec = WaveformSpec::new(kind, 1000.0, 1.0, 0.0).unwrap();
        let samples = synth.render(&spec);
        group.bench_with_input(BenchmarkId::new("extract", kind), &samples, |b, samples| {
            b.iter(|| extract_measurements(black_box(samples)))
        });
    }

    let cursors = CursorPair::new(0.2, 0.7).unwrap();
    group.bench_function("cursor_delta", |b| {
        b.iter(|| cursor_delta(black_box(cursors), black_box(0.01)))
    });

    group.finish();
}
