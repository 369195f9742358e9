//! Benchmarks for waveform synthesis.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use pvrsd_scope::{Sample, Synthesizer, WaveformKind, WaveformSpec};

pub fn bench_waveform(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/waveform");
    let mut synth = Synthesizer::seeded(0);

    for kind in WaveformKind::ALL {
        let spec = WaveformSpec::new(kind, 1000.0, 1.0, 0.0).unwrap();

        // Allocating path used by the session
        group.bench_with_input(BenchmarkId::new("render", kind), &spec, |b, spec| {
            b.iter(|| black_box(synth.render(black_box(spec))))
        });

        // In-place path
        let mut buffer = vec![Sample::default(); pvrsd_scope::SAMPLE_COUNT];
        group.bench_with_input(BenchmarkId::new("render_into", kind), &spec, |b, spec| {
            b.iter(|| synth.render_into(black_box(spec), black_box(&mut buffer)))
        });
    }

    group.finish();
}
