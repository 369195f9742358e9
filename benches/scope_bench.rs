//! Benchmarks for the scope core.
//!
//! Run with: cargo bench
//!
//! The acquisition thread ticks every 100 ms by default, so one synthesis plus
//! one measurement pass has to stay far below that to leave room for the UI.
//!
//! Benchmark groups:
//!   - dsp/waveform   Synthesis of each waveform family
//!   - dsp/measure    Measurement extraction and cursor math

use criterion::{criterion_group, criterion_main};

mod dsp;

criterion_group!(benches, dsp::bench_waveform, dsp::bench_measure);
criterion_main!(benches);
