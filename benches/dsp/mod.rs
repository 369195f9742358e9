//! Benchmarks for the numeric core.

mod measure;
mod waveform;

pub use measure::bench_measure;
pub use waveform::bench_waveform;
