//! Numeric core of the simulated oscilloscope.
//!
//! Everything in here is a pure, synchronous transform: no shared state, no
//! I/O. The session and runtime layers own the state that drives these
//! functions on a fixed cadence.

/// Time cursors and the delta/frequency readout between them.
pub mod cursor;
/// Peak-to-peak, RMS and zero-crossing frequency estimation.
pub mod measure;
/// Acquisition window constants and display zoom.
pub mod timebase;
/// Waveform families and trace synthesis.
pub mod waveform;

pub use cursor::{cursor_delta, CursorDelta, CursorId, CursorPair};
pub use measure::{count_zero_crossings, extract_measurements, MeasurementSet};
pub use timebase::{TimeScale, SAMPLE_COUNT, WINDOW_SECONDS};
pub use waveform::{synthesize, Sample, Synthesizer, WaveformKind, WaveformSpec};
