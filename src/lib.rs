pub mod dsp; // Waveform synthesis, measurements, cursors
pub mod error;
pub mod io;
#[cfg(feature = "rtrb")]
pub mod runtime; // Fixed-cadence acquisition thread
pub mod session; // Owned scope state and control messages

pub use dsp::{
    cursor_delta, extract_measurements, synthesize, CursorDelta, CursorPair, MeasurementSet,
    Sample, Synthesizer, TimeScale, WaveformKind, WaveformSpec, SAMPLE_COUNT, WINDOW_SECONDS,
};
pub use error::{Result, ScopeError};
pub use session::{ControlMessage, Frame, RunMode, ScopeConfig, ScopeSession, ScopeStatus};
