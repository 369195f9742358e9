//! Error type shared by the library.
//!
//! The numeric core never fails once its inputs are constructed; everything in
//! here comes from boundary validation or trace I/O.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScopeError {
    #[error("frequency must be a finite value greater than zero, got {0}")]
    InvalidFrequency(f64),
    #[error("amplitude must be a finite value of at least zero, got {0}")]
    InvalidAmplitude(f64),
    #[error("offset must be finite, got {0}")]
    InvalidOffset(f64),
    #[error("cursor position must lie in [0, 1], got {0}")]
    CursorOutOfRange(f64),
    #[error("time scale must lie in [{min}, {max}], got {value}")]
    InvalidTimeScale { value: f64, min: f64, max: f64 },
    #[error("malformed trace at record {record}: {reason}")]
    MalformedTrace { record: usize, reason: String },
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ScopeError>;
