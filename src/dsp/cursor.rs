//! Time cursors over the visible window.
//!
//! Cursor positions are normalized to `[0, 1]` across the visible window, so
//! the same pair reads a different time delta at every zoom level. Window
//! length and results share whatever time unit the caller uses; the rest of
//! the crate works in seconds.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScopeError};

/// Which of the two cursors to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorId {
    First,
    Second,
}

/// Two normalized cursor positions.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "(f64, f64)", into = "(f64, f64)"))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorPair {
    cursor1: f64,
    cursor2: f64,
}

/// Time between two cursors and the frequency whose period it would be.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CursorDelta {
    pub delta_time: f64,
    /// Zero when the cursors coincide.
    pub delta_frequency: f64,
}

impl CursorPair {
    pub fn new(cursor1: f64, cursor2: f64) -> Result<Self> {
        Ok(Self {
            cursor1: check_position(cursor1)?,
            cursor2: check_position(cursor2)?,
        })
    }

    pub fn cursor1(&self) -> f64 {
        self.cursor1
    }

    pub fn cursor2(&self) -> f64 {
        self.cursor2
    }

    pub fn delta(self, window_length: f64) -> CursorDelta {
        cursor_delta(self, window_length)
    }

    /// Move one cursor by `step`, clamped to the window edges.
    pub fn nudged(self, which: CursorId, step: f64) -> Self {
        match which {
            CursorId::First => Self {
                cursor1: (self.cursor1 + step).clamp(0.0, 1.0),
                ..self
            },
            CursorId::Second => Self {
                cursor2: (self.cursor2 + step).clamp(0.0, 1.0),
                ..self
            },
        }
    }
}

impl Default for CursorPair {
    /// Quarter and three-quarter marks.
    fn default() -> Self {
        Self {
            cursor1: 0.25,
            cursor2: 0.75,
        }
    }
}

impl TryFrom<(f64, f64)> for CursorPair {
    type Error = ScopeError;

    fn try_from((cursor1, cursor2): (f64, f64)) -> Result<Self> {
        Self::new(cursor1, cursor2)
    }
}

impl From<CursorPair> for (f64, f64) {
    fn from(pair: CursorPair) -> Self {
        (pair.cursor1, pair.cursor2)
    }
}

fn check_position(position: f64) -> Result<f64> {
    if (0.0..=1.0).contains(&position) {
        Ok(position)
    } else {
        Err(ScopeError::CursorOutOfRange(position))
    }
}

/// Absolute time delta between the cursors over a window of `window_length`,
/// plus the implied frequency `1 / delta_time` (0 when the delta is 0).
pub fn cursor_delta(cursors: CursorPair, window_length: f64) -> CursorDelta {
    let time1 = cursors.cursor1 * window_length;
    let time2 = cursors.cursor2 * window_length;
    let delta_time = (time2 - time1).abs();
    let delta_frequency = if delta_time > 0.0 {
        1.0 / delta_time
    } else {
        0.0
    };
    CursorDelta {
        delta_time,
        delta_frequency,
    }
}
