//! Acquisition window and display timebase.

/*
Timebase
========

Every synthesis call covers the same fixed acquisition window. The display
zoom only changes how much time the screen (and therefore the cursors) spans;
it never changes the samples.

Vocabulary
----------

  window        Span of simulated time covered by one acquisition: 10 ms.

  sample count  Number of samples per acquisition: 1000.

  dt            Sample spacing = window / sample count = 10 µs.
                Sample i sits at t = i * dt, so the last sample is at
                9.99 ms, one dt short of the window end.

  sample rate   1 / dt = 100 kHz. Nyquist is 50 kHz, but the zero-crossing
                estimator stops being useful long before that.

  time scale    Display zoom factor. Visible window = 10 ms * scale.


The 1-2-5 Ladder
----------------

Bench oscilloscopes step their horizontal scale through 1, 2, 5, 10, 20, 50...
The zoom controls follow the same ladder, bounded to 0.1x .. 10x:

    0.1  0.2  0.5  1  2  5  10
     │                       │
   1 ms                   100 ms   visible window
*/

use crate::error::{Result, ScopeError};

/// Simulated time covered by one acquisition, in seconds.
pub const WINDOW_SECONDS: f64 = 0.01;

/// Samples produced by one acquisition.
pub const SAMPLE_COUNT: usize = 1000;

/// Smallest display zoom factor.
pub const MIN_TIME_SCALE: f64 = 0.1;

/// Largest display zoom factor.
pub const MAX_TIME_SCALE: f64 = 10.0;

const SCALE_LADDER: [f64; 7] = [0.1, 0.2, 0.5, 1.0, 2.0, 5.0, 10.0];

/// Spacing between adjacent samples, in seconds.
#[inline]
pub fn sample_spacing() -> f64 {
    WINDOW_SECONDS / SAMPLE_COUNT as f64
}

/// Samples per second implied by the fixed window.
#[inline]
pub fn sample_rate() -> f64 {
    1.0 / sample_spacing()
}

/// Period in seconds of a waveform at `frequency_hz`.
///
/// # Example
/// ```
/// use pvrsd_scope::dsp::timebase::period_from_frequency;
/// let period = period_from_frequency(50.0);
/// assert!((period - 0.02).abs() < 1e-12); // 50 Hz mains = 20 ms
/// ```
#[inline]
pub fn period_from_frequency(frequency_hz: f64) -> f64 {
    1.0 / frequency_hz
}

/// Horizontal display zoom.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "f64", into = "f64"))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale(f64);

impl TimeScale {
    pub fn new(scale: f64) -> Result<Self> {
        if scale.is_finite() && (MIN_TIME_SCALE..=MAX_TIME_SCALE).contains(&scale) {
            Ok(Self(scale))
        } else {
            Err(ScopeError::InvalidTimeScale {
                value: scale,
                min: MIN_TIME_SCALE,
                max: MAX_TIME_SCALE,
            })
        }
    }

    pub fn factor(self) -> f64 {
        self.0
    }

    /// Visible window length in seconds.
    pub fn window_length(self) -> f64 {
        WINDOW_SECONDS * self.0
    }

    /// Next smaller ladder step (shorter window). Saturates at the minimum.
    pub fn zoom_in(self) -> Self {
        let next = SCALE_LADDER
            .iter()
            .rev()
            .find(|&&step| step < self.0 - f64::EPSILON)
            .copied()
            .unwrap_or(MIN_TIME_SCALE);
        Self(next)
    }

    /// Next larger ladder step (longer window). Saturates at the maximum.
    pub fn zoom_out(self) -> Self {
        let next = SCALE_LADDER
            .iter()
            .find(|&&step| step > self.0 + f64::EPSILON)
            .copied()
            .unwrap_or(MAX_TIME_SCALE);
        Self(next)
    }
}

impl Default for TimeScale {
    fn default() -> Self {
        Self(1.0)
    }
}

impl TryFrom<f64> for TimeScale {
    type Error = ScopeError;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<TimeScale> for f64 {
    fn from(scale: TimeScale) -> Self {
        scale.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spacing_and_rate() {
        assert!((sample_spacing() - 1e-5).abs() < 1e-15);
        assert!((sample_rate() - 100_000.0).abs() < 1e-6);
    }

    #[test]
    fn window_follows_scale() {
        let scale = TimeScale::new(2.0).unwrap();
        assert!((scale.window_length() - 0.02).abs() < 1e-12);
        assert!((TimeScale::default().window_length() - WINDOW_SECONDS).abs() < 1e-12);
    }

    #[test]
    fn rejects_out_of_range_scale() {
        assert!(TimeScale::new(0.05).is_err());
        assert!(TimeScale::new(20.0).is_err());
        assert!(TimeScale::new(f64::NAN).is_err());
        assert!(TimeScale::new(MIN_TIME_SCALE).is_ok());
        assert!(TimeScale::new(MAX_TIME_SCALE).is_ok());
    }

    #[test]
    fn zoom_walks_the_ladder() {
        let scale = TimeScale::default();
        assert_eq!(scale.zoom_out().factor(), 2.0);
        assert_eq!(scale.zoom_out().zoom_out().factor(), 5.0);
        assert_eq!(scale.zoom_in().factor(), 0.5);

        // Off-ladder values snap to the neighbouring step.
        let odd = TimeScale::new(3.0).unwrap();
        assert_eq!(odd.zoom_in().factor(), 2.0);
        assert_eq!(odd.zoom_out().factor(), 5.0);
    }

    #[test]
    fn zoom_saturates() {
        let min = TimeScale::new(MIN_TIME_SCALE).unwrap();
        let max = TimeScale::new(MAX_TIME_SCALE).unwrap();
        assert_eq!(min.zoom_in().factor(), MIN_TIME_SCALE);
        assert_eq!(max.zoom_out().factor(), MAX_TIME_SCALE);
    }
}
