//! Oscilloscope-style measurements over one acquired trace.

/*
Measurements
============

  peak-to-peak   max(v) − min(v)

  rms            sqrt(mean(v²)). Includes any DC offset, like the "RMS"
                 (not "AC RMS") readout on a bench scope.

  frequency      Estimated by counting zero crossings.


Zero-Crossing Estimator
-----------------------

Walk adjacent sample pairs (a, b) and count a crossing whenever

    (a >= 0) != (b >= 0)

Zero is grouped with the positive side, so a trace that touches 0 and comes
back up does not count, and a sine starting exactly at 0 does not produce a
spurious crossing at t = 0.

Two crossings make one cycle:

    period    = (t_last − t_first) / (crossings / 2)
    frequency = 1 / period

No interpolation between samples and no windowing: the count can be short by
one half cycle at the window edge, so the estimate is only good to roughly
1 / (2 · span) Hz (≈ 50 Hz over the 10 ms window). Waveforms with fewer than
one crossing inside the window report 0.

Degenerate input (no samples, no crossings) yields zeros rather than NaN or
infinity.
*/

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::waveform::Sample;

/// Summary statistics derived from exactly one trace.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MeasurementSet {
    /// Volts.
    pub peak_to_peak: f64,
    /// Volts.
    pub rms: f64,
    /// Hz; 0 when no crossing was found.
    pub estimated_frequency: f64,
    /// Seconds; 0 when no crossing was found.
    pub estimated_period: f64,
}

/// Number of sign changes between adjacent samples, zero counted as positive.
pub fn count_zero_crossings(samples: &[Sample]) -> usize {
    samples
        .windows(2)
        .filter(|pair| (pair[0].voltage >= 0.0) != (pair[1].voltage >= 0.0))
        .count()
}

/// Derive a [`MeasurementSet`] from a trace.
///
/// An empty trace yields all zeros.
pub fn extract_measurements(samples: &[Sample]) -> MeasurementSet {
    let (first, last) = match (samples.first(), samples.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return MeasurementSet::default(),
    };

    let (min, max) = samples
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), s| {
            (lo.min(s.voltage), hi.max(s.voltage))
        });
    let mean_square =
        samples.iter().map(|s| s.voltage * s.voltage).sum::<f64>() / samples.len() as f64;

    let crossings = count_zero_crossings(samples);
    let estimated_period = if crossings > 0 {
        (last.time - first.time) / (crossings as f64 / 2.0)
    } else {
        0.0
    };
    let estimated_frequency = if estimated_period > 0.0 {
        1.0 / estimated_period
    } else {
        0.0
    };

    MeasurementSet {
        peak_to_peak: max - min,
        rms: mean_square.sqrt(),
        estimated_frequency,
        estimated_period,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trace(voltages: &[f64]) -> Vec<Sample> {
        voltages
            .iter()
            .enumerate()
            .map(|(i, &v)| Sample::new(i as f64, v))
            .collect()
    }

    #[test]
    fn empty_trace_is_all_zero() {
        assert_eq!(extract_measurements(&[]), MeasurementSet::default());
    }

    #[test]
    fn single_sample() {
        let m = extract_measurements(&trace(&[-2.0]));
        assert_eq!(m.peak_to_peak, 0.0);
        assert_eq!(m.rms, 2.0);
        assert_eq!(m.estimated_frequency, 0.0);
        assert_eq!(m.estimated_period, 0.0);
    }

    #[test]
    fn zero_counts_as_positive() {
        // 0 -> 1 -> 0 -> -1 -> 0: only the 0 -> -1 and -1 -> 0 edges cross.
        let samples = trace(&[0.0, 1.0, 0.0, -1.0, 0.0]);
        assert_eq!(count_zero_crossings(&samples), 2);

        // Touching zero from above is not a crossing.
        assert_eq!(count_zero_crossings(&trace(&[1.0, 0.0, 1.0])), 0);
    }

    #[test]
    fn period_from_crossings() {
        // Four crossings across t = 0..8 -> two cycles -> period 4.
        let samples = trace(&[1.0, 1.0, -1.0, -1.0, 1.0, 1.0, -1.0, -1.0, 1.0]);
        let m = extract_measurements(&samples);
        assert_eq!(count_zero_crossings(&samples), 4);
        assert!((m.estimated_period - 4.0).abs() < 1e-12);
        assert!((m.estimated_frequency - 0.25).abs() < 1e-12);
        assert_eq!(m.peak_to_peak, 2.0);
        assert!((m.rms - 1.0).abs() < 1e-12);
    }

    #[test]
    fn dc_trace_has_no_frequency() {
        let m = extract_measurements(&trace(&[3.0; 10]));
        assert_eq!(m.peak_to_peak, 0.0);
        assert!((m.rms - 3.0).abs() < 1e-12);
        assert_eq!(m.estimated_frequency, 0.0);
        assert_eq!(m.estimated_period, 0.0);
    }
}
