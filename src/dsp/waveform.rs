use std::f64::consts::{PI, TAU};
use std::fmt;
use std::str::FromStr;

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::timebase::{sample_spacing, SAMPLE_COUNT};
use crate::error::{Result, ScopeError};

/*
Waveform Synthesis
==================

Each acquisition renders one fixed window (see `timebase.rs`) of a single
waveform family. Sample i sits at t = i * dt; the phase argument shared by the
periodic shapes is

    θ(t) = 2π · f · t

Shapes
------

Sine:      A · sin θ + offset

Square:    A · sign(sin θ) + offset
           sign(0) is taken as +1, so t = 0 (and any sample landing exactly
           on a zero of the sine) reads +A.

Triangle:  (2A / π) · asin(sin θ) + offset
           asin folds the sine back into [-π/2, π/2], which is a straight
           ramp in θ; the 2/π factor scales it to ±A.

Sawtooth:  2A · (f·t − floor(f·t + 0.5)) + offset
           Rising ramp in [-A, A), centred on offset, wrapping at half
           periods of phase.

Noise:     A · (u − 0.5) · 2 + offset,  u ~ U[0, 1)
           Independent per sample. The random source is supplied by the
           caller so tests can seed it; frequency is ignored.

     sine        square       triangle     sawtooth
    ╭─╮          ┌──┐          ╱╲           ╱│ ╱│
   ╱   ╲   ╱     │  │  │      ╱  ╲  ╱      ╱ │╱ │
        ╲_╱         └──┘          ╲╱       ╱  │  │
*/

/// Waveform family.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WaveformKind {
    #[default]
    Sine,
    Square,
    Triangle,
    Sawtooth,
    Noise,
}

impl WaveformKind {
    pub const ALL: [WaveformKind; 5] = [
        WaveformKind::Sine,
        WaveformKind::Square,
        WaveformKind::Triangle,
        WaveformKind::Sawtooth,
        WaveformKind::Noise,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            WaveformKind::Sine => "sine",
            WaveformKind::Square => "square",
            WaveformKind::Triangle => "triangle",
            WaveformKind::Sawtooth => "sawtooth",
            WaveformKind::Noise => "noise",
        }
    }

    /// The next family in `ALL`, wrapping around.
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&k| k == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn is_periodic(self) -> bool {
        !matches!(self, WaveformKind::Noise)
    }
}

impl fmt::Display for WaveformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WaveformKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "unknown waveform '{s}' (expected sine, square, triangle, sawtooth or noise)"
                )
            })
    }
}

/// One point of a synthesized trace.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Sample {
    /// Seconds since the start of the acquisition window.
    pub time: f64,
    /// Volts.
    pub voltage: f64,
}

impl Sample {
    pub fn new(time: f64, voltage: f64) -> Self {
        Self { time, voltage }
    }
}

/// Validated synthesis parameters.
///
/// Construction rejects non-positive frequency, negative amplitude and any
/// non-finite value, so synthesis itself never fails.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawWaveformSpec"))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveformSpec {
    kind: WaveformKind,
    frequency: f64,
    amplitude: f64,
    offset: f64,
}

impl WaveformSpec {
    pub fn new(kind: WaveformKind, frequency: f64, amplitude: f64, offset: f64) -> Result<Self> {
        if !frequency.is_finite() || frequency <= 0.0 {
            return Err(ScopeError::InvalidFrequency(frequency));
        }
        if !amplitude.is_finite() || amplitude < 0.0 {
            return Err(ScopeError::InvalidAmplitude(amplitude));
        }
        if !offset.is_finite() {
            return Err(ScopeError::InvalidOffset(offset));
        }
        Ok(Self {
            kind,
            frequency,
            amplitude,
            offset,
        })
    }

    pub fn kind(&self) -> WaveformKind {
        self.kind
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn with_kind(self, kind: WaveformKind) -> Self {
        Self { kind, ..self }
    }

    pub fn with_frequency(self, frequency: f64) -> Result<Self> {
        Self::new(self.kind, frequency, self.amplitude, self.offset)
    }

    pub fn with_amplitude(self, amplitude: f64) -> Result<Self> {
        Self::new(self.kind, self.frequency, amplitude, self.offset)
    }

    pub fn with_offset(self, offset: f64) -> Result<Self> {
        Self::new(self.kind, self.frequency, self.amplitude, offset)
    }

    /// Voltage at time `t`. Only the noise branch touches `rng`.
    #[inline]
    fn voltage_at<R: Rng + ?Sized>(&self, t: f64, rng: &mut R) -> f64 {
        let a = self.amplitude;
        let shape = match self.kind {
            WaveformKind::Sine => a * (TAU * self.frequency * t).sin(),
            WaveformKind::Square => {
                let s = (TAU * self.frequency * t).sin();
                if s >= 0.0 {
                    a
                } else {
                    -a
                }
            }
            WaveformKind::Triangle => (2.0 * a / PI) * (TAU * self.frequency * t).sin().asin(),
            WaveformKind::Sawtooth => {
                let cycles = self.frequency * t;
                2.0 * a * (cycles - (cycles + 0.5).floor())
            }
            WaveformKind::Noise => a * (rng.gen::<f64>() - 0.5) * 2.0,
        };
        shape + self.offset
    }
}

impl Default for WaveformSpec {
    /// 1 kHz sine, 1 V amplitude, no offset.
    fn default() -> Self {
        Self {
            kind: WaveformKind::Sine,
            frequency: 1000.0,
            amplitude: 1.0,
            offset: 0.0,
        }
    }
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawWaveformSpec {
    #[serde(default)]
    kind: WaveformKind,
    frequency: f64,
    amplitude: f64,
    #[serde(default)]
    offset: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawWaveformSpec> for WaveformSpec {
    type Error = ScopeError;

    fn try_from(raw: RawWaveformSpec) -> Result<Self> {
        Self::new(raw.kind, raw.frequency, raw.amplitude, raw.offset)
    }
}

/// Render one acquisition window of `spec`.
///
/// Always returns exactly [`SAMPLE_COUNT`] samples in ascending time starting
/// at t = 0. `rng` is only drawn from for [`WaveformKind::Noise`].
pub fn synthesize<R: Rng + ?Sized>(spec: &WaveformSpec, rng: &mut R) -> Vec<Sample> {
    let mut samples = vec![Sample::default(); SAMPLE_COUNT];
    fill(spec, rng, &mut samples);
    samples
}

fn fill<R: Rng + ?Sized>(spec: &WaveformSpec, rng: &mut R, out: &mut [Sample]) {
    let dt = sample_spacing();
    for (i, sample) in out.iter_mut().enumerate() {
        let t = i as f64 * dt;
        *sample = Sample::new(t, spec.voltage_at(t, rng));
    }
}

/// Synthesizer that owns its random source across calls.
///
/// The application layer keeps one of these for the lifetime of a session so
/// successive noise frames keep drawing from the same generator.
pub struct Synthesizer<R = StdRng> {
    rng: R,
}

impl Synthesizer<StdRng> {
    /// Entropy-seeded generator; noise output is not reproducible.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic generator for reproducible noise traces.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for Synthesizer<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Synthesizer<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    pub fn render(&mut self, spec: &WaveformSpec) -> Vec<Sample> {
        debug!(
            "synthesizing {} at {} Hz, {} V amplitude, {} V offset",
            spec.kind, spec.frequency, spec.amplitude, spec.offset
        );
        synthesize(spec, &mut self.rng)
    }

    /// Fill `out` with the first `out.len()` samples of the window.
    ///
    /// Buffers longer than [`SAMPLE_COUNT`] keep extending the time axis at
    /// the same spacing.
    pub fn render_into(&mut self, spec: &WaveformSpec, out: &mut [Sample]) {
        fill(spec, &mut self.rng, out);
    }
}
