//! Scope session - the owned state that drives the numeric core
//!
//! Holds the current waveform, display settings and run mode, and turns
//! periodic ticks into frames. Nothing in here is global: whoever owns the
//! session (the acquisition worker, a test, a headless capture) decides when
//! to tick it.

use log::{debug, info};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::{
    cursor::{CursorDelta, CursorId, CursorPair},
    measure::{extract_measurements, MeasurementSet},
    timebase::TimeScale,
    waveform::{Sample, Synthesizer, WaveformKind, WaveformSpec},
};
use crate::error::Result;

/// Acquisition mode, as on a bench scope's RUN/STOP/SINGLE buttons.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// Every tick captures a frame.
    #[default]
    Running,
    /// Ticks are ignored; the last frame stays on screen.
    Stopped,
    /// The next tick captures one frame, then the session stops.
    Single,
}

/// Commands accepted by a session
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ControlMessage {
    Run,
    Stop,
    Single,
    /// Restore the configuration the session was built with
    Reset,
    SetWaveform(WaveformKind),
    SetFrequency(f64),
    SetAmplitude(f64),
    SetOffset(f64),
    /// Step to the next waveform family
    NextWaveform,
    /// Multiply the current frequency
    ScaleFrequency(f64),
    /// Add volts to the current amplitude, stopping at zero
    AdjustAmplitude(f64),
    /// Add volts to the current offset
    AdjustOffset(f64),
    SetTimeScale(f64),
    ZoomIn,
    ZoomOut,
    SetCursors(f64, f64),
    NudgeCursor(CursorId, f64),
}

impl ControlMessage {
    /// Run/stop/single and reset, as opposed to settings tweaks.
    pub fn is_run_control(&self) -> bool {
        matches!(
            self,
            ControlMessage::Run
                | ControlMessage::Stop
                | ControlMessage::Single
                | ControlMessage::Reset
        )
    }
}

/// One acquisition: the samples and the measurements derived from them.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// 1 for the first frame captured since build or reset.
    pub sequence: u64,
    pub spec: WaveformSpec,
    pub samples: Vec<Sample>,
    pub measurements: MeasurementSet,
}

/// Settings snapshot cheap enough to publish every tick (Copy, no allocations)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScopeStatus {
    pub mode: RunMode,
    pub spec: WaveformSpec,
    pub time_scale: TimeScale,
    pub cursors: CursorPair,
    pub cursor_delta: CursorDelta,
    pub frames_captured: u64,
}

/// Builder for a [`ScopeSession`]. Values are validated by [`ScopeConfig::build`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
#[derive(Debug, Clone, PartialEq)]
pub struct ScopeConfig {
    pub waveform: WaveformKind,
    pub frequency: f64,
    pub amplitude: f64,
    pub offset: f64,
    pub time_scale: f64,
    pub cursors: (f64, f64),
    /// Seed for the noise generator; `None` draws from OS entropy.
    pub seed: Option<u64>,
    pub mode: RunMode,
}

impl ScopeConfig {
    /// 1 kHz, 1 V sine at 1x zoom with cursors on the quarter marks.
    pub fn new() -> Self {
        let spec = WaveformSpec::default();
        let cursors = CursorPair::default();
        Self {
            waveform: spec.kind(),
            frequency: spec.frequency(),
            amplitude: spec.amplitude(),
            offset: spec.offset(),
            time_scale: TimeScale::default().factor(),
            cursors: cursors.into(),
            seed: None,
            mode: RunMode::Running,
        }
    }

    pub fn waveform(mut self, kind: WaveformKind) -> Self {
        self.waveform = kind;
        self
    }

    /// Frequency in Hz
    pub fn frequency(mut self, hz: f64) -> Self {
        self.frequency = hz;
        self
    }

    /// Amplitude in volts (half of peak-to-peak)
    pub fn amplitude(mut self, volts: f64) -> Self {
        self.amplitude = volts;
        self
    }

    /// DC offset in volts
    pub fn offset(mut self, volts: f64) -> Self {
        self.offset = volts;
        self
    }

    pub fn time_scale(mut self, scale: f64) -> Self {
        self.time_scale = scale;
        self
    }

    pub fn cursors(mut self, cursor1: f64, cursor2: f64) -> Self {
        self.cursors = (cursor1, cursor2);
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn mode(mut self, mode: RunMode) -> Self {
        self.mode = mode;
        self
    }

    /// Validate every value and create the session.
    pub fn build(self) -> Result<ScopeSession> {
        let settings = Settings::from_config(&self)?;
        let synth = make_synth(self.seed);
        Ok(ScopeSession {
            config: self,
            settings,
            synth,
            latest: None,
            frames_captured: 0,
        })
    }
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy)]
struct Settings {
    spec: WaveformSpec,
    time_scale: TimeScale,
    cursors: CursorPair,
    mode: RunMode,
}

impl Settings {
    fn from_config(config: &ScopeConfig) -> Result<Self> {
        Ok(Self {
            spec: WaveformSpec::new(
                config.waveform,
                config.frequency,
                config.amplitude,
                config.offset,
            )?,
            time_scale: TimeScale::new(config.time_scale)?,
            cursors: CursorPair::new(config.cursors.0, config.cursors.1)?,
            mode: config.mode,
        })
    }
}

fn make_synth(seed: Option<u64>) -> Synthesizer {
    match seed {
        Some(seed) => Synthesizer::seeded(seed),
        None => Synthesizer::new(),
    }
}

/// Owned scope state: current settings, run mode and the latest frame.
pub struct ScopeSession {
    config: ScopeConfig,
    settings: Settings,
    synth: Synthesizer,
    latest: Option<Frame>,
    frames_captured: u64,
}

impl ScopeSession {
    pub fn spec(&self) -> WaveformSpec {
        self.settings.spec
    }

    pub fn time_scale(&self) -> TimeScale {
        self.settings.time_scale
    }

    pub fn cursors(&self) -> CursorPair {
        self.settings.cursors
    }

    pub fn mode(&self) -> RunMode {
        self.settings.mode
    }

    pub fn frames_captured(&self) -> u64 {
        self.frames_captured
    }

    /// Most recent frame, kept while stopped.
    pub fn latest(&self) -> Option<&Frame> {
        self.latest.as_ref()
    }

    /// Cursor readout over the currently visible window, in seconds.
    pub fn cursor_delta(&self) -> CursorDelta {
        self.settings
            .cursors
            .delta(self.settings.time_scale.window_length())
    }

    pub fn status(&self) -> ScopeStatus {
        ScopeStatus {
            mode: self.settings.mode,
            spec: self.settings.spec,
            time_scale: self.settings.time_scale,
            cursors: self.settings.cursors,
            cursor_delta: self.cursor_delta(),
            frames_captured: self.frames_captured,
        }
    }

    /// Advance one timer tick.
    ///
    /// Returns the freshly captured frame, or `None` when stopped.
    pub fn tick(&mut self) -> Option<&Frame> {
        match self.settings.mode {
            RunMode::Stopped => return None,
            RunMode::Running => {}
            RunMode::Single => {
                self.settings.mode = RunMode::Stopped;
                info!("single capture complete, acquisition stopped");
            }
        }
        Some(self.capture())
    }

    fn capture(&mut self) -> &Frame {
        let spec = self.settings.spec;
        let samples = self.synth.render(&spec);
        let measurements = extract_measurements(&samples);
        self.frames_captured += 1;
        debug!(
            "frame {}: vpp={:.4} V vrms={:.4} V f={:.2} Hz",
            self.frames_captured,
            measurements.peak_to_peak,
            measurements.rms,
            measurements.estimated_frequency
        );
        self.latest.insert(Frame {
            sequence: self.frames_captured,
            spec,
            samples,
            measurements,
        })
    }

    /// Apply a control message.
    ///
    /// Invalid values are rejected and leave the session untouched.
    pub fn apply(&mut self, message: ControlMessage) -> Result<()> {
        match message {
            ControlMessage::Run => self.settings.mode = RunMode::Running,
            ControlMessage::Stop => self.settings.mode = RunMode::Stopped,
            ControlMessage::Single => self.settings.mode = RunMode::Single,
            ControlMessage::Reset => {
                self.settings = Settings::from_config(&self.config)?;
                self.synth = make_synth(self.config.seed);
                self.latest = None;
                self.frames_captured = 0;
            }
            ControlMessage::SetWaveform(kind) => {
                self.settings.spec = self.settings.spec.with_kind(kind)
            }
            ControlMessage::SetFrequency(hz) => {
                self.settings.spec = self.settings.spec.with_frequency(hz)?
            }
            ControlMessage::SetAmplitude(volts) => {
                self.settings.spec = self.settings.spec.with_amplitude(volts)?
            }
            ControlMessage::SetOffset(volts) => {
                self.settings.spec = self.settings.spec.with_offset(volts)?
            }
            ControlMessage::NextWaveform => {
                self.settings.spec = self.settings.spec.with_kind(self.settings.spec.kind().next())
            }
            ControlMessage::ScaleFrequency(factor) => {
                let hz = self.settings.spec.frequency() * factor;
                self.settings.spec = self.settings.spec.with_frequency(hz)?
            }
            ControlMessage::AdjustAmplitude(volts) => {
                let amplitude = (self.settings.spec.amplitude() + volts).max(0.0);
                self.settings.spec = self.settings.spec.with_amplitude(amplitude)?
            }
            ControlMessage::AdjustOffset(volts) => {
                let offset = self.settings.spec.offset() + volts;
                self.settings.spec = self.settings.spec.with_offset(offset)?
            }
            ControlMessage::SetTimeScale(scale) => {
                self.settings.time_scale = TimeScale::new(scale)?
            }
            ControlMessage::ZoomIn => self.settings.time_scale = self.settings.time_scale.zoom_in(),
            ControlMessage::ZoomOut => {
                self.settings.time_scale = self.settings.time_scale.zoom_out()
            }
            ControlMessage::SetCursors(c1, c2) => self.settings.cursors = CursorPair::new(c1, c2)?,
            ControlMessage::NudgeCursor(which, step) => {
                self.settings.cursors = self.settings.cursors.nudged(which, step)
            }
        }
        if message.is_run_control() {
            info!("applied {message:?}");
        } else {
            debug!("applied {message:?}");
        }
        Ok(())
    }
}
