//! `pvscope.toml` configuration file.
//!
//! ```toml
//! [scope]
//! waveform = "square"
//! frequency = 250.0
//! amplitude = 1.5
//! offset = 0.0
//! time_scale = 2.0
//! cursors = [0.1, 0.6]
//! seed = 42
//! mode = "running"
//!
//! [acquisition]
//! interval_ms = 100
//! ```
//!
//! Every key is optional; command-line flags override the file.

use std::path::Path;
use std::time::Duration;

use color_eyre::eyre::{bail, Result as EyreResult, WrapErr};
use pvrsd_scope::{
    runtime::{DEFAULT_TICK_INTERVAL, MIN_TICK_INTERVAL},
    ScopeConfig,
};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub scope: ScopeConfig,
    #[serde(default)]
    pub acquisition: AcquisitionConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AcquisitionConfig {
    /// Milliseconds between ticks.
    pub interval_ms: u64,
}

impl Default for AcquisitionConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_TICK_INTERVAL.as_millis() as u64,
        }
    }
}

impl AcquisitionConfig {
    pub fn interval(&self) -> EyreResult<Duration> {
        tick_interval(self.interval_ms)
    }
}

/// Tick interval from milliseconds, rejecting anything below the worker minimum.
pub fn tick_interval(ms: u64) -> EyreResult<Duration> {
    let interval = Duration::from_millis(ms);
    if interval < MIN_TICK_INTERVAL {
        bail!("tick interval must be at least {MIN_TICK_INTERVAL:?}, got {ms} ms");
    }
    Ok(interval)
}

impl FileConfig {
    pub fn from_file(path: &Path) -> EyreResult<Self> {
        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> EyreResult<Self> {
        toml::from_str(content).wrap_err("failed to parse TOML configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pvrsd_scope::{RunMode, WaveformKind};

    #[test]
    fn parses_full_config() {
        let toml = r#"
            [scope]
            waveform = "triangle"
            frequency = 250.0
            amplitude = 1.5
            offset = -0.5
            time_scale = 2.0
            cursors = [0.1, 0.6]
            seed = 42
            mode = "stopped"

            [acquisition]
            interval_ms = 50
        "#;

        let config = FileConfig::from_toml(toml).unwrap();
        assert_eq!(config.scope.waveform, WaveformKind::Triangle);
        assert_eq!(config.scope.frequency, 250.0);
        assert_eq!(config.scope.offset, -0.5);
        assert_eq!(config.scope.cursors, (0.1, 0.6));
        assert_eq!(config.scope.seed, Some(42));
        assert_eq!(config.scope.mode, RunMode::Stopped);
        assert_eq!(config.acquisition.interval().unwrap(), Duration::from_millis(50));
        assert!(config.scope.build().is_ok());
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let config = FileConfig::from_toml("[scope]\nfrequency = 60.0\n").unwrap();
        assert_eq!(config.scope.frequency, 60.0);
        assert_eq!(config.scope.waveform, WaveformKind::Sine);
        assert_eq!(config.scope.amplitude, 1.0);
        assert_eq!(config.acquisition.interval().unwrap(), DEFAULT_TICK_INTERVAL);
    }

    #[test]
    fn empty_config() {
        let config = FileConfig::from_toml("").unwrap();
        assert_eq!(config.scope, ScopeConfig::default());
    }

    #[test]
    fn rejects_zero_interval() {
        let config = FileConfig::from_toml("[acquisition]\ninterval_ms = 0\n").unwrap();
        assert!(config.acquisition.interval().is_err());
        assert!(tick_interval(0).is_err());
        assert_eq!(tick_interval(1).unwrap(), MIN_TICK_INTERVAL);
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(FileConfig::from_toml("[scope]\nfreq = 60.0\n").is_err());
    }
}
