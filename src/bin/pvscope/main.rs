//! pvscope - simulated oscilloscope for PV rapid-shutdown device testing
//!
//! Run with: cargo run -- live

mod app;
mod capture;
mod config;
mod ui;

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{Result as EyreResult, WrapErr};
use pvrsd_scope::{RunMode, ScopeConfig, WaveformKind};

use app::ScopeApp;
use config::FileConfig;

/// pvscope - waveform synthesis, measurements and cursors
#[derive(Parser)]
#[command(name = "pvscope")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive terminal scope
    Live {
        #[command(flatten)]
        scope: ScopeArgs,
    },

    /// Run the acquisition headless and print measurements
    Capture {
        #[command(flatten)]
        scope: ScopeArgs,

        /// Number of frames to capture
        #[arg(short = 'n', long, default_value = "10")]
        frames: u64,

        /// Export the last captured trace as time,voltage CSV
        #[arg(long, value_name = "FILE")]
        csv: Option<PathBuf>,
    },

    /// Measure a previously exported trace
    Measure {
        /// Trace CSV (time,voltage)
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
}

/// Scope settings shared by `live` and `capture`
#[derive(Args, Default)]
struct ScopeArgs {
    /// TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// sine, square, triangle, sawtooth or noise
    #[arg(short, long)]
    waveform: Option<WaveformKind>,

    /// Frequency in Hz
    #[arg(short, long)]
    frequency: Option<f64>,

    /// Amplitude in volts
    #[arg(short, long)]
    amplitude: Option<f64>,

    /// DC offset in volts
    #[arg(short, long, allow_hyphen_values = true)]
    offset: Option<f64>,

    /// Display zoom factor (0.1 - 10)
    #[arg(short, long)]
    time_scale: Option<f64>,

    /// Seed for the noise generator
    #[arg(long)]
    seed: Option<u64>,

    /// Milliseconds between acquisitions
    #[arg(long)]
    interval_ms: Option<u64>,
}

impl ScopeArgs {
    /// Config file (if any) with command-line overrides applied.
    fn resolve(self) -> EyreResult<(ScopeConfig, Duration)> {
        let file = match &self.config {
            Some(path) => FileConfig::from_file(path)?,
            None => FileConfig::default(),
        };

        let mut scope = file.scope;
        if let Some(kind) = self.waveform {
            scope = scope.waveform(kind);
        }
        if let Some(hz) = self.frequency {
            scope = scope.frequency(hz);
        }
        if let Some(volts) = self.amplitude {
            scope = scope.amplitude(volts);
        }
        if let Some(volts) = self.offset {
            scope = scope.offset(volts);
        }
        if let Some(scale) = self.time_scale {
            scope = scope.time_scale(scale);
        }
        if let Some(seed) = self.seed {
            scope = scope.seed(seed);
        }

        let interval = match self.interval_ms {
            Some(ms) => config::tick_interval(ms)?,
            None => file.acquisition.interval()?,
        };
        Ok((scope, interval))
    }
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    match cli.command.unwrap_or(Commands::Live {
        scope: ScopeArgs::default(),
    }) {
        Commands::Live { scope } => run_live(scope),
        Commands::Capture { scope, frames, csv } => {
            let (config, interval) = scope.resolve()?;
            // Headless runs always acquire, whatever the file says.
            let session = config
                .mode(RunMode::Running)
                .build()
                .wrap_err("invalid scope settings")?;
            capture::run(session, interval, frames, csv.as_deref())
        }
        Commands::Measure { input } => capture::measure(&input),
    }
}

fn run_live(args: ScopeArgs) -> EyreResult<()> {
    let (config, interval) = args.resolve()?;
    let session = config.build().wrap_err("invalid scope settings")?;

    let mut terminal = ratatui::init();
    let result = ScopeApp::new(session, interval).run(&mut terminal);
    ratatui::restore();
    result
}
