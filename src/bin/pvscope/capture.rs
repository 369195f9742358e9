//! Headless acquisition and offline measurement

use std::path::Path;
use std::thread;
use std::time::Duration;

use color_eyre::eyre::{bail, eyre, Result as EyreResult, WrapErr};
use log::info;
use pvrsd_scope::{
    dsp::count_zero_crossings,
    extract_measurements,
    io::{export_trace, import_trace},
    runtime::Acquisition,
    Frame, MeasurementSet, ScopeSession,
};

use crate::ui::format::{format_frequency, format_time};

/// Run the acquisition thread until `frames` frames have arrived.
pub fn run(
    session: ScopeSession,
    interval: Duration,
    frames: u64,
    csv: Option<&Path>,
) -> EyreResult<()> {
    check_request(frames, csv)?;
    let spec = session.spec();
    println!("=== pvscope capture ===");
    println!(
        "Waveform: {} {}  amplitude {:.3} V  offset {:.3} V",
        spec.kind(),
        format_frequency(spec.frequency()),
        spec.amplitude(),
        spec.offset()
    );
    println!("Interval: {} ms", interval.as_millis());
    println!();
    println!(
        "{:>6}  {:>12}  {:>12}  {:>12}  {:>12}",
        "frame", "Vpp", "Vrms", "freq", "period"
    );

    let mut acquisition = Acquisition::spawn(session, interval);
    let mut last: Option<Frame> = None;
    let mut received = 0;
    while received < frames {
        match acquisition.try_recv_frame() {
            Some(frame) => {
                print_row(frame.sequence, &frame.measurements);
                received += 1;
                last = Some(frame);
            }
            None if acquisition.is_finished() => {
                return Err(eyre!("acquisition stopped after {received} frames"));
            }
            None => thread::sleep(interval.min(Duration::from_millis(10))),
        }
    }
    acquisition
        .shutdown()
        .map_err(|_| eyre!("acquisition worker panicked"))?;

    if let (Some(path), Some(frame)) = (csv, last.as_ref()) {
        export_trace(path, &frame.samples)
            .wrap_err_with(|| format!("failed to export trace to {}", path.display()))?;
        println!();
        println!("Trace written to {}", path.display());
    }
    info!("capture finished after {received} frames");
    Ok(())
}

/// An export needs at least one captured frame.
fn check_request(frames: u64, csv: Option<&Path>) -> EyreResult<()> {
    if frames == 0 {
        if let Some(path) = csv {
            bail!("--frames 0 captures nothing to write to {}", path.display());
        }
    }
    Ok(())
}

/// Import a trace file and print its measurements.
pub fn measure(input: &Path) -> EyreResult<()> {
    let samples = import_trace(input)
        .wrap_err_with(|| format!("failed to read trace {}", input.display()))?;
    let m = extract_measurements(&samples);

    println!("=== {} ===", input.display());
    println!("Samples:        {}", samples.len());
    if let (Some(first), Some(last)) = (samples.first(), samples.last()) {
        println!("Span:           {}", format_time(last.time - first.time));
    }
    println!("Zero crossings: {}", count_zero_crossings(&samples));
    println!("Vpp:            {:.4} V", m.peak_to_peak);
    println!("Vrms:           {:.4} V", m.rms);
    println!("Frequency:      {}", format_frequency(m.estimated_frequency));
    println!("Period:         {}", format_time(m.estimated_period));
    Ok(())
}

fn print_row(sequence: u64, m: &MeasurementSet) {
    println!(
        "{:>6}  {:>10.4} V  {:>10.4} V  {:>12}  {:>12}",
        sequence,
        m.peak_to_peak,
        m.rms,
        format_frequency(m.estimated_frequency),
        format_time(m.estimated_period)
    );
}
