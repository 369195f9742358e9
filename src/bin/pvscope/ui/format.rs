//! Engineering-unit formatting for readouts

/// Seconds as s / ms / µs, whichever keeps the mantissa readable.
pub fn format_time(seconds: f64) -> String {
    let abs = seconds.abs();
    if abs == 0.0 {
        "0 s".to_string()
    } else if abs >= 1.0 {
        format!("{seconds:.3} s")
    } else if abs >= 1e-3 {
        format!("{:.3} ms", seconds * 1e3)
    } else {
        format!("{:.1} µs", seconds * 1e6)
    }
}

/// Hz / kHz; "--" when there is nothing to show.
pub fn format_frequency(hz: f64) -> String {
    if hz <= 0.0 {
        "--".to_string()
    } else if hz >= 1e3 {
        format!("{:.3} kHz", hz / 1e3)
    } else {
        format!("{hz:.2} Hz")
    }
}
