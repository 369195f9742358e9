#![cfg(feature = "rtrb")]

use std::thread;
use std::time::{Duration, Instant};

use pvrsd_scope::{runtime::Acquisition, ControlMessage, RunMode, ScopeConfig, WaveformKind};

const TICK: Duration = Duration::from_millis(5);

/// Poll `f` until it yields a value or two seconds pass.
fn wait_for<T>(what: &str, mut f: impl FnMut() -> Option<T>) -> T {
    let deadline = Instant::now() + Duration::from_secs(2);
    loop {
        if let Some(value) = f() {
            return value;
        }
        assert!(Instant::now() < deadline, "timed out waiting for {what}");
        thread::sleep(Duration::from_millis(1));
    }
}

#[test]
fn delivers_frames_in_order() {
    let session = ScopeConfig::new().frequency(500.0).seed(1).build().unwrap();
    let mut acq = Acquisition::spawn(session, TICK);

    let mut sequences = Vec::new();
    while sequences.len() < 3 {
        let frame = wait_for("frame", || acq.try_recv_frame());
        assert_eq!(frame.samples.len(), pvrsd_scope::SAMPLE_COUNT);
        assert!((frame.measurements.peak_to_peak - 2.0).abs() < 1e-6);
        sequences.push(frame.sequence);
    }
    assert!(sequences.windows(2).all(|w| w[1] > w[0]));

    let session = acq.shutdown().unwrap();
    assert!(session.frames_captured() >= 3);
}

#[test]
fn stop_halts_frame_delivery() {
    let session = ScopeConfig::new().seed(2).build().unwrap();
    let mut acq = Acquisition::spawn(session, TICK);
    wait_for("first frame", || acq.try_recv_frame());

    acq.send(ControlMessage::Stop);
    wait_for("stopped status", || {
        acq.latest_status().filter(|s| s.mode == RunMode::Stopped)
    });
    while acq.try_recv_frame().is_some() {}

    thread::sleep(TICK * 10);
    assert!(acq.try_recv_frame().is_none());

    acq.send(ControlMessage::Single);
    let frame = wait_for("single frame", || acq.try_recv_frame());
    assert!(frame.sequence >= 2);
    acq.shutdown().unwrap();
}

#[test]
fn applies_valid_messages_and_skips_rejected_ones() {
    let session = ScopeConfig::new().frequency(250.0).seed(3).build().unwrap();
    let mut acq = Acquisition::spawn(session, TICK);

    acq.send(ControlMessage::SetFrequency(-1.0));
    acq.send(ControlMessage::SetWaveform(WaveformKind::Square));
    acq.send(ControlMessage::SetAmplitude(2.0));

    let status = wait_for("updated status", || {
        acq.latest_status().filter(|s| s.spec.amplitude() == 2.0)
    });
    assert_eq!(status.spec.kind(), WaveformKind::Square);
    assert_eq!(status.spec.frequency(), 250.0);

    let session = acq.shutdown().unwrap();
    assert_eq!(session.spec().kind(), WaveformKind::Square);
    assert_eq!(session.spec().frequency(), 250.0);
}

#[test]
fn dropping_the_handle_stops_the_worker() {
    let session = ScopeConfig::new().build().unwrap();
    let acq = Acquisition::spawn(session, TICK);
    assert!(!acq.is_finished());
    drop(acq);
}

#[test]
fn shutdown_interrupts_a_long_tick_wait() {
    let session = ScopeConfig::new().seed(4).build().unwrap();
    let mut acq = Acquisition::spawn(session, Duration::from_secs(30));
    wait_for("first frame", || acq.try_recv_frame());

    let started = Instant::now();
    let session = acq.shutdown().unwrap();
    assert!(
        started.elapsed() < Duration::from_secs(1),
        "shutdown took {:?}",
        started.elapsed()
    );
    assert_eq!(session.frames_captured(), 1);
}

#[test]
fn drop_interrupts_a_long_tick_wait() {
    let session = ScopeConfig::new().build().unwrap();
    let acq = Acquisition::spawn(session, Duration::from_secs(30));
    thread::sleep(Duration::from_millis(20));

    let started = Instant::now();
    drop(acq);
    assert!(started.elapsed() < Duration::from_secs(1));
}

#[test]
fn zero_interval_is_raised_to_the_minimum() {
    let session = ScopeConfig::new().seed(5).build().unwrap();
    let mut acq = Acquisition::spawn(session, Duration::ZERO);
    wait_for("frame", || acq.try_recv_frame());
    thread::sleep(Duration::from_millis(20));

    let session = acq.shutdown().unwrap();
    // 1 ms ticks over ~20 ms; an unthrottled loop would capture thousands.
    assert!(session.frames_captured() < 200, "{}", session.frames_captured());
}
