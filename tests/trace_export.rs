use pvrsd_scope::{
    extract_measurements,
    io::{export_trace, import_trace},
    ScopeConfig, ScopeError, WaveformKind,
};
use tempfile::tempdir;

#[test]
fn exported_trace_measures_the_same() {
    let mut scope = ScopeConfig::new()
        .waveform(WaveformKind::Triangle)
        .frequency(400.0)
        .amplitude(1.5)
        .offset(0.25)
        .build()
        .unwrap();
    let frame = scope.tick().unwrap().clone();

    let dir = tempdir().unwrap();
    let path = dir.path().join("trace.csv");
    export_trace(&path, &frame.samples).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("time,voltage\n"));
    assert_eq!(text.lines().count(), frame.samples.len() + 1);

    let imported = import_trace(&path).unwrap();
    assert_eq!(imported, frame.samples);
    assert_eq!(extract_measurements(&imported), frame.measurements);
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempdir().unwrap();
    let err = import_trace(dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, ScopeError::Io(_)));
}
