//! Two-column `time,voltage` trace files.
//!
//! One header row, then one record per sample with times in seconds and
//! voltages in volts. Values are written with the shortest representation that
//! parses back to the same `f64`.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use log::info;

use crate::dsp::waveform::Sample;
use crate::error::{Result, ScopeError};

pub const TRACE_HEADER: [&str; 2] = ["time", "voltage"];

/// Write `samples` as CSV to `writer`.
pub fn write_trace<W: Write>(writer: W, samples: &[Sample]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(TRACE_HEADER)?;
    for sample in samples {
        csv_writer.write_record([sample.time.to_string(), sample.voltage.to_string()])?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write `samples` to a new file at `path`, replacing any existing file.
pub fn export_trace<P: AsRef<Path>>(path: P, samples: &[Sample]) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_trace(BufWriter::new(file), samples)?;
    info!("exported {} samples to {}", samples.len(), path.display());
    Ok(())
}

/// Parse a trace written by [`write_trace`].
///
/// The header must name the `time` and `voltage` columns (case-insensitive);
/// every record must hold exactly two finite numbers.
pub fn read_trace<R: Read>(reader: R) -> Result<Vec<Sample>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|h| h.to_lowercase())
        .collect();
    if headers.len() != 2 || headers[0] != TRACE_HEADER[0] || headers[1] != TRACE_HEADER[1] {
        return Err(ScopeError::MalformedTrace {
            record: 0,
            reason: format!("expected header 'time,voltage', found '{}'", headers.join(",")),
        });
    }

    let mut samples = Vec::new();
    for (index, record) in csv_reader.records().enumerate() {
        let record = record?;
        let record_no = index + 1;
        if record.len() != 2 {
            return Err(ScopeError::MalformedTrace {
                record: record_no,
                reason: format!("expected 2 fields, found {}", record.len()),
            });
        }
        let time = parse_field(&record[0], "time", record_no)?;
        let voltage = parse_field(&record[1], "voltage", record_no)?;
        samples.push(Sample::new(time, voltage));
    }
    Ok(samples)
}

/// Read a trace file from `path`.
pub fn import_trace<P: AsRef<Path>>(path: P) -> Result<Vec<Sample>> {
    let path = path.as_ref();
    let samples = read_trace(BufReader::new(File::open(path)?))?;
    info!("imported {} samples from {}", samples.len(), path.display());
    Ok(samples)
}

fn parse_field(value: &str, column: &str, record: usize) -> Result<f64> {
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ScopeError::MalformedTrace {
            record,
            reason: format!("{column} '{value}' is not a finite number"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_header_and_rows() {
        let samples = [Sample::new(0.0, 1.5), Sample::new(0.00001, -0.25)];
        let mut out = Vec::new();
        write_trace(&mut out, &samples).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "time,voltage\n0,1.5\n0.00001,-0.25\n");
    }

    #[test]
    fn empty_trace_is_header_only() {
        let mut out = Vec::new();
        write_trace(&mut out, &[]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "time,voltage\n");
        assert!(read_trace("time,voltage\n".as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn reads_back_exact_values() {
        let samples = [
            Sample::new(0.0, 0.1 + 0.2),
            Sample::new(1.0 / 3.0, -std::f64::consts::PI),
        ];
        let mut out = Vec::new();
        write_trace(&mut out, &samples).unwrap();
        assert_eq!(read_trace(out.as_slice()).unwrap(), samples);
    }

    #[test]
    fn rejects_wrong_header() {
        let err = read_trace("t,v\n0,1\n".as_bytes()).unwrap_err();
        assert!(matches!(err, ScopeError::MalformedTrace { record: 0, .. }));
    }

    #[test]
    fn reports_bad_record_number() {
        let input = "time,voltage\n0,1\n0.1,abc\n";
        match read_trace(input.as_bytes()) {
            Err(ScopeError::MalformedTrace { record, reason }) => {
                assert_eq!(record, 2);
                assert!(reason.contains("voltage"));
            }
            other => panic!("expected malformed trace, got {other:?}"),
        }
    }

    #[test]
    fn reports_wrong_field_count() {
        for (input, found) in [
            ("time,voltage\n0,1\n0.1,2,3\n", 3),
            ("time,voltage\n0,1\n0.1\n", 1),
        ] {
            match read_trace(input.as_bytes()) {
                Err(ScopeError::MalformedTrace { record, reason }) => {
                    assert_eq!(record, 2);
                    assert_eq!(reason, format!("expected 2 fields, found {found}"));
                }
                other => panic!("expected malformed trace, got {other:?}"),
            }
        }
    }

    #[test]
    fn rejects_non_finite_values() {
        assert!(read_trace("time,voltage\n0,NaN\n".as_bytes()).is_err());
        assert!(read_trace("time,voltage\ninf,1\n".as_bytes()).is_err());
    }
}
