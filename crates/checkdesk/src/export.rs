//! Tabular export of the check-in log.
//!
//! Writes the log as CSV with header `dni,nombre,checkin`, the layout the
//! original attendance sheet consumers expect.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::checkin::CheckinEvent;
use crate::error::{Error, Result};

/// Write events as CSV into any writer.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_csv<W: Write>(events: &[CheckinEvent], writer: W) -> std::result::Result<(), csv::Error> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(["dni", "nombre", "checkin"])?;
    for event in events {
        out.write_record([
            event.dni.as_str(),
            event.nombre.as_str(),
            event.timestamp_str().as_str(),
        ])?;
    }
    out.flush()?;
    Ok(())
}

/// Write events as CSV to a file, creating or truncating it.
///
/// # Errors
///
/// Returns an error if the file cannot be created or writing fails.
pub fn write_file(events: &[CheckinEvent], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_csv(events, file).map_err(|source| Error::export(path, source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_events() -> Vec<CheckinEvent> {
        let ts = |h, m, s| {
            NaiveDate::from_ymd_opt(2024, 3, 1)
                .unwrap()
                .and_hms_opt(h, m, s)
                .unwrap()
        };
        vec![
            CheckinEvent::at("123", "Juan", ts(10, 0, 0)),
            CheckinEvent::at("00456", "Ana", ts(10, 0, 5)),
        ]
    }

    #[test]
    fn test_write_csv_header_and_rows() {
        let mut buf = Vec::new();
        write_csv(&sample_events(), &mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "dni,nombre,checkin");
        assert_eq!(lines[1], "123,Juan,2024-03-01 10:00:00");
        assert_eq!(lines[2], "00456,Ana,2024-03-01 10:00:05");
    }

    #[test]
    fn test_write_csv_empty_log() {
        let mut buf = Vec::new();
        write_csv(&[], &mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.trim(), "dni,nombre,checkin");
    }

    #[test]
    fn test_write_file() {
        let path = std::env::temp_dir().join(format!(
            "checkdesk_export_test_{}.csv",
            std::process::id()
        ));

        write_file(&sample_events(), &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("dni,nombre,checkin"));
        assert!(text.contains("123,Juan,2024-03-01 10:00:00"));

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_fields_needing_quotes_survive() {
        let ts = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        let events = vec![CheckinEvent::at("123", "Juan, Jr.", ts)];

        let mut buf = Vec::new();
        write_csv(&events, &mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("\"Juan, Jr.\""));
    }
}
