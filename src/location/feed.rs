//! Recorded session feed
//!
//! One JSON object per line, tagged by `event`. Blank lines and lines
//! starting with `#` are skipped.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::io::BufRead;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    /// Map tap translated to coordinates
    Tap { lat: f64, lon: f64 },
    /// Location sample from the position watch
    Position { lat: f64, lon: f64 },
    StartDrawing,
    FinishDrawing,
    ToggleDrawing,
    Clear,
    Center,
}

/// Parse a whole feed from a reader
pub fn parse_feed<R: BufRead>(reader: R) -> Result<Vec<SessionEvent>> {
    let mut events = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.with_context(|| format!("Failed to read feed line {}", line_no))?;
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let event: SessionEvent = serde_json::from_str(trimmed)
            .with_context(|| format!("Invalid event on line {}: {}", line_no, trimmed))?;
        events.push(event);
    }

    Ok(events)
}

/// Read a feed file from disk
pub fn read_feed(path: &Path) -> Result<Vec<SessionEvent>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open session file: {:?}", path))?;
    parse_feed(std::io::BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::tempdir;

    #[test]
    fn test_parse_all_event_kinds() {
        let feed = r#"
# draw a triangle
{"event":"start_drawing"}
{"event":"tap","lat":1.0,"lon":2.0}
{"event":"toggle_drawing"}
{"event":"finish_drawing"}
{"event":"clear"}
{"event":"position","lat":-3.5,"lon":4.25}
{"event":"center"}
"#;

        let events = parse_feed(Cursor::new(feed)).unwrap();
        assert_eq!(
            events,
            vec![
                SessionEvent::StartDrawing,
                SessionEvent::Tap { lat: 1.0, lon: 2.0 },
                SessionEvent::ToggleDrawing,
                SessionEvent::FinishDrawing,
                SessionEvent::Clear,
                SessionEvent::Position {
                    lat: -3.5,
                    lon: 4.25
                },
                SessionEvent::Center,
            ]
        );
    }

    #[test]
    fn test_bad_line_reports_line_number() {
        let feed = "{\"event\":\"clear\"}\n\n{\"event\":\"teleport\"}\n";
        let err = parse_feed(Cursor::new(feed)).unwrap_err();
        assert!(err.to_string().contains("line 3"), "got: {}", err);
    }

    #[test]
    fn test_missing_coordinate_is_error() {
        let feed = r#"{"event":"tap","lat":1.0}"#;
        assert!(parse_feed(Cursor::new(feed)).is_err());
    }

    #[test]
    fn test_read_feed_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.jsonl");
        std::fs::write(&path, "{\"event\":\"start_drawing\"}\n").unwrap();

        let events = read_feed(&path).unwrap();
        assert_eq!(events, vec![SessionEvent::StartDrawing]);
    }

    #[test]
    fn test_read_feed_missing_file() {
        let dir = tempdir().unwrap();
        assert!(read_feed(&dir.path().join("nope.jsonl")).is_err());
    }
}
