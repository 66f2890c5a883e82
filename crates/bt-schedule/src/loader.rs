//! CSV traffic-window loader.
//!
//! # CSV format
//!
//! One row per window.  Bounds are `HH:MM` clock strings or bare
//! minute-of-day integers; windows are half-open `[start, end)` and must not
//! wrap midnight.
//!
//! ```csv
//! start,end
//! 07:00,09:00
//! 17:00,19:00
//! 720,780
//! ```

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use bt_core::{TrafficWindow, parse_hhmm};

use crate::ScheduleError;

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct WindowRecord {
    start: String,
    end:   String,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load traffic windows from a CSV file.
pub fn load_traffic_windows_csv(path: &Path) -> Result<Vec<TrafficWindow>, ScheduleError> {
    let file = std::fs::File::open(path).map_err(ScheduleError::Io)?;
    load_traffic_windows_reader(file)
}

/// Like [`load_traffic_windows_csv`] but accepts any `Read` source.
///
/// Every window is validated; the first malformed row aborts the load.
pub fn load_traffic_windows_reader<R: Read>(reader: R) -> Result<Vec<TrafficWindow>, ScheduleError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut windows = Vec::new();

    for (line, result) in csv_reader.deserialize::<WindowRecord>().enumerate() {
        let row = result.map_err(|e| ScheduleError::Parse(e.to_string()))?;
        let window = TrafficWindow::new(parse_bound(&row.start, line)?, parse_bound(&row.end, line)?);
        window.validate()?;
        windows.push(window);
    }

    Ok(windows)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_bound(s: &str, line: usize) -> Result<u32, ScheduleError> {
    parse_hhmm(s).map_err(|e| ScheduleError::Parse(format!("row {}: {e}", line + 1)))
}
