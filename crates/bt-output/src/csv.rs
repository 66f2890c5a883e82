//! CSV output backend.
//!
//! Creates four files in the configured output directory:
//! - `trips.csv`
//! - `stop_visits.csv`
//! - `queue_samples.csv`
//! - `summary.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{OutputResult, QueueSampleRow, StopVisitRow, SummaryRow, TripRow};

/// Writes simulation output to four CSV files.
pub struct CsvWriter {
    trips:    Writer<File>,
    visits:   Writer<File>,
    samples:  Writer<File>,
    summary:  Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open the four CSV files in it and write the
    /// header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut trips = Writer::from_path(dir.join("trips.csv"))?;
        trips.write_record([
            "passenger_id", "bus_id", "board_stop", "alight_stop", "arrival_time",
            "board_time", "alight_time", "waiting_time", "travel_time", "total_time",
        ])?;

        let mut visits = Writer::from_path(dir.join("stop_visits.csv"))?;
        visits.write_record([
            "bus_id", "stop", "arrival_time", "boarded", "alighted", "left_waiting", "load",
        ])?;

        let mut samples = Writer::from_path(dir.join("queue_samples.csv"))?;
        samples.write_record(["time", "stop", "len"])?;

        let mut summary = Writer::from_path(dir.join("summary.csv"))?;
        summary.write_record([
            "final_time", "passengers_arrived", "total_boarded", "total_served",
            "average_waiting_time", "average_travel_time", "average_queue_size", "max_queue_size",
        ])?;

        log::debug!("csv output opened in {}", dir.display());
        Ok(Self { trips, visits, samples, summary, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_trips(&mut self, rows: &[TripRow]) -> OutputResult<()> {
        for row in rows {
            self.trips.write_record(&[
                row.passenger_id.to_string(),
                row.bus_id.to_string(),
                row.board_stop.to_string(),
                row.alight_stop.to_string(),
                row.arrival_time.to_string(),
                row.board_time.to_string(),
                row.alight_time.to_string(),
                row.waiting_time.to_string(),
                row.travel_time.to_string(),
                row.total_time.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_visits(&mut self, rows: &[StopVisitRow]) -> OutputResult<()> {
        for row in rows {
            self.visits.write_record(&[
                row.bus_id.to_string(),
                row.stop.to_string(),
                row.arrival_time.to_string(),
                row.boarded.to_string(),
                row.alighted.to_string(),
                row.left_waiting.to_string(),
                row.load.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_queue_samples(&mut self, rows: &[QueueSampleRow]) -> OutputResult<()> {
        for row in rows {
            self.samples.write_record(&[
                row.time.to_string(),
                row.stop.to_string(),
                row.len.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_summary(&mut self, row: &SummaryRow) -> OutputResult<()> {
        self.summary.write_record(&[
            row.final_time.to_string(),
            row.passengers_arrived.to_string(),
            row.total_boarded.to_string(),
            row.total_served.to_string(),
            format!("{:.3}", row.average_waiting_time),
            format!("{:.3}", row.average_travel_time),
            format!("{:.3}", row.average_queue_size),
            row.max_queue_size.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.trips.flush()?;
        self.visits.flush()?;
        self.samples.flush()?;
        self.summary.flush()?;
        Ok(())
    }
}
