//! The `OutputWriter` trait implemented by all backend writers.

use crate::{OutputResult, QueueSampleRow, StopVisitRow, SummaryRow, TripRow};
use bt_sim::SimOutcome;

/// A sink for the four output tables.
///
/// Errors are returned to the caller; [`SimOutputObserver`][crate::SimOutputObserver]
/// stores them for [`take_error`][crate::SimOutputObserver::take_error]
/// because observer hooks cannot fail.
pub trait OutputWriter {
    fn write_trips(&mut self, rows: &[TripRow]) -> OutputResult<()>;

    fn write_visits(&mut self, rows: &[StopVisitRow]) -> OutputResult<()>;

    fn write_queue_samples(&mut self, rows: &[QueueSampleRow]) -> OutputResult<()>;

    fn write_summary(&mut self, row: &SummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}

/// Write a finished run in one go, then call `finish`.
///
/// Produces the same tables a [`SimOutputObserver`][crate::SimOutputObserver]
/// would have streamed, except that visits are grouped by bus rather than
/// in event order.
pub fn write_outcome<W: OutputWriter>(writer: &mut W, outcome: &SimOutcome) -> OutputResult<()> {
    let trips: Vec<TripRow> = outcome.trips.iter().map(TripRow::from).collect();
    writer.write_trips(&trips)?;

    let visits: Vec<StopVisitRow> = outcome
        .buses
        .iter()
        .flat_map(|bus| bus.visits().iter().map(|v| StopVisitRow::new(bus.id, v)))
        .collect();
    writer.write_visits(&visits)?;

    let samples: Vec<QueueSampleRow> =
        outcome.metrics.queue_samples.iter().map(QueueSampleRow::from).collect();
    writer.write_queue_samples(&samples)?;

    writer.write_summary(&SummaryRow::new(outcome.stats.final_time.0, &outcome.summary))?;
    writer.finish()
}
