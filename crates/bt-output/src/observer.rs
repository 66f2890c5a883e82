//! `SimOutputObserver<W>` bridges `SimObserver` to an `OutputWriter`.

use bt_core::{BusId, Minute};
use bt_fleet::{Bus, StopVisit, WaitingPassenger};
use bt_sim::{Metrics, SimObserver};

use crate::row::{QueueSampleRow, StopVisitRow, SummaryRow, TripRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that streams stop visits, completed trips and queue
/// samples to any [`OutputWriter`] as the run progresses, and writes the
/// summary row when the run ends.
///
/// The summary comes from a private [`Metrics`] fed the same callbacks, so
/// the observer needs nothing from the `Sim` itself.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    metrics:    Metrics,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, metrics: Metrics::new(), last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                log::warn!("output write failed: {e}");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_bus_departure(&mut self, bus: &Bus) {
        self.metrics.on_bus_departure(bus);
    }

    fn on_passenger_arrival(&mut self, passenger: &WaitingPassenger, queue_len: usize) {
        self.metrics.on_passenger_arrival(passenger, queue_len);
        let row = QueueSampleRow {
            time: passenger.arrival_time.0,
            stop: passenger.origin.0,
            len:  queue_len as u32,
        };
        let result = self.writer.write_queue_samples(&[row]);
        self.store_err(result);
    }

    fn on_stop_visit(&mut self, bus: BusId, visit: &StopVisit) {
        self.metrics.on_stop_visit(bus, visit);
        let result = self.writer.write_visits(&[StopVisitRow::new(bus, visit)]);
        self.store_err(result);

        if !visit.alighted.is_empty() {
            let trips: Vec<TripRow> = visit.alighted.iter().map(TripRow::from).collect();
            let result = self.writer.write_trips(&trips);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, end: Minute) {
        let row = SummaryRow::new(end.0, &self.metrics.summary());
        let result = self.writer.write_summary(&row);
        self.store_err(result);
        let result = self.writer.finish();
        self.store_err(result);
    }
}
