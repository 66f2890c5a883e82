//! Simulation observer trait for progress reporting and data collection.

use bt_core::{BusId, Minute};
use bt_fleet::{Bus, StopVisit, WaitingPassenger};
use bt_schedule::Event;

/// Callbacks invoked by [`Sim::step`][crate::Sim::step] as events are
/// processed.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.  [`Metrics`][crate::Metrics] is itself an
/// observer; the driver feeds it the same calls.
///
/// # Example: bus tracker
///
/// ```rust,ignore
/// struct LoadPrinter;
///
/// impl SimObserver for LoadPrinter {
///     fn on_stop_visit(&mut self, bus: BusId, visit: &StopVisit) {
///         println!("{bus} left {} with {} aboard", visit.stop, visit.load);
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called for every event popped before the horizon, before it is
    /// handled.
    fn on_event(&mut self, _event: &Event) {}

    /// Called when a bus record is created at its first arrival at stop 0.
    fn on_bus_departure(&mut self, _bus: &Bus) {}

    /// Called after `passenger` joined its origin queue; `queue_len` is the
    /// queue length including them.
    fn on_passenger_arrival(&mut self, _passenger: &WaitingPassenger, _queue_len: usize) {}

    /// Called after a bus finished alighting and boarding at a stop.
    fn on_stop_visit(&mut self, _bus: BusId, _visit: &StopVisit) {}

    /// Called once when the run stops (empty queue or horizon reached).
    fn on_sim_end(&mut self, _final_time: Minute) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
