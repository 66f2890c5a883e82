//! What a finished run hands to reporting code.

use bt_core::{Minute, RouteConfig};
use bt_fleet::{Bus, CompletedTrip, Passenger, WaitingPassenger};

use crate::{Metrics, MetricsSummary};

/// Why the event loop stopped.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StopReason {
    /// Still running (or never run).
    #[default]
    Running,
    /// No events were left.
    QueueEmpty,
    /// The next event was at or past the horizon and was discarded.
    Horizon,
}

/// Event-loop bookkeeping.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunStats {
    pub events_processed: u64,
    /// Time of the last processed event.
    pub final_time:       Minute,
    pub stop_reason:      StopReason,
}

/// The engine's output records: every completed trip, every bus with its
/// visit history, passengers left waiting, and the metrics.
///
/// Times are raw minutes since simulation start; formatting is left to the
/// reporting layer.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimOutcome {
    pub config:        RouteConfig,
    pub stats:         RunStats,
    /// Completed trips in alighting order.
    pub trips:         Vec<CompletedTrip>,
    /// Every bus that departed, in bus-id order.
    pub buses:         Vec<Bus>,
    /// Passengers still queued at shutdown, stop by stop.
    pub still_waiting: Vec<WaitingPassenger>,
    pub metrics:       Metrics,
    pub summary:       MetricsSummary,
}

impl SimOutcome {
    /// Every passenger the run created, at their final stage, by id.
    pub fn passengers(&self) -> Vec<Passenger> {
        let mut all: Vec<Passenger> = self
            .trips
            .iter()
            .copied()
            .map(Passenger::Alighted)
            .chain(self.buses.iter().flat_map(|b| b.onboard().iter().copied().map(Passenger::Boarded)))
            .chain(self.still_waiting.iter().copied().map(Passenger::Waiting))
            .collect();
        all.sort_by_key(Passenger::id);
        all
    }
}
