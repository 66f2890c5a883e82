//! Run-level metrics, accumulated purely from observer callbacks.

use bt_core::{BusId, Minute, StopId};
use bt_fleet::{Bus, StopVisit, WaitingPassenger};

use crate::SimObserver;

/// Queue length at one stop right after a passenger joined it.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueueSample {
    pub time: Minute,
    pub stop: StopId,
    pub len:  usize,
}

/// Counters and raw samples gathered while the simulation runs.
///
/// Waiting time is summed twice.  `total_waiting_boarded` grows when a
/// passenger boards and is what the reported average divides by
/// `total_served`; passengers still on board at shutdown count towards the
/// sum but not the divisor.  `total_waiting_served` grows when a passenger
/// alights and averages over completed trips only.  The raw
/// `waiting_samples` are recorded at boarding.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metrics {
    pub passengers_arrived:    u64,
    pub total_boarded:         u64,
    pub total_served:          u64,
    pub total_waiting_boarded: u64,
    pub total_waiting_served:  u64,
    pub total_travel:          u64,
    pub queue_samples:         Vec<QueueSample>,
    pub waiting_samples:       Vec<u64>,
    pub deviation_samples:     Vec<i64>,
}

/// The aggregate figures reported at the end of a run.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetricsSummary {
    pub passengers_arrived:          u64,
    pub total_boarded:               u64,
    pub total_served:                u64,
    /// Waiting summed at boarding over passengers served, in minutes; 0 if
    /// nobody was served.
    pub average_waiting_time:        f64,
    /// Mean waiting time of completed trips only; 0 if nobody was served.
    pub average_served_waiting_time: f64,
    /// Minutes; 0 if nobody was served.
    pub average_travel_time:         f64,
    /// 0 if no queue sample was recorded.
    pub average_queue_size:          f64,
    pub max_queue_size:              usize,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn average_waiting_time(&self) -> f64 {
        ratio(self.total_waiting_boarded, self.total_served)
    }

    pub fn average_served_waiting_time(&self) -> f64 {
        ratio(self.total_waiting_served, self.total_served)
    }

    pub fn average_travel_time(&self) -> f64 {
        ratio(self.total_travel, self.total_served)
    }

    pub fn average_queue_size(&self) -> f64 {
        let total: u64 = self.queue_samples.iter().map(|s| s.len as u64).sum();
        ratio(total, self.queue_samples.len() as u64)
    }

    pub fn max_queue_size(&self) -> usize {
        self.queue_samples.iter().map(|s| s.len).max().unwrap_or(0)
    }

    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            passengers_arrived:          self.passengers_arrived,
            total_boarded:               self.total_boarded,
            total_served:                self.total_served,
            average_waiting_time:        self.average_waiting_time(),
            average_served_waiting_time: self.average_served_waiting_time(),
            average_travel_time:         self.average_travel_time(),
            average_queue_size:          self.average_queue_size(),
            max_queue_size:              self.max_queue_size(),
        }
    }
}

impl SimObserver for Metrics {
    fn on_bus_departure(&mut self, bus: &Bus) {
        self.deviation_samples.push(bus.deviation);
    }

    fn on_passenger_arrival(&mut self, passenger: &WaitingPassenger, queue_len: usize) {
        self.passengers_arrived += 1;
        self.queue_samples.push(QueueSample {
            time: passenger.arrival_time,
            stop: passenger.origin,
            len:  queue_len,
        });
    }

    fn on_stop_visit(&mut self, _bus: BusId, visit: &StopVisit) {
        self.total_boarded += visit.boarded.len() as u64;
        for p in &visit.boarded {
            self.total_waiting_boarded += p.waiting_time;
            self.waiting_samples.push(p.waiting_time);
        }
        for trip in &visit.alighted {
            self.total_served += 1;
            self.total_waiting_served += trip.passenger.waiting_time;
            self.total_travel += trip.travel_time;
        }
    }
}

#[inline]
fn ratio(total: u64, count: u64) -> f64 {
    if count == 0 { 0.0 } else { total as f64 / count as f64 }
}
