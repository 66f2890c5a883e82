//! Plain data row types written by output backends.
//!
//! Times are raw minutes since simulation start.

use bt_core::BusId;
use bt_fleet::{CompletedTrip, StopVisit};
use bt_sim::{MetricsSummary, QueueSample};

/// One completed passenger journey.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TripRow {
    pub passenger_id: u32,
    pub bus_id:       u32,
    pub board_stop:   u16,
    pub alight_stop:  u16,
    pub arrival_time: u64,
    pub board_time:   u64,
    pub alight_time:  u64,
    pub waiting_time: u64,
    pub travel_time:  u64,
    pub total_time:   u64,
}

impl From<&CompletedTrip> for TripRow {
    fn from(trip: &CompletedTrip) -> Self {
        let p = &trip.passenger;
        Self {
            passenger_id: p.id.0,
            bus_id:       p.bus.0,
            board_stop:   p.board_stop.0,
            alight_stop:  p.alight_stop.0,
            arrival_time: p.arrival_time.0,
            board_time:   p.board_time.0,
            alight_time:  trip.alight_time.0,
            waiting_time: p.waiting_time,
            travel_time:  trip.travel_time,
            total_time:   trip.total_time,
        }
    }
}

/// One bus at one stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopVisitRow {
    pub bus_id:       u32,
    pub stop:         u16,
    pub arrival_time: u64,
    pub boarded:      u32,
    pub alighted:     u32,
    pub left_waiting: u32,
    pub load:         u32,
}

impl StopVisitRow {
    pub fn new(bus: BusId, visit: &StopVisit) -> Self {
        Self {
            bus_id:       bus.0,
            stop:         visit.stop.0,
            arrival_time: visit.arrival_time.0,
            boarded:      visit.boarded.len() as u32,
            alighted:     visit.alighted.len() as u32,
            left_waiting: visit.left_waiting as u32,
            load:         visit.load as u32,
        }
    }
}

/// Queue length at a stop right after a passenger joined it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueSampleRow {
    pub time: u64,
    pub stop: u16,
    pub len:  u32,
}

impl From<&QueueSample> for QueueSampleRow {
    fn from(s: &QueueSample) -> Self {
        Self { time: s.time.0, stop: s.stop.0, len: s.len as u32 }
    }
}

/// End-of-run aggregate figures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryRow {
    pub final_time:           u64,
    pub passengers_arrived:   u64,
    pub total_boarded:        u64,
    pub total_served:         u64,
    pub average_waiting_time: f64,
    pub average_travel_time:  f64,
    pub average_queue_size:   f64,
    pub max_queue_size:       u32,
}

impl SummaryRow {
    pub fn new(final_time: u64, summary: &MetricsSummary) -> Self {
        Self {
            final_time,
            passengers_arrived:   summary.passengers_arrived,
            total_boarded:        summary.total_boarded,
            total_served:         summary.total_served,
            average_waiting_time: summary.average_waiting_time,
            average_travel_time:  summary.average_travel_time,
            average_queue_size:   summary.average_queue_size,
            max_queue_size:       summary.max_queue_size as u32,
        }
    }
}
