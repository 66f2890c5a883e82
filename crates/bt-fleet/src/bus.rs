//! The bus state machine.
//!
//! A bus is created on its first arrival at stop 0 and then moves strictly
//! downstream, one stop per visit, until the terminus.  Each visit runs the
//! same three phases:
//!
//! ```text
//! ① Alight:  every onboard passenger whose alight_stop == stop gets off.
//! ② Board:   head of the stop's queue boards while there is spare capacity.
//! ③ Record:  an immutable StopVisit is appended to the bus history.
//! ```

use bt_core::{BusId, Minute, SimRng, StopId};
use bt_schedule::TimingModel;

use crate::{BoardedPassenger, CompletedTrip, StopQueues};

/// Snapshot of one bus at one stop.  Never mutated once recorded.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StopVisit {
    pub stop:         StopId,
    pub arrival_time: Minute,
    /// Passengers who got on, in boarding (= arrival) order.
    pub boarded:      Vec<BoardedPassenger>,
    /// Passengers who got off.
    pub alighted:     Vec<CompletedTrip>,
    /// Queue length at this stop after boarding finished.
    pub left_waiting: usize,
    /// Passengers on board when the bus pulled away.
    pub load:         usize,
}

/// One bus and everything it has done so far.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bus {
    pub id: BusId,

    pub capacity: usize,

    /// Nominal departure from stop 0.
    pub scheduled_departure: Minute,

    /// Signed minutes between `scheduled_departure` and the actual arrival
    /// at stop 0.
    pub deviation: i64,

    /// The stop most recently visited.
    pub current_stop: StopId,

    /// Passengers on board, in boarding order.
    onboard: Vec<BoardedPassenger>,

    visits: Vec<StopVisit>,
}

impl Bus {
    /// A fresh, empty bus about to make its first visit at stop 0.
    pub fn new(id: BusId, capacity: usize, scheduled_departure: Minute, deviation: i64) -> Self {
        Self {
            id,
            capacity,
            scheduled_departure,
            deviation,
            current_stop: StopId::ORIGIN,
            onboard: Vec::new(),
            visits: Vec::new(),
        }
    }

    /// Arrive at `stop` at `now`: alight, board, and record the visit.
    ///
    /// Alight stops for boarding passengers are drawn from `timing` with
    /// `rng`, in boarding order.  Returns the recorded visit.
    ///
    /// # Panics
    ///
    /// Panics if the bus would go backwards along the route, or if the
    /// onboard count ends up above capacity.
    pub fn visit(
        &mut self,
        stop:   StopId,
        now:    Minute,
        queues: &mut StopQueues,
        timing: &TimingModel,
        rng:    &mut SimRng,
    ) -> &StopVisit {
        if let Some(last) = self.visits.last() {
            assert!(
                stop > last.stop && now >= last.arrival_time,
                "bus {} moved from {} at {} to {stop} at {now}",
                self.id,
                last.stop,
                last.arrival_time,
            );
        }

        // ── ① Alight ─────────────────────────────────────────────────────
        let (leaving, staying): (Vec<_>, Vec<_>) =
            self.onboard.drain(..).partition(|p| p.alight_stop == stop);
        self.onboard = staying;
        let alighted: Vec<CompletedTrip> = leaving.into_iter().map(|p| p.alight(now)).collect();

        // ── ② Board ──────────────────────────────────────────────────────
        let mut boarded = Vec::new();
        while self.onboard.len() < self.capacity {
            let Some(waiting) = queues.pop_front(stop) else { break };
            let alight_stop = timing.alight_stop(rng, stop);
            let passenger = waiting.board(self.id, now, alight_stop);
            self.onboard.push(passenger);
            boarded.push(passenger);
        }
        assert!(
            self.onboard.len() <= self.capacity,
            "bus {} carries {} passengers, capacity {}",
            self.id,
            self.onboard.len(),
            self.capacity,
        );

        // ── ③ Record ─────────────────────────────────────────────────────
        self.current_stop = stop;
        self.visits.push(StopVisit {
            stop,
            arrival_time: now,
            boarded,
            alighted,
            left_waiting: queues.len(stop),
            load: self.onboard.len(),
        });
        &self.visits[self.visits.len() - 1]
    }

    /// Passengers currently on board, in boarding order.
    pub fn onboard(&self) -> &[BoardedPassenger] {
        &self.onboard
    }

    /// Every visit so far, in route order.
    pub fn visits(&self) -> &[StopVisit] {
        &self.visits
    }

    /// Actual arrival at stop 0, if the bus has started.
    pub fn departure_time(&self) -> Option<Minute> {
        self.visits.first().map(|v| v.arrival_time)
    }

    #[inline]
    pub fn spare_capacity(&self) -> usize {
        self.capacity - self.onboard.len()
    }
}
