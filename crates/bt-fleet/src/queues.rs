//! Per-stop FIFO queues of waiting passengers.

use std::collections::VecDeque;

use bt_core::StopId;

use crate::WaitingPassenger;

/// One FIFO per origin stop `0..stop_count-1`.  The terminus has no queue.
///
/// Ordering is arrival order; boarding always takes the head.
#[derive(Clone, Debug, Default)]
pub struct StopQueues {
    queues: Vec<VecDeque<WaitingPassenger>>,
}

impl StopQueues {
    /// Queues for a route with `stop_count` stops.
    pub fn new(stop_count: u16) -> Self {
        let origins = usize::from(stop_count.saturating_sub(1));
        Self { queues: vec![VecDeque::new(); origins] }
    }

    /// Append `passenger` to its origin stop's queue and return the queue's
    /// new length.
    ///
    /// # Panics
    ///
    /// Panics if the passenger's origin has no queue (the terminus or past it).
    pub fn push(&mut self, passenger: WaitingPassenger) -> usize {
        let stop = passenger.origin;
        let Some(queue) = self.queues.get_mut(stop.index()) else {
            panic!("passenger {} cannot originate at {stop}", passenger.id);
        };
        queue.push_back(passenger);
        queue.len()
    }

    /// Remove the longest-waiting passenger at `stop`.
    pub fn pop_front(&mut self, stop: StopId) -> Option<WaitingPassenger> {
        self.queues.get_mut(stop.index())?.pop_front()
    }

    /// Passengers currently waiting at `stop` (0 for the terminus).
    pub fn len(&self, stop: StopId) -> usize {
        self.queues.get(stop.index()).map_or(0, VecDeque::len)
    }

    /// Passengers waiting across all stops.
    pub fn total_waiting(&self) -> usize {
        self.queues.iter().map(VecDeque::len).sum()
    }

    /// Waiting passengers at `stop`, head first.
    pub fn iter(&self, stop: StopId) -> impl Iterator<Item = &WaitingPassenger> {
        self.queues.get(stop.index()).into_iter().flatten()
    }

    /// Every waiting passenger, stop by stop.
    pub fn iter_all(&self) -> impl Iterator<Item = &WaitingPassenger> {
        self.queues.iter().flatten()
    }

    /// Number of stops that can originate passengers.
    pub fn origin_count(&self) -> usize {
        self.queues.len()
    }
}
