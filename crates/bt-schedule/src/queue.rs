//! `EventQueue`: the time-ordered multiset of pending events.
//!
//! # Why a `BTreeMap` of FIFOs
//!
//! Reproducibility requires that events sharing a time value come out in
//! the order they were scheduled.  A binary heap would need an extra
//! sequence number per entry to get that; bucketing by time in a
//! `BTreeMap<Minute, VecDeque<Event>>` gives it for free.  Insert and pop
//! are O(log W) where W = number of distinct pending times, which for a
//! bus route is a few hundred at most.
//!
//! # Causality
//!
//! The queue remembers the time of the last popped event.  Scheduling
//! anything earlier than that is an engine defect and panics immediately
//! instead of letting the run continue with a corrupted timeline.

use std::collections::{BTreeMap, VecDeque};

use bt_core::{BusId, Minute, StopId};

/// What an event does when it fires.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventKind {
    /// A new passenger shows up at a randomly chosen stop.
    PassengerArrival,
    /// Bus `bus` reaches stop `stop`.
    BusArrival { bus: BusId, stop: StopId },
}

/// A scheduled occurrence.  Immutable once scheduled; consumed exactly once.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Event {
    pub time: Minute,
    pub kind: EventKind,
}

impl Event {
    #[inline]
    pub fn passenger_arrival(time: Minute) -> Self {
        Self { time, kind: EventKind::PassengerArrival }
    }

    #[inline]
    pub fn bus_arrival(time: Minute, bus: BusId, stop: StopId) -> Self {
        Self { time, kind: EventKind::BusArrival { bus, stop } }
    }
}

/// Pending events ordered by time, FIFO among equal times.
#[derive(Default)]
pub struct EventQueue {
    inner: BTreeMap<Minute, VecDeque<Event>>,
    /// Cached total event count for O(1) `len()`.
    total: usize,
    /// Time of the most recently popped event.
    now: Minute,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `event` behind any already-queued events with the same time.
    ///
    /// # Panics
    ///
    /// Panics if `event.time` is earlier than the last popped time.
    pub fn schedule(&mut self, event: Event) {
        assert!(
            event.time >= self.now,
            "event {event:?} scheduled into the past (clock is at {})",
            self.now,
        );
        self.inner.entry(event.time).or_default().push_back(event);
        self.total += 1;
    }

    /// Remove and return the earliest event, or `None` if the queue is empty.
    pub fn pop_min(&mut self) -> Option<Event> {
        let mut bucket = self.inner.first_entry()?;
        let event = bucket.get_mut().pop_front()?;
        if bucket.get().is_empty() {
            bucket.remove();
        }
        self.total -= 1;
        self.now = event.time;
        Some(event)
    }

    /// Time of the earliest pending event.
    pub fn peek_time(&self) -> Option<Minute> {
        self.inner.keys().next().copied()
    }

    /// Time of the most recently popped event (zero before the first pop).
    pub fn now(&self) -> Minute {
        self.now
    }

    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Number of distinct future times with at least one pending event.
    pub fn time_count(&self) -> usize {
        self.inner.len()
    }
}
