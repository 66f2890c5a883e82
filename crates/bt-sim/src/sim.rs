//! The `Sim` context object and its event loop.

use std::collections::BTreeMap;

use bt_core::{BusId, Minute, PassengerId, RouteConfig, SimRng, StopId};
use bt_fleet::{Bus, CompletedTrip, StopQueues, WaitingPassenger};
use bt_schedule::{Event, EventKind, EventQueue, TimingModel};

use crate::{Metrics, RunStats, SimObserver, SimOutcome, StopReason};

/// A departure from the timetable with its deviation already drawn.
#[derive(Copy, Clone, Debug)]
pub(crate) struct PlannedDeparture {
    pub scheduled: Minute,
    pub deviation: i64,
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// All state of one simulation run.
///
/// Every handler takes `&mut self`; nothing is global.  The random source
/// is owned here and passed explicitly to each timing-model call, so two
/// `Sim`s built from the same config produce bit-identical runs.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    /// The validated configuration this run was built from.
    pub config: RouteConfig,

    pub(crate) rng:        SimRng,
    pub(crate) timing:     TimingModel,
    pub(crate) events:     EventQueue,
    pub(crate) queues:     StopQueues,
    pub(crate) departures: BTreeMap<BusId, PlannedDeparture>,
    pub(crate) buses:      BTreeMap<BusId, Bus>,
    pub(crate) trips:      Vec<CompletedTrip>,
    pub(crate) metrics:    Metrics,
    pub(crate) next_passenger: PassengerId,
    pub(crate) stats:      RunStats,
}

impl Sim {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run until the event queue empties or the horizon is reached.
    ///
    /// Calls observer hooks for every processed event.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> RunStats {
        log::info!(
            "run start: {} stops, {} departures planned, horizon {}, seed {}",
            self.config.stop_count,
            self.departures.len(),
            self.config.horizon,
            self.config.seed,
        );
        while self.step(observer).is_some() {}
        log::info!(
            "run end at {} ({:?}): {} events, {} served, {} still waiting",
            self.stats.final_time,
            self.stats.stop_reason,
            self.stats.events_processed,
            self.metrics.total_served,
            self.queues.total_waiting(),
        );
        self.stats
    }

    /// Process exactly one event.
    ///
    /// Returns the event handled, or `None` once the run has stopped.  The
    /// first call that finds the queue empty or the next event at or past
    /// the horizon ends the run and fires `on_sim_end`.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) -> Option<Event> {
        if self.is_finished() {
            return None;
        }
        let event = match self.events.pop_min() {
            None => return self.finish(StopReason::QueueEmpty, observer),
            Some(e) if e.time >= self.config.horizon => {
                return self.finish(StopReason::Horizon, observer);
            }
            Some(e) => e,
        };

        log::trace!("{} {:?}", event.time, event.kind);
        self.metrics.on_event(&event);
        observer.on_event(&event);

        match event.kind {
            EventKind::PassengerArrival => self.on_passenger_arrival(event.time, observer),
            EventKind::BusArrival { bus, stop } => self.on_bus_arrival(event.time, bus, stop, observer),
        }

        self.stats.events_processed += 1;
        self.stats.final_time = event.time;
        Some(event)
    }

    pub fn is_finished(&self) -> bool {
        self.stats.stop_reason != StopReason::Running
    }

    /// Current simulation time (time of the last popped event).
    pub fn now(&self) -> Minute {
        self.events.now()
    }

    pub fn stats(&self) -> RunStats {
        self.stats
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn queues(&self) -> &StopQueues {
        &self.queues
    }

    pub fn bus(&self, id: BusId) -> Option<&Bus> {
        self.buses.get(&id)
    }

    pub fn buses(&self) -> impl Iterator<Item = &Bus> {
        self.buses.values()
    }

    pub fn trips(&self) -> &[CompletedTrip] {
        &self.trips
    }

    /// Events still pending.
    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    /// Consume the run and hand its records to reporting code.
    pub fn into_outcome(self) -> SimOutcome {
        let still_waiting = self.queues.iter_all().copied().collect();
        SimOutcome {
            summary: self.metrics.summary(),
            config: self.config,
            stats: self.stats,
            trips: self.trips,
            buses: self.buses.into_values().collect(),
            still_waiting,
            metrics: self.metrics,
        }
    }

    // ── Event handlers ────────────────────────────────────────────────────

    fn on_passenger_arrival<O: SimObserver>(&mut self, now: Minute, observer: &mut O) {
        let origin = self.timing.origin_stop(&mut self.rng);
        let passenger = WaitingPassenger {
            id:           self.next_passenger,
            arrival_time: now,
            origin,
        };
        self.next_passenger = self.next_passenger.next();

        let queue_len = self.queues.push(passenger);
        self.metrics.on_passenger_arrival(&passenger, queue_len);
        observer.on_passenger_arrival(&passenger, queue_len);

        // Past the horizon nothing more is scheduled; generation just ends.
        let next = now + self.timing.next_arrival_interval(&mut self.rng);
        if next < self.config.horizon {
            self.events.schedule(Event::passenger_arrival(next));
        }
    }

    fn on_bus_arrival<O: SimObserver>(
        &mut self,
        now:      Minute,
        bus_id:   BusId,
        stop:     StopId,
        observer: &mut O,
    ) {
        if stop == StopId::ORIGIN && !self.buses.contains_key(&bus_id) {
            let Some(planned) = self.departures.get(&bus_id).copied() else {
                panic!("{bus_id} arrived at stop 0 without a planned departure");
            };
            let bus = Bus::new(bus_id, self.config.bus_capacity, planned.scheduled, planned.deviation);
            self.metrics.on_bus_departure(&bus);
            observer.on_bus_departure(&bus);
            self.buses.insert(bus_id, bus);
        }

        let Some(bus) = self.buses.get_mut(&bus_id) else {
            panic!("{bus_id} arrived at {stop} before departing stop 0");
        };
        let visit = bus.visit(stop, now, &mut self.queues, &self.timing, &mut self.rng);
        log::debug!(
            "{} {bus_id} at {stop}: {} off, {} on, {} aboard, {} left waiting",
            now.clock(),
            visit.alighted.len(),
            visit.boarded.len(),
            visit.load,
            visit.left_waiting,
        );

        self.trips.extend(visit.alighted.iter().copied());
        self.metrics.on_stop_visit(bus_id, visit);
        observer.on_stop_visit(bus_id, visit);

        // Travel time is fixed by the traffic state when the bus enters the leg.
        if stop < self.config.terminus() {
            let next = now
                + self.timing.travel_time(now)
                + self.timing.dwell_interval(&mut self.rng);
            self.events.schedule(Event::bus_arrival(next, bus_id, stop.next()));
        }
    }

    fn finish<O: SimObserver>(&mut self, reason: StopReason, observer: &mut O) -> Option<Event> {
        self.stats.stop_reason = reason;
        let end = self.stats.final_time;
        self.metrics.on_sim_end(end);
        observer.on_sim_end(end);
        None
    }
}
