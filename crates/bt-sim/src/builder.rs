//! Fluent builder for constructing a [`Sim`].

use std::collections::BTreeMap;

use bt_core::{Minute, PassengerId, RouteConfig, SimRng, StopId};
use bt_fleet::StopQueues;
use bt_schedule::{Event, EventQueue, Timetable, TimingModel};

use crate::sim::PlannedDeparture;
use crate::{Metrics, RunStats, Sim, SimResult};

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`RouteConfig`]: every route, timing, and distribution parameter.
///
/// # Optional inputs (have defaults)
///
/// | Method            | Default                                               |
/// |-------------------|-------------------------------------------------------|
/// | `.seed(s)`        | `config.seed`                                         |
/// | `.timetable(t)`   | `Timetable::regular(service_start, service_end, headway)` |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config)
///     .seed(7)
///     .build()?;
/// sim.run(&mut NoopObserver);
/// ```
pub struct SimBuilder {
    config:    RouteConfig,
    timetable: Option<Timetable>,
}

impl SimBuilder {
    pub fn new(config: RouteConfig) -> Self {
        Self { config, timetable: None }
    }

    /// Override the RNG seed from the config.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Use an explicit set of departures instead of the regular headway.
    pub fn timetable(mut self, timetable: Timetable) -> Self {
        self.timetable = Some(timetable);
        self
    }

    /// Validate the config, seed the event queue, and return a ready-to-run
    /// [`Sim`].
    ///
    /// Random draws happen in a fixed order: one deviation per departure in
    /// timetable order, then the first passenger arrival interval.
    pub fn build(self) -> SimResult<Sim> {
        let config = self.config;
        config.validate()?;

        let timing = TimingModel::new(&config)?;
        let mut rng = SimRng::new(config.seed);
        let timetable = self.timetable.unwrap_or_else(|| {
            Timetable::regular(config.service_start, config.service_end, config.headway_mins)
        });

        // ── Seed bus departures ───────────────────────────────────────────
        let mut events = EventQueue::new();
        let mut departures = BTreeMap::new();
        for departure in timetable.departures() {
            let deviation = timing.bus_arrival_deviation(&mut rng);
            let effective = departure.scheduled.shifted(deviation);
            departures.insert(departure.bus, PlannedDeparture {
                scheduled: departure.scheduled,
                deviation,
            });
            events.schedule(Event::bus_arrival(effective, departure.bus, StopId::ORIGIN));
        }

        // ── Seed passenger generation ─────────────────────────────────────
        let first_arrival = Minute::ZERO + timing.next_arrival_interval(&mut rng);
        if first_arrival < config.horizon {
            events.schedule(Event::passenger_arrival(first_arrival));
        }

        Ok(Sim {
            queues:         StopQueues::new(config.stop_count),
            config,
            rng,
            timing,
            events,
            departures,
            buses:          BTreeMap::new(),
            trips:          Vec::new(),
            metrics:        Metrics::new(),
            next_passenger: PassengerId::FIRST,
            stats:          RunStats::default(),
        })
    }
}
