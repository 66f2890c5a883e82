//! Unit and scenario tests for bt-sim.

use bt_core::{
    ArrivalDistribution, BtError, BusId, DeviationDistribution, DwellDistribution, Minute,
    PassengerId, RouteConfig, StopId, TrafficWindow,
};
use bt_fleet::{Bus, StopVisit, WaitingPassenger};
use bt_schedule::Timetable;

use crate::{
    Metrics, MetricsSummary, NoopObserver, ReplicationSummary, SimBuilder, SimError,
    SimObserver, SimOutcome, StopReason, run_replications, simulate,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Two-stop route with one passenger per minute, zero travel time and a
/// one-minute dwell, so every event time is known in advance.
fn clockwork(capacity: usize, service_start: u64, horizon: u64) -> RouteConfig {
    RouteConfig {
        stop_count:          2,
        bus_capacity:        capacity,
        headway_mins:        60,
        service_start:       Minute(service_start),
        service_end:         Minute(service_start + 1),
        normal_travel_mins:  0,
        traffic_travel_mins: 0,
        traffic_windows:     Vec::new(),
        horizon:             Minute(horizon),
        arrivals:            ArrivalDistribution::Uniform { min: 1, max: 1 },
        deviation:           DeviationDistribution::None,
        dwell:               DwellDistribution::Uniform { min: 1, max: 1 },
        seed:                1,
    }
}

fn run(config: RouteConfig) -> SimOutcome {
    let mut sim = SimBuilder::new(config).build().unwrap();
    sim.run(&mut NoopObserver);
    sim.into_outcome()
}

fn ids(passengers: impl IntoIterator<Item = PassengerId>) -> Vec<u32> {
    passengers.into_iter().map(|id| id.0).collect()
}

// ── SimBuilder ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn seeds_one_bus_event_per_departure() {
        let sim = SimBuilder::new(RouteConfig::default()).build().unwrap();
        // 60 departures plus the first passenger arrival.
        assert_eq!(sim.pending_events(), 61);
        assert!(!sim.is_finished());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = RouteConfig { stop_count: 1, ..RouteConfig::default() };
        let result = SimBuilder::new(config).build();
        assert!(matches!(result, Err(SimError::Config(BtError::TooFewStops(1)))));
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let config = RouteConfig { bus_capacity: 0, ..RouteConfig::default() };
        assert!(SimBuilder::new(config).build().is_err());
    }

    #[test]
    fn seed_override_wins() {
        let a = SimBuilder::new(RouteConfig::default()).seed(9).build().unwrap();
        assert_eq!(a.config.seed, 9);
    }

    #[test]
    fn explicit_timetable_replaces_headway() {
        let mut sim = SimBuilder::new(clockwork(10, 3, 20))
            .timetable(Timetable::from_times([Minute(4), Minute(8)]))
            .build()
            .unwrap();
        sim.run(&mut NoopObserver);
        let starts: Vec<Option<Minute>> = sim.buses().map(Bus::departure_time).collect();
        assert_eq!(starts, vec![Some(Minute(4)), Some(Minute(8))]);
    }
}

// ── Boarding scenarios ────────────────────────────────────────────────────────

#[cfg(test)]
mod scenario_tests {
    use super::*;

    #[test]
    fn capacity_one_takes_the_earliest_passenger() {
        // Passengers 1 and 2 wait at stop 0; the bus arrives at t=3 ahead of
        // passenger 3 and has room for one.
        let outcome = run(clockwork(1, 3, 5));

        let first = &outcome.buses[0].visits()[0];
        assert_eq!(first.stop, StopId::ORIGIN);
        assert_eq!(ids(first.boarded.iter().map(|p| p.id)), vec![1]);
        assert_eq!(first.left_waiting, 1);
        assert_eq!(first.load, 1);

        assert_eq!(outcome.trips.len(), 1);
        let trip = outcome.trips[0];
        assert_eq!(trip.id(), PassengerId(1));
        assert_eq!(trip.passenger.waiting_time, 2);
        assert_eq!(trip.travel_time, 1);
        assert_eq!(trip.alight_time, Minute(4));

        assert_eq!(ids(outcome.still_waiting.iter().map(|p| p.id)), vec![2, 3, 4]);
        assert_eq!(outcome.summary.passengers_arrived, 4);
        assert_eq!(outcome.summary.total_served, 1);
        assert_eq!(outcome.summary.average_waiting_time, 2.0);
        assert_eq!(outcome.stats.stop_reason, StopReason::QueueEmpty);
    }

    #[test]
    fn unlimited_capacity_boards_everyone_in_arrival_order() {
        let outcome = run(clockwork(usize::MAX, 6, 7));

        let first = &outcome.buses[0].visits()[0];
        assert_eq!(ids(first.boarded.iter().map(|p| p.id)), vec![1, 2, 3, 4, 5]);
        assert_eq!(first.left_waiting, 0);
        assert_eq!(outcome.metrics.waiting_samples, vec![5, 4, 3, 2, 1]);
        assert_eq!(outcome.metrics.total_waiting_boarded, 15);
        assert_eq!(outcome.metrics.total_waiting_served, 0);

        // The bus would reach the terminus at t=7, which is the horizon.
        assert_eq!(outcome.stats.stop_reason, StopReason::Horizon);
        assert!(outcome.trips.is_empty());
        assert_eq!(outcome.summary.total_boarded, 5);
        assert_eq!(outcome.summary.average_waiting_time, 0.0);
        assert_eq!(outcome.passengers().len(), 6);
    }

    #[test]
    fn passenger_generation_stops_at_horizon() {
        let config = RouteConfig {
            arrivals:      ArrivalDistribution::Uniform { min: 10, max: 10 },
            service_start: Minute(100),
            service_end:   Minute(101),
            ..clockwork(5, 100, 15)
        };
        let outcome = run(config);
        assert_eq!(outcome.summary.passengers_arrived, 1);
        assert_eq!(outcome.stats.events_processed, 1);
        assert_eq!(outcome.stats.final_time, Minute(10));
        assert_eq!(outcome.stats.stop_reason, StopReason::Horizon);
        assert!(outcome.buses.is_empty());
    }

    #[test]
    fn zero_horizon_processes_nothing() {
        let config = RouteConfig { horizon: Minute(0), ..RouteConfig::default() };
        let outcome = run(config);
        assert_eq!(outcome.stats.events_processed, 0);
        assert_eq!(outcome.summary, MetricsSummary::default());
        assert!(outcome.passengers().is_empty());
    }

    #[test]
    fn negative_deviation_starts_early_but_not_before_zero() {
        let config = RouteConfig {
            deviation: DeviationDistribution::Normal { mean: -2.0, std_dev: 0.0 },
            ..clockwork(10, 0, 20)
        };
        let mut sim = SimBuilder::new(config)
            .timetable(Timetable::from_times([Minute(0), Minute(5)]))
            .build()
            .unwrap();
        sim.run(&mut NoopObserver);

        let early = sim.bus(BusId(1)).unwrap();
        assert_eq!(early.deviation, -2);
        assert_eq!(early.departure_time(), Some(Minute(0)));

        let late = sim.bus(BusId(2)).unwrap();
        assert_eq!(late.scheduled_departure, Minute(5));
        assert_eq!(late.departure_time(), Some(Minute(3)));
        assert_eq!(sim.metrics().deviation_samples, vec![-2, -2]);
    }

    #[test]
    fn travel_time_follows_traffic_at_leg_start() {
        let config = RouteConfig {
            stop_count:          3,
            normal_travel_mins:  10,
            traffic_travel_mins: 20,
            traffic_windows:     vec![TrafficWindow::new(0, 5)],
            arrivals:            ArrivalDistribution::Uniform { min: 50, max: 50 },
            ..clockwork(10, 1, 100)
        };
        let outcome = run(config);
        let times: Vec<Minute> =
            outcome.buses[0].visits().iter().map(|v| v.arrival_time).collect();
        assert_eq!(times, vec![Minute(1), Minute(22), Minute(33)]);
    }

    #[test]
    fn enormous_headway_runs_a_single_bus() {
        let config = RouteConfig { headway_mins: u64::MAX, ..RouteConfig::default() };
        let outcome = run(config);
        assert_eq!(outcome.buses.len(), 1);
        assert_eq!(outcome.buses[0].scheduled_departure, Minute::hm(6, 0));
    }

    #[test]
    fn enormous_arrival_interval_creates_no_passengers() {
        let config = RouteConfig {
            arrivals: ArrivalDistribution::Uniform { min: u64::MAX, max: u64::MAX },
            ..RouteConfig::default()
        };
        let outcome = run(config);
        assert_eq!(outcome.summary.passengers_arrived, 0);
        assert_eq!(outcome.buses.len(), 60);
    }

    #[test]
    fn enormous_travel_time_leaves_buses_at_origin() {
        let config = RouteConfig {
            normal_travel_mins:  u64::MAX,
            traffic_travel_mins: u64::MAX,
            ..RouteConfig::default()
        };
        let outcome = run(config);
        assert_eq!(outcome.stats.stop_reason, StopReason::Horizon);
        assert!(outcome.buses.iter().all(|b| b.visits().len() == 1));
        assert!(outcome.trips.is_empty());
    }

    #[test]
    fn bus_stops_at_terminus() {
        let outcome = run(RouteConfig { stop_count: 4, ..clockwork(10, 1, 200) });
        let stops: Vec<u16> = outcome.buses[0].visits().iter().map(|v| v.stop.0).collect();
        assert_eq!(stops, vec![0, 1, 2, 3]);
        assert!(outcome.buses[0].onboard().is_empty());
    }
}

// ── Event loop ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;

    #[test]
    fn stepping_matches_running() {
        let mut stepped = SimBuilder::new(RouteConfig::default()).build().unwrap();
        let mut count = 0;
        while stepped.step(&mut NoopObserver).is_some() {
            count += 1;
        }
        assert!(stepped.is_finished());
        assert!(stepped.step(&mut NoopObserver).is_none());

        let mut ran = SimBuilder::new(RouteConfig::default()).build().unwrap();
        let stats = ran.run(&mut NoopObserver);
        assert_eq!(stats.events_processed, count);
        assert_eq!(stats, stepped.stats());
        assert_eq!(ran.metrics().summary(), stepped.metrics().summary());
    }

    #[test]
    fn same_seed_same_outcome() {
        let a = run(RouteConfig::default());
        let b = run(RouteConfig::default());
        assert_eq!(a.trips, b.trips);
        assert_eq!(a.summary, b.summary);
        assert_eq!(a.metrics.queue_samples, b.metrics.queue_samples);
    }

    #[test]
    fn different_seed_different_outcome() {
        let a = run(RouteConfig::default());
        let b = run(RouteConfig { seed: 43, ..RouteConfig::default() });
        assert_ne!(a.metrics.queue_samples, b.metrics.queue_samples);
    }

    #[test]
    fn default_day_finishes_before_horizon() {
        let outcome = run(RouteConfig::default());
        assert_ne!(outcome.stats.stop_reason, StopReason::Running);
        assert!(outcome.stats.final_time < outcome.config.horizon);
        assert_eq!(outcome.buses.len(), 60);
        assert!(outcome.summary.total_served > 0);
    }

    #[test]
    fn every_passenger_is_accounted_for() {
        let outcome = run(RouteConfig::default());
        let passengers = outcome.passengers();
        assert_eq!(passengers.len() as u64, outcome.summary.passengers_arrived);
        let expected: Vec<u32> = (1..=passengers.len() as u32).collect();
        assert_eq!(ids(passengers.iter().map(|p| p.id())), expected);
        assert_eq!(
            outcome.summary.total_boarded,
            outcome.trips.len() as u64
                + outcome.buses.iter().map(|b| b.onboard().len() as u64).sum::<u64>(),
        );
    }

    #[test]
    fn trips_respect_route_direction_and_capacity() {
        let config = RouteConfig { bus_capacity: 3, ..RouteConfig::default() };
        let outcome = run(config);
        for trip in &outcome.trips {
            let p = trip.passenger;
            assert!(p.alight_stop > p.board_stop);
            assert!(p.board_time >= p.arrival_time);
            assert!(trip.alight_time >= p.board_time);
            assert_eq!(trip.total_time, p.waiting_time + trip.travel_time);
        }
        for bus in &outcome.buses {
            assert!(bus.visits().iter().all(|v| v.load <= 3));
        }
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        events:     usize,
        departures: usize,
        arrivals:   usize,
        visits:     usize,
        ends:       Vec<Minute>,
    }

    impl SimObserver for Counter {
        fn on_event(&mut self, _event: &bt_schedule::Event) {
            self.events += 1;
        }
        fn on_bus_departure(&mut self, _bus: &Bus) {
            self.departures += 1;
        }
        fn on_passenger_arrival(&mut self, _p: &WaitingPassenger, _len: usize) {
            self.arrivals += 1;
        }
        fn on_stop_visit(&mut self, _bus: BusId, _visit: &StopVisit) {
            self.visits += 1;
        }
        fn on_sim_end(&mut self, end: Minute) {
            self.ends.push(end);
        }
    }

    #[test]
    fn hooks_fire_once_per_occurrence() {
        let mut sim = SimBuilder::new(RouteConfig::default()).build().unwrap();
        let mut counter = Counter::default();
        let stats = sim.run(&mut counter);

        assert_eq!(counter.events as u64, stats.events_processed);
        assert_eq!(counter.arrivals as u64, sim.metrics().passengers_arrived);
        assert_eq!(counter.departures, sim.buses().count());
        assert_eq!(counter.visits, sim.buses().map(|b| b.visits().len()).sum::<usize>());
        assert_eq!(counter.ends, vec![stats.final_time]);
    }
}

// ── Metrics ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod metrics_tests {
    use super::*;

    fn waiting(id: u32, at: u64, stop: u16) -> WaitingPassenger {
        WaitingPassenger { id: PassengerId(id), arrival_time: Minute(at), origin: StopId(stop) }
    }

    #[test]
    fn empty_metrics_average_to_zero() {
        let m = Metrics::new();
        assert_eq!(m.average_waiting_time(), 0.0);
        assert_eq!(m.average_travel_time(), 0.0);
        assert_eq!(m.average_queue_size(), 0.0);
        assert_eq!(m.max_queue_size(), 0);
    }

    #[test]
    fn queue_samples_average_and_max() {
        let mut m = Metrics::new();
        m.on_passenger_arrival(&waiting(1, 1, 0), 1);
        m.on_passenger_arrival(&waiting(2, 2, 0), 2);
        m.on_passenger_arrival(&waiting(3, 3, 1), 1);
        m.on_passenger_arrival(&waiting(4, 4, 0), 4);
        assert_eq!(m.passengers_arrived, 4);
        assert_eq!(m.average_queue_size(), 2.0);
        assert_eq!(m.max_queue_size(), 4);
    }

    #[test]
    fn waiting_is_summed_at_boarding_and_at_alighting() {
        let boarded = waiting(1, 2, 0).board(BusId(1), Minute(7), StopId(1));
        let visit_on = StopVisit {
            stop:         StopId(0),
            arrival_time: Minute(7),
            boarded:      vec![boarded],
            alighted:     Vec::new(),
            left_waiting: 0,
            load:         1,
        };
        let visit_off = StopVisit {
            stop:         StopId(1),
            arrival_time: Minute(20),
            boarded:      Vec::new(),
            alighted:     vec![boarded.alight(Minute(20))],
            left_waiting: 0,
            load:         0,
        };

        let mut m = Metrics::new();
        m.on_stop_visit(BusId(1), &visit_on);
        assert_eq!(m.total_boarded, 1);
        assert_eq!(m.total_waiting_boarded, 5);
        assert_eq!(m.total_waiting_served, 0);
        assert_eq!(m.waiting_samples, vec![5]);
        // Nobody served yet, so both averages are zero.
        assert_eq!(m.average_waiting_time(), 0.0);
        assert_eq!(m.average_served_waiting_time(), 0.0);

        m.on_stop_visit(BusId(1), &visit_off);
        assert_eq!(m.total_served, 1);
        assert_eq!(m.total_waiting_boarded, 5);
        assert_eq!(m.total_waiting_served, 5);
        assert_eq!(m.average_waiting_time(), 5.0);
        assert_eq!(m.average_served_waiting_time(), 5.0);
        assert_eq!(m.average_travel_time(), 13.0);
    }

    #[test]
    fn riders_still_aboard_count_towards_the_reported_average() {
        let on = |id, at| waiting(id, at, 0).board(BusId(1), Minute(10), StopId(1));
        let first = on(1, 2);
        let second = on(2, 6);
        let mut m = Metrics::new();
        m.on_stop_visit(BusId(1), &StopVisit {
            stop:         StopId(0),
            arrival_time: Minute(10),
            boarded:      vec![first, second],
            alighted:     Vec::new(),
            left_waiting: 0,
            load:         2,
        });
        m.on_stop_visit(BusId(1), &StopVisit {
            stop:         StopId(1),
            arrival_time: Minute(30),
            boarded:      Vec::new(),
            alighted:     vec![first.alight(Minute(30))],
            left_waiting: 0,
            load:         1,
        });

        // 8 + 4 minutes waited by two boarders, one of them served.
        assert_eq!(m.total_waiting_boarded, 12);
        assert_eq!(m.total_waiting_served, 8);
        assert_eq!(m.average_waiting_time(), 12.0);
        assert_eq!(m.average_served_waiting_time(), 8.0);
        assert_eq!(m.summary().average_waiting_time, 12.0);
        assert_eq!(m.summary().average_served_waiting_time, 8.0);
    }
}

// ── Replications ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod replicate_tests {
    use super::*;

    #[test]
    fn first_replication_reproduces_single_run() {
        let config = RouteConfig::default();
        let single = simulate(config.clone()).unwrap();
        let batch = run_replications(&config, 3).unwrap();
        assert_eq!(batch.len(), 3);
        assert_eq!(batch[0].summary, single.summary);
        assert_ne!(batch[1].config.seed, batch[2].config.seed);
    }

    #[test]
    fn summary_aggregates_across_runs() {
        let batch = run_replications(&RouteConfig::default(), 4).unwrap();
        let summary = ReplicationSummary::from_outcomes(&batch);
        assert_eq!(summary.runs, 4);
        let max = batch.iter().map(|o| o.summary.max_queue_size).max().unwrap();
        assert_eq!(summary.max_queue_size, max);
        let mean: f64 = batch.iter().map(|o| o.summary.total_served as f64).sum::<f64>() / 4.0;
        assert!((summary.mean_served - mean).abs() < 1e-9);
    }

    #[test]
    fn empty_batch_summary_is_zero() {
        assert_eq!(ReplicationSummary::from_outcomes(&[]), ReplicationSummary::default());
    }

    #[test]
    fn invalid_config_fails_the_batch() {
        let config = RouteConfig { headway_mins: 0, ..RouteConfig::default() };
        assert!(run_replications(&config, 2).is_err());
    }
}
