//! Unit tests for bt-schedule.

use bt_core::{
    ArrivalDistribution, BusId, DeviationDistribution, DwellDistribution, Minute, RouteConfig,
    SimRng, StopId, TrafficWindow,
};

use crate::{Event, EventKind, EventQueue, Timetable, TimingModel};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn rush_hour_config() -> RouteConfig {
    RouteConfig {
        normal_travel_mins:  20,
        traffic_travel_mins: 35,
        traffic_windows:     vec![TrafficWindow::new(420, 540), TrafficWindow::new(1_020, 1_140)],
        ..RouteConfig::default()
    }
}

fn bus(time: u64, bus: u32, stop: u16) -> Event {
    Event::bus_arrival(Minute(time), BusId(bus), StopId(stop))
}

// ── EventQueue ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod event_queue {
    use super::*;

    #[test]
    fn empty_queue() {
        let mut q = EventQueue::new();
        assert!(q.is_empty());
        assert_eq!(q.len(), 0);
        assert!(q.pop_min().is_none());
        assert!(q.peek_time().is_none());
    }

    #[test]
    fn pops_in_time_order() {
        let mut q = EventQueue::new();
        q.schedule(bus(30, 1, 0));
        q.schedule(bus(10, 2, 0));
        q.schedule(Event::passenger_arrival(Minute(20)));
        let times: Vec<u64> = std::iter::from_fn(|| q.pop_min()).map(|e| e.time.0).collect();
        assert_eq!(times, vec![10, 20, 30]);
    }

    #[test]
    fn ties_pop_in_insertion_order() {
        let mut q = EventQueue::new();
        q.schedule(bus(5, 3, 0));
        q.schedule(Event::passenger_arrival(Minute(5)));
        q.schedule(bus(5, 1, 2));
        assert_eq!(q.time_count(), 1);

        assert_eq!(q.pop_min().unwrap().kind, EventKind::BusArrival { bus: BusId(3), stop: StopId(0) });
        assert_eq!(q.pop_min().unwrap().kind, EventKind::PassengerArrival);
        assert_eq!(q.pop_min().unwrap().kind, EventKind::BusArrival { bus: BusId(1), stop: StopId(2) });
    }

    #[test]
    fn len_tracks_schedule_and_pop() {
        let mut q = EventQueue::new();
        q.schedule(bus(1, 1, 0));
        q.schedule(bus(1, 2, 0));
        q.schedule(bus(4, 3, 0));
        assert_eq!(q.len(), 3);
        assert_eq!(q.time_count(), 2);
        q.pop_min();
        assert_eq!(q.len(), 2);
        assert_eq!(q.time_count(), 2);
        q.pop_min();
        assert_eq!(q.time_count(), 1);
    }

    #[test]
    fn now_follows_last_pop() {
        let mut q = EventQueue::new();
        q.schedule(bus(12, 1, 0));
        assert_eq!(q.now(), Minute::ZERO);
        q.pop_min();
        assert_eq!(q.now(), Minute(12));
    }

    #[test]
    fn scheduling_at_current_time_is_allowed() {
        let mut q = EventQueue::new();
        q.schedule(bus(8, 1, 0));
        q.pop_min();
        q.schedule(Event::passenger_arrival(Minute(8)));
        assert_eq!(q.peek_time(), Some(Minute(8)));
    }

    #[test]
    #[should_panic(expected = "scheduled into the past")]
    fn scheduling_into_the_past_panics() {
        let mut q = EventQueue::new();
        q.schedule(bus(8, 1, 0));
        q.pop_min();
        q.schedule(Event::passenger_arrival(Minute(7)));
    }
}

// ── Timetable ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod timetable {
    use super::*;

    #[test]
    fn regular_headway() {
        let t = Timetable::regular(Minute::hm(6, 0), Minute::hm(7, 0), 15);
        let times: Vec<u64> = t.departures().iter().map(|d| d.scheduled.0).collect();
        assert_eq!(times, vec![360, 375, 390, 405]);
        let ids: Vec<u32> = t.departures().iter().map(|d| d.bus.0).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn end_is_exclusive() {
        let t = Timetable::regular(Minute(0), Minute(30), 10);
        assert_eq!(t.len(), 3);
        assert_eq!(t.scheduled(BusId(3)), Some(Minute(20)));
        assert_eq!(t.scheduled(BusId(4)), None);
    }

    #[test]
    fn enormous_headway_yields_one_departure() {
        let t = Timetable::regular(Minute(0), Minute(100), u64::MAX);
        assert_eq!(t.len(), 1);
        let t = Timetable::regular(Minute(5), Minute(u64::MAX), u64::MAX);
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn explicit_times_are_sorted_then_numbered() {
        let t = Timetable::from_times([Minute(50), Minute(10), Minute(30)]);
        let pairs: Vec<(u32, u64)> =
            t.departures().iter().map(|d| (d.bus.0, d.scheduled.0)).collect();
        assert_eq!(pairs, vec![(1, 10), (2, 30), (3, 50)]);
    }

    #[test]
    fn default_day_has_sixty_buses() {
        let cfg = RouteConfig::default();
        let t = Timetable::regular(cfg.service_start, cfg.service_end, cfg.headway_mins);
        assert_eq!(t.len(), 60);
    }
}

// ── TimingModel ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod timing {
    use super::*;

    #[test]
    fn traffic_window_boundaries_are_half_open() {
        let model = TimingModel::new(&rush_hour_config()).unwrap();
        assert_eq!(model.travel_time(Minute(419)), 20);
        assert_eq!(model.travel_time(Minute(420)), 35); // start → traffic
        assert_eq!(model.travel_time(Minute(539)), 35);
        assert_eq!(model.travel_time(Minute(540)), 20); // end → normal
    }

    #[test]
    fn traffic_windows_repeat_daily() {
        let model = TimingModel::new(&rush_hour_config()).unwrap();
        assert_eq!(model.travel_time(Minute(1_440 + 450)), 35);
        assert_eq!(model.travel_time(Minute(1_440 + 600)), 20);
    }

    #[test]
    fn uniform_arrivals_in_range() {
        let model = TimingModel::new(&RouteConfig::default()).unwrap();
        let mut rng = SimRng::new(1);
        for _ in 0..1_000 {
            let v = model.next_arrival_interval(&mut rng);
            assert!((1..=5).contains(&v), "got {v}");
        }
    }

    #[test]
    fn exponential_arrivals_at_least_one() {
        let cfg = RouteConfig {
            arrivals: ArrivalDistribution::Exponential { mean: 0.2 },
            ..RouteConfig::default()
        };
        let model = TimingModel::new(&cfg).unwrap();
        let mut rng = SimRng::new(9);
        assert!((0..1_000).all(|_| model.next_arrival_interval(&mut rng) >= 1));
    }

    #[test]
    fn exponential_mean_is_roughly_right() {
        let cfg = RouteConfig {
            arrivals: ArrivalDistribution::Exponential { mean: 6.0 },
            ..RouteConfig::default()
        };
        let model = TimingModel::new(&cfg).unwrap();
        let mut rng = SimRng::new(3);
        let n = 20_000;
        let total: u64 = (0..n).map(|_| model.next_arrival_interval(&mut rng)).sum();
        let mean = total as f64 / n as f64;
        assert!((mean - 6.0).abs() < 0.5, "mean {mean}");
    }

    #[test]
    fn no_deviation_is_zero() {
        let model = TimingModel::new(&RouteConfig::default()).unwrap();
        let mut rng = SimRng::new(0);
        assert!((0..100).all(|_| model.bus_arrival_deviation(&mut rng) == 0));
    }

    #[test]
    fn normal_deviation_can_be_negative() {
        let cfg = RouteConfig {
            deviation: DeviationDistribution::Normal { mean: 0.0, std_dev: 5.0 },
            ..RouteConfig::default()
        };
        let model = TimingModel::new(&cfg).unwrap();
        let mut rng = SimRng::new(5);
        let samples: Vec<i64> = (0..500).map(|_| model.bus_arrival_deviation(&mut rng)).collect();
        assert!(samples.iter().any(|&d| d < 0));
        assert!(samples.iter().any(|&d| d > 0));
    }

    #[test]
    fn normal_dwell_has_floor_of_one() {
        let cfg = RouteConfig {
            dwell: DwellDistribution::Normal { mean: 0.0, std_dev: 3.0 },
            ..RouteConfig::default()
        };
        let model = TimingModel::new(&cfg).unwrap();
        let mut rng = SimRng::new(11);
        assert!((0..1_000).all(|_| model.dwell_interval(&mut rng) >= 1));
    }

    #[test]
    fn stop_draws_respect_route_shape() {
        let model = TimingModel::new(&RouteConfig::default()).unwrap();
        let mut rng = SimRng::new(2);
        for _ in 0..1_000 {
            let origin = model.origin_stop(&mut rng);
            assert!(origin.0 <= 3, "terminus must never originate passengers");
            let alight = model.alight_stop(&mut rng, origin);
            assert!(alight > origin && alight.0 <= 4);
        }
    }

    #[test]
    #[should_panic(expected = "downstream of terminus")]
    fn alight_draw_at_terminus_panics() {
        let model = TimingModel::new(&RouteConfig::default()).unwrap();
        model.alight_stop(&mut SimRng::new(0), StopId(4));
    }

    #[test]
    fn same_seed_same_draws() {
        let model = TimingModel::new(&RouteConfig::default()).unwrap();
        let draw = |seed| {
            let mut rng = SimRng::new(seed);
            (0..50)
                .map(|_| (model.next_arrival_interval(&mut rng), model.dwell_interval(&mut rng)))
                .collect::<Vec<_>>()
        };
        assert_eq!(draw(77), draw(77));
    }
}

// ── Loader ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::Cursor;

    use crate::{ScheduleError, load_traffic_windows_reader};

    use super::*;

    #[test]
    fn loads_clock_and_minute_bounds() {
        let csv = "start,end\n07:00,09:00\n720,780\n";
        let windows = load_traffic_windows_reader(Cursor::new(csv)).unwrap();
        assert_eq!(windows, vec![TrafficWindow::new(420, 540), TrafficWindow::new(720, 780)]);
    }

    #[test]
    fn rejects_unparseable_bound() {
        let csv = "start,end\nnoon,13:00\n";
        let err = load_traffic_windows_reader(Cursor::new(csv)).unwrap_err();
        assert!(matches!(err, ScheduleError::Parse(_)));
    }

    #[test]
    fn rejects_wrapping_window() {
        let csv = "start,end\n23:00,01:00\n";
        let err = load_traffic_windows_reader(Cursor::new(csv)).unwrap_err();
        assert!(matches!(err, ScheduleError::Core(_)));
    }

    #[test]
    fn empty_file_means_no_traffic() {
        let windows = load_traffic_windows_reader(Cursor::new("start,end\n")).unwrap();
        assert!(windows.is_empty());
    }
}
