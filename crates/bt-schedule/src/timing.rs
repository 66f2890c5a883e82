//! The stochastic timing model.
//!
//! Every function is pure apart from consuming the caller's [`SimRng`]; the
//! model itself holds only immutable, pre-built samplers.  Given the same
//! seed and the same call sequence it always returns the same values.
//!
//! | Function                   | Result                                     |
//! |----------------------------|--------------------------------------------|
//! | `next_arrival_interval`    | minutes to the next passenger, always ≥ 1  |
//! | `travel_time`              | route leg duration, traffic-window aware   |
//! | `bus_arrival_deviation`    | signed early/late offset for a departure   |
//! | `dwell_interval`           | extra minutes between stops, always ≥ 1    |
//! | `origin_stop`              | uniform in `[0, N-2]`                      |
//! | `alight_stop`              | uniform in `(board, N-1]`                  |

use rand::distributions::Uniform;
use rand_distr::{Exp, Normal};

use bt_core::{
    ArrivalDistribution, DeviationDistribution, DwellDistribution, Minute, RouteConfig, SimRng,
    StopId, TrafficWindow,
};

use crate::{ScheduleError, ScheduleResult};

enum IntervalSampler {
    Uniform(Uniform<u64>),
    Exponential(Exp<f64>),
}

enum DeviationSampler {
    None,
    Normal(Normal<f64>),
}

enum DwellSampler {
    Uniform(Uniform<u64>),
    Normal(Normal<f64>),
}

/// Samplers and lookup tables for every stochastic duration in a run.
pub struct TimingModel {
    arrivals:       IntervalSampler,
    deviation:      DeviationSampler,
    dwell:          DwellSampler,
    normal_travel:  u64,
    traffic_travel: u64,
    windows:        Vec<TrafficWindow>,
    stop_count:     u16,
}

impl TimingModel {
    /// Build the samplers described by `config`.
    ///
    /// `config` should already have passed [`RouteConfig::validate`]; this
    /// only fails if a distribution is rejected by `rand_distr` itself.
    pub fn new(config: &RouteConfig) -> ScheduleResult<Self> {
        let arrivals = match config.arrivals {
            ArrivalDistribution::Uniform { min, max } => {
                IntervalSampler::Uniform(Uniform::new_inclusive(min.max(1), max.max(1)))
            }
            ArrivalDistribution::Exponential { mean } => {
                let exp = Exp::new(1.0 / mean).map_err(|e| ScheduleError::Distribution {
                    what:   "arrival",
                    reason: e.to_string(),
                })?;
                IntervalSampler::Exponential(exp)
            }
        };

        let deviation = match config.deviation {
            DeviationDistribution::None => DeviationSampler::None,
            DeviationDistribution::Normal { mean, std_dev } => {
                DeviationSampler::Normal(normal("deviation", mean, std_dev)?)
            }
        };

        let dwell = match config.dwell {
            DwellDistribution::Uniform { min, max } => {
                DwellSampler::Uniform(Uniform::new_inclusive(min.max(1), max.max(1)))
            }
            DwellDistribution::Normal { mean, std_dev } => {
                DwellSampler::Normal(normal("dwell", mean, std_dev)?)
            }
        };

        Ok(Self {
            arrivals,
            deviation,
            dwell,
            normal_travel:  config.normal_travel_mins,
            traffic_travel: config.traffic_travel_mins,
            windows:        config.traffic_windows.clone(),
            stop_count:     config.stop_count,
        })
    }

    /// Minutes until the next passenger arrival.  Never zero, so passenger
    /// generation always moves forward in time.
    pub fn next_arrival_interval(&self, rng: &mut SimRng) -> u64 {
        match &self.arrivals {
            IntervalSampler::Uniform(u) => rng.sample(u),
            IntervalSampler::Exponential(exp) => whole_minutes(rng.sample(exp)),
        }
    }

    /// `true` if `now` falls inside any configured traffic window.
    pub fn is_traffic(&self, now: Minute) -> bool {
        let minute_of_day = now.minute_of_day();
        self.windows.iter().any(|w| w.contains(minute_of_day))
    }

    /// Route leg duration for a bus entering the leg at `now`.
    pub fn travel_time(&self, now: Minute) -> u64 {
        if self.is_traffic(now) { self.traffic_travel } else { self.normal_travel }
    }

    /// Signed offset from a bus's scheduled departure.  Zero when deviation
    /// is disabled.
    pub fn bus_arrival_deviation(&self, rng: &mut SimRng) -> i64 {
        match &self.deviation {
            DeviationSampler::None => 0,
            DeviationSampler::Normal(n) => rng.sample(n).round() as i64,
        }
    }

    /// Minutes between consecutive stops on top of the travel time, ≥ 1.
    pub fn dwell_interval(&self, rng: &mut SimRng) -> u64 {
        match &self.dwell {
            DwellSampler::Uniform(u) => rng.sample(u),
            DwellSampler::Normal(n) => whole_minutes(rng.sample(n)),
        }
    }

    /// Stop at which a new passenger starts waiting.  The terminus never
    /// originates passengers.
    pub fn origin_stop(&self, rng: &mut SimRng) -> StopId {
        StopId(rng.gen_range(0..self.stop_count - 1))
    }

    /// Stop at which a passenger boarding at `board` will get off: strictly
    /// downstream, at or before the terminus.
    ///
    /// # Panics
    ///
    /// Panics if `board` is the terminus (nobody boards there).
    pub fn alight_stop(&self, rng: &mut SimRng, board: StopId) -> StopId {
        assert!(
            board.0 + 1 < self.stop_count,
            "no stop downstream of terminus {board}",
        );
        StopId(rng.gen_range(board.0 + 1..self.stop_count))
    }

    pub fn stop_count(&self) -> u16 {
        self.stop_count
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn normal(what: &'static str, mean: f64, std_dev: f64) -> ScheduleResult<Normal<f64>> {
    Normal::new(mean, std_dev).map_err(|e| ScheduleError::Distribution {
        what,
        reason: e.to_string(),
    })
}

/// Round a continuous sample to whole minutes with a floor of 1.
#[inline]
fn whole_minutes(sample: f64) -> u64 {
    let rounded = sample.round();
    if rounded.is_finite() && rounded >= 1.0 { rounded as u64 } else { 1 }
}
