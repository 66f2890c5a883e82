//! Route configuration and its validation.
//!
//! `RouteConfig` is the single input to a run.  It is typically loaded from
//! JSON (with the `serde` feature) or assembled from terminal prompts by the
//! application, then checked once with [`RouteConfig::validate`].  The
//! engine itself assumes a validated config and never re-checks it.

use crate::{BtError, BtResult, Minute, time::MINUTES_PER_DAY};

// ── TrafficWindow ─────────────────────────────────────────────────────────────

/// A half-open `[start, end)` range of minutes-of-day during which route
/// travel time uses the traffic value.  Windows never wrap midnight.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrafficWindow {
    pub start: u32,
    pub end:   u32,
}

impl TrafficWindow {
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// `true` if `minute_of_day` lies in `[start, end)`.
    #[inline]
    pub fn contains(&self, minute_of_day: u32) -> bool {
        self.start <= minute_of_day && minute_of_day < self.end
    }

    pub fn validate(&self) -> BtResult<()> {
        if self.start >= self.end || u64::from(self.end) > MINUTES_PER_DAY {
            return Err(BtError::TrafficWindow { start: self.start, end: self.end });
        }
        Ok(())
    }
}

// ── Distributions ─────────────────────────────────────────────────────────────

/// Distribution of the interval between consecutive passenger arrivals.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum ArrivalDistribution {
    /// Discrete uniform over `[min, max]` minutes.
    Uniform { min: u64, max: u64 },
    /// Exponential with the given mean, rounded to whole minutes (floor 1).
    Exponential { mean: f64 },
}

/// Offset applied to each bus's scheduled departure.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum DeviationDistribution {
    /// Buses leave exactly on schedule.
    #[default]
    None,
    /// Normally distributed, rounded to whole minutes.  May be negative.
    Normal { mean: f64, std_dev: f64 },
}

/// Time a bus spends between consecutive stops on top of the route travel
/// time.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum DwellDistribution {
    /// Discrete uniform over `[min, max]` minutes.
    Uniform { min: u64, max: u64 },
    /// Normally distributed, rounded, with a floor of 1 minute.
    Normal { mean: f64, std_dev: f64 },
}

// ── RouteConfig ───────────────────────────────────────────────────────────────

/// Every parameter of a single-route simulation run.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RouteConfig {
    /// Number of stops on the route.  Passengers originate at stops
    /// `0..stop_count-1`; the last stop is the terminus.
    pub stop_count: u16,

    /// Maximum passengers on board one bus.
    pub bus_capacity: usize,

    /// Minutes between consecutive departures from stop 0.
    pub headway_mins: u64,

    /// First scheduled departure.
    pub service_start: Minute,

    /// No departure is scheduled at or after this time.
    pub service_end: Minute,

    /// Route travel time outside traffic windows.
    pub normal_travel_mins: u64,

    /// Route travel time inside traffic windows.
    pub traffic_travel_mins: u64,

    pub traffic_windows: Vec<TrafficWindow>,

    /// Events at or after this time are not processed.
    pub horizon: Minute,

    pub arrivals: ArrivalDistribution,

    pub deviation: DeviationDistribution,

    pub dwell: DwellDistribution,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,
}

impl Default for RouteConfig {
    /// Five stops, a bus every 15 minutes from 06:00 to 21:00, morning and
    /// evening rush hours, one simulated day.
    fn default() -> Self {
        Self {
            stop_count:          5,
            bus_capacity:        40,
            headway_mins:        15,
            service_start:       Minute::hm(6, 0),
            service_end:         Minute::hm(21, 0),
            normal_travel_mins:  30,
            traffic_travel_mins: 45,
            traffic_windows:     vec![
                TrafficWindow::new(7 * 60, 9 * 60),
                TrafficWindow::new(17 * 60, 19 * 60),
            ],
            horizon:             Minute(MINUTES_PER_DAY),
            arrivals:            ArrivalDistribution::Uniform { min: 1, max: 5 },
            deviation:           DeviationDistribution::None,
            dwell:               DwellDistribution::Uniform { min: 5, max: 15 },
            seed:                42,
        }
    }
}

impl RouteConfig {
    /// Index of the terminus stop.
    #[inline]
    pub fn terminus(&self) -> crate::StopId {
        crate::StopId(self.stop_count.saturating_sub(1))
    }

    /// Check every parameter the engine relies on.
    ///
    /// `horizon` may be zero (an empty run).  Travel times may be zero, in
    /// which case a bus moves between stops in its dwell interval alone.
    pub fn validate(&self) -> BtResult<()> {
        if self.stop_count < 2 {
            return Err(BtError::TooFewStops(self.stop_count));
        }
        if self.bus_capacity == 0 {
            return Err(BtError::NonPositive { field: "bus_capacity" });
        }
        if self.headway_mins == 0 {
            return Err(BtError::NonPositive { field: "headway_mins" });
        }
        if self.service_end <= self.service_start {
            return Err(BtError::Config(format!(
                "service_end ({}) must be after service_start ({})",
                self.service_end.clock(),
                self.service_start.clock(),
            )));
        }
        for window in &self.traffic_windows {
            window.validate()?;
        }

        match self.arrivals {
            ArrivalDistribution::Uniform { min, max } => check_uniform("arrivals", min, max)?,
            ArrivalDistribution::Exponential { mean } => {
                if !(mean.is_finite() && mean > 0.0) {
                    return Err(BtError::NonPositive { field: "arrivals.mean" });
                }
            }
        }
        if let DeviationDistribution::Normal { mean, std_dev } = self.deviation {
            check_normal("deviation", mean, std_dev)?;
        }
        match self.dwell {
            DwellDistribution::Uniform { min, max } => check_uniform("dwell", min, max)?,
            DwellDistribution::Normal { mean, std_dev } => check_normal("dwell", mean, std_dev)?,
        }
        Ok(())
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn check_uniform(what: &str, min: u64, max: u64) -> BtResult<()> {
    if min == 0 {
        return Err(BtError::Config(format!("{what}: uniform min must be at least 1 minute")));
    }
    if min > max {
        return Err(BtError::Config(format!("{what}: uniform min {min} exceeds max {max}")));
    }
    Ok(())
}

fn check_normal(what: &str, mean: f64, std_dev: f64) -> BtResult<()> {
    if !mean.is_finite() || !std_dev.is_finite() || std_dev < 0.0 {
        return Err(BtError::Config(format!(
            "{what}: normal(mean={mean}, std_dev={std_dev}) needs finite values and std_dev >= 0"
        )));
    }
    Ok(())
}
