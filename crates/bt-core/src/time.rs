//! Simulation time model.
//!
//! # Design
//!
//! Time is an integer count of minutes since the start of the simulation,
//! which is taken to be midnight of the first simulated day.  Using an
//! integer as the canonical unit keeps all schedule arithmetic exact and
//! makes `minute mod 1440` the minute of day used by traffic windows.
//!
//! Human-readable `HH:MM` strings are produced only at the reporting edge
//! via [`format_hhmm`] / [`Minute::clock`]; the engine never formats time.

use std::fmt;

use crate::{BtError, BtResult};

/// Minutes in one day; traffic windows repeat with this period.
pub const MINUTES_PER_DAY: u64 = 1_440;

// ── Minute ───────────────────────────────────────────────────────────────────

/// An absolute simulation time, in whole minutes since start.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Minute(pub u64);

impl Minute {
    pub const ZERO: Minute = Minute(0);

    /// Build a time-of-day on the first simulated day.
    #[inline]
    pub const fn hm(hours: u64, minutes: u64) -> Minute {
        Minute(hours * 60 + minutes)
    }

    /// Return the time `n` minutes after `self`, saturating at `u64::MAX`.
    ///
    /// A saturated time is never below any horizon, so it is simply not
    /// processed.
    #[inline]
    pub fn offset(self, n: u64) -> Minute {
        Minute(self.0.saturating_add(n))
    }

    /// Apply a signed offset, clamping at minute zero.
    #[inline]
    pub fn shifted(self, delta: i64) -> Minute {
        Minute(self.0.saturating_add_signed(delta))
    }

    /// Minutes elapsed from `earlier` to `self`, or 0 if `earlier` is later.
    #[inline]
    pub fn saturating_since(self, earlier: Minute) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    /// Position within the current day, in `0..1440`.
    #[inline]
    pub fn minute_of_day(self) -> u32 {
        (self.0 % MINUTES_PER_DAY) as u32
    }

    /// `HH:MM` rendering of this time (hours are not wrapped at 24).
    pub fn clock(self) -> String {
        format_hhmm(self.0)
    }
}

impl std::ops::Add<u64> for Minute {
    type Output = Minute;
    #[inline]
    fn add(self, rhs: u64) -> Minute {
        self.offset(rhs)
    }
}

impl std::ops::Sub for Minute {
    type Output = u64;
    /// # Panics
    /// Panics in debug mode if `rhs > self`.
    #[inline]
    fn sub(self, rhs: Minute) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Minute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}m", self.0)
    }
}

// ── Clock strings ────────────────────────────────────────────────────────────

/// Format a minute count as zero-padded `HH:MM`.
///
/// Works for both absolute times and durations; hours beyond 23 are printed
/// as-is (`1500` → `"25:00"`).
pub fn format_hhmm(minutes: u64) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Parse `HH:MM` (or a bare integer minute count) into minutes.
pub fn parse_hhmm(s: &str) -> BtResult<u32> {
    let s = s.trim();
    let parsed = match s.split_once(':') {
        None => s.parse::<u32>().ok(),
        Some((h, m)) => match (h.parse::<u32>(), m.parse::<u32>()) {
            (Ok(h), Ok(m)) if m < 60 => h.checked_mul(60).and_then(|hm| hm.checked_add(m)),
            _ => None,
        },
    };
    parsed.ok_or_else(|| BtError::Parse(format!("invalid time {s:?}: expected HH:MM or minutes")))
}
