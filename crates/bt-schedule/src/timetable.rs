//! Scheduled departures from the first stop.

use bt_core::{BusId, Minute};

/// One bus leaving stop 0 at its nominal time.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Departure {
    pub bus:       BusId,
    pub scheduled: Minute,
}

/// The day's departures, in ascending scheduled time.
#[derive(Clone, Debug, Default)]
pub struct Timetable {
    departures: Vec<Departure>,
}

impl Timetable {
    /// A bus every `headway` minutes from `start` (inclusive) to `end`
    /// (exclusive), numbered from [`BusId::FIRST`].
    ///
    /// `headway` must be positive.
    pub fn regular(start: Minute, end: Minute, headway: u64) -> Self {
        debug_assert!(headway > 0, "headway must be positive");
        let mut departures = Vec::new();
        let mut bus = BusId::FIRST;
        let mut at = start;
        while at < end {
            departures.push(Departure { bus, scheduled: at });
            bus = bus.next();
            at = at + headway;
        }
        log::debug!(
            "timetable: {} departures from {} to {} every {headway} min",
            departures.len(),
            start.clock(),
            end.clock(),
        );
        Self { departures }
    }

    /// Departures at arbitrary times, sorted and numbered from
    /// [`BusId::FIRST`] in time order.
    pub fn from_times(times: impl IntoIterator<Item = Minute>) -> Self {
        let mut times: Vec<Minute> = times.into_iter().collect();
        times.sort_unstable();
        let departures = times
            .into_iter()
            .scan(BusId::FIRST, |bus, scheduled| {
                let d = Departure { bus: *bus, scheduled };
                *bus = bus.next();
                Some(d)
            })
            .collect();
        Self { departures }
    }

    pub fn departures(&self) -> &[Departure] {
        &self.departures
    }

    pub fn len(&self) -> usize {
        self.departures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.departures.is_empty()
    }

    /// Scheduled departure of `bus`, if it is in this timetable.
    pub fn scheduled(&self, bus: BusId) -> Option<Minute> {
        self.departures.iter().find(|d| d.bus == bus).map(|d| d.scheduled)
    }
}
