//! Passenger records for each lifecycle stage.

use bt_core::{BusId, Minute, PassengerId, StopId};

/// A passenger standing in a stop queue.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaitingPassenger {
    pub id:           PassengerId,
    pub arrival_time: Minute,
    pub origin:       StopId,
}

impl WaitingPassenger {
    /// Board `bus` at `now`, heading for `alight_stop`.
    ///
    /// Waiting time is clamped at zero.
    pub fn board(self, bus: BusId, now: Minute, alight_stop: StopId) -> BoardedPassenger {
        debug_assert!(alight_stop > self.origin, "alight stop must be downstream of boarding stop");
        BoardedPassenger {
            id:           self.id,
            arrival_time: self.arrival_time,
            bus,
            board_time:   now,
            board_stop:   self.origin,
            alight_stop,
            waiting_time: now.saturating_since(self.arrival_time),
        }
    }
}

/// A passenger on board a bus.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardedPassenger {
    pub id:           PassengerId,
    pub arrival_time: Minute,
    pub bus:          BusId,
    pub board_time:   Minute,
    pub board_stop:   StopId,
    /// Always strictly greater than `board_stop`.
    pub alight_stop:  StopId,
    pub waiting_time: u64,
}

impl BoardedPassenger {
    /// Get off at `now`.
    pub fn alight(self, now: Minute) -> CompletedTrip {
        CompletedTrip {
            alight_time: now,
            travel_time: now.saturating_since(self.board_time),
            total_time:  now.saturating_since(self.arrival_time),
            passenger:   self,
        }
    }
}

/// A finished journey.  Immutable; kept only for reporting.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompletedTrip {
    pub passenger:   BoardedPassenger,
    pub alight_time: Minute,
    pub travel_time: u64,
    /// `waiting_time + travel_time`, never negative.
    pub total_time:  u64,
}

impl CompletedTrip {
    #[inline]
    pub fn id(&self) -> PassengerId {
        self.passenger.id
    }
}

/// Any passenger at whatever stage the run left them in.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Passenger {
    Waiting(WaitingPassenger),
    Boarded(BoardedPassenger),
    Alighted(CompletedTrip),
}

impl Passenger {
    pub fn id(&self) -> PassengerId {
        match self {
            Passenger::Waiting(p) => p.id,
            Passenger::Boarded(p) => p.id,
            Passenger::Alighted(t) => t.passenger.id,
        }
    }

    pub fn arrival_time(&self) -> Minute {
        match self {
            Passenger::Waiting(p) => p.arrival_time,
            Passenger::Boarded(p) => p.arrival_time,
            Passenger::Alighted(t) => t.passenger.arrival_time,
        }
    }

    /// Label used in reports and CSV columns.
    pub fn stage(&self) -> &'static str {
        match self {
            Passenger::Waiting(_) => "waiting",
            Passenger::Boarded(_) => "boarded",
            Passenger::Alighted(_) => "alighted",
        }
    }
}
