//! `bt-schedule`: what happens when: the event queue, the bus timetable,
//! and the stochastic timing model.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`queue`]     | `Event`, `EventKind`, `EventQueue` (`BTreeMap<Minute, VecDeque<Event>>`) |
//! | [`timetable`] | `Departure`, `Timetable`: scheduled departures from stop 0 |
//! | [`timing`]    | `TimingModel`: arrival intervals, travel, deviation, dwell |
//! | [`loader`]    | `load_traffic_windows_csv`, `load_traffic_windows_reader` |
//! | [`error`]     | `ScheduleError`, `ScheduleResult<T>`                      |
//!
//! # Ordering model (summary)
//!
//! ```text
//! pop order   = ascending event time
//! ties        = insertion order (FIFO)
//! causality   = no event may be scheduled before the last popped time
//! ```
//!
//! Together with a single seeded `SimRng` this makes every run
//! reproducible: same seed, same event order, same results.

pub mod error;
pub mod loader;
pub mod queue;
pub mod timetable;
pub mod timing;

#[cfg(test)]
mod tests;

pub use error::{ScheduleError, ScheduleResult};
pub use loader::{load_traffic_windows_csv, load_traffic_windows_reader};
pub use queue::{Event, EventKind, EventQueue};
pub use timetable::{Departure, Timetable};
pub use timing::TimingModel;
