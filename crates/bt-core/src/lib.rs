//! `bt-core`: foundational types for the bus transit simulator.
//!
//! This crate is a dependency of every other `bt-*` crate.  It has no
//! `bt-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`ids`]         | `PassengerId`, `BusId`, `StopId`                          |
//! | [`time`]        | `Minute`, `MINUTES_PER_DAY`, clock-string formatting      |
//! | [`rng`]         | `SimRng` (the run's single seeded random source)          |
//! | [`config`]      | `RouteConfig`, `TrafficWindow`, distribution parameters   |
//! | [`error`]       | `BtError`, `BtResult`                                     |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{
    ArrivalDistribution, DeviationDistribution, DwellDistribution, RouteConfig, TrafficWindow,
};
pub use error::{BtError, BtResult};
pub use ids::{BusId, PassengerId, StopId};
pub use rng::{SimRng, replication_seed};
pub use time::{MINUTES_PER_DAY, Minute, format_hhmm, parse_hhmm};
