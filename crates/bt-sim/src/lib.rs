//! `bt-sim`: the discrete-event driver for a single bus route.
//!
//! # Event loop
//!
//! ```text
//! build:  validate config, seed SimRng, draw one deviation per timetable
//!         departure, schedule BusArrival(stop 0) at scheduled + deviation,
//!         schedule the first PassengerArrival.
//!
//! loop:   pop earliest event
//!           queue empty or time ≥ horizon  → stop (event discarded)
//!           PassengerArrival  → enqueue at random origin, sample queue length,
//!                               schedule next arrival if still < horizon
//!           BusArrival(b, s)  → create bus at stop 0, alight, board, record
//!                               visit, schedule (b, s+1) unless s is terminus
//! ```
//!
//! All state lives in one [`Sim`] value; there are no globals, so any number
//! of runs can coexist.  See [`run_replications`] for the batch form.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs replications on Rayon's thread pool.              |
//! | `serde`    | Serde derives on outcomes and metrics.                 |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use bt_core::RouteConfig;
//! use bt_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(RouteConfig::default()).build()?;
//! sim.run(&mut NoopObserver);
//! let outcome = sim.into_outcome();
//! println!("served {}", outcome.summary.total_served);
//! ```

pub mod builder;
pub mod error;
pub mod metrics;
pub mod observer;
pub mod outcome;
pub mod replicate;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use metrics::{Metrics, MetricsSummary, QueueSample};
pub use observer::{NoopObserver, SimObserver};
pub use outcome::{RunStats, SimOutcome, StopReason};
pub use replicate::{ReplicationSummary, run_replications, simulate};
pub use sim::Sim;
