//! `bt-fleet`: who is where: passengers, stop queues, and buses.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                          |
//! |---------------|-------------------------------------------------------------------|
//! | [`passenger`] | `WaitingPassenger` → `BoardedPassenger` → `CompletedTrip`, `Passenger` |
//! | [`queues`]    | `StopQueues`: one FIFO of waiting passengers per origin stop     |
//! | [`bus`]       | `Bus`, `StopVisit`: per-bus state machine and visit history      |
//!
//! # Passenger lifecycle
//!
//! A passenger is always in exactly one place:
//!
//! 1. Created as a `WaitingPassenger` and appended to its origin stop's queue.
//! 2. Removed from the queue exactly once by the first bus visit with spare
//!    capacity; becomes a `BoardedPassenger` owned by that bus.
//! 3. Leaves the bus at its alight stop as an immutable `CompletedTrip`.
//!
//! Each transition consumes the previous stage by value, so no record can
//! exist half-populated.

pub mod bus;
pub mod passenger;
pub mod queues;


pub use bus::{Bus, StopVisit};
pub use passenger::{BoardedPassenger, CompletedTrip, Passenger, WaitingPassenger};
pub use queues::StopQueues;
