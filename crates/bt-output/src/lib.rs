//! `bt-output`: everything that turns a run into something a person reads.
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`row`]         | Flat row types, one per output table                      |
//! | [`writer`]      | The `OutputWriter` trait and `write_outcome`              |
//! | [`csv`]         | `CsvWriter`: four CSV files in one directory              |
//! | [`observer`]    | `SimOutputObserver`: streams rows while the sim runs      |
//! | [`report`]      | Plain-text run report with `HH:MM` clock times            |
//! | [`histogram`]   | Fixed-width text histograms                               |
//!
//! # Usage
//!
//! ```rust,ignore
//! use bt_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(&mut obs);
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! println!("{}", bt_output::report::render(&sim.into_outcome()));
//! ```

pub mod csv;
pub mod error;
pub mod histogram;
pub mod observer;
pub mod report;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use histogram::Histogram;
pub use observer::SimOutputObserver;
pub use row::{QueueSampleRow, StopVisitRow, SummaryRow, TripRow};
pub use writer::{OutputWriter, write_outcome};
