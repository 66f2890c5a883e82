//! Framework error type.
//!
//! Everything in here is a configuration problem detected before a run
//! starts.  Logic defects inside the engine are not represented: they panic.

use thiserror::Error;

/// The top-level error type for `bt-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum BtError {
    #[error("configuration error: {field} must be positive")]
    NonPositive { field: &'static str },

    #[error("configuration error: route needs at least 2 stops, got {0}")]
    TooFewStops(u16),

    #[error("configuration error: traffic window [{start}, {end}) is malformed")]
    TrafficWindow { start: u32, end: u32 },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `bt-*` crates.
pub type BtResult<T> = Result<T, BtError>;
