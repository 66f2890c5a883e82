use bt_core::BtError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("traffic window parse error: {0}")]
    Parse(String),

    #[error("invalid {what} distribution: {reason}")]
    Distribution { what: &'static str, reason: String },

    #[error(transparent)]
    Core(#[from] BtError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
