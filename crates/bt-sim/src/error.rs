use bt_core::BtError;
use bt_schedule::ScheduleError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] BtError),

    #[error("timing model: {0}")]
    Timing(#[from] ScheduleError),
}

pub type SimResult<T> = Result<T, SimError>;
