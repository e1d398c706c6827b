use crate::error::{ErrorSeverity, GameError};
use crate::state::{EntityId, Tick};

/// Errors that can occur during turn scheduling.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SchedulerError {
    #[error("entity {0} is not on the turn roster")]
    UnknownEntity(EntityId),

    #[error("clock cannot move backwards from {current} to {requested}")]
    ClockRewind { current: Tick, requested: Tick },
}

impl GameError for SchedulerError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownEntity(_) => "SCHEDULER_UNKNOWN_ENTITY",
            Self::ClockRewind { .. } => "SCHEDULER_CLOCK_REWIND",
        }
    }
}
