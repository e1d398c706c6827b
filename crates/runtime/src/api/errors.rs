//! Unified error types surfaced by the runtime API.
//!
//! Wraps contract violations from the combat core and failures from
//! repositories so callers can bubble them up with consistent context.
use combat_core::{CombatantError, EntityId, SchedulerError};
use thiserror::Error;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("action actor {provided} does not match current entity {expected}")]
    InvalidActionActor {
        expected: EntityId,
        provided: EntityId,
    },

    #[error("no turn is in progress")]
    NoCurrentTurn,

    #[error("turn of {0} is still in progress")]
    TurnInProgress(EntityId),

    #[error("entity {0} is not part of this session")]
    UnknownEntity(EntityId),

    #[error("entity {0} already joined this session")]
    DuplicateEntity(EntityId),

    #[error("entity {0} is defeated and cannot be targeted")]
    TargetDefeated(EntityId),

    #[error("no stored record for entity {0}")]
    RecordNotFound(EntityId),

    #[error(transparent)]
    Combatant(#[from] CombatantError),

    #[error(transparent)]
    Scheduler(#[from] SchedulerError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
