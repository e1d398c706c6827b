//! Failures of the persistence adapters.

use combat_core::EntityId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("record store lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("record encoding failed: {0}")]
    Encoding(String),

    #[error("record of {entity} is truncated ({len} bytes)")]
    TruncatedRecord { entity: EntityId, len: usize },

    #[error("record of {entity} failed its checksum")]
    ChecksumMismatch { entity: EntityId },

    #[error("event log line {line} is malformed: {source}")]
    MalformedEvent {
        line: usize,
        source: serde_json::Error,
    },

    #[error("event encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
