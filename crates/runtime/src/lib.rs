//! Runtime orchestration for deterministic combat sessions.
//!
//! This crate wires the pure rules of `combat-core` to the outside world:
//! a turn loop, persistence, equipment data and event fan-out. Consumers embed
//! [`CombatSession`] to drive turns and subscribe to [`EventBus`] topics for
//! narration or UI.
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the turn loop and action resolution
//! - [`api`] exposes the error types downstream callers handle
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`oracle`] and [`repository`] provide data adapters reused by other crates
pub mod api;
pub mod events;
pub mod oracle;
pub mod repository;
pub mod session;

pub use api::{Result, RuntimeError};
pub use events::{CombatEvent, Event, EventBus, SkillProgressed, StatusEvent, Topic, TurnEvent};
pub use oracle::EquipmentOracleImpl;
pub use repository::{
    EntityRecord, EventRepository, FileEventLog, FileStateRepository, InMemoryEventLog,
    InMemoryStateRepo, RepositoryError, StateRepository,
};
pub use session::{Action, ActionOutcome, CombatSession};
