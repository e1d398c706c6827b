//! Repository contracts for saving and loading combatant records and events.

use combat_core::{CombatantState, EntityId, SkillBook};
use serde::{Deserialize, Serialize};

use crate::events::Event;
use crate::repository::Result;

/// Everything persisted for one combatant, written as a single unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRecord {
    pub combatant: CombatantState,
    pub skills: SkillBook,
}

impl EntityRecord {
    pub fn new(combatant: CombatantState, skills: SkillBook) -> Self {
        Self { combatant, skills }
    }
}

/// Repository for combatant persistence keyed by entity.
///
/// Implementations must replace a record atomically: a reader sees either
/// the previous record or the new one, never a mix.
pub trait StateRepository: Send + Sync {
    /// Save (or overwrite) an entity's record
    fn save(&self, entity: EntityId, record: &EntityRecord) -> Result<()>;

    /// Load an entity's record
    fn load(&self, entity: EntityId) -> Result<Option<EntityRecord>>;

    /// Check if a record exists
    fn exists(&self, entity: EntityId) -> bool;

    /// Delete a record; deleting an absent record is not an error
    fn delete(&self, entity: EntityId) -> Result<()>;

    /// List all stored entities in ascending order
    fn list_entities(&self) -> Result<Vec<EntityId>>;
}

/// Repository for event log persistence
///
/// Provides append-only logging for the complete event timeline.
pub trait EventRepository: Send + Sync {
    /// Append an event to the log
    ///
    /// Returns the sequence number of the appended event, starting at 0.
    fn append(&mut self, event: &Event) -> Result<u64>;

    /// Read every event in append order
    fn read_all(&self) -> Result<Vec<Event>>;

    /// Flush buffered writes to disk
    fn flush(&mut self) -> Result<()>;

    /// Number of events in the log
    fn len(&self) -> Result<u64>;

    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}
