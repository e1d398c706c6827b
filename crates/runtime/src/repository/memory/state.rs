//! In-memory StateRepository implementation for tests and local runs.

use std::collections::BTreeMap;
use std::sync::RwLock;

use combat_core::EntityId;

use crate::repository::{EntityRecord, RepositoryError, Result, StateRepository};

/// In-memory implementation of StateRepository.
///
/// Each save replaces the whole record under a write lock.
pub struct InMemoryStateRepo {
    records: RwLock<BTreeMap<EntityId, EntityRecord>>,
}

impl InMemoryStateRepo {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
        }
    }
}

impl Default for InMemoryStateRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl StateRepository for InMemoryStateRepo {
    fn save(&self, entity: EntityId, record: &EntityRecord) -> Result<()> {
        let mut records = self
            .records
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        records.insert(entity, record.clone());
        Ok(())
    }

    fn load(&self, entity: EntityId) -> Result<Option<EntityRecord>> {
        let records = self
            .records
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(records.get(&entity).cloned())
    }

    fn exists(&self, entity: EntityId) -> bool {
        self.records
            .read()
            .map(|records| records.contains_key(&entity))
            .unwrap_or(false)
    }

    fn delete(&self, entity: EntityId) -> Result<()> {
        let mut records = self
            .records
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        records.remove(&entity);
        Ok(())
    }

    fn list_entities(&self) -> Result<Vec<EntityId>> {
        let records = self
            .records
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(records.keys().copied().collect())
    }
}
