//! File-based StateRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use combat_core::EntityId;
use sha2::{Digest, Sha256};

use crate::repository::{EntityRecord, RepositoryError, Result, StateRepository};

const DIGEST_LEN: usize = 32;

/// File-based implementation of StateRepository.
///
/// # File Format
///
/// Each entity is stored as `entity_{id}.bin`:
///
/// ```text
/// [32-byte SHA-256 of payload][bincode serialized EntityRecord]
/// ```
///
/// Writes go to a temp file that is renamed over the target, so a crash
/// leaves either the old record or the new one. Loads verify the digest and
/// report a mismatch as [`RepositoryError::ChecksumMismatch`].
pub struct FileStateRepository {
    base_dir: PathBuf,
}

impl FileStateRepository {
    /// Create a new file-based state repository.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path to a record file.
    fn record_path(&self, entity: EntityId) -> PathBuf {
        self.base_dir.join(format!("entity_{}.bin", entity.0))
    }
}

impl StateRepository for FileStateRepository {
    fn save(&self, entity: EntityId, record: &EntityRecord) -> Result<()> {
        let path = self.record_path(entity);
        let temp_path = path.with_extension("bin.tmp");

        let payload =
            bincode::serialize(record).map_err(|e| RepositoryError::Encoding(e.to_string()))?;
        let mut bytes = Vec::with_capacity(DIGEST_LEN + payload.len());
        bytes.extend_from_slice(&Sha256::digest(&payload));
        bytes.extend_from_slice(&payload);

        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!("Saved record[{}] to {}", entity, path.display());

        Ok(())
    }

    fn load(&self, entity: EntityId) -> Result<Option<EntityRecord>> {
        let path = self.record_path(entity);

        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path)?;
        if bytes.len() < DIGEST_LEN {
            return Err(RepositoryError::TruncatedRecord {
                entity,
                len: bytes.len(),
            });
        }
        let (digest, payload) = bytes.split_at(DIGEST_LEN);
        if Sha256::digest(payload).as_slice() != digest {
            return Err(RepositoryError::ChecksumMismatch { entity });
        }
        let record: EntityRecord = bincode::deserialize(payload)
            .map_err(|e| RepositoryError::Encoding(e.to_string()))?;

        tracing::debug!("Loaded record[{}] from {}", entity, path.display());

        Ok(Some(record))
    }

    fn exists(&self, entity: EntityId) -> bool {
        self.record_path(entity).exists()
    }

    fn delete(&self, entity: EntityId) -> Result<()> {
        let path = self.record_path(entity);

        if path.exists() {
            fs::remove_file(&path)?;
            tracing::debug!("Deleted record[{}]", entity);
        }

        Ok(())
    }

    fn list_entities(&self) -> Result<Vec<EntityId>> {
        let mut entities = Vec::new();

        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();

            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(id_str) = filename
                    .strip_prefix("entity_")
                    .and_then(|s| s.strip_suffix(".bin"))
                && let Ok(id) = id_str.parse::<u32>()
            {
                entities.push(EntityId(id));
            }
        }

        entities.sort_unstable();
        Ok(entities)
    }
}
