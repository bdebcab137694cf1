//! Durable persistence backend over `sled`, grounded on the teacher's
//! `storage::AnalysisStorage` (open-or-create, JSON-serialized values,
//! explicit `flush()` after every write).

use std::path::Path;
use std::sync::Arc;

use crate::config::Config;
use crate::error::PersistenceError;
use crate::types::{AnalysisResult, PersistedRecord};

use super::{check_version, wrap, PersistenceLayer};

#[derive(Clone)]
pub struct SledDal {
    db: Arc<sled::Db>,
}

impl SledDal {
    /// Open or create the record database at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let db = sled::open(path.as_ref()).map_err(|e| PersistenceError::Storage(e.to_string()))?;
        tracing::info!(path = %path.as_ref().display(), "metabolism-core record store opened");
        Ok(Self { db: Arc::new(db) })
    }

    fn get_raw(&self, test_id: &str) -> Result<Option<PersistedRecord>, PersistenceError> {
        let Some(bytes) = self
            .db
            .get(test_id.as_bytes())
            .map_err(|e| PersistenceError::Storage(e.to_string()))?
        else {
            return Ok(None);
        };
        let record: PersistedRecord =
            serde_json::from_slice(&bytes).map_err(|e| PersistenceError::Serialization(e.to_string()))?;
        Ok(Some(record))
    }
}

impl PersistenceLayer for SledDal {
    fn load(&self, test_id: &str) -> Result<Option<PersistedRecord>, PersistenceError> {
        match self.get_raw(test_id)? {
            Some(record) if check_version(&record).is_ok() => Ok(Some(record)),
            _ => Ok(None),
        }
    }

    fn save(&self, test_id: &str, result: AnalysisResult) -> Result<PersistedRecord, PersistenceError> {
        let existing = self.get_raw(test_id)?;
        let record = wrap(existing.as_ref(), test_id, result);
        let bytes = serde_json::to_vec(&record).map_err(|e| PersistenceError::Serialization(e.to_string()))?;
        self.db
            .insert(test_id.as_bytes(), bytes)
            .map_err(|e| PersistenceError::Storage(e.to_string()))?;
        self.db.flush().map_err(|e| PersistenceError::Storage(e.to_string()))?;
        tracing::debug!(test_id, "record saved");
        Ok(record)
    }

    fn delete(&self, test_id: &str) -> Result<(), PersistenceError> {
        self.db
            .remove(test_id.as_bytes())
            .map_err(|e| PersistenceError::Storage(e.to_string()))?;
        self.db.flush().map_err(|e| PersistenceError::Storage(e.to_string()))?;
        Ok(())
    }

    fn default_or_stored(&self, test_id: &str) -> Result<(Config, Option<PersistedRecord>, bool), PersistenceError> {
        match self.load(test_id)? {
            Some(record) => {
                let config = record.result.config.clone();
                Ok((config, Some(record), true))
            }
            None => Ok((Config::default(), None, false)),
        }
    }

    fn backend_name(&self) -> &'static str {
        "sled"
    }
}
