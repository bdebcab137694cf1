//! In-memory persistence backend — for tests and minimal deployments,
//! grounded on the teacher's `storage::persistence::InMemoryDAL`.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::config::Config;
use crate::error::PersistenceError;
use crate::types::{AnalysisResult, PersistedRecord};

use super::{check_version, wrap, PersistenceLayer};

/// Thread-safe via `RwLock`. Not durable — data lost on restart.
#[derive(Default)]
pub struct InMemoryDal {
    records: RwLock<HashMap<String, PersistedRecord>>,
}

impl InMemoryDal {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PersistenceLayer for InMemoryDal {
    fn load(&self, test_id: &str) -> Result<Option<PersistedRecord>, PersistenceError> {
        let records = self
            .records
            .read()
            .map_err(|e| PersistenceError::Storage(e.to_string()))?;
        match records.get(test_id) {
            Some(record) if check_version(record).is_ok() => Ok(Some(record.clone())),
            _ => Ok(None),
        }
    }

    fn save(&self, test_id: &str, result: AnalysisResult) -> Result<PersistedRecord, PersistenceError> {
        let mut records = self
            .records
            .write()
            .map_err(|e| PersistenceError::Storage(e.to_string()))?;
        let record = wrap(records.get(test_id), test_id, result);
        records.insert(test_id.to_string(), record.clone());
        Ok(record)
    }

    fn delete(&self, test_id: &str) -> Result<(), PersistenceError> {
        let mut records = self
            .records
            .write()
            .map_err(|e| PersistenceError::Storage(e.to_string()))?;
        records.remove(test_id);
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
        "InMemory"
    }
}
