//! C12 — Persistence Adapter: upsert/read/delete a configuration-plus-
//! results record keyed by test identity.
//!
//! Mirrors the teacher's `storage::persistence::PersistenceLayer` trait —
//! a pluggable-backend abstraction over advisory/report storage — scoped to
//! one record type. `InMemoryDal` is the direct analogue of the teacher's
//! `InMemoryDAL`; `SledDal` is the durable backend, grounded on
//! `storage::mod.rs`'s `AnalysisStorage` (sled, JSON-serialized values,
//! explicit `flush()` after every write).

mod in_memory;
mod sled_backend;

pub use in_memory::InMemoryDal;
pub use sled_backend::SledDal;

use chrono::Utc;

use crate::config::Config;
use crate::error::PersistenceError;
use crate::types::{AnalysisResult, PersistedRecord, ALGORITHM_VERSION};

/// Pluggable persistence backend for analysis records.
///
/// Implementations must be `Send + Sync` — callers may hold one behind an
/// `Arc` across threads, even though each individual call is a point
/// operation with no cross-call locking (§5).
pub trait PersistenceLayer: Send + Sync {
    /// Returns the stored record, or `None` if absent *or* if its
    /// `algorithm_version` differs from [`ALGORITHM_VERSION`] (§4.12,
    /// property 7) — the caller must re-run `analyze`.
    fn load(&self, test_id: &str) -> Result<Option<PersistedRecord>, PersistenceError>;

    /// Upsert: overwrites any existing record for `test_id`.
    fn save(&self, test_id: &str, result: AnalysisResult) -> Result<PersistedRecord, PersistenceError>;

    /// Removes the record; a subsequent `load` returns `None`.
    fn delete(&self, test_id: &str) -> Result<(), PersistenceError>;

    /// The stored record if present (and version-compatible), else the
    /// default config with no record. `is_persisted` reflects whether
    /// persistence is authoritative for this `test_id`.
    fn default_or_stored(&self, test_id: &str) -> Result<(Config, Option<PersistedRecord>, bool), PersistenceError> {
        match self.load(test_id)? {
            Some(record) => {
                let config = record.result.config.clone();
                Ok((config, Some(record), true))
            }
            None => Ok((Config::default(), None, false)),
        }
    }

    fn backend_name(&self) -> &'static str;
}

/// Build a fresh [`PersistedRecord`] from an analysis result, stamping
/// `created_at`/`updated_at` with the current time. Kept outside the trait
/// so both backends share identical upsert semantics.
fn wrap(existing: Option<&PersistedRecord>, test_id: &str, result: AnalysisResult) -> PersistedRecord {
    let now = Utc::now();
    PersistedRecord {
        test_id: test_id.to_string(),
        result,
        created_at: existing.map(|r| r.created_at).unwrap_or(now),
        updated_at: now,
    }
}

/// Whether a stored record's `algorithm_version` still matches the running
/// binary's. Exposed separately from `load` for callers that want the
/// structural `PersistenceConflict` error (§7) instead of a silent `None`.
pub fn check_version(record: &PersistedRecord) -> Result<(), crate::error::AnalysisError> {
    if record.result.algorithm_version != ALGORITHM_VERSION {
        return Err(crate::error::AnalysisError::PersistenceConflict {
            stored: record.result.algorithm_version.clone(),
            current: ALGORITHM_VERSION.to_string(),
        });
    }
    Ok(())
}
