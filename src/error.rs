//! Structural error kinds for the analysis core.
//!
//! Mirrors the shape of the teacher's protocol error enums: each variant
//! carries the data a caller needs to react programmatically, never just a
//! free-form string to match against.

use thiserror::Error;

/// Errors raised while analyzing a single test.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("window invalid: {0}")]
    WindowInvalid(String),

    #[error("config invalid: field '{field}': {message}")]
    ConfigInvalid { field: String, message: String },

    #[error("insufficient data: {0}")]
    InsufficientData(String),

    #[error("fatmax undefined: {0}")]
    FatMaxUndefined(String),

    #[error(
        "persistence conflict: stored record is algorithm_version '{stored}', current is '{current}'"
    )]
    PersistenceConflict { stored: String, current: String },
}

/// Errors raised by the persistence adapter itself (store I/O, (de)serialization).
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("not found")]
    NotFound,
}
