//! Persistence errors.

use std::path::PathBuf;

use thiserror::Error;

/// Failures of the persistence medium.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Backing file exists but is not a JSON object of strings.
    #[error("Corrupt store at {path}: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    /// Value could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Medium refused the write (quota, read-only, ...).
    #[error("Write rejected: {0}")]
    Write(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
