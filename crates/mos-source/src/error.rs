//! Error types for mos-source

use mos_core::{ListError, RecordId};
use thiserror::Error;

/// Failure of a load or mutate round trip.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SourceError {
    /// No record with this id at the source
    #[error("Record not found: {0}")]
    NotFound(RecordId),

    /// The source refused the patch
    #[error("Patch rejected for {id}: {reason}")]
    Rejected { id: RecordId, reason: String },

    /// The backend could not be reached
    #[error("Source unavailable: {0}")]
    Unavailable(String),

    /// The view unmounted before the operation finished
    #[error("Operation cancelled")]
    Cancelled,

    /// The loaded collection broke a list invariant
    #[error("Invalid collection: {0}")]
    Invalid(#[from] ListError),
}

/// Configuration loading or validation error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Value out of range: {0}")]
    OutOfRange(String),
}
