//! Shared error taxonomy for the domain and storage layers

use thiserror::Error;

use crate::record::RecordId;

/// Errors surfaced by journal implementations.
#[derive(Debug, Error)]
pub enum JournalError {
    /// No stored record carries the given id
    #[error("no record found with id {0}")]
    NotFound(RecordId),

    /// I/O failure against the backing file
    #[error("journal I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A record failed to serialize, or a field merge produced an invalid
    /// record
    #[error("journal serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors from normalizing an untyped entry payload.
#[derive(Debug, Error, PartialEq)]
pub enum PayloadError {
    /// The payload's type tag is outside the fixed vocabulary
    #[error("unknown entry type: {0}")]
    UnknownType(String),

    /// A required field is missing or has the wrong shape
    #[error("invalid entry payload: {0}")]
    Invalid(String),
}
