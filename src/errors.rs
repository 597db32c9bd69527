use thiserror::Error;

use crate::domain::common::EntityId;

/// Failure to turn a date expression into a concrete point in time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Invalid date filter format: \"{0}\"")]
    InvalidFormat(String),
    #[error("Invalid calendar date: \"{0}\"")]
    InvalidDate(String),
    #[error("Date offset out of range: \"{0}\"")]
    OutOfRange(String),
}

/// Error type that captures record and settings store failures.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Record not found: {0}")]
    NotFound(EntityId),
    #[error("Store lock poisoned")]
    Poisoned,
}
