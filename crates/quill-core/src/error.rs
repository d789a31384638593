//! Error types for store operations.

use thiserror::Error;

/// Result type alias using [`StoreError`].
pub type Result<T> = std::result::Result<T, StoreError>;

/// Failures surfaced by the record store.
///
/// The store trusts its caller to have validated payloads, so its failure
/// surface is limited to missing ids plus the two states it refuses to
/// represent: duplicate ids and statuses outside the enumeration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Article not found: {0}")]
    NotFound(String),

    #[error("Article id already exists: {0}")]
    DuplicateId(String),

    #[error("Invalid article status: {0}")]
    InvalidStatus(String),
}
