//! Error types for the mapping store.

use fallthumb_types::MappingId;
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// The slug is already mapped to an image.
    #[error("slug already mapped: {0}")]
    DuplicateSlug(String),

    /// No mapping with this id.
    #[error("mapping not found: {0}")]
    NotFound(MappingId),

    /// Slug failed validation (empty or too long).
    #[error("invalid slug: {0}")]
    InvalidSlug(#[from] fallthumb_types::Error),

    /// Table prefix contains characters that are not safe in an identifier.
    #[error("invalid table prefix: {0:?}")]
    InvalidTablePrefix(String),

    /// A previous writer panicked while holding the connection.
    #[error("store lock poisoned")]
    Poisoned,
}
