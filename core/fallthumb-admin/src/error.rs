//! Error types for admin operations.

use thiserror::Error;

/// Result type for admin operations.
pub type AdminResult<T> = Result<T, AdminError>;

#[derive(Debug, Error)]
pub enum AdminError {
    /// The acting user lacks the management capability.
    #[error("permission denied: {user} lacks '{capability}'")]
    PermissionDenied { user: String, capability: String },

    #[error("store error: {0}")]
    Store(#[from] fallthumb_store::StoreError),

    #[error("size resolution failed: {0}")]
    Resolution(#[from] fallthumb_engine::ResolutionError),
}
