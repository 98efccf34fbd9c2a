//! Error types for the resolution engine.
//!
//! "No thumbnail" is never an error. It is `Ok(None)` from resolution and an
//! empty string from rendering.

use thiserror::Error;

/// Result type for service operations.
pub type ThumbnailResult<T> = Result<T, ThumbnailError>;

/// A size specification could not be turned into pixel dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    /// Neither the requested size nor the base `thumbnail` size is configured.
    #[error("no configuration for base size \"thumbnail\" (requested {requested:?})")]
    BaseSizeUnconfigured { requested: String },

    /// Explicit sizes must have positive width and height.
    #[error("invalid explicit size {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

/// A strategy failed to produce candidates. The chain logs these and moves on.
#[derive(Debug, Error)]
pub enum StrategyError {
    #[error("store error: {0}")]
    Store(#[from] fallthumb_store::StoreError),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{0}")]
    Other(String),
}

/// The chain registrations are inconsistent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    #[error("fallback node already registered: {0}")]
    DuplicateKey(String),

    #[error("fallback node {key:?} placed after {after:?} forms a cycle")]
    Cycle { key: String, after: String },
}

/// Errors surfaced by [`ThumbnailService`](crate::ThumbnailService).
#[derive(Debug, Error)]
pub enum ThumbnailError {
    #[error("size resolution failed: {0}")]
    Resolution(#[from] ResolutionError),

    #[error("fallback chain error: {0}")]
    Chain(#[from] ChainError),

    #[error("output error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),
}
