//! Core type definitions for the fallback thumbnail resolver.
//!
//! This crate defines the host-agnostic types shared by every other crate:
//! - Content, image and mapping identifiers
//! - Validated slugs and the slug → image mapping record
//! - Size specifications and their resolved pixel form
//!
//! Identifiers are opaque to the resolver. They are only ever handed back to
//! the host content model or media library.

mod ids;
mod mapping;
mod size;

pub use ids::{ContentId, ImageRef, MappingId};
pub use mapping::{MAX_SLUG_LEN, SITE_SLUG, Slug, SlugMapping, Term};
pub use size::{BASE_SIZE, Dimensions, ResolvedSize, SizeSpec, normalize_size_name};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when constructing validated types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("slug must not be empty")]
    EmptySlug,

    #[error("slug is {len} characters long, the limit is 200")]
    SlugTooLong { len: usize },

    #[error("invalid identifier: {0}")]
    InvalidId(#[from] std::num::ParseIntError),
}
