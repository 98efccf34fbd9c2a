//! Slug → image mapping storage.
//!
//! Provides the one piece of durable state the resolver owns: a table mapping
//! administrator-chosen slugs to a single image each.
//!
//! # Implementations
//!
//! - [`SqliteSlugStore`] persists mappings in a SQLite table
//! - [`MemorySlugStore`] keeps them in process, for tests and hosts without SQL
//!
//! Reads need no coordination. Writes are independent last-writer-wins
//! operations; two admin sessions editing the same row may race.

mod error;
mod memory;
mod sqlite;

pub use error::{StoreError, StoreResult};
pub use memory::MemorySlugStore;
pub use sqlite::{DEFAULT_TABLE, SqliteSlugStore};

use fallthumb_types::{ImageRef, MappingId, SlugMapping};

/// Persistent mapping from a slug to one image.
pub trait SlugImageStore: Send + Sync {
    /// Looks up the image mapped to `slug`, if any.
    fn get(&self, slug: &str) -> StoreResult<Option<ImageRef>>;

    /// Adds a mapping and returns its id.
    ///
    /// Fails with [`StoreError::DuplicateSlug`] when the slug is already
    /// mapped; the existing mapping is left untouched.
    fn add(&self, slug: &str, image: ImageRef) -> StoreResult<MappingId>;

    /// Points an existing mapping at a different image.
    fn update(&self, id: MappingId, image: ImageRef) -> StoreResult<()>;

    /// Removes a mapping. Deleting an unknown id is not an error.
    fn delete(&self, id: MappingId) -> StoreResult<()>;

    /// All mappings, in no guaranteed order.
    fn list(&self) -> StoreResult<Vec<SlugMapping>>;
}

impl<S: SlugImageStore + ?Sized> SlugImageStore for std::sync::Arc<S> {
    fn get(&self, slug: &str) -> StoreResult<Option<ImageRef>> {
        (**self).get(slug)
    }

    fn add(&self, slug: &str, image: ImageRef) -> StoreResult<MappingId> {
        (**self).add(slug, image)
    }

    fn update(&self, id: MappingId, image: ImageRef) -> StoreResult<()> {
        (**self).update(id, image)
    }

    fn delete(&self, id: MappingId) -> StoreResult<()> {
        (**self).delete(id)
    }

    fn list(&self) -> StoreResult<Vec<SlugMapping>> {
        (**self).list()
    }
}
