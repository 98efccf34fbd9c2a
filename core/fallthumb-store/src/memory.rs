use crate::error::{StoreError, StoreResult};
use crate::SlugImageStore;
use fallthumb_types::{ImageRef, MappingId, Slug, SlugMapping};
use std::sync::{Mutex, MutexGuard};

/// In-process mapping store with the same contract as the SQLite one.
#[derive(Default)]
pub struct MemorySlugStore {
    state: Mutex<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    last_id: i64,
    rows: Vec<SlugMapping>,
}

impl MemorySlugStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store pre-populated with `(slug, image)` pairs.
    pub fn with_mappings<'a>(
        mappings: impl IntoIterator<Item = (&'a str, ImageRef)>,
    ) -> StoreResult<Self> {
        let store = Self::new();
        for (slug, image) in mappings {
            store.add(slug, image)?;
        }
        Ok(store)
    }

    fn state(&self) -> StoreResult<MutexGuard<'_, MemoryState>> {
        self.state.lock().map_err(|_| StoreError::Poisoned)
    }
}

impl SlugImageStore for MemorySlugStore {
    fn get(&self, slug: &str) -> StoreResult<Option<ImageRef>> {
        let state = self.state()?;
        Ok(state.rows.iter().find(|m| m.slug.as_str() == slug).map(|m| m.image))
    }

    fn add(&self, slug: &str, image: ImageRef) -> StoreResult<MappingId> {
        let slug = Slug::new(slug)?;
        let mut state = self.state()?;
        if state.rows.iter().any(|m| m.slug == slug) {
            return Err(StoreError::DuplicateSlug(slug.into()));
        }
        state.last_id += 1;
        let id = MappingId::new(state.last_id);
        state.rows.push(SlugMapping { id, slug, image });
        Ok(id)
    }

    fn update(&self, id: MappingId, image: ImageRef) -> StoreResult<()> {
        let mut state = self.state()?;
        let row = state
            .rows
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(StoreError::NotFound(id))?;
        row.image = image;
        Ok(())
    }

    fn delete(&self, id: MappingId) -> StoreResult<()> {
        self.state()?.rows.retain(|m| m.id != id);
        Ok(())
    }

    fn list(&self) -> StoreResult<Vec<SlugMapping>> {
        Ok(self.state()?.rows.clone())
    }
}
