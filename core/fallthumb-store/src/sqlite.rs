//! SQLite-backed mapping table.

use crate::error::{StoreError, StoreResult};
use crate::SlugImageStore;
use fallthumb_types::{ImageRef, MappingId, Slug, SlugMapping};
use rusqlite::{Connection, ErrorCode, OptionalExtension, params};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info, warn};

/// Table name without prefix.
pub const DEFAULT_TABLE: &str = "fallback_thumbnails";

/// Mapping store backed by a single SQLite table.
///
/// Schema: `thumbnail_id` integer primary key, `attachment_id` integer image
/// reference, `slug` unique `VARCHAR(200)`.
pub struct SqliteSlugStore {
    conn: Arc<Mutex<Connection>>,
    table: String,
}

impl SqliteSlugStore {
    /// Opens (or creates) a store at the given path.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let conn = Connection::open(path.as_ref())?;
        Self::open_with_conn(Arc::new(Mutex::new(conn)))
    }

    /// Opens an in-memory store (for testing).
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::open_with_conn(Arc::new(Mutex::new(conn)))
    }

    /// Uses an existing connection shared with other host tables.
    pub fn open_with_conn(conn: Arc<Mutex<Connection>>) -> StoreResult<Self> {
        Self::open_with_prefix(conn, "")
    }

    /// Uses an existing connection with the host's table prefix prepended to
    /// the table name (e.g. `wp_` gives `wp_fallback_thumbnails`).
    pub fn open_with_prefix(conn: Arc<Mutex<Connection>>, prefix: &str) -> StoreResult<Self> {
        if !prefix.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(StoreError::InvalidTablePrefix(prefix.to_string()));
        }
        let store = Self {
            conn,
            table: format!("{prefix}{DEFAULT_TABLE}"),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Fully qualified table name.
    pub fn table_name(&self) -> &str {
        &self.table
    }

    fn conn(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }

    fn init_schema(&self) -> StoreResult<()> {
        let conn = self.conn()?;
        conn.execute_batch(&format!(
            "
            CREATE TABLE IF NOT EXISTS {table} (
                thumbnail_id INTEGER PRIMARY KEY AUTOINCREMENT,
                attachment_id INTEGER NOT NULL,
                slug VARCHAR(200) NOT NULL UNIQUE
            );
            ",
            table = self.table
        ))?;
        debug!("slug mapping table {} ready", self.table);
        Ok(())
    }
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(inner, _)
            if inner.code == ErrorCode::ConstraintViolation
                && inner.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

impl SlugImageStore for SqliteSlugStore {
    fn get(&self, slug: &str) -> StoreResult<Option<ImageRef>> {
        let conn = self.conn()?;
        let image = conn
            .query_row(
                &format!("SELECT attachment_id FROM {} WHERE slug = ?1", self.table),
                params![slug],
                |row| row.get::<_, i64>(0),
            )
            .optional()?;
        Ok(image.map(ImageRef::new))
    }

    fn add(&self, slug: &str, image: ImageRef) -> StoreResult<MappingId> {
        let slug = Slug::new(slug)?;
        let conn = self.conn()?;
        let inserted = conn.execute(
            &format!("INSERT INTO {} (attachment_id, slug) VALUES (?1, ?2)", self.table),
            params![image.get(), slug.as_str()],
        );
        match inserted {
            Ok(_) => {
                let id = MappingId::new(conn.last_insert_rowid());
                info!("mapped slug {} to image {} (mapping {})", slug, image, id);
                Ok(id)
            }
            Err(e) if is_unique_violation(&e) => Err(StoreError::DuplicateSlug(slug.into())),
            Err(e) => Err(e.into()),
        }
    }

    fn update(&self, id: MappingId, image: ImageRef) -> StoreResult<()> {
        let conn = self.conn()?;
        let changed = conn.execute(
            &format!("UPDATE {} SET attachment_id = ?1 WHERE thumbnail_id = ?2", self.table),
            params![image.get(), id.get()],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }
        info!("mapping {} now points at image {}", id, image);
        Ok(())
    }

    fn delete(&self, id: MappingId) -> StoreResult<()> {
        let conn = self.conn()?;
        let removed = conn.execute(
            &format!("DELETE FROM {} WHERE thumbnail_id = ?1", self.table),
            params![id.get()],
        )?;
        if removed == 0 {
            debug!("delete of unknown mapping {} ignored", id);
        } else {
            info!("deleted mapping {}", id);
        }
        Ok(())
    }

    fn list(&self) -> StoreResult<Vec<SlugMapping>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT thumbnail_id, slug, attachment_id FROM {} ORDER BY thumbnail_id",
            self.table
        ))?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?, row.get::<_, i64>(2)?))
        })?;

        // Rows written around the store may break the slug rules; they are
        // left in place but not listed.
        let mut result = Vec::new();
        for row in rows {
            let (id, slug, image) = row?;
            match Slug::new(slug) {
                Ok(slug) => result.push(SlugMapping {
                    id: MappingId::new(id),
                    slug,
                    image: ImageRef::new(image),
                }),
                Err(e) => warn!("skipping mapping {} in {}: {}", id, self.table, e),
            }
        }
        Ok(result)
    }
}
