mod common;

use fallthumb_store::{DEFAULT_TABLE, SlugImageStore, SqliteSlugStore, StoreError};
use fallthumb_types::{ImageRef, Slug};
use pretty_assertions::assert_eq;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

fn store() -> SqliteSlugStore {
    SqliteSlugStore::open_in_memory().unwrap()
}

// ── Shared contract ─────────────────────────────────────────────

#[test]
fn add_then_get() {
    common::add_then_get(&store());
}

#[test]
fn duplicate_slug_keeps_first() {
    common::duplicate_slug_keeps_first(&store());
}

#[test]
fn update_changes_image() {
    common::update_changes_image(&store());
}

#[test]
fn update_unknown_is_not_found() {
    common::update_unknown_is_not_found(&store());
}

#[test]
fn delete_removes_mapping() {
    common::delete_removes_mapping(&store());
}

#[test]
fn delete_unknown_is_silent() {
    common::delete_unknown_is_silent(&store());
}

#[test]
fn deleted_slug_can_be_reused() {
    common::deleted_slug_can_be_reused(&store());
}

#[test]
fn invalid_slugs_rejected() {
    common::invalid_slugs_rejected(&store());
}

#[test]
fn list_returns_every_mapping() {
    common::list_returns_every_mapping(&store());
}

#[test]
fn slugs_are_case_sensitive() {
    common::slugs_are_case_sensitive(&store());
}

// ── SQLite specifics ────────────────────────────────────────────

#[test]
fn list_is_in_insertion_order() {
    let store = store();
    store.add("b", ImageRef::new(2)).unwrap();
    store.add("a", ImageRef::new(1)).unwrap();

    let slugs: Vec<_> = store.list().unwrap().into_iter().map(|m| m.slug).collect();
    assert_eq!(slugs, vec![Slug::new("b").unwrap(), Slug::new("a").unwrap()]);
}

#[test]
fn persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("thumbs.db");

    let id = {
        let store = SqliteSlugStore::open(&path).unwrap();
        store.add("news", ImageRef::new(77)).unwrap()
    };

    let reopened = SqliteSlugStore::open(&path).unwrap();
    let mappings = reopened.list().unwrap();
    assert_eq!(mappings.len(), 1);
    assert_eq!(mappings[0].id, id);
    assert_eq!(reopened.get("news").unwrap(), Some(ImageRef::new(77)));
}

#[test]
fn table_prefix_is_applied() {
    let conn = Arc::new(Mutex::new(Connection::open_in_memory().unwrap()));
    let store = SqliteSlugStore::open_with_prefix(conn.clone(), "wp_").unwrap();
    assert_eq!(store.table_name(), format!("wp_{DEFAULT_TABLE}"));

    store.add("news", ImageRef::new(1)).unwrap();
    let count: i64 = conn
        .lock()
        .unwrap()
        .query_row("SELECT COUNT(*) FROM wp_fallback_thumbnails", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn unsafe_table_prefix_rejected() {
    let conn = Arc::new(Mutex::new(Connection::open_in_memory().unwrap()));
    let result = SqliteSlugStore::open_with_prefix(conn, "x; DROP TABLE y; --");
    assert!(matches!(result, Err(StoreError::InvalidTablePrefix(_))));
}

#[test]
fn shared_connection_sees_same_rows() {
    let conn = Arc::new(Mutex::new(Connection::open_in_memory().unwrap()));
    let writer = SqliteSlugStore::open_with_conn(conn.clone()).unwrap();
    let reader = SqliteSlugStore::open_with_conn(conn).unwrap();

    writer.add("shared", ImageRef::new(5)).unwrap();
    assert_eq!(reader.get("shared").unwrap(), Some(ImageRef::new(5)));
}

#[test]
fn only_unique_violations_are_duplicates() {
    let conn = Arc::new(Mutex::new(Connection::open_in_memory().unwrap()));
    let store = SqliteSlugStore::open_with_conn(conn.clone()).unwrap();
    conn.lock()
        .unwrap()
        .execute_batch(
            "CREATE TRIGGER block_reserved BEFORE INSERT ON fallback_thumbnails
             WHEN NEW.slug = 'reserved'
             BEGIN SELECT RAISE(ABORT, 'reserved slug'); END;",
        )
        .unwrap();

    let err = store.add("reserved", ImageRef::new(1)).unwrap_err();
    assert!(matches!(err, StoreError::Database(_)), "got {err:?}");

    store.add("news", ImageRef::new(1)).unwrap();
    let err = store.add("news", ImageRef::new(2)).unwrap_err();
    assert!(matches!(err, StoreError::DuplicateSlug(ref s) if s == "news"));
}

#[test]
fn list_skips_rows_with_invalid_slugs() {
    let conn = Arc::new(Mutex::new(Connection::open_in_memory().unwrap()));
    let store = SqliteSlugStore::open_with_conn(conn.clone()).unwrap();
    store.add("news", ImageRef::new(1)).unwrap();
    {
        let conn = conn.lock().unwrap();
        conn.execute(
            "INSERT INTO fallback_thumbnails (attachment_id, slug) VALUES (2, '')",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO fallback_thumbnails (attachment_id, slug) VALUES (3, ?1)",
            rusqlite::params!["x".repeat(201)],
        )
        .unwrap();
    }
    store.add("sport", ImageRef::new(4)).unwrap();

    let slugs: Vec<_> = store
        .list()
        .unwrap()
        .into_iter()
        .map(|m| m.slug.as_str().to_string())
        .collect();
    assert_eq!(slugs, vec!["news".to_string(), "sport".to_string()]);
}

#[test]
fn error_display() {
    let err = StoreError::DuplicateSlug("foo".to_string());
    assert!(format!("{err}").contains("foo"));

    let err = StoreError::NotFound(fallthumb_types::MappingId::new(12));
    assert!(format!("{err}").contains("12"));
}
