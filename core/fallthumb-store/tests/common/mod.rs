//! Behaviour every `SlugImageStore` implementation must share.

#![allow(dead_code)]

use fallthumb_store::{SlugImageStore, StoreError};
use fallthumb_types::{ImageRef, MappingId};

pub fn add_then_get(store: &dyn SlugImageStore) {
    store.add("news", ImageRef::new(10)).unwrap();
    assert_eq!(store.get("news").unwrap(), Some(ImageRef::new(10)));
    assert_eq!(store.get("sports").unwrap(), None);
}

pub fn duplicate_slug_keeps_first(store: &dyn SlugImageStore) {
    store.add("foo", ImageRef::new(1)).unwrap();
    let err = store.add("foo", ImageRef::new(2)).unwrap_err();
    assert!(matches!(err, StoreError::DuplicateSlug(ref s) if s == "foo"));

    assert_eq!(store.get("foo").unwrap(), Some(ImageRef::new(1)));
    assert_eq!(store.list().unwrap().len(), 1);
}

pub fn update_changes_image(store: &dyn SlugImageStore) {
    let id = store.add("travel", ImageRef::new(5)).unwrap();
    store.update(id, ImageRef::new(6)).unwrap();
    assert_eq!(store.get("travel").unwrap(), Some(ImageRef::new(6)));
}

pub fn update_unknown_is_not_found(store: &dyn SlugImageStore) {
    let err = store.update(MappingId::new(404), ImageRef::new(1)).unwrap_err();
    assert!(matches!(err, StoreError::NotFound(id) if id == MappingId::new(404)));
}

pub fn delete_removes_mapping(store: &dyn SlugImageStore) {
    let id = store.add("gone", ImageRef::new(3)).unwrap();
    store.delete(id).unwrap();
    assert_eq!(store.get("gone").unwrap(), None);
    assert!(store.list().unwrap().is_empty());
}

pub fn delete_unknown_is_silent(store: &dyn SlugImageStore) {
    store.add("keep", ImageRef::new(3)).unwrap();
    store.delete(MappingId::new(999)).unwrap();
    assert_eq!(store.list().unwrap().len(), 1);
}

pub fn deleted_slug_can_be_reused(store: &dyn SlugImageStore) {
    let id = store.add("reuse", ImageRef::new(1)).unwrap();
    store.delete(id).unwrap();
    let new_id = store.add("reuse", ImageRef::new(2)).unwrap();
    assert_ne!(id, new_id);
    assert_eq!(store.get("reuse").unwrap(), Some(ImageRef::new(2)));
}

pub fn invalid_slugs_rejected(store: &dyn SlugImageStore) {
    assert!(matches!(store.add("", ImageRef::new(1)), Err(StoreError::InvalidSlug(_))));
    let long = "a".repeat(201);
    assert!(matches!(store.add(&long, ImageRef::new(1)), Err(StoreError::InvalidSlug(_))));
    assert!(store.list().unwrap().is_empty());
}

pub fn list_returns_every_mapping(store: &dyn SlugImageStore) {
    let a = store.add("a", ImageRef::new(1)).unwrap();
    let b = store.add("b", ImageRef::new(2)).unwrap();
    let site = store.add("~site", ImageRef::new(3)).unwrap();

    let mut ids: Vec<_> = store.list().unwrap().into_iter().map(|m| m.id).collect();
    ids.sort();
    assert_eq!(ids, vec![a, b, site]);
}

pub fn slugs_are_case_sensitive(store: &dyn SlugImageStore) {
    store.add("News", ImageRef::new(1)).unwrap();
    assert_eq!(store.get("news").unwrap(), None);
    store.add("news", ImageRef::new(2)).unwrap();
    assert_eq!(store.get("News").unwrap(), Some(ImageRef::new(1)));
}
