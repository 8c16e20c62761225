use super::*;

#[test]
fn memory_storage_set_get_remove() {
    let mut storage = MemoryStorage::new();
    assert!(storage.is_empty());
    storage.set("token", "t1").unwrap();
    assert_eq!(storage.get("token").as_deref(), Some("t1"));
    storage.set("token", "t2").unwrap();
    assert_eq!(storage.get("token").as_deref(), Some("t2"));
    assert_eq!(storage.len(), 1);
    storage.remove("token");
    assert!(!storage.contains("token"));
}

#[test]
fn memory_storage_remove_missing_key_is_noop() {
    let mut storage = MemoryStorage::with_entries([("user", "{}")]);
    storage.remove("token");
    assert!(storage.contains("user"));
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn browser_storage_is_empty_and_read_only_off_browser() {
    let mut storage = BrowserStorage;
    assert_eq!(storage.get("user"), None);
    assert_eq!(storage.set("user", "{}"), Err(StorageError::Unavailable));
    storage.remove("user");
}
