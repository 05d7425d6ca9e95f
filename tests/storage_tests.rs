use petdimen_admin::storage::{FileStorage, KeyValueStore, MemoryStorage, PROFILE_KEY, TOKEN_KEY};

#[cfg(test)]
mod memory_tests {
    use super::*;

    #[test]
    fn test_memory_set_get_remove() {
        let store = MemoryStorage::new();

        store.set(TOKEN_KEY, "abc").unwrap();
        assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("abc"));

        store.remove(TOKEN_KEY).unwrap();
        assert!(store.get(TOKEN_KEY).is_none());
    }

    #[test]
    fn test_memory_remove_missing_key_is_noop() {
        let store = MemoryStorage::new();
        assert!(store.remove(PROFILE_KEY).is_ok());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_memory_failure() {
        let store = MemoryStorage::new_failing();
        assert!(store.set(TOKEN_KEY, "abc").is_err());
        assert!(store.remove(TOKEN_KEY).is_err());
        assert!(store.get(TOKEN_KEY).is_none());
    }

    #[test]
    fn test_memory_seeded_entries() {
        let store = MemoryStorage::with_entries([(TOKEN_KEY, "t"), (PROFILE_KEY, "{}")]);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(PROFILE_KEY).as_deref(), Some("{}"));
    }
}

#[cfg(test)]
mod file_tests {
    use super::*;

    #[test]
    fn test_file_missing_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStorage::open(dir.path().join("session.json")).unwrap();

        assert!(store.get(TOKEN_KEY).is_none());
        // Nothing is written until the first mutation.
        assert!(!store.path().exists());
    }

    #[test]
    fn test_file_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        {
            let store = FileStorage::open(&path).unwrap();
            store.set(TOKEN_KEY, "header.payload.sig").unwrap();
            store.set(PROFILE_KEY, r#"{"token":"x"}"#).unwrap();
        }

        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(reopened.get(TOKEN_KEY).as_deref(), Some("header.payload.sig"));
        assert_eq!(reopened.get(PROFILE_KEY).as_deref(), Some(r#"{"token":"x"}"#));
    }

    #[test]
    fn test_file_remove_is_persisted_and_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let store = FileStorage::open(&path).unwrap();
        store.set(TOKEN_KEY, "t").unwrap();
        store.remove(TOKEN_KEY).unwrap();
        store.remove(TOKEN_KEY).unwrap();

        let reopened = FileStorage::open(&path).unwrap();
        assert!(reopened.get(TOKEN_KEY).is_none());
    }

    #[test]
    fn test_file_corrupt_content_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{ this is not json").unwrap();

        let store = FileStorage::open(&path).unwrap();
        assert!(store.get(TOKEN_KEY).is_none());

        // The next write replaces the corrupt file with a valid one.
        store.set(TOKEN_KEY, "fresh").unwrap();
        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(reopened.get(TOKEN_KEY).as_deref(), Some("fresh"));
    }
}
