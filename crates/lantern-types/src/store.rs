//! Keyed content store.
//!
//! Sibling applications (bookmarks, the editor, cached pages) persist named
//! byte blobs through this interface. The browser core itself only reads,
//! but the trait carries the full contract so one implementation serves the
//! whole suite.

use std::collections::BTreeMap;

/// A named byte-blob store.
pub trait ContentStore {
    /// Load the blob stored under `key`, if present.
    fn load(&self, key: &str) -> Option<Vec<u8>>;

    /// Store `data` under `key`, replacing any previous blob.
    fn save(&mut self, key: &str, data: &[u8]);

    /// Remove the blob under `key`. Removing an absent key is a no-op.
    fn remove(&mut self, key: &str);
}

/// Fully in-memory [`ContentStore`], used in tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blobs: BTreeMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored blobs.
    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

impl ContentStore for MemoryStore {
    fn load(&self, key: &str) -> Option<Vec<u8>> {
        self.blobs.get(key).cloned()
    }

    fn save(&mut self, key: &str, data: &[u8]) {
        self.blobs.insert(key.to_string(), data.to_vec());
    }

    fn remove(&mut self, key: &str) {
        self.blobs.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_absent_key_is_none() {
        let store = MemoryStore::new();
        assert_eq!(store.load("missing"), None);
        assert!(store.is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let mut store = MemoryStore::new();
        store.save("bookmarks", b"http://localhost/");
        assert_eq!(store.load("bookmarks"), Some(b"http://localhost/".to_vec()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn save_replaces_previous_blob() {
        let mut store = MemoryStore::new();
        store.save("page", b"old");
        store.save("page", b"new");
        assert_eq!(store.load("page"), Some(b"new".to_vec()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn remove_is_idempotent() {
        let mut store = MemoryStore::new();
        store.save("page", b"data");
        store.remove("page");
        store.remove("page");
        assert_eq!(store.load("page"), None);
    }
}
