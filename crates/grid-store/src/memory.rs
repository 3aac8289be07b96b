use std::collections::HashMap;
use std::sync::RwLock;

use grid_types::Uid;

use crate::error::StoreResult;
use crate::object::StoredObject;
use crate::traits::ObjectStore;

/// In-memory, HashMap-based object store.
///
/// The default backend for a worker. Entries are held behind a `RwLock` so
/// a store shared across threads stays consistent; objects are cloned on
/// read. Created empty when a worker is constructed and destroyed with it;
/// nothing persists across restarts.
pub struct InMemoryObjectStore {
    objects: RwLock<HashMap<Uid, StoredObject>>,
}

impl InMemoryObjectStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
        }
    }

    /// Number of entries currently stored.
    pub fn len(&self) -> usize {
        self.objects.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.read().expect("lock poisoned").is_empty()
    }

    /// Remove all entries.
    pub fn clear(&self) {
        self.objects.write().expect("lock poisoned").clear();
    }

    /// Return a sorted list of all uids in the store.
    pub fn all_ids(&self) -> Vec<Uid> {
        let map = self.objects.read().expect("lock poisoned");
        let mut ids: Vec<Uid> = map.keys().copied().collect();
        ids.sort();
        ids
    }
}

impl Default for InMemoryObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectStore for InMemoryObjectStore {
    fn save(&self, uid: Uid, object: StoredObject) -> StoreResult<()> {
        let mut map = self.objects.write().expect("lock poisoned");
        // Last write wins: ids are random, not content-derived, so an
        // existing entry under the same uid is a deliberate overwrite.
        let replaced = map.insert(uid, object).is_some();
        tracing::trace!(%uid, replaced, "stored object");
        Ok(())
    }

    fn get(&self, uid: &Uid) -> StoreResult<Option<StoredObject>> {
        let map = self.objects.read().expect("lock poisoned");
        Ok(map.get(uid).cloned())
    }

    fn delete(&self, uid: &Uid) -> StoreResult<bool> {
        let mut map = self.objects.write().expect("lock poisoned");
        let existed = map.remove(uid).is_some();
        tracing::trace!(%uid, existed, "deleted object");
        Ok(existed)
    }

    fn exists(&self, uid: &Uid) -> StoreResult<bool> {
        let map = self.objects.read().expect("lock poisoned");
        Ok(map.contains_key(uid))
    }
}

impl std::fmt::Debug for InMemoryObjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryObjectStore")
            .field("entry_count", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use grid_types::{NodeId, Pointer};

    use super::*;
    use crate::object::ObjectValue;

    // -----------------------------------------------------------------------
    // Core CRUD
    // -----------------------------------------------------------------------

    #[test]
    fn save_and_get() {
        let store = InMemoryObjectStore::new();
        let uid = Uid::generate();
        let obj = StoredObject::value(42i64);

        store.save(uid, obj.clone()).unwrap();
        let read_back = store.get(&uid).unwrap().expect("should exist");
        assert_eq!(read_back, obj);
    }

    #[test]
    fn get_missing_returns_none() {
        let store = InMemoryObjectStore::new();
        assert!(store.get(&Uid::generate()).unwrap().is_none());
    }

    #[test]
    fn delete_present_entry() {
        let store = InMemoryObjectStore::new();
        let uid = Uid::generate();
        store.save(uid, StoredObject::value("x")).unwrap();

        assert!(store.delete(&uid).unwrap()); // was present
        assert!(store.get(&uid).unwrap().is_none()); // now gone
        assert!(!store.delete(&uid).unwrap()); // second delete = false
    }

    #[test]
    fn delete_missing_entry() {
        let store = InMemoryObjectStore::new();
        assert!(!store.delete(&Uid::generate()).unwrap());
    }

    #[test]
    fn exists_tracks_entries() {
        let store = InMemoryObjectStore::new();
        let uid = Uid::generate();
        assert!(!store.exists(&uid).unwrap());
        store.save(uid, StoredObject::value(1i64)).unwrap();
        assert!(store.exists(&uid).unwrap());
    }

    // -----------------------------------------------------------------------
    // Overwrite policy
    // -----------------------------------------------------------------------

    #[test]
    fn save_overwrites_last_write_wins() {
        let store = InMemoryObjectStore::new();
        let uid = Uid::generate();

        store.save(uid, StoredObject::value(1i64)).unwrap();
        store.save(uid, StoredObject::value(2i64)).unwrap();

        let read_back = store.get(&uid).unwrap().unwrap();
        assert_eq!(read_back.as_value(), Some(&ObjectValue::Int(2)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn distinct_uids_keep_distinct_entries() {
        let store = InMemoryObjectStore::new();
        let a = Uid::generate();
        let b = Uid::generate();
        store.save(a, StoredObject::value(1i64)).unwrap();
        store.save(b, StoredObject::value(2i64)).unwrap();
        assert_eq!(store.len(), 2);
    }

    // -----------------------------------------------------------------------
    // Remote entries
    // -----------------------------------------------------------------------

    #[test]
    fn remote_entries_roundtrip() {
        let store = InMemoryObjectStore::new();
        let uid = Uid::generate();
        let ptr = Pointer::new(Uid::generate(), NodeId::new("node-b"));
        store.save(uid, StoredObject::remote(ptr.clone())).unwrap();

        let read_back = store.get(&uid).unwrap().unwrap();
        assert_eq!(read_back, StoredObject::Remote(ptr));
    }

    // -----------------------------------------------------------------------
    // Utility methods
    // -----------------------------------------------------------------------

    #[test]
    fn len_and_is_empty() {
        let store = InMemoryObjectStore::new();
        assert!(store.is_empty());
        store.save(Uid::generate(), StoredObject::value(1i64)).unwrap();
        assert!(!store.is_empty());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn clear_removes_all() {
        let store = InMemoryObjectStore::new();
        store.save(Uid::generate(), StoredObject::value(1i64)).unwrap();
        store.save(Uid::generate(), StoredObject::value(2i64)).unwrap();
        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn all_ids_is_sorted() {
        let store = InMemoryObjectStore::new();
        for i in 0..5i64 {
            store.save(Uid::generate(), StoredObject::value(i)).unwrap();
        }
        let ids = store.all_ids();
        assert_eq!(ids.len(), 5);
        for w in ids.windows(2) {
            assert!(w[0] <= w[1]);
        }
    }

    #[test]
    fn default_creates_empty_store() {
        assert!(InMemoryObjectStore::default().is_empty());
    }

    #[test]
    fn debug_format() {
        let store = InMemoryObjectStore::new();
        store.save(Uid::generate(), StoredObject::value(1i64)).unwrap();
        let debug = format!("{store:?}");
        assert!(debug.contains("InMemoryObjectStore"));
        assert!(debug.contains("entry_count"));
    }

    // -----------------------------------------------------------------------
    // Concurrent access
    // -----------------------------------------------------------------------

    #[test]
    fn concurrent_reads_are_safe() {
        use std::sync::Arc;
        use std::thread;

        let store = Arc::new(InMemoryObjectStore::new());
        let uid = Uid::generate();
        store.save(uid, StoredObject::value("shared")).unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    let obj = store.get(&uid).unwrap().expect("should exist");
                    assert_eq!(obj.as_value(), Some(&ObjectValue::Text("shared".into())));
                })
            })
            .collect();

        for h in handles {
            h.join().expect("thread should not panic");
        }
    }
}
