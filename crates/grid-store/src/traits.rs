use grid_types::Uid;

use crate::error::StoreResult;
use crate::object::StoredObject;

/// Uid-keyed object store.
///
/// All implementations must satisfy these invariants:
/// - At most one entry per uid. `save` to an existing key overwrites
///   (last write wins) rather than merging or rejecting.
/// - `save` never fails on a valid uid; errors are reserved for backend
///   faults (I/O, serialization).
/// - Absence is recoverable: `get` returns `Ok(None)`, `delete` returns
///   `Ok(false)`. Neither is a fault.
/// - The store never interprets object contents.
/// - Implementations are internally synchronized; interleaved operations on
///   one uid never observe a half-updated entry.
pub trait ObjectStore: Send + Sync {
    /// Insert or overwrite the entry for `uid`.
    fn save(&self, uid: Uid, object: StoredObject) -> StoreResult<()>;

    /// Read the entry for `uid`. Returns `Ok(None)` when absent.
    fn get(&self, uid: &Uid) -> StoreResult<Option<StoredObject>>;

    /// Remove the entry for `uid`. Returns `true` if an entry existed.
    fn delete(&self, uid: &Uid) -> StoreResult<bool>;

    /// Check whether an entry exists for `uid`.
    ///
    /// Default implementation reads the entry. Backends may override with a
    /// cheaper existence probe.
    fn exists(&self, uid: &Uid) -> StoreResult<bool> {
        Ok(self.get(uid)?.is_some())
    }
}
