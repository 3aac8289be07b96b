//! Uid-keyed object storage for grid nodes.
//!
//! Every object a node owns lives in an object store: a table from
//! [`grid_types::Uid`] to one owned [`StoredObject`]. The store is the only
//! place objects exist; everything outside the owning node refers to them
//! through pointers.
//!
//! # Design Rules
//!
//! 1. At most one entry per uid; a save to an existing key overwrites
//!    (last write wins), never merges.
//! 2. Absence is a recoverable condition (`Ok(None)` / `Ok(false)`), never
//!    a fault.
//! 3. The store never looks inside an entry; it is a plain uid-keyed
//!    table moving payloads untouched.
//! 4. Backends are internally synchronized so a store shared across threads
//!    cannot expose a half-updated entry.

pub mod error;
pub mod memory;
pub mod object;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::InMemoryObjectStore;
pub use object::{ObjectValue, StoredObject};
pub use traits::ObjectStore;
