use std::collections::HashMap;
use std::sync::{Arc, OnceLock, RwLock};

use crate::error::TypeError;
use crate::uid::DecodedId;

/// Adapter for one foreign identifier type.
///
/// Identifier bytes flagged as wrappers carry some external library's native
/// id rather than a domain [`crate::Uid`]. Each foreign type gets one
/// adapter that knows how to turn the 16 raw bytes back into that type's
/// value. Adapters live in a [`WrapperRegistry`] keyed by type name and are
/// consulted explicitly by the envelope decoder; nothing is ever attached to
/// the foreign type itself.
pub trait IdAdapter: Send + Sync {
    /// Name the foreign type registers under (e.g. `"uuid"`).
    fn type_name(&self) -> &str;

    /// Decode the 16 identifier bytes into the foreign value.
    fn decode(&self, bytes: [u8; 16]) -> DecodedId;
}

/// Stock adapter for raw `uuid::Uuid` identifiers.
pub struct UuidAdapter;

impl IdAdapter for UuidAdapter {
    fn type_name(&self) -> &str {
        "uuid"
    }

    fn decode(&self, bytes: [u8; 16]) -> DecodedId {
        DecodedId::Raw(uuid::Uuid::from_bytes(bytes))
    }
}

/// Process-wide table mapping foreign-identifier type name to adapter.
///
/// Populated at initialization; a type name registers at most once.
pub struct WrapperRegistry {
    adapters: RwLock<HashMap<String, Arc<dyn IdAdapter>>>,
}

impl WrapperRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            adapters: RwLock::new(HashMap::new()),
        }
    }

    /// Create a registry pre-populated with the stock [`UuidAdapter`].
    pub fn with_builtin() -> Self {
        let adapter: Arc<dyn IdAdapter> = Arc::new(UuidAdapter);
        let mut adapters = HashMap::new();
        adapters.insert(adapter.type_name().to_owned(), adapter);
        Self {
            adapters: RwLock::new(adapters),
        }
    }

    /// The process-wide registry, built once on first use.
    pub fn global() -> &'static WrapperRegistry {
        static GLOBAL: OnceLock<WrapperRegistry> = OnceLock::new();
        GLOBAL.get_or_init(WrapperRegistry::with_builtin)
    }

    /// Register an adapter under its type name.
    ///
    /// Fails with [`TypeError::DuplicateAdapter`] if the name is taken.
    pub fn register(&self, adapter: Arc<dyn IdAdapter>) -> Result<(), TypeError> {
        let name = adapter.type_name().to_owned();
        let mut adapters = self.adapters.write().expect("lock poisoned");
        if adapters.contains_key(&name) {
            return Err(TypeError::DuplicateAdapter(name));
        }
        adapters.insert(name, adapter);
        Ok(())
    }

    /// Returns `true` if an adapter is registered under `type_name`.
    pub fn contains(&self, type_name: &str) -> bool {
        self.adapters
            .read()
            .expect("lock poisoned")
            .contains_key(type_name)
    }

    /// Decode wrapper identifier bytes via the adapter for `type_name`.
    ///
    /// Fails with [`TypeError::UnknownWrapperType`] when no adapter is
    /// registered, rather than guessing a default.
    pub fn decode(&self, type_name: &str, bytes: [u8; 16]) -> Result<DecodedId, TypeError> {
        let adapters = self.adapters.read().expect("lock poisoned");
        let adapter = adapters
            .get(type_name)
            .ok_or_else(|| TypeError::UnknownWrapperType(type_name.to_owned()))?;
        Ok(adapter.decode(bytes))
    }
}

impl Default for WrapperRegistry {
    fn default() -> Self {
        Self::with_builtin()
    }
}
