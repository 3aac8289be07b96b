use grid_types::Uid;

/// Errors from object store operations.
///
/// Plain absence is not represented here; `get` and `delete` report it in
/// their return values. These variants are reserved for backend faults.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A backend required the entry to exist and it did not.
    #[error("object not found: {0}")]
    NotFound(Uid),

    /// Serialization or deserialization failure in a persistent backend.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
