use thiserror::Error;

/// Errors produced by identity operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid identifier bytes: expected {expected} bytes, got {actual}")]
    InvalidIdentifierBytes { expected: usize, actual: usize },

    #[error("invalid hex string: {0}")]
    InvalidHex(String),

    #[error("no adapter registered for wrapper type: {0}")]
    UnknownWrapperType(String),

    #[error("adapter already registered for wrapper type: {0}")]
    DuplicateAdapter(String),
}
