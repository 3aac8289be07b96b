use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("invalid message type tag: {0}")]
    InvalidMessageType(u8),

    #[error("message too large: {size} bytes (max {max})")]
    MessageTooLarge { size: usize, max: usize },

    #[error("framing error: {0}")]
    FramingError(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("identifier error: {0}")]
    Identifier(#[from] grid_types::TypeError),

    #[error("malformed envelope: {0}")]
    Envelope(String),
}

pub type ProtocolResult<T> = Result<T, ProtocolError>;
