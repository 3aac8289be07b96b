use thiserror::Error;

use grid_protocol::{error_codes, MessageKind, NodeReply, ProtocolError};
use grid_store::StoreError;
use grid_types::{NodeId, Uid};

#[derive(Debug, Error)]
pub enum WorkerError {
    /// Two frameworks registered the same name; fatal at construction.
    #[error("framework already registered: {0}")]
    DuplicateFramework(String),

    /// The router has no handler for the received kind (protocol mismatch).
    #[error("no handler for message kind: {0}")]
    UnknownMessageKind(MessageKind),

    /// The target uid resolves through a pointer chain this layer refuses
    /// to chase.
    #[error("unsupported indirection through {uid}: target owned by {location}")]
    UnsupportedIndirection { uid: Uid, location: NodeId },

    /// No registered framework resolves the dotted path.
    #[error("no registered framework resolves path: {0}")]
    UnknownPath(String),

    /// The stored object's type has no such method.
    #[error("type {type_path} has no method {method}")]
    UnknownMethod { type_path: String, method: String },

    /// Method dispatch against an object stored without type information.
    #[error("object {0} carries no type information for method dispatch")]
    UntypedReceiver(Uid),

    /// A resolved callable failed while executing.
    #[error("callable at {path} failed: {reason}")]
    Invocation { path: String, reason: String },

    /// The abstract transport surface was invoked on the base worker.
    #[error("transport not implemented on the base worker")]
    NotImplementedTransport,

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl WorkerError {
    /// Stable wire code for this failure (see
    /// [`grid_protocol::error_codes`]).
    pub fn error_code(&self) -> u32 {
        match self {
            Self::UnknownMessageKind(_) => error_codes::UNKNOWN_MESSAGE_KIND,
            Self::UnknownPath(_) => error_codes::UNKNOWN_PATH,
            Self::UnknownMethod { .. } | Self::UntypedReceiver(_) => error_codes::UNKNOWN_METHOD,
            Self::Invocation { .. } => error_codes::INVOCATION,
            Self::UnsupportedIndirection { .. } => error_codes::UNSUPPORTED_INDIRECTION,
            Self::NotImplementedTransport => error_codes::NOT_IMPLEMENTED_TRANSPORT,
            Self::DuplicateFramework(_)
            | Self::Store(_)
            | Self::Protocol(_)
            | Self::Internal(_) => error_codes::INTERNAL,
        }
    }

    /// Render this failure as the reply a transport sends back.
    pub fn to_reply(&self) -> NodeReply {
        NodeReply::Error {
            code: self.error_code(),
            message: self.to_string(),
        }
    }
}

pub type WorkerResult<T> = Result<T, WorkerError>;
