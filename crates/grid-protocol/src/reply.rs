use serde::{Deserialize, Serialize};

use grid_store::StoredObject;
use grid_types::{Pointer, Uid};

/// The single reply a node produces for each received message.
///
/// Success either carries a payload (`Object`, `Pointer`) or none (`Ack`).
/// `NotFound` is a recoverable outcome for absent uids, not a fault. All
/// dispatch failures travel as `Error` with a stable code from
/// [`error_codes`] so remote callers can match without parsing text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum NodeReply {
    /// Success with no payload.
    Ack,
    /// The requested object, inline.
    Object(StoredObject),
    /// A reference to a result left in the replying node's store.
    Pointer(Pointer),
    /// The uid has no entry in the store.
    NotFound(Uid),
    /// A typed dispatch failure.
    Error { code: u32, message: String },
}

impl NodeReply {
    /// Wire tag for the framed encoding.
    pub fn type_tag(&self) -> u8 {
        match self {
            Self::Ack => 1,
            Self::Object(_) => 2,
            Self::Pointer(_) => 3,
            Self::NotFound(_) => 4,
            Self::Error { .. } => 255,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Ack => "Ack",
            Self::Object(_) => "Object",
            Self::Pointer(_) => "Pointer",
            Self::NotFound(_) => "NotFound",
            Self::Error { .. } => "Error",
        }
    }

    /// Returns `true` for the `Error` arm.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}

/// Stable wire codes for dispatch failures.
///
/// Shared between the worker (producer) and remote callers (consumers);
/// renumbering is a protocol break.
pub mod error_codes {
    /// Router has no handler for the message kind (protocol mismatch).
    pub const UNKNOWN_MESSAGE_KIND: u32 = 1;
    /// No registered framework resolves the requested path.
    pub const UNKNOWN_PATH: u32 = 2;
    /// The stored object's type has no such method.
    pub const UNKNOWN_METHOD: u32 = 3;
    /// A resolved callable failed while executing.
    pub const INVOCATION: u32 = 4;
    /// The target resolves through a remote pointer chain.
    pub const UNSUPPORTED_INDIRECTION: u32 = 5;
    /// The abstract transport surface was invoked directly.
    pub const NOT_IMPLEMENTED_TRANSPORT: u32 = 6;
    /// Anything else; the message carries the detail.
    pub const INTERNAL: u32 = 100;
}
