//! Wire protocol for grid nodes.
//!
//! Defines the closed request message set a node accepts, the reply shapes
//! it produces, the identifier envelope (16 identifier bytes plus the
//! out-of-band wrapper flag), and the framed encoding used between nodes.
//! Transports carry these bytes; they never interpret them.

pub mod codec;
pub mod envelope;
pub mod error;
pub mod message;
pub mod reply;

pub use codec::NodeCodec;
pub use envelope::IdEnvelope;
pub use error::{ProtocolError, ProtocolResult};
pub use message::{MessageKind, NodeMessage, MAX_MESSAGE_SIZE, PROTOCOL_VERSION};
pub use reply::{error_codes, NodeReply};
