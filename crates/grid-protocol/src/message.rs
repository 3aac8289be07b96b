use std::fmt;

use serde::{Deserialize, Serialize};

use grid_store::{ObjectValue, StoredObject};
use grid_types::Uid;

pub const PROTOCOL_VERSION: u32 = 1;
pub const MAX_MESSAGE_SIZE: usize = 64 * 1024 * 1024;

/// The closed set of requests a node accepts.
///
/// Every variant carries exactly the fields needed to execute it; there is
/// no multi-message transaction protocol at this layer. Each received
/// message produces exactly one [`crate::NodeReply`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum NodeMessage {
    /// Store `object` under `uid`, overwriting any existing entry.
    SaveObject { uid: Uid, object: StoredObject },
    /// Fetch the object stored under `uid`.
    GetObject { uid: Uid },
    /// Remove the object stored under `uid`.
    DeleteObject { uid: Uid },
    /// Invoke `method_name` on the object stored under `uid`.
    RunClassMethod {
        uid: Uid,
        method_name: String,
        args: Vec<ObjectValue>,
    },
    /// Invoke the function or constructor at a dotted framework `path`.
    RunFunctionOrConstructor { path: String, args: Vec<ObjectValue> },
}

/// Discriminant of a [`NodeMessage`], used as the routing key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageKind {
    SaveObject,
    GetObject,
    DeleteObject,
    RunClassMethod,
    RunFunctionOrConstructor,
}

impl MessageKind {
    /// All kinds, in tag order.
    pub const ALL: [MessageKind; 5] = [
        Self::SaveObject,
        Self::GetObject,
        Self::DeleteObject,
        Self::RunClassMethod,
        Self::RunFunctionOrConstructor,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::SaveObject => "SaveObject",
            Self::GetObject => "GetObject",
            Self::DeleteObject => "DeleteObject",
            Self::RunClassMethod => "RunClassMethod",
            Self::RunFunctionOrConstructor => "RunFunctionOrConstructor",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl NodeMessage {
    /// The routing discriminant for this message.
    pub fn kind(&self) -> MessageKind {
        match self {
            Self::SaveObject { .. } => MessageKind::SaveObject,
            Self::GetObject { .. } => MessageKind::GetObject,
            Self::DeleteObject { .. } => MessageKind::DeleteObject,
            Self::RunClassMethod { .. } => MessageKind::RunClassMethod,
            Self::RunFunctionOrConstructor { .. } => MessageKind::RunFunctionOrConstructor,
        }
    }

    /// Wire tag for the framed encoding.
    pub fn type_tag(&self) -> u8 {
        match self.kind() {
            MessageKind::SaveObject => 1,
            MessageKind::GetObject => 2,
            MessageKind::DeleteObject => 3,
            MessageKind::RunClassMethod => 4,
            MessageKind::RunFunctionOrConstructor => 5,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.kind().name()
    }
}
