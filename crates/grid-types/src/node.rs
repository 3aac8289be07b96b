use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of a grid node.
///
/// Workers are identified by a caller-chosen string id; pointers carry the
/// id of the node whose store owns the pointee.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(String);

impl NodeId {
    /// Create a node id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_and_display() {
        let id = NodeId::new("node-a");
        assert_eq!(id.as_str(), "node-a");
        assert_eq!(format!("{id}"), "node-a");
    }

    #[test]
    fn from_impls_agree() {
        assert_eq!(NodeId::from("n"), NodeId::from(String::from("n")));
    }

    #[test]
    fn serde_roundtrip() {
        let id = NodeId::new("node-b");
        let json = serde_json::to_string(&id).unwrap();
        let parsed: NodeId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }
}
