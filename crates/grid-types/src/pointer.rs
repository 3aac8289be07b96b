use std::fmt;

use serde::{Deserialize, Serialize};

use crate::node::NodeId;
use crate::uid::Uid;

/// A non-owning, location-aware reference to a remote object.
///
/// A `Pointer` never holds the pointee; the real object lives only in the
/// store of the node named by `location`. Any number of pointers may
/// reference the same uid concurrently. The optional `type_path` caches the
/// pointee's framework type (e.g. `"tensorlib.Tensor"`) so callers can
/// resolve methods without a round trip.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pointer {
    /// Identifier of the object being referenced.
    pub uid: Uid,
    /// The node whose store owns the object.
    pub location: NodeId,
    /// Cached framework type path of the pointee, when known.
    pub type_path: Option<String>,
}

impl Pointer {
    /// Create a pointer with no cached type information.
    pub fn new(uid: Uid, location: NodeId) -> Self {
        Self {
            uid,
            location,
            type_path: None,
        }
    }

    /// Attach the pointee's framework type path.
    pub fn with_type(mut self, type_path: impl Into<String>) -> Self {
        self.type_path = Some(type_path.into());
        self
    }

    /// Returns `true` if the pointee lives on the given node.
    pub fn points_at(&self, node: &NodeId) -> bool {
        self.location == *node
    }
}

impl fmt::Display for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.uid, self.location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_at_matches_location() {
        let ptr = Pointer::new(Uid::generate(), NodeId::new("node-a"));
        assert!(ptr.points_at(&NodeId::new("node-a")));
        assert!(!ptr.points_at(&NodeId::new("node-b")));
    }

    #[test]
    fn with_type_caches_path() {
        let ptr = Pointer::new(Uid::generate(), NodeId::new("n")).with_type("tensorlib.Tensor");
        assert_eq!(ptr.type_path.as_deref(), Some("tensorlib.Tensor"));
    }

    #[test]
    fn pointers_to_same_uid_are_equal() {
        let uid = Uid::generate();
        let a = Pointer::new(uid, NodeId::new("n"));
        let b = Pointer::new(uid, NodeId::new("n"));
        assert_eq!(a, b);
    }

    #[test]
    fn display_includes_uid_and_location() {
        let uid = Uid::generate();
        let ptr = Pointer::new(uid, NodeId::new("node-a"));
        let shown = format!("{ptr}");
        assert!(shown.contains("node-a"));
        assert!(shown.contains(&uid.short_id()));
    }

    #[test]
    fn serde_roundtrip() {
        let ptr = Pointer::new(Uid::generate(), NodeId::new("node-a")).with_type("lib.Type");
        let json = serde_json::to_string(&ptr).unwrap();
        let parsed: Pointer = serde_json::from_str(&json).unwrap();
        assert_eq!(ptr, parsed);
    }
}
