use serde::{Deserialize, Serialize};

use grid_types::NodeId;

/// Construction-time configuration for a [`crate::Worker`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Identity of this node.
    pub id: NodeId,
    /// Attach a dispatch statistics collector.
    pub debug: bool,
}

impl WorkerConfig {
    /// Config with the given id and debug off.
    pub fn new(id: impl Into<NodeId>) -> Self {
        Self {
            id: id.into(),
            debug: false,
        }
    }

    /// Enable the statistics collector.
    pub fn with_debug(mut self) -> Self {
        self.debug = true;
        self
    }
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self::new("worker")
    }
}
