use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use grid_protocol::{NodeMessage, NodeReply};
use grid_store::{InMemoryObjectStore, ObjectStore};
use grid_types::NodeId;

use crate::config::WorkerConfig;
use crate::error::WorkerResult;
use crate::framework::{FrameworkAst, FrameworkRegistry};
use crate::router::Router;
use crate::stats::WorkerStats;

/// A node's message-dispatch actor.
///
/// A worker owns one object store, binds the shared router, and holds the
/// node's registered frameworks. [`Worker::recv_msg`] is the sole entry
/// point once constructed: it routes, optionally observes, and returns
/// exactly one reply per message. Dispatch is synchronous: a message
/// completes fully, store mutation included, before the next one runs.
///
/// The worker itself performs no network I/O; transports feed it through
/// the [`crate::Transport`] seam.
pub struct Worker {
    id: NodeId,
    store: Box<dyn ObjectStore>,
    router: Arc<Router>,
    frameworks: FrameworkRegistry,
    stats: Option<WorkerStats>,
}

impl Worker {
    /// Construct a worker bound to the process-wide standard router.
    ///
    /// Frameworks register one at a time; a duplicate name fails
    /// construction with [`crate::WorkerError::DuplicateFramework`] and no
    /// worker is produced. With `config.debug` set, a statistics collector
    /// observes every dispatch.
    pub fn new(config: WorkerConfig, frameworks: Vec<FrameworkAst>) -> WorkerResult<Self> {
        Self::with_router(config, frameworks, Router::shared())
    }

    /// Construct against an explicit router (embedders and tests).
    pub fn with_router(
        config: WorkerConfig,
        frameworks: Vec<FrameworkAst>,
        router: Arc<Router>,
    ) -> WorkerResult<Self> {
        let frameworks = FrameworkRegistry::new(frameworks)?;
        let stats = config.debug.then(WorkerStats::new);
        tracing::info!(
            id = %config.id,
            frameworks = frameworks.len(),
            debug = config.debug,
            "worker ready"
        );
        Ok(Self {
            id: config.id,
            store: Box::new(InMemoryObjectStore::new()),
            router,
            frameworks,
            stats,
        })
    }

    /// This node's identity.
    pub fn id(&self) -> &NodeId {
        &self.id
    }

    /// The object store this worker owns.
    pub fn store(&self) -> &dyn ObjectStore {
        self.store.as_ref()
    }

    /// The registered frameworks.
    pub fn frameworks(&self) -> &FrameworkRegistry {
        &self.frameworks
    }

    /// The attached statistics collector, when debug is on.
    pub fn stats(&self) -> Option<&WorkerStats> {
        self.stats.as_ref()
    }

    /// Receive one message: route it, record statistics if enabled, and
    /// return the reply. No business logic lives here.
    pub fn recv_msg(&self, msg: NodeMessage) -> WorkerResult<NodeReply> {
        let kind = msg.kind();
        let start = Instant::now();
        let result = self.router.dispatch(self, msg);
        let elapsed = start.elapsed();

        if let Some(stats) = &self.stats {
            stats.record(kind, result.is_ok(), elapsed);
        }
        match &result {
            Ok(reply) => {
                tracing::debug!(%kind, reply = reply.type_name(), ?elapsed, "dispatched")
            }
            Err(err) => tracing::warn!(%kind, %err, "dispatch failed"),
        }
        result
    }
}

impl fmt::Display for Worker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.stats {
            Some(stats) => write!(f, "worker {}\n{}", self.id, stats),
            None => write!(f, "worker {}", self.id),
        }
    }
}
