use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use grid_protocol::{MessageKind, NodeMessage, NodeReply};

use crate::error::{WorkerError, WorkerResult};
use crate::handlers;
use crate::worker::Worker;

/// A message handler: executes one message kind against a worker.
pub type Handler = fn(&Worker, NodeMessage) -> WorkerResult<NodeReply>;

/// The table mapping message kind to handler.
///
/// Dispatch is an O(1) lookup by kind. A kind with no handler is a
/// protocol-version mismatch between caller and node and fails with
/// [`WorkerError::UnknownMessageKind`]; it is never silently ignored.
pub struct Router {
    handlers: HashMap<MessageKind, Handler>,
}

impl Router {
    /// An empty router with no handlers.
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// The standard routing table covering every message kind.
    pub fn standard() -> Self {
        let mut router = Self::empty();
        router.register(MessageKind::SaveObject, handlers::save_object);
        router.register(MessageKind::GetObject, handlers::get_object);
        router.register(MessageKind::DeleteObject, handlers::delete_object);
        router.register(MessageKind::RunClassMethod, handlers::run_class_method);
        router.register(
            MessageKind::RunFunctionOrConstructor,
            handlers::run_function_or_constructor,
        );
        router
    }

    /// The process-wide router, built exactly once on first use.
    pub fn shared() -> Arc<Router> {
        static SHARED: OnceLock<Arc<Router>> = OnceLock::new();
        Arc::clone(SHARED.get_or_init(|| Arc::new(Router::standard())))
    }

    /// Bind a handler for `kind`, replacing any existing one.
    pub fn register(&mut self, kind: MessageKind, handler: Handler) {
        self.handlers.insert(kind, handler);
    }

    /// Remove the handler for `kind`, returning it if one was bound.
    pub fn deregister(&mut self, kind: MessageKind) -> Option<Handler> {
        self.handlers.remove(&kind)
    }

    /// Returns `true` if a handler is bound for `kind`.
    pub fn contains(&self, kind: MessageKind) -> bool {
        self.handlers.contains_key(&kind)
    }

    /// Number of bound handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns `true` when no handler is bound.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Route `msg` to its handler and execute it against `worker`.
    pub fn dispatch(&self, worker: &Worker, msg: NodeMessage) -> WorkerResult<NodeReply> {
        let kind = msg.kind();
        let handler = self
            .handlers
            .get(&kind)
            .ok_or(WorkerError::UnknownMessageKind(kind))?;
        handler(worker, msg)
    }
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut kinds: Vec<&'static str> = self.handlers.keys().map(MessageKind::name).collect();
        kinds.sort_unstable();
        f.debug_struct("Router").field("kinds", &kinds).finish()
    }
}
