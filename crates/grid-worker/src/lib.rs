//! The grid node worker.
//!
//! A worker is a collection of objects owned by a node, a set of registered
//! frameworks available for remote execution, and a router mapping each
//! message kind to its handler. Callers hand the worker deserialized
//! [`grid_protocol::NodeMessage`]s; the worker routes each to a handler
//! that executes against its object store and produces exactly one
//! [`grid_protocol::NodeReply`].
//!
//! # Key Types
//!
//! - [`Worker`] — the node-local dispatch actor
//! - [`Router`] — the process-wide kind → handler table
//! - [`FrameworkAst`] — a registered framework's call graph
//! - [`WorkerStats`] — optional dispatch observation (debug mode)
//! - [`Transport`] / [`VirtualTransport`] — the network seam and its
//!   in-process reference implementation

pub mod config;
pub mod error;
pub mod framework;
mod handlers;
pub mod router;
pub mod stats;
pub mod transport;
pub mod worker;

pub use config::WorkerConfig;
pub use error::{WorkerError, WorkerResult};
pub use framework::{AstCallable, AstNode, FrameworkAst, FrameworkRegistry};
pub use router::{Handler, Router};
pub use stats::{KindStats, WorkerStats};
pub use transport::{Transport, VirtualTransport};
pub use worker::Worker;
