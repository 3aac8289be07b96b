//! Foundation types for grid nodes.
//!
//! This crate provides the identity primitives used throughout the grid
//! system. Every other grid crate depends on `grid-types`.
//!
//! # Key Types
//!
//! - [`Uid`] — 128-bit randomly generated object identifier
//! - [`NodeId`] — identity of the node that owns an object
//! - [`Pointer`] — non-owning, location-aware reference to a remote object
//! - [`DecodedId`] — tagged result of identifier deserialization (domain id
//!   or raw wrapped foreign identifier)
//! - [`WrapperRegistry`] — process-wide table of foreign-identifier adapters

pub mod error;
pub mod node;
pub mod pointer;
pub mod uid;
pub mod wrapper;

pub use error::TypeError;
pub use node::NodeId;
pub use pointer::Pointer;
pub use uid::{DecodedId, Uid};
pub use wrapper::{IdAdapter, UuidAdapter, WrapperRegistry};
