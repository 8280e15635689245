//! Client-side persistence for the navigation bar
//!
//! This crate provides the durable key-value store, the infallible adapter
//! the state layer talks to, and a write-behind queue for fire-and-forget
//! persistence.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapter;
pub mod backend;
pub mod kv;
pub mod write_behind;

pub use adapter::{PersistentStore, StoreAdapter};
pub use backend::{Backend, MemoryBackend, UnavailableBackend};
pub use kv::{KvConfig, KvError, KvStore};
pub use write_behind::WriteBehindStore;
