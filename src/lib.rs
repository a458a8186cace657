//! keyvaluer - A thread-safe in-memory key-value object store
//!
//! A single [`MemoryStore`] maps string keys to values behind one reader/writer lock:
//! - Reads (`get`, `must_get`, `copy`) share the lock
//! - Writes (`set`, `check_and_set`, `delete`) take it exclusively
//! - `check_and_set` is the only compare-and-swap primitive
//!
//! The store protects the mapping, not the values: values are held as `Arc<V>`
//! and a snapshot taken with `copy` aliases them.

pub mod error;
pub mod store;

/// Re-export commonly used types
pub use error::StoreError;
pub use store::{KeyValuer, MemoryStore, StoreConfig, Value, ValueStore};
