//! In-memory storage module
//!
//! Provides the thread-safe key-value store and the trait it is consumed through.
//! The store knows nothing about what its values mean (loose coupling).

mod config;
mod memory;
mod value;

pub use config::StoreConfig;
pub use memory::MemoryStore;
pub use value::Value;

use std::sync::Arc;

/// A store holding heterogeneous values
pub type ValueStore = MemoryStore<Value>;

/// Thread-safe key-value object store
///
/// Implementations must serialize every mutation and allow concurrent reads.
/// The trait is object-safe, so a store can be held as `Box<dyn KeyValuer<V>>`.
pub trait KeyValuer<V>: Send + Sync {
    /// Set `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: V);

    /// Get the value previously set under `key`, or `None` if there is none
    fn get(&self, key: &str) -> Option<Arc<V>>;

    /// Set `value` under `key` if and only if `set_if` returns true
    ///
    /// `set_if` receives the current value (`None` if absent) and runs while the
    /// store is exclusively locked. It must not call back into the store.
    /// Returns whether the value was written.
    fn check_and_set(
        &self,
        key: &str,
        value: V,
        set_if: &mut dyn FnMut(Option<&V>) -> bool,
    ) -> bool;

    /// Remove `key`. Afterwards the store behaves as though it was never set.
    fn delete(&self, key: &str) -> bool;

    /// Like [`get`](Self::get), but a missing key is a programming error
    ///
    /// # Panics
    ///
    /// Panics with `"<key>" was not found` if `key` has no entry.
    fn must_get(&self, key: &str) -> Arc<V>;

    /// Shallow snapshot: keys are copied, value references are shared
    fn copy(&self) -> Box<dyn KeyValuer<V>>;
}
