//! In-memory storage implementation

use super::config::{StoreConfig, DEFAULT_CAPACITY, MAX_INITIAL_CAPACITY};
use super::KeyValuer;
use crate::error::StoreError;
use parking_lot::RwLock;
use siphasher::sip::SipHasher13;
use std::collections::HashMap;
use std::fmt;
use std::hash::BuildHasherDefault;
use std::sync::Arc;
use tracing::{debug, error, trace};

/// Type alias for our hash map with SipHasher
type StoreMap<V> = HashMap<String, Arc<V>, BuildHasherDefault<SipHasher13>>;

/// Thread-safe in-memory key-value store
///
/// All entries sit behind one reader/writer lock owned by the store. Readers
/// (`get`, `must_get`, `copy`, ...) share it, writers (`set`, `check_and_set`,
/// `delete`, `clear`) hold it exclusively. The lock is eventually fair, so neither
/// side starves under load, and it does not poison if a caller panics under it.
///
/// Values are stored as `Arc<V>`. The store guards which key maps to which value,
/// not the inside of a value: anything reached through a returned `Arc` that has
/// interior mutability can change under other holders of the same reference.
pub struct MemoryStore<V> {
    /// Label for log records
    name: Option<String>,

    /// The main storage map
    entries: RwLock<StoreMap<V>>,
}

impl<V> MemoryStore<V> {
    /// Create a new empty store with default capacity
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a new empty store with specified initial capacity
    pub fn with_capacity(capacity: usize) -> Self {
        MemoryStore {
            name: None,
            entries: RwLock::new(StoreMap::with_capacity_and_hasher(
                capacity,
                BuildHasherDefault::<SipHasher13>::default(),
            )),
        }
    }

    /// Create a new empty store from a configuration
    ///
    /// The initial capacity is capped at `MAX_INITIAL_CAPACITY`, so a hand-built
    /// configuration that skipped `StoreConfig::validate` cannot make this panic.
    pub fn with_config(config: &StoreConfig) -> Self {
        let capacity = config.initial_capacity.min(MAX_INITIAL_CAPACITY);
        let mut store = Self::with_capacity(capacity);
        store.name = config.name.clone();
        debug!("{}: created with capacity {}", store.label(), capacity);
        store
    }

    /// Name given through the configuration, if any
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("store")
    }

    /// Set a key-value pair, replacing any previous value
    pub fn set(&self, key: impl Into<String>, value: V) {
        self.set_shared(key, Arc::new(value));
    }

    /// Set a key to an existing value reference
    ///
    /// The store keeps `value` itself, so the caller and the store alias it.
    pub fn set_shared(&self, key: impl Into<String>, value: Arc<V>) {
        let key = key.into();
        trace!("{}: set '{}'", self.label(), key);
        self.entries.write().insert(key, value);
    }

    /// Get a value by key, returns None if not found
    pub fn get(&self, key: &str) -> Option<Arc<V>> {
        self.entries.read().get(key).cloned()
    }

    /// Get a value by key, returns `StoreError::NotFound` if not found
    pub fn try_get(&self, key: &str) -> Result<Arc<V>, StoreError> {
        self.get(key).ok_or_else(|| StoreError::NotFound(key.to_string()))
    }

    /// Get a value whose presence is an invariant of the caller
    ///
    /// Use [`get`](Self::get) or [`try_get`](Self::try_get) when a miss is an
    /// expected runtime condition.
    ///
    /// # Panics
    ///
    /// Panics with `"<key>" was not found` if `key` has no entry.
    pub fn must_get(&self, key: &str) -> Arc<V> {
        match self.try_get(key) {
            Ok(value) => value,
            Err(err) => {
                error!("{}: must_get failed: {}", self.label(), err);
                panic!("{}", err)
            }
        }
    }

    /// Set `value` under `key` only if `set_if` accepts the current value
    ///
    /// The read of the current value, the call to `set_if` and the write all happen
    /// under the exclusive lock, so no other mutation can interleave. `set_if` gets
    /// `None` when the key is absent. It must be quick and must not touch this
    /// store: the lock is not reentrant and a nested call deadlocks.
    ///
    /// Returns true if the value was written.
    pub fn check_and_set<F>(&self, key: impl Into<String>, value: V, set_if: F) -> bool
    where
        F: FnOnce(Option<&V>) -> bool,
    {
        let key = key.into();
        let mut entries = self.entries.write();

        if !set_if(entries.get(&key).map(|value| value.as_ref())) {
            trace!("{}: check_and_set '{}' rejected", self.label(), key);
            return false;
        }

        trace!("{}: check_and_set '{}' accepted", self.label(), key);
        entries.insert(key, Arc::new(value));
        true
    }

    /// Delete a key, returns true if the key existed
    pub fn delete(&self, key: &str) -> bool {
        let removed = self.entries.write().remove(key).is_some();
        if removed {
            trace!("{}: deleted '{}'", self.label(), key);
        }
        removed
    }

    /// Check if a key exists
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.read().contains_key(key)
    }

    /// Get the number of keys
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Get all keys, in no particular order
    pub fn keys(&self) -> Vec<String> {
        self.entries.read().keys().cloned().collect()
    }

    /// Remove all keys
    pub fn clear(&self) {
        let mut entries = self.entries.write();
        let removed = entries.len();
        entries.clear();
        debug!("{}: cleared {} keys", self.label(), removed);
    }

    /// Take a shallow snapshot of this store
    ///
    /// The snapshot gets every current key and a clone of each value's `Arc`, so
    /// values are shared with this store while the key sets are independent from
    /// here on. It owns a new lock and keeps this store's name.
    pub fn copy(&self) -> Self {
        let snapshot = self.entries.read().clone();
        debug!("{}: copied {} keys", self.label(), snapshot.len());

        MemoryStore {
            name: self.name.clone(),
            entries: RwLock::new(snapshot),
        }
    }
}

impl<V> Default for MemoryStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Clone for MemoryStore<V> {
    fn clone(&self) -> Self {
        self.copy()
    }
}

impl<V> fmt::Debug for MemoryStore<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryStore")
            .field("name", &self.name)
            .field("len", &self.len())
            .finish()
    }
}

impl<V: Send + Sync + 'static> KeyValuer<V> for MemoryStore<V> {
    fn set(&self, key: &str, value: V) {
        MemoryStore::set(self, key, value)
    }

    fn get(&self, key: &str) -> Option<Arc<V>> {
        MemoryStore::get(self, key)
    }

    fn check_and_set(
        &self,
        key: &str,
        value: V,
        set_if: &mut dyn FnMut(Option<&V>) -> bool,
    ) -> bool {
        MemoryStore::check_and_set(self, key, value, set_if)
    }

    fn delete(&self, key: &str) -> bool {
        MemoryStore::delete(self, key)
    }

    fn must_get(&self, key: &str) -> Arc<V> {
        MemoryStore::must_get(self, key)
    }

    fn copy(&self) -> Box<dyn KeyValuer<V>> {
        Box::new(MemoryStore::copy(self))
    }
}
