//! Backing storage for the TTL cache
//!
//! Persistent keyed storage is an external collaborator: the platform client
//! supplies whatever bucket it has (browser storage, sqlite, a directory of
//! files) behind the [`CacheStore`] trait. The trait is deliberately
//! infallible at the signature level: implementations swallow their own
//! failures and report "nothing there" or "write dropped", which the cache
//! layer treats as a miss.

use std::collections::HashMap;
use std::sync::Mutex;

/// Keyed blob storage backing a [`super::TtlCache`].
///
/// Keys are full request URLs including query string, so distinct cursors
/// and params never collide. Values are opaque serialized entries.
pub trait CacheStore: Send + Sync {
    /// Load the raw value for a key, if present and readable
    fn load(&self, key: &str) -> Option<String>;

    /// Store a raw value under a key, overwriting any previous value.
    /// Returns false when the write was dropped (store unavailable, quota).
    fn store(&self, key: &str, value: &str) -> bool;

    /// Remove every entry whose key starts with the given prefix
    fn remove_prefix(&self, prefix: &str);

    /// Number of entries currently held
    fn len(&self) -> usize;

    /// Whether the store holds no entries
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory [`CacheStore`] implementation.
///
/// The default backing store for tests and for clients that do not need
/// persistence across process restarts.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl CacheStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .ok()
            .and_then(|entries| entries.get(key).cloned())
    }

    fn store(&self, key: &str, value: &str) -> bool {
        match self.entries.lock() {
            Ok(mut entries) => {
                entries.insert(key.to_string(), value.to_string());
                true
            }
            Err(_) => false,
        }
    }

    fn remove_prefix(&self, prefix: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.retain(|key, _| !key.starts_with(prefix));
        }
    }

    fn len(&self) -> usize {
        self.entries.lock().map_or(0, |entries| entries.len())
    }
}

/// A store that fails every operation.
///
/// Models a missing backing bucket; used in tests to verify that the cache
/// layer degrades to a miss instead of surfacing an error.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct BrokenStore;

#[cfg(test)]
impl CacheStore for BrokenStore {
    fn load(&self, _key: &str) -> Option<String> {
        None
    }

    fn store(&self, _key: &str, _value: &str) -> bool {
        false
    }

    fn remove_prefix(&self, _prefix: &str) {}

    fn len(&self) -> usize {
        0
    }
}
