//! TTL cache layer over a [`CacheStore`]

use super::store::CacheStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// A cached payload plus the metadata needed to judge its freshness
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    /// The raw response payload as captured from the network
    pub payload: Value,
    /// When the payload was captured
    pub captured_at: DateTime<Utc>,
    /// Time-to-live the writer supplied
    pub ttl_seconds: u64,
}

impl CacheEntry {
    /// Whether this entry is fresh at the given instant.
    ///
    /// Fresh iff `now - captured_at < ttl_seconds`. Pure and deterministic
    /// given a wall-clock reading; a clock that moved backwards yields a
    /// negative age, which still counts as fresh.
    pub fn is_fresh_at(&self, now: DateTime<Utc>) -> bool {
        let age = now.signed_duration_since(self.captured_at).num_seconds();
        age < self.ttl_seconds as i64
    }

    /// Whether this entry is fresh right now
    pub fn is_fresh(&self) -> bool {
        self.is_fresh_at(Utc::now())
    }
}

/// On-disk representation: wraps the raw response with its capture time
#[derive(Debug, Serialize, Deserialize)]
struct StoredEntry {
    data: Value,
    timestamp: i64,
    ttl_seconds: u64,
}

/// Keyed TTL cache shared across all feed controllers in the process.
///
/// Cloning is cheap: clones share the same backing store. Only the page
/// fetcher writes; each write is a last-writer-wins overwrite.
#[derive(Clone)]
pub struct TtlCache {
    store: Arc<dyn CacheStore>,
}

impl TtlCache {
    /// Create a cache over the given backing store
    pub fn new(store: impl CacheStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Create a cache over an already-shared backing store
    pub fn with_store(store: Arc<dyn CacheStore>) -> Self {
        Self { store }
    }

    /// Look up an entry by key regardless of freshness.
    ///
    /// An unreadable or unparsable stored value is a miss, never an error.
    pub fn get(&self, key: &str) -> Option<CacheEntry> {
        let raw = self.store.load(key)?;
        let stored: StoredEntry = match serde_json::from_str(&raw) {
            Ok(stored) => stored,
            Err(e) => {
                debug!(key, error = %e, "discarding unparsable cache entry");
                return None;
            }
        };
        let captured_at = DateTime::<Utc>::from_timestamp(stored.timestamp, 0)?;
        Some(CacheEntry {
            payload: stored.data,
            captured_at,
            ttl_seconds: stored.ttl_seconds,
        })
    }

    /// Look up a payload by key, returning it only while fresh
    pub fn get_fresh(&self, key: &str) -> Option<Value> {
        let entry = self.get(key)?;
        if entry.is_fresh() {
            debug!(key, "cache hit");
            Some(entry.payload)
        } else {
            debug!(key, "cache entry stale");
            None
        }
    }

    /// Store a payload under a key with the given TTL.
    ///
    /// A dropped write is silently ignored; the next read simply misses.
    pub fn put(&self, key: &str, payload: Value, ttl_seconds: u64) {
        self.put_at(key, payload, ttl_seconds, Utc::now());
    }

    /// Store a payload with an explicit capture time.
    ///
    /// Exists so freshness boundaries can be exercised without sleeping.
    pub fn put_at(&self, key: &str, payload: Value, ttl_seconds: u64, captured_at: DateTime<Utc>) {
        let stored = StoredEntry {
            data: payload,
            timestamp: captured_at.timestamp(),
            ttl_seconds,
        };
        match serde_json::to_string(&stored) {
            Ok(raw) => {
                if !self.store.store(key, &raw) {
                    debug!(key, "cache write dropped");
                }
            }
            Err(e) => debug!(key, error = %e, "cache serialization failed"),
        }
    }

    /// Drop every cached entry whose key starts with the given resource URL.
    ///
    /// Called by the write path after a successful mutation so stale reads
    /// of the same resource are not served.
    pub fn invalidate_resource(&self, resource_url: &str) {
        debug!(resource_url, "invalidating cached entries");
        self.store.remove_prefix(resource_url);
    }

    /// Number of entries in the backing store (fresh or stale)
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Whether the backing store holds no entries
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

impl std::fmt::Debug for TtlCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtlCache")
            .field("entries", &self.store.len())
            .finish_non_exhaustive()
    }
}
