//! Page request and result types

use crate::error::{ErrorKind, Result};
use crate::types::{StringMap, PAGE_PARAM, TTL_DAILY_SECS, TTL_FAST_SECS, TTL_SLOW_SECS};
use serde::de::DeserializeOwned;
use serde_json::Value;

// ============================================================================
// PageRequest
// ============================================================================

/// One page attempt: a resource, a cursor, and any extra query params.
///
/// Immutable per attempt; a retry replays the identical request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// The collection endpoint, without query string
    pub resource_url: String,
    /// Page number, starting at 1
    pub cursor: u32,
    /// Extra query parameters beyond the cursor
    pub extra_params: StringMap,
}

impl PageRequest {
    /// Create a request for a page of a resource.
    ///
    /// Cursors start at 1; zero is coerced to 1.
    pub fn new(resource_url: impl Into<String>, cursor: u32) -> Self {
        Self {
            resource_url: resource_url.into(),
            cursor: cursor.max(1),
            extra_params: StringMap::new(),
        }
    }

    /// Add an extra query parameter
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_params.insert(key.into(), value.into());
        self
    }

    /// Query parameters for this attempt: the cursor first, then extras in
    /// sorted order so the serialized form is deterministic.
    pub fn query(&self) -> Vec<(String, String)> {
        let mut query = vec![(PAGE_PARAM.to_string(), self.cursor.to_string())];
        let mut extras: Vec<_> = self.extra_params.iter().collect();
        extras.sort_by(|a, b| a.0.cmp(b.0));
        for (key, value) in extras {
            query.push((key.clone(), value.clone()));
        }
        query
    }

    /// The cache lookup key: the full request URL including query string.
    ///
    /// The cursor is itself a query param, so distinct pages never collide.
    pub fn cache_key(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in self.query() {
            serializer.append_pair(&key, &value);
        }
        format!("{}?{}", self.resource_url, serializer.finish())
    }
}

// ============================================================================
// PageResult
// ============================================================================

/// The all-or-nothing outcome of a page attempt.
///
/// A fetch never returns a partial success: either `items` holds the whole
/// page, or `error_kind` says why nothing does.
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult {
    /// Items in response order; empty on failure
    pub items: Vec<Value>,
    /// Whether the attempt produced a usable page
    pub succeeded: bool,
    /// Set iff the attempt failed
    pub error_kind: Option<ErrorKind>,
    /// Whether the page was served from the TTL cache
    pub from_cache: bool,
}

impl PageResult {
    /// A successful page
    pub fn success(items: Vec<Value>, from_cache: bool) -> Self {
        Self {
            items,
            succeeded: true,
            error_kind: None,
            from_cache,
        }
    }

    /// A failed attempt
    pub fn failure(kind: ErrorKind) -> Self {
        Self {
            items: Vec::new(),
            succeeded: false,
            error_kind: Some(kind),
            from_cache: false,
        }
    }

    /// Number of items in the page
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the page holds no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Deserialize the items into a typed collection
    pub fn items_as<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        self.items
            .iter()
            .map(|item| serde_json::from_value(item.clone()).map_err(Into::into))
            .collect()
    }
}

// ============================================================================
// CacheOptions
// ============================================================================

/// Whether and how long a page response may be served from or written to
/// the TTL cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheOptions {
    /// Consult the cache before the network, and write back on success
    pub allow: bool,
    /// TTL applied on write-back
    pub ttl_seconds: u64,
}

impl CacheOptions {
    /// Caching disabled: every fetch goes to the network
    pub fn disabled() -> Self {
        Self {
            allow: false,
            ttl_seconds: 0,
        }
    }

    /// Cache with an explicit TTL
    pub fn with_ttl(ttl_seconds: u64) -> Self {
        Self {
            allow: true,
            ttl_seconds,
        }
    }

    /// Preset for fast-changing feeds (30 minutes)
    pub fn fast() -> Self {
        Self::with_ttl(TTL_FAST_SECS)
    }

    /// Preset for slower feeds (2 hours)
    pub fn slow() -> Self {
        Self::with_ttl(TTL_SLOW_SECS)
    }

    /// Preset for daily aggregates (24 hours)
    pub fn daily() -> Self {
        Self::with_ttl(TTL_DAILY_SECS)
    }
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self::disabled()
    }
}
