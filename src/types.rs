//! Common types used throughout feedkit
//!
//! This module contains shared type definitions, type aliases,
//! and the tuning constants observed across the platform's feed views.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// Generic key-value map with string keys and values
pub type StringMap = HashMap<String, String>;

// ============================================================================
// Constants
// ============================================================================

/// Default number of items per page; a shorter page means the feed is
/// exhausted
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Default hard timeout for a single network request
pub const DEFAULT_TIMEOUT_MS: u64 = 9_500;

/// Default remaining-scroll-distance below which the next page is requested
pub const DEFAULT_SCROLL_THRESHOLD_PX: f64 = 150.0;

/// TTL for fast-changing feeds (activity, replies, home)
pub const TTL_FAST_SECS: u64 = 1_800;

/// TTL for slower feeds (topics, stories)
pub const TTL_SLOW_SECS: u64 = 7_200;

/// TTL for daily aggregates (people directory)
pub const TTL_DAILY_SECS: u64 = 86_400;

/// Query parameter carrying the page cursor
pub const PAGE_PARAM: &str = "page";

// ============================================================================
// HTTP Types
// ============================================================================

/// HTTP method
///
/// Only the verbs the feed surface actually uses. GET is the only cacheable
/// verb; PUT and PATCH always go to the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    /// Read a resource
    #[default]
    GET,
    /// Create or replace a resource
    PUT,
    /// Partially update a resource
    PATCH,
}

impl Method {
    /// Whether responses to this verb may be served from or written to the
    /// response cache
    pub fn is_cacheable(self) -> bool {
        matches!(self, Method::GET)
    }

    /// Whether this verb mutates server state (and so invalidates cached
    /// reads of the same resource)
    pub fn is_mutation(self) -> bool {
        matches!(self, Method::PUT | Method::PATCH)
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::GET => reqwest::Method::GET,
            Method::PUT => reqwest::Method::PUT,
            Method::PATCH => reqwest::Method::PATCH,
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Method::GET => write!(f, "GET"),
            Method::PUT => write!(f, "PUT"),
            Method::PATCH => write!(f, "PATCH"),
        }
    }
}
