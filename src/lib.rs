//! # feedkit
//!
//! A paginated feed loading engine with TTL response caching, built for
//! social platform clients that render infinite-scroll feeds.
//!
//! ## Features
//!
//! - **Page-Numbered Pagination**: Fixed-size pages, cursor starts at 1
//! - **Page Classification**: Full pages advance, short pages exhaust the feed
//! - **TTL Response Cache**: Per-feed freshness windows, full-URL cache keys
//! - **Write Invalidation**: Mutations evict cached pages for their resource
//! - **Scroll Triggering**: Threshold-based next-page requests near the bottom
//! - **Cooperative Cancellation**: Retry and reset abandon in-flight requests
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use feedkit::{FeedKind, MemoryStore, NetworkClient, NetworkConfig, TtlCache};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = NetworkConfig::builder()
//!         .base_url("https://api.example.com")
//!         .build();
//!     let client = NetworkClient::with_config(config);
//!     let cache = TtlCache::new(MemoryStore::new());
//!
//!     let mut controller = FeedKind::Home.controller(client, cache);
//!     if let Some(page) = controller.advance().await {
//!         // Render page.items
//!     }
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       ScrollTrigger                         │
//! │  attach() → SubscriptionHandle    on_scroll() → advance()   │
//! └──────────────────────────────┬──────────────────────────────┘
//! ┌──────────────────────────────┴──────────────────────────────┐
//! │                    PaginationController                     │
//! │  Idle → Fetching → Active | Exhausted | Errored             │
//! └──────────────────────────────┬──────────────────────────────┘
//! ┌──────────────────────────────┴──────────────────────────────┐
//! │                        PageFetcher                          │
//! │  TtlCache (fresh hit) ──or── NetworkClient → extract_items  │
//! └─────────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for feedkit
pub mod error;

/// Common types, constants, and type aliases
pub mod types;

/// TTL response cache over pluggable stores
pub mod cache;

/// HTTP client with timeouts and cancellation
pub mod http;

/// Response envelope decoding
pub mod decode;

/// Single-page fetching over cache and network
pub mod fetch;

/// Pagination state machine and controller
pub mod pager;

/// Scroll-driven page loading
pub mod scroll;

/// Built-in feed kind definitions
pub mod feeds;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, ErrorKind, Result};
pub use types::*;

pub use cache::{CacheStore, MemoryStore, TtlCache};
pub use feeds::FeedKind;
pub use fetch::{CacheOptions, PageFetcher, PageRequest, PageResult};
pub use http::{NetworkClient, NetworkConfig, RequestConfig};
pub use pager::{ControllerState, ExhaustKind, PagerConfig, PaginationController};
pub use scroll::{ScrollMetrics, ScrollTrigger, SubscriptionHandle};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
