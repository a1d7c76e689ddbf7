//! Built-in feed kind definitions
//!
//! Every feed surface on the platform pages the same way; what varies is
//! the endpoint, the envelope's collection key, and how long a response
//! stays useful. This module centralizes those per-feed facts so views
//! stop hard-coding them.

use crate::cache::TtlCache;
use crate::fetch::{CacheOptions, PageFetcher};
use crate::http::NetworkClient;
use crate::pager::{PagerConfig, PaginationController};
use crate::types::{TTL_DAILY_SECS, TTL_FAST_SECS, TTL_SLOW_SECS};

/// The feed surfaces the platform renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedKind {
    /// Recent activity for the signed-in user
    Activity,
    /// Replies to a topic
    Replies,
    /// Topic listings
    Topics,
    /// Story listings
    Stories,
    /// People directory
    People,
    /// The aggregated home feed
    Home,
}

impl FeedKind {
    /// All feed kinds, for registry-style iteration
    pub const ALL: [FeedKind; 6] = [
        FeedKind::Activity,
        FeedKind::Replies,
        FeedKind::Topics,
        FeedKind::Stories,
        FeedKind::People,
        FeedKind::Home,
    ];

    /// The key holding this feed's items in the response envelope
    pub fn collection_key(self) -> &'static str {
        match self {
            FeedKind::Activity => "activities",
            FeedKind::Replies => "replies",
            FeedKind::Topics => "topics",
            FeedKind::Stories | FeedKind::Home => "posts",
            FeedKind::People => "users",
        }
    }

    /// The collection endpoint for this feed
    pub fn resource_url(self) -> &'static str {
        match self {
            FeedKind::Activity => "/api/activities",
            FeedKind::Replies => "/api/replies",
            FeedKind::Topics => "/api/topics",
            FeedKind::Stories => "/api/stories",
            FeedKind::People => "/api/users",
            FeedKind::Home => "/api/home",
        }
    }

    /// How long a cached page of this feed stays fresh
    pub fn ttl_seconds(self) -> u64 {
        match self {
            // fast-moving surfaces
            FeedKind::Activity | FeedKind::Replies | FeedKind::Home => TTL_FAST_SECS,
            // slower listings
            FeedKind::Topics | FeedKind::Stories => TTL_SLOW_SECS,
            // the directory changes roughly daily
            FeedKind::People => TTL_DAILY_SECS,
        }
    }

    /// Cache policy for this feed
    pub fn cache_options(self) -> CacheOptions {
        CacheOptions::with_ttl(self.ttl_seconds())
    }

    /// Build a fetcher for this feed over shared collaborators
    pub fn fetcher(self, client: NetworkClient, cache: TtlCache) -> PageFetcher {
        PageFetcher::new(client, cache, self.collection_key())
    }

    /// Build a ready-to-use controller for this feed
    pub fn controller(self, client: NetworkClient, cache: TtlCache) -> PaginationController {
        let fetcher = self.fetcher(client, cache);
        PaginationController::new(fetcher, self.resource_url())
            .with_config(PagerConfig::new().with_cache(self.cache_options()))
    }
}
