//! Page fetcher: cache-aware read path and cache-invalidating write path

use super::types::{CacheOptions, PageRequest, PageResult};
use crate::cache::TtlCache;
use crate::decode;
use crate::error::{Error, Result};
use crate::http::{NetworkClient, RequestConfig};
use crate::types::Method;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Retrieves pages of one collection, consulting the shared TTL cache when
/// allowed.
///
/// The client and cache are injected by the owning view; the fetcher holds
/// no ambient globals. Cloning shares both collaborators.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: NetworkClient,
    cache: TtlCache,
    collection_key: String,
}

impl PageFetcher {
    /// Create a fetcher for a collection keyed by `collection_key` in the
    /// response envelope
    pub fn new(client: NetworkClient, cache: TtlCache, collection_key: impl Into<String>) -> Self {
        Self {
            client,
            cache,
            collection_key: collection_key.into(),
        }
    }

    /// The envelope key this fetcher extracts items from
    pub fn collection_key(&self) -> &str {
        &self.collection_key
    }

    /// Fetch one page.
    ///
    /// 1. Build the lookup key from the full request URL.
    /// 2. With caching allowed, serve a fresh cached payload directly (no
    ///    network call, no write-back).
    /// 3. Otherwise GET from the network; on success with caching allowed,
    ///    write the raw payload back under the supplied TTL.
    /// 4. Map every outcome into a [`PageResult`]; errors never escape.
    pub async fn fetch(
        &self,
        request: &PageRequest,
        cache_opts: &CacheOptions,
        cancel: CancellationToken,
    ) -> PageResult {
        let key = request.cache_key();

        if cache_opts.allow {
            if let Some(payload) = self.cache.get_fresh(&key) {
                match decode::extract_items(&payload, &self.collection_key, &request.resource_url)
                {
                    Ok(items) => {
                        debug!(key, items = items.len(), "page served from cache");
                        return PageResult::success(items, true);
                    }
                    Err(e) => {
                        // A payload that no longer decodes is as good as
                        // absent; fall through to the network.
                        debug!(key, error = %e, "cached payload undecodable, refetching");
                    }
                }
            }
        }

        let config = {
            let mut config = RequestConfig::new().cancel_token(cancel);
            for (param, value) in request.query() {
                config = config.query(param, value);
            }
            config
        };

        let payload = match self.client.get(&request.resource_url, config).await {
            Ok(payload) => payload,
            Err(e) => {
                warn!(resource = %request.resource_url, cursor = request.cursor, error = %e, "page fetch failed");
                return PageResult::failure(e.kind());
            }
        };

        match decode::extract_items(&payload, &self.collection_key, &request.resource_url) {
            Ok(items) => {
                if cache_opts.allow {
                    self.cache.put(&key, payload, cache_opts.ttl_seconds);
                }
                debug!(
                    resource = %request.resource_url,
                    cursor = request.cursor,
                    items = items.len(),
                    "page fetched"
                );
                PageResult::success(items, false)
            }
            Err(e) => {
                warn!(resource = %request.resource_url, cursor = request.cursor, error = %e, "page decode failed");
                PageResult::failure(e.kind())
            }
        }
    }

    /// Send a mutating request (PUT reply/topic creation, PATCH edits).
    ///
    /// Bypasses the cache entirely, and on success invalidates every cached
    /// GET entry for the written resource so the next read cannot serve a
    /// pre-write payload.
    pub async fn submit(&self, method: Method, resource_url: &str, body: Value) -> Result<Value> {
        if !method.is_mutation() {
            return Err(Error::config(format!(
                "submit requires a mutating verb, got {method}"
            )));
        }

        let response = self
            .client
            .request(method, resource_url, RequestConfig::new().json(body))
            .await?;

        if response.get("success").and_then(Value::as_bool) == Some(false) {
            return Err(Error::app_failure(resource_url));
        }

        self.cache.invalidate_resource(resource_url);
        debug!(%method, resource = %resource_url, "mutation applied");
        Ok(response)
    }
}
