//! Pagination controller implementation

use super::types::{classify_page, ControllerState, ExhaustKind, PageClass, PagerConfig};
use crate::error::ErrorKind;
use crate::fetch::{PageFetcher, PageRequest, PageResult};
use crate::types::StringMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

static NEXT_CONTROLLER_ID: AtomicU64 = AtomicU64::new(1);

/// Drives pagination for one feed view.
///
/// Created per view and dropped on unmount; the owning view must also
/// detach its scroll subscription. Single-owner: all methods take
/// `&mut self`, so the `Fetching` guard checked before the await point is
/// enough to rule out overlapping fetches.
#[derive(Debug)]
pub struct PaginationController {
    id: u64,
    fetcher: PageFetcher,
    resource_url: String,
    extra_params: StringMap,
    config: PagerConfig,
    cursor: u32,
    state: ControllerState,
    in_flight: CancellationToken,
}

impl PaginationController {
    /// Create a controller for a collection endpoint
    pub fn new(fetcher: PageFetcher, resource_url: impl Into<String>) -> Self {
        Self {
            id: NEXT_CONTROLLER_ID.fetch_add(1, Ordering::Relaxed),
            fetcher,
            resource_url: resource_url.into(),
            extra_params: StringMap::new(),
            config: PagerConfig::default(),
            cursor: 1,
            state: ControllerState::Idle,
            in_flight: CancellationToken::new(),
        }
    }

    /// Set the controller configuration
    #[must_use]
    pub fn with_config(mut self, config: PagerConfig) -> Self {
        self.config = config;
        self
    }

    /// Add an extra query parameter sent with every page request
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_params.insert(key.into(), value.into());
        self
    }

    /// Unique id of this controller, used for scroll subscriptions
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Current state of the state machine
    pub fn current_state(&self) -> ControllerState {
        self.state
    }

    /// The page the next `advance()` will request
    pub fn cursor(&self) -> u32 {
        self.cursor
    }

    /// The configured page size
    pub fn page_size(&self) -> usize {
        self.config.page_size
    }

    /// Fetch the next page and classify the result.
    ///
    /// Returns `None` without touching the network when the state forbids
    /// advancing (`Fetching`, `Exhausted`, `Errored`). The guard is set
    /// synchronously before the fetch awaits, so re-entrant calls from the
    /// same task ordering cannot double-fetch.
    ///
    /// On a full page the cursor moves to the next page; on a partial or
    /// empty page the feed is exhausted; on failure the error kind is
    /// recorded and the same request can be replayed with [`retry`].
    ///
    /// [`retry`]: Self::retry
    pub async fn advance(&mut self) -> Option<PageResult> {
        if !self.state.can_advance() {
            debug!(id = self.id, state = ?self.state, "advance suppressed");
            return None;
        }
        self.state = ControllerState::Fetching;

        let request = self.build_request();
        let token = self.in_flight.child_token();
        let result = self.fetcher.fetch(&request, &self.config.cache, token).await;

        if result.succeeded {
            match classify_page(result.len(), self.cursor, self.config.page_size) {
                PageClass::Full => {
                    self.cursor += 1;
                    self.state = ControllerState::Active {
                        cursor: self.cursor,
                    };
                    debug!(id = self.id, cursor = self.cursor, "full page, cursor advanced");
                }
                PageClass::Partial => {
                    self.state = ControllerState::Exhausted {
                        kind: ExhaustKind::Partial,
                    };
                    debug!(id = self.id, items = result.len(), "partial page, feed exhausted");
                }
                PageClass::Empty => {
                    self.state = ControllerState::Exhausted {
                        kind: ExhaustKind::Empty,
                    };
                    debug!(id = self.id, "first page empty, feed exhausted");
                }
            }
        } else {
            let kind = result.error_kind.unwrap_or(ErrorKind::Transport);
            self.state = ControllerState::Errored { kind };
            warn!(id = self.id, cursor = self.cursor, ?kind, "page fetch errored");
        }

        Some(result)
    }

    /// Recover from `Errored`: back to `Idle` with the cursor unchanged, so
    /// the next `advance()` replays the identical request.
    ///
    /// Cancels the in-flight token first; a superseded response can never
    /// resolve against the recovered controller. Returns false (and changes
    /// nothing) from any other state.
    pub fn retry(&mut self) -> bool {
        match self.state {
            ControllerState::Errored { .. } => {
                self.refresh_token();
                self.state = ControllerState::Idle;
                debug!(id = self.id, cursor = self.cursor, "retrying after error");
                true
            }
            _ => false,
        }
    }

    /// Return to the initial state: cursor back to 1, state `Idle`, any
    /// in-flight request abandoned.
    pub fn reset(&mut self) {
        self.refresh_token();
        self.cursor = 1;
        self.state = ControllerState::Idle;
        debug!(id = self.id, "controller reset");
    }

    #[cfg(test)]
    pub(crate) fn set_state_for_test(&mut self, state: ControllerState) {
        self.state = state;
    }

    fn build_request(&self) -> PageRequest {
        let mut request = PageRequest::new(&self.resource_url, self.cursor);
        for (key, value) in &self.extra_params {
            request = request.param(key.clone(), value.clone());
        }
        request
    }

    fn refresh_token(&mut self) {
        self.in_flight.cancel();
        self.in_flight = CancellationToken::new();
    }
}
