//! Controller state and configuration types

use crate::error::ErrorKind;
use crate::fetch::CacheOptions;
use crate::types::DEFAULT_PAGE_SIZE;

// ============================================================================
// Controller State
// ============================================================================

/// Why a feed stopped: nothing ever existed, or the last page was reached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExhaustKind {
    /// The very first page came back empty; the UI shows "nothing here yet"
    Empty,
    /// A short (or empty, past page one) page ended the feed; the UI appends
    /// a "no more" footer
    Partial,
}

/// The controller's position in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    /// Initial state; nothing fetched yet
    Idle,
    /// A fetch is in flight; further `advance()` calls are no-ops
    Fetching,
    /// The last page was full; `cursor` is the next page to request
    Active { cursor: u32 },
    /// The feed has no more data; terminal until `reset()`
    Exhausted { kind: ExhaustKind },
    /// The last fetch failed; terminal until `retry()` or `reset()`
    Errored { kind: ErrorKind },
}

impl ControllerState {
    /// Whether `advance()` may start a fetch from this state
    pub fn can_advance(&self) -> bool {
        matches!(self, Self::Idle | Self::Active { .. })
    }

    /// Whether a fetch is currently in flight
    pub fn is_fetching(&self) -> bool {
        matches!(self, Self::Fetching)
    }

    /// Whether this state is terminal (only `retry()`/`reset()` leave it)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Exhausted { .. } | Self::Errored { .. })
    }
}

// ============================================================================
// Page Classification
// ============================================================================

/// Classification of a fetched page by item count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageClass {
    /// No items on the very first page: the feed is empty
    Empty,
    /// Fewer items than the page size: this was the last page
    Partial,
    /// A full page: more data likely exists
    Full,
}

/// Classify a fetched page.
///
/// `len == 0 && cursor == 1` is the empty feed. A full page (`len >=
/// page_size`) means more may exist. Everything else, including an empty
/// page past the first, is the last page.
pub fn classify_page(len: usize, cursor: u32, page_size: usize) -> PageClass {
    if len == 0 && cursor == 1 {
        PageClass::Empty
    } else if len >= page_size {
        PageClass::Full
    } else {
        PageClass::Partial
    }
}

// ============================================================================
// PagerConfig
// ============================================================================

/// Per-controller tuning
#[derive(Debug, Clone)]
pub struct PagerConfig {
    /// Items per full page; a shorter page exhausts the feed
    pub page_size: usize,
    /// Cache policy applied to every fetch
    pub cache: CacheOptions,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            cache: CacheOptions::disabled(),
        }
    }
}

impl PagerConfig {
    /// Create a new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the cache policy
    #[must_use]
    pub fn with_cache(mut self, cache: CacheOptions) -> Self {
        self.cache = cache;
        self
    }
}
