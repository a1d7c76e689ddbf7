//! Scroll-driven page loading
//!
//! Converts viewport scroll signals into `advance()` calls: when the
//! remaining scroll distance drops below a threshold (default 150 px), the
//! next page is requested. Re-entrancy is suppressed twice over: the
//! trigger skips controllers that are not in an advanceable state, and the
//! controller's own guard is authoritative.
//!
//! Subscriptions follow acquire/release discipline: [`ScrollTrigger::attach`]
//! hands back a [`SubscriptionHandle`] exactly once per controller
//! lifetime, and the owning view must [`ScrollTrigger::detach`] it on
//! teardown so scroll signals never act on a disposed controller.

use crate::fetch::PageResult;
use crate::pager::PaginationController;
use crate::types::DEFAULT_SCROLL_THRESHOLD_PX;
use std::collections::HashMap;
use tracing::debug;

/// A snapshot of the host viewport's scroll position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    /// Current scroll offset from the top, in pixels
    pub scroll_offset: f64,
    /// Visible viewport height, in pixels
    pub viewport_height: f64,
    /// Total scrollable content height, in pixels
    pub content_height: f64,
}

impl ScrollMetrics {
    /// Create a snapshot
    pub fn new(scroll_offset: f64, viewport_height: f64, content_height: f64) -> Self {
        Self {
            scroll_offset,
            viewport_height,
            content_height,
        }
    }

    /// Remaining scroll distance to the bottom, in pixels.
    ///
    /// Overscroll (bounce past the end) clamps to zero.
    pub fn remaining(&self) -> f64 {
        (self.content_height - (self.scroll_offset + self.viewport_height)).max(0.0)
    }
}

/// Proof of an active scroll subscription for one controller.
///
/// Not cloneable: the view that attached is the view that detaches.
#[derive(Debug, PartialEq, Eq)]
pub struct SubscriptionHandle {
    controller_id: u64,
}

impl SubscriptionHandle {
    /// Id of the subscribed controller
    pub fn controller_id(&self) -> u64 {
        self.controller_id
    }
}

/// Observes scroll positions and requests the next page near the bottom.
#[derive(Debug, Default)]
pub struct ScrollTrigger {
    /// Threshold per subscribed controller, keyed by controller id
    subscriptions: HashMap<u64, f64>,
}

impl ScrollTrigger {
    /// Create a trigger with no subscriptions
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe a controller with the default threshold
    pub fn attach(&mut self, controller: &PaginationController) -> Option<SubscriptionHandle> {
        self.attach_with_threshold(controller, DEFAULT_SCROLL_THRESHOLD_PX)
    }

    /// Subscribe a controller: below `threshold_px` of remaining scroll,
    /// scroll signals request the next page.
    ///
    /// Attaching is once-per-controller-lifetime: a second attach for the
    /// same controller returns `None` so repeated calls cannot produce
    /// duplicate triggers.
    pub fn attach_with_threshold(
        &mut self,
        controller: &PaginationController,
        threshold_px: f64,
    ) -> Option<SubscriptionHandle> {
        let id = controller.id();
        if self.subscriptions.contains_key(&id) {
            debug!(controller = id, "attach ignored, already subscribed");
            return None;
        }
        self.subscriptions.insert(id, threshold_px);
        debug!(controller = id, threshold_px, "scroll subscription attached");
        Some(SubscriptionHandle { controller_id: id })
    }

    /// Release a subscription. Consumes the handle; later scroll signals
    /// for this controller are ignored.
    pub fn detach(&mut self, handle: SubscriptionHandle) {
        self.subscriptions.remove(&handle.controller_id);
        debug!(controller = handle.controller_id, "scroll subscription detached");
    }

    /// Whether a controller currently holds a subscription
    pub fn is_attached(&self, controller: &PaginationController) -> bool {
        self.subscriptions.contains_key(&controller.id())
    }

    /// Number of live subscriptions
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    /// Whether no subscriptions are live
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Feed one scroll signal through a subscription.
    ///
    /// Requests the next page iff the handle is live, the handle belongs to
    /// this controller, the remaining distance is at or below the
    /// subscription threshold, and the controller is in an advanceable
    /// state. Returns the fetched page when a fetch happened, `None`
    /// otherwise.
    pub async fn on_scroll(
        &self,
        handle: &SubscriptionHandle,
        metrics: ScrollMetrics,
        controller: &mut PaginationController,
    ) -> Option<PageResult> {
        if handle.controller_id != controller.id() {
            debug!(
                handle = handle.controller_id,
                controller = controller.id(),
                "scroll handle does not match controller"
            );
            return None;
        }
        let threshold_px = *self.subscriptions.get(&handle.controller_id)?;
        if metrics.remaining() > threshold_px {
            return None;
        }
        if !controller.current_state().can_advance() {
            return None;
        }
        debug!(
            controller = controller.id(),
            remaining = metrics.remaining(),
            "scroll threshold crossed, requesting next page"
        );
        controller.advance().await
    }
}

#[cfg(test)]
mod tests;
