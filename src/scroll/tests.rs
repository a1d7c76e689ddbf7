//! Tests for scroll-driven loading

use super::*;
use crate::cache::{MemoryStore, TtlCache};
use crate::fetch::PageFetcher;
use crate::http::{NetworkClient, NetworkConfig};
use crate::pager::{ControllerState, ExhaustKind, PaginationController};
use serde_json::json;
use test_case::test_case;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn items(count: usize) -> Vec<serde_json::Value> {
    (0..count).map(|i| json!({"id": i})).collect()
}

fn controller_for(server: &MockServer) -> PaginationController {
    let config = NetworkConfig::builder().base_url(server.uri()).build();
    let fetcher = PageFetcher::new(
        NetworkClient::with_config(config),
        TtlCache::new(MemoryStore::new()),
        "posts",
    );
    PaginationController::new(fetcher, "/api/home")
}

async fn mount_page(server: &MockServer, page: u32, count: usize) {
    Mock::given(method("GET"))
        .and(path("/api/home"))
        .and(query_param("page", page.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "posts": items(count)
        })))
        .mount(server)
        .await;
}

// ============================================================================
// ScrollMetrics
// ============================================================================

#[test_case(0.0, 800.0, 2000.0 => 1200.0; "top of page")]
#[test_case(1000.0, 800.0, 2000.0 => 200.0; "near bottom")]
#[test_case(1200.0, 800.0, 2000.0 => 0.0; "at bottom")]
#[test_case(1300.0, 800.0, 2000.0 => 0.0; "overscrolled clamps to zero")]
fn test_remaining(scroll_offset: f64, viewport_height: f64, content_height: f64) -> f64 {
    ScrollMetrics::new(scroll_offset, viewport_height, content_height).remaining()
}

// ============================================================================
// Attach / Detach
// ============================================================================

#[tokio::test]
async fn test_attach_is_once_per_controller() {
    let server = MockServer::start().await;
    let controller = controller_for(&server);
    let mut trigger = ScrollTrigger::new();

    let handle = trigger.attach(&controller);
    assert!(handle.is_some());
    assert!(trigger.is_attached(&controller));

    // repeated attach calls cannot create a second subscription
    assert!(trigger.attach(&controller).is_none());
    assert!(trigger.attach_with_threshold(&controller, 300.0).is_none());
    assert_eq!(trigger.len(), 1);
}

#[tokio::test]
async fn test_detach_releases_subscription() {
    let server = MockServer::start().await;
    let controller = controller_for(&server);
    let mut trigger = ScrollTrigger::new();

    let handle = trigger.attach(&controller).unwrap();
    trigger.detach(handle);

    assert!(!trigger.is_attached(&controller));
    assert!(trigger.is_empty());
}

#[tokio::test]
async fn test_detached_handle_is_inert() {
    let server = MockServer::start().await;
    mount_page(&server, 1, 10).await;

    let mut controller = controller_for(&server);
    let mut trigger = ScrollTrigger::new();

    let handle = trigger.attach(&controller).unwrap();
    let stale = SubscriptionHandle {
        controller_id: handle.controller_id(),
    };
    trigger.detach(handle);

    let fired = trigger
        .on_scroll(&stale, ScrollMetrics::new(1900.0, 100.0, 2000.0), &mut controller)
        .await;
    assert!(fired.is_none());
    assert_eq!(controller.current_state(), ControllerState::Idle);
}

#[tokio::test]
async fn test_two_controllers_subscribe_independently() {
    let server = MockServer::start().await;
    let a = controller_for(&server);
    let b = controller_for(&server);
    let mut trigger = ScrollTrigger::new();

    let handle_a = trigger.attach(&a).unwrap();
    let handle_b = trigger.attach(&b).unwrap();
    assert_ne!(handle_a.controller_id(), handle_b.controller_id());
    assert_eq!(trigger.len(), 2);

    trigger.detach(handle_a);
    assert!(!trigger.is_attached(&a));
    assert!(trigger.is_attached(&b));
}

// ============================================================================
// Threshold Behavior
// ============================================================================

#[tokio::test]
async fn test_scroll_above_threshold_does_not_fire() {
    let server = MockServer::start().await;
    let mut controller = controller_for(&server);
    let mut trigger = ScrollTrigger::new();
    let handle = trigger.attach(&controller).unwrap();

    // remaining = 2000 - (1000 + 800) = 200 > 150
    let fired = trigger
        .on_scroll(&handle, ScrollMetrics::new(1000.0, 800.0, 2000.0), &mut controller)
        .await;
    assert!(fired.is_none());
    assert_eq!(controller.current_state(), ControllerState::Idle);
}

#[tokio::test]
async fn test_scroll_below_threshold_fires_advance() {
    let server = MockServer::start().await;
    mount_page(&server, 1, 10).await;

    let mut controller = controller_for(&server);
    let mut trigger = ScrollTrigger::new();
    let handle = trigger.attach(&controller).unwrap();

    // remaining = 2000 - (1100 + 800) = 100 <= 150
    let fired = trigger
        .on_scroll(&handle, ScrollMetrics::new(1100.0, 800.0, 2000.0), &mut controller)
        .await;

    let page = fired.expect("threshold crossed, page fetched");
    assert_eq!(page.len(), 10);
    assert_eq!(controller.current_state(), ControllerState::Active { cursor: 2 });
}

#[tokio::test]
async fn test_custom_threshold_respected() {
    let server = MockServer::start().await;
    mount_page(&server, 1, 10).await;

    let mut controller = controller_for(&server);
    let mut trigger = ScrollTrigger::new();
    let handle = trigger.attach_with_threshold(&controller, 500.0).unwrap();

    // remaining = 400, below the custom threshold but above the default
    let fired = trigger
        .on_scroll(&handle, ScrollMetrics::new(800.0, 800.0, 2000.0), &mut controller)
        .await;
    assert!(fired.is_some());
}

// ============================================================================
// Re-entrancy Suppression
// ============================================================================

#[tokio::test]
async fn test_scroll_ignored_in_non_advanceable_states() {
    let server = MockServer::start().await;
    let mut controller = controller_for(&server);
    let mut trigger = ScrollTrigger::new();
    let handle = trigger.attach(&controller).unwrap();
    let bottom = ScrollMetrics::new(1900.0, 100.0, 2000.0);

    for state in [
        ControllerState::Fetching,
        ControllerState::Exhausted { kind: ExhaustKind::Partial },
        ControllerState::Exhausted { kind: ExhaustKind::Empty },
        ControllerState::Errored { kind: crate::error::ErrorKind::Timeout },
    ] {
        controller.set_state_for_test(state);
        let fired = trigger.on_scroll(&handle, bottom, &mut controller).await;
        assert!(fired.is_none());
        assert_eq!(controller.current_state(), state);
    }
}

#[tokio::test]
async fn test_exhausted_feed_never_refetches_on_scroll() {
    let server = MockServer::start().await;
    mount_page(&server, 1, 4).await;

    let mut controller = controller_for(&server);
    let mut trigger = ScrollTrigger::new();
    let handle = trigger.attach(&controller).unwrap();
    let bottom = ScrollMetrics::new(1900.0, 100.0, 2000.0);

    // partial first page exhausts the feed
    let first = trigger.on_scroll(&handle, bottom, &mut controller).await;
    assert_eq!(first.unwrap().len(), 4);
    assert_eq!(
        controller.current_state(),
        ControllerState::Exhausted { kind: ExhaustKind::Partial }
    );

    // hammering the scroll signal stays quiet forever
    for _ in 0..5 {
        assert!(trigger.on_scroll(&handle, bottom, &mut controller).await.is_none());
    }
}
