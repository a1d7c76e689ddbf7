//! Tests for the pagination controller

use super::*;
use crate::cache::{MemoryStore, TtlCache};
use crate::error::ErrorKind;
use crate::fetch::{CacheOptions, PageFetcher};
use crate::http::{NetworkClient, NetworkConfig};
use serde_json::json;
use std::time::Duration;
use test_case::test_case;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn items(count: usize) -> Vec<serde_json::Value> {
    (0..count).map(|i| json!({"id": i})).collect()
}

fn controller_for(server: &MockServer, cache: CacheOptions) -> PaginationController {
    let config = NetworkConfig::builder().base_url(server.uri()).build();
    let fetcher = PageFetcher::new(
        NetworkClient::with_config(config),
        TtlCache::new(MemoryStore::new()),
        "topics",
    );
    PaginationController::new(fetcher, "/api/topics")
        .with_config(PagerConfig::new().with_cache(cache))
}

async fn mount_page(server: &MockServer, page: u32, count: usize) {
    Mock::given(method("GET"))
        .and(path("/api/topics"))
        .and(query_param("page", page.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "topics": items(count)
        })))
        .mount(server)
        .await;
}

// ============================================================================
// Page Classification
// ============================================================================

#[test_case(0, 1, 10 => PageClass::Empty; "empty first page")]
#[test_case(0, 2, 10 => PageClass::Partial; "empty later page")]
#[test_case(4, 1, 10 => PageClass::Partial; "short first page")]
#[test_case(9, 3, 10 => PageClass::Partial; "one item short")]
#[test_case(10, 1, 10 => PageClass::Full; "exactly full")]
#[test_case(10, 7, 10 => PageClass::Full; "full at later cursor")]
#[test_case(12, 2, 10 => PageClass::Full; "overfull page")]
#[test_case(3, 1, 3 => PageClass::Full; "custom page size full")]
#[test_case(2, 1, 3 => PageClass::Partial; "custom page size partial")]
fn test_classify_page(len: usize, cursor: u32, page_size: usize) -> PageClass {
    classify_page(len, cursor, page_size)
}

// ============================================================================
// State Type Helpers
// ============================================================================

#[test]
fn test_state_predicates() {
    assert!(ControllerState::Idle.can_advance());
    assert!(ControllerState::Active { cursor: 2 }.can_advance());
    assert!(!ControllerState::Fetching.can_advance());
    assert!(!ControllerState::Exhausted { kind: ExhaustKind::Empty }.can_advance());
    assert!(!ControllerState::Errored { kind: ErrorKind::Timeout }.can_advance());

    assert!(ControllerState::Fetching.is_fetching());
    assert!(ControllerState::Exhausted { kind: ExhaustKind::Partial }.is_terminal());
    assert!(ControllerState::Errored { kind: ErrorKind::Decode }.is_terminal());
    assert!(!ControllerState::Idle.is_terminal());
}

#[test]
fn test_pager_config_defaults() {
    let config = PagerConfig::default();
    assert_eq!(config.page_size, 10);
    assert!(!config.cache.allow);

    let config = PagerConfig::new()
        .with_page_size(25)
        .with_cache(CacheOptions::fast());
    assert_eq!(config.page_size, 25);
    assert!(config.cache.allow);
}

// ============================================================================
// Advance / Classification Flow
// ============================================================================

#[tokio::test]
async fn test_full_page_advances_cursor() {
    let server = MockServer::start().await;
    mount_page(&server, 1, 10).await;

    let mut controller = controller_for(&server, CacheOptions::disabled());
    assert_eq!(controller.current_state(), ControllerState::Idle);
    assert_eq!(controller.cursor(), 1);

    let result = controller.advance().await.expect("guard allows advance");
    assert!(result.succeeded);
    assert_eq!(result.len(), 10);
    assert_eq!(controller.current_state(), ControllerState::Active { cursor: 2 });
    assert_eq!(controller.cursor(), 2);
}

#[tokio::test]
async fn test_full_then_partial_page_exhausts() {
    let server = MockServer::start().await;
    mount_page(&server, 1, 10).await;
    mount_page(&server, 2, 4).await;

    let mut controller = controller_for(&server, CacheOptions::disabled());

    let first = controller.advance().await.unwrap();
    assert_eq!(first.len(), 10);
    assert_eq!(controller.current_state(), ControllerState::Active { cursor: 2 });

    let second = controller.advance().await.unwrap();
    assert_eq!(second.len(), 4);
    assert!(second.succeeded);
    assert_eq!(
        controller.current_state(),
        ControllerState::Exhausted { kind: ExhaustKind::Partial }
    );
    // cursor does not move past the last page
    assert_eq!(controller.cursor(), 2);

    // further advances are no-ops
    assert!(controller.advance().await.is_none());
    assert_eq!(controller.cursor(), 2);
}

#[tokio::test]
async fn test_empty_first_page_exhausts_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/topics"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "topics": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut controller = controller_for(&server, CacheOptions::disabled());

    let result = controller.advance().await.unwrap();
    assert!(result.succeeded);
    assert!(result.is_empty());
    assert_eq!(
        controller.current_state(),
        ControllerState::Exhausted { kind: ExhaustKind::Empty }
    );

    // the single mounted expectation proves no further call is made
    assert!(controller.advance().await.is_none());
    assert!(controller.advance().await.is_none());
}

#[tokio::test]
async fn test_empty_later_page_exhausts_partial() {
    let server = MockServer::start().await;
    mount_page(&server, 1, 10).await;
    mount_page(&server, 2, 0).await;

    let mut controller = controller_for(&server, CacheOptions::disabled());
    controller.advance().await.unwrap();
    controller.advance().await.unwrap();

    assert_eq!(
        controller.current_state(),
        ControllerState::Exhausted { kind: ExhaustKind::Partial }
    );
}

#[tokio::test]
async fn test_custom_page_size() {
    let server = MockServer::start().await;
    mount_page(&server, 1, 5).await;

    let config = NetworkConfig::builder().base_url(server.uri()).build();
    let fetcher = PageFetcher::new(
        NetworkClient::with_config(config),
        TtlCache::new(MemoryStore::new()),
        "topics",
    );
    let mut controller = PaginationController::new(fetcher, "/api/topics")
        .with_config(PagerConfig::new().with_page_size(5));

    controller.advance().await.unwrap();
    assert_eq!(controller.current_state(), ControllerState::Active { cursor: 2 });
}

#[tokio::test]
async fn test_extra_params_sent_with_every_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/topics"))
        .and(query_param("page", "1"))
        .and(query_param("tag", "rust"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "topics": items(3)
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = NetworkConfig::builder().base_url(server.uri()).build();
    let fetcher = PageFetcher::new(
        NetworkClient::with_config(config),
        TtlCache::new(MemoryStore::new()),
        "topics",
    );
    let mut controller =
        PaginationController::new(fetcher, "/api/topics").with_param("tag", "rust");

    let result = controller.advance().await.unwrap();
    assert!(result.succeeded);
}

// ============================================================================
// Guard
// ============================================================================

#[tokio::test]
async fn test_advance_suppressed_while_fetching() {
    let server = MockServer::start().await;
    let mut controller = controller_for(&server, CacheOptions::disabled());

    controller.set_state_for_test(ControllerState::Fetching);
    // no mock is mounted: a network call would fail loudly, None proves the
    // guard returned before any fetch
    assert!(controller.advance().await.is_none());
    assert_eq!(controller.current_state(), ControllerState::Fetching);
}

#[tokio::test]
async fn test_terminal_states_stable_under_advance() {
    let server = MockServer::start().await;
    let mut controller = controller_for(&server, CacheOptions::disabled());

    controller.set_state_for_test(ControllerState::Exhausted { kind: ExhaustKind::Partial });
    for _ in 0..3 {
        assert!(controller.advance().await.is_none());
    }
    assert_eq!(
        controller.current_state(),
        ControllerState::Exhausted { kind: ExhaustKind::Partial }
    );
    assert_eq!(controller.cursor(), 1);

    controller.set_state_for_test(ControllerState::Errored { kind: ErrorKind::Transport });
    assert!(controller.advance().await.is_none());
    assert_eq!(
        controller.current_state(),
        ControllerState::Errored { kind: ErrorKind::Transport }
    );
}

// ============================================================================
// Errors, Retry, Reset
// ============================================================================

#[tokio::test]
async fn test_server_error_transitions_to_errored() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/topics"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut controller = controller_for(&server, CacheOptions::disabled());
    let result = controller.advance().await.unwrap();

    assert!(!result.succeeded);
    assert_eq!(
        controller.current_state(),
        ControllerState::Errored { kind: ErrorKind::Transport }
    );
    assert_eq!(controller.cursor(), 1);
}

#[tokio::test]
async fn test_timeout_then_retry_replays_same_request() {
    let server = MockServer::start().await;
    // first attempt: slower than the client timeout
    Mock::given(method("GET"))
        .and(path("/api/topics"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": true, "topics": items(10)}))
                .set_delay(Duration::from_millis(300)),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    // replay: fast
    Mock::given(method("GET"))
        .and(path("/api/topics"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "topics": items(10)
        })))
        .mount(&server)
        .await;

    let config = NetworkConfig::builder()
        .base_url(server.uri())
        .timeout(Duration::from_millis(50))
        .build();
    let fetcher = PageFetcher::new(
        NetworkClient::with_config(config),
        TtlCache::new(MemoryStore::new()),
        "topics",
    );
    let mut controller = PaginationController::new(fetcher, "/api/topics");

    let result = controller.advance().await.unwrap();
    assert_eq!(result.error_kind, Some(ErrorKind::Timeout));
    assert_eq!(
        controller.current_state(),
        ControllerState::Errored { kind: ErrorKind::Timeout }
    );

    assert!(controller.retry());
    assert_eq!(controller.current_state(), ControllerState::Idle);
    assert_eq!(controller.cursor(), 1);

    let replay = controller.advance().await.unwrap();
    assert!(replay.succeeded);
    assert_eq!(controller.current_state(), ControllerState::Active { cursor: 2 });
}

#[tokio::test]
async fn test_retry_only_from_errored() {
    let server = MockServer::start().await;
    let mut controller = controller_for(&server, CacheOptions::disabled());

    assert!(!controller.retry());
    assert_eq!(controller.current_state(), ControllerState::Idle);

    controller.set_state_for_test(ControllerState::Exhausted { kind: ExhaustKind::Empty });
    assert!(!controller.retry());
    assert_eq!(
        controller.current_state(),
        ControllerState::Exhausted { kind: ExhaustKind::Empty }
    );
}

#[tokio::test]
async fn test_reset_returns_to_first_page() {
    let server = MockServer::start().await;
    mount_page(&server, 1, 10).await;
    mount_page(&server, 2, 10).await;

    let mut controller = controller_for(&server, CacheOptions::disabled());
    controller.advance().await.unwrap();
    controller.advance().await.unwrap();
    assert_eq!(controller.cursor(), 3);

    controller.reset();
    assert_eq!(controller.current_state(), ControllerState::Idle);
    assert_eq!(controller.cursor(), 1);
}

#[tokio::test]
async fn test_reset_leaves_terminal_state() {
    let server = MockServer::start().await;
    let mut controller = controller_for(&server, CacheOptions::disabled());

    controller.set_state_for_test(ControllerState::Exhausted { kind: ExhaustKind::Partial });
    controller.reset();
    assert_eq!(controller.current_state(), ControllerState::Idle);
}

// ============================================================================
// Cache Interaction
// ============================================================================

#[tokio::test]
async fn test_reset_then_advance_serves_first_page_from_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/topics"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "topics": items(10)
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut controller = controller_for(&server, CacheOptions::slow());

    let first = controller.advance().await.unwrap();
    assert!(!first.from_cache);

    controller.reset();

    let again = controller.advance().await.unwrap();
    assert!(again.from_cache);
    assert_eq!(again.items, first.items);
}

#[tokio::test]
async fn test_controllers_get_distinct_ids() {
    let server = MockServer::start().await;
    let a = controller_for(&server, CacheOptions::disabled());
    let b = controller_for(&server, CacheOptions::disabled());
    assert_ne!(a.id(), b.id());
}
