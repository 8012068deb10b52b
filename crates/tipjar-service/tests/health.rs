//! Health check integration tests.

mod common;

use common::TestHarness;

#[tokio::test]
async fn health_check_returns_ok() {
    let harness = TestHarness::new();

    let response = harness.server.get("/health").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "tipjar");
}

#[tokio::test]
async fn health_check_needs_no_api_key() {
    let harness = TestHarness::new();

    harness
        .server
        .get("/health")
        .add_header("x-api-key", "wrong")
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn v1_routes_require_api_key() {
    let harness = TestHarness::new();

    harness
        .server
        .get("/v1/leaderboard")
        .await
        .assert_status_unauthorized();

    let response = harness
        .server
        .get("/v1/leaderboard")
        .add_header("x-api-key", "wrong-key")
        .await;

    response.assert_status_unauthorized();
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "unauthorized");
}
