//! Leaderboard and tier integration tests.

mod common;

use common::TestHarness;

// ============================================================================
// Leaderboard
// ============================================================================

#[tokio::test]
async fn empty_leaderboard() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .get("/v1/leaderboard")
        .add_header("x-api-key", harness.service_api_key.clone())
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["entries"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn leaderboard_ranks_by_total() {
    let harness = TestHarness::new();

    harness.donate(1, "Ann", 100).await.assert_status_ok();
    harness.donate(2, "Bo", 50).await.assert_status_ok();
    harness.donate(3, "Cy", 200).await.assert_status_ok();
    harness.donate(2, "Bo", 100).await.assert_status_ok();

    let response = harness
        .server
        .get("/v1/leaderboard")
        .add_query_param("limit", 2)
        .add_header("x-api-key", harness.service_api_key.clone())
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let entries = body["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 2);

    assert_eq!(entries[0]["rank"], 1);
    assert_eq!(entries[0]["account"]["user_id"], 3);
    assert_eq!(entries[0]["account"]["total_donated"], 200);
    assert_eq!(entries[0]["text"], "🥇 Cy - 200 Stars");

    assert_eq!(entries[1]["rank"], 2);
    assert_eq!(entries[1]["account"]["user_id"], 2);
    assert_eq!(entries[1]["text"], "🥈 Bo - 150 Stars");
}

#[tokio::test]
async fn leaderboard_ties_break_by_user_id() {
    let harness = TestHarness::new();

    harness.donate(20, "Late", 10).await.assert_status_ok();
    harness.donate(10, "Early", 10).await.assert_status_ok();

    let body: serde_json::Value = harness
        .server
        .get("/v1/leaderboard")
        .add_header("x-api-key", harness.service_api_key.clone())
        .await
        .json();

    let ids: Vec<i64> = body["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["account"]["user_id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![10, 20]);
}

#[tokio::test]
async fn leaderboard_limit_is_clamped() {
    let harness = TestHarness::new();

    for user in 1..=12 {
        harness.donate(user, "Donor", user).await.assert_status_ok();
    }

    let body: serde_json::Value = harness
        .server
        .get("/v1/leaderboard")
        .add_header("x-api-key", harness.service_api_key.clone())
        .await
        .json();
    assert_eq!(body["entries"].as_array().unwrap().len(), 10);
    assert_eq!(body["entries"][3]["text"], "4. Donor - 9 Stars");

    let body: serde_json::Value = harness
        .server
        .get("/v1/leaderboard")
        .add_query_param("limit", 0)
        .add_header("x-api-key", harness.service_api_key.clone())
        .await
        .json();
    assert_eq!(body["entries"].as_array().unwrap().len(), 1);
}

// ============================================================================
// Tiers
// ============================================================================

#[tokio::test]
async fn lists_default_tiers() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .get("/v1/tiers")
        .add_header("x-api-key", harness.service_api_key.clone())
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let tiers = body["tiers"].as_array().unwrap();
    assert_eq!(tiers.len(), 8);
    assert_eq!(tiers[0]["amount"], 5);
    assert_eq!(tiers[0]["label"], "Starter");
    assert_eq!(tiers[7]["label"], "Supreme");
}

#[tokio::test]
async fn classify_exact_and_custom_amounts() {
    let harness = TestHarness::new();

    let body: serde_json::Value = harness
        .server
        .get("/v1/tiers/classify")
        .add_query_param("amount", 50)
        .add_header("x-api-key", harness.service_api_key.clone())
        .await
        .json();
    assert_eq!(body["label"], "Champion");
    assert_eq!(body["tier"]["kind"], "named");

    let body: serde_json::Value = harness
        .server
        .get("/v1/tiers/classify")
        .add_query_param("amount", 51)
        .add_header("x-api-key", harness.service_api_key.clone())
        .await
        .json();
    assert_eq!(body["label"], "Custom (51)");
    assert_eq!(body["tier"]["kind"], "custom");
}

#[tokio::test]
async fn classify_rejects_non_positive_amount() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .get("/v1/tiers/classify")
        .add_query_param("amount", 0)
        .add_header("x-api-key", harness.service_api_key.clone())
        .await;

    response.assert_status_bad_request();
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "invalid_amount");
}

#[tokio::test]
async fn classify_non_numeric_amount_is_json_bad_request() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .get("/v1/tiers/classify")
        .add_query_param("amount", "abc")
        .add_header("x-api-key", harness.service_api_key.clone())
        .await;

    response.assert_status_bad_request();
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "bad_request");
}

#[tokio::test]
async fn negative_leaderboard_limit_is_json_bad_request() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .get("/v1/leaderboard")
        .add_query_param("limit", -1)
        .add_header("x-api-key", harness.service_api_key.clone())
        .await;

    response.assert_status_bad_request();
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "bad_request");
}
