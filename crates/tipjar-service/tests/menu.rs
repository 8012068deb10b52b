//! Menu callback and custom amount conversation integration tests.

mod common;

use common::TestHarness;
use serde_json::json;

async fn press(harness: &TestHarness, user_id: i64, data: &str) -> axum_test::TestResponse {
    harness
        .server
        .post("/v1/menu/callback")
        .add_header("x-api-key", harness.service_api_key.clone())
        .json(&json!({ "user_id": user_id, "data": data }))
        .await
}

async fn send(harness: &TestHarness, user_id: i64, text: &str) -> serde_json::Value {
    let response = harness
        .server
        .post("/v1/messages")
        .add_header("x-api-key", harness.service_api_key.clone())
        .json(&json!({ "user_id": user_id, "text": text }))
        .await;
    response.assert_status_ok();
    response.json()
}

// ============================================================================
// Screens
// ============================================================================

#[tokio::test]
async fn main_menu_lists_configured_buttons() {
    let harness = TestHarness::new();

    let response = press(&harness, 42, "main_menu").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["type"], "screen");
    assert_eq!(body["screen"], "main");
    assert_eq!(body["keyboard"][0][0]["label"], "Crypto");
    assert_eq!(body["keyboard"][0][1]["label"], "Telegram Stars");
}

#[tokio::test]
async fn stars_screen_shows_tiers_custom_and_back() {
    let harness = TestHarness::new();

    let body: serde_json::Value = press(&harness, 42, "stars").await.json();
    assert_eq!(body["screen"], "stars");

    let rows = body["keyboard"].as_array().unwrap();
    // 8 tiers two per row, then custom, then back
    assert_eq!(rows.len(), 6);
    assert_eq!(rows[0][0]["label"], "5 Starter");
    assert_eq!(rows[4][0]["label"], "Custom amount");
    assert_eq!(rows[5][0]["label"], "« Back");
}

#[tokio::test]
async fn crypto_screen_has_back_button() {
    let harness = TestHarness::new();

    let body: serde_json::Value = press(&harness, 42, "crypto").await.json();
    assert_eq!(body["screen"], "crypto");
    assert_eq!(body["keyboard"][0][0]["label"], "« Back");
}

#[tokio::test]
async fn unknown_callback_is_bad_request() {
    let harness = TestHarness::new();

    press(&harness, 42, "refund").await.assert_status_bad_request();
    press(&harness, 42, "stars:0").await.assert_status_bad_request();
}

// ============================================================================
// Invoices
// ============================================================================

#[tokio::test]
async fn tier_button_prepares_invoice() {
    let harness = TestHarness::new();

    let body: serde_json::Value = press(&harness, 42, "stars:25").await.json();
    assert_eq!(body["type"], "invoice");
    assert_eq!(body["notice"], "Preparing 25 Stars invoice...");
    assert_eq!(body["invoice"]["title"], "Guardian Tier Donation");
    assert_eq!(body["invoice"]["payload"], "stars-donation-42-25");
    assert_eq!(body["invoice"]["currency"], "XTR");
}

// ============================================================================
// Custom amount conversation
// ============================================================================

#[tokio::test]
async fn text_without_prompt_is_ignored() {
    let harness = TestHarness::new();

    let body = send(&harness, 42, "hello").await;
    assert_eq!(body["type"], "ignored");
}

#[tokio::test]
async fn custom_amount_flow_produces_invoice() {
    let harness = TestHarness::new();

    let body: serde_json::Value = press(&harness, 42, "stars:custom").await.json();
    assert_eq!(body["type"], "prompt_custom_amount");

    let body = send(&harness, 42, " 77 ").await;
    assert_eq!(body["type"], "invoice");
    assert_eq!(body["invoice"]["title"], "Custom (77) Tier Donation");
    assert_eq!(body["invoice"]["prices"][0]["amount"], 77);

    // Prompt is consumed
    let body = send(&harness, 42, "77").await;
    assert_eq!(body["type"], "ignored");
}

#[tokio::test]
async fn invalid_custom_amount_ends_prompt() {
    let harness = TestHarness::new();

    press(&harness, 42, "stars:custom").await.assert_status_ok();

    let body = send(&harness, 42, "-3").await;
    assert_eq!(body["type"], "rejected");
    assert!(body["message"].is_string());

    let body = send(&harness, 42, "10").await;
    assert_eq!(body["type"], "ignored");
}

#[tokio::test]
async fn prompts_are_per_user() {
    let harness = TestHarness::new();

    press(&harness, 1, "stars:custom").await.assert_status_ok();

    assert_eq!(send(&harness, 2, "10").await["type"], "ignored");
    assert_eq!(send(&harness, 1, "10").await["type"], "invoice");
}
