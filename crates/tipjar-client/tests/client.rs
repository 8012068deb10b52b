//! Client integration tests against a mock tipjar service.

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tipjar_client::{
    CallbackResponse, ClientError, MessageResponse, RecordDonationRequest,
    SuccessfulPaymentRequest, TipjarClient,
};
use tipjar_core::UserId;

const API_KEY: &str = "test-service-key";

fn account_json(user_id: i64, total: u64) -> serde_json::Value {
    json!({
        "user_id": user_id,
        "first_name": "Ann",
        "username": "ann",
        "total_donated": total,
        "donation_count": 1,
        "last_tier_donated": "Warrior",
        "last_donated_timestamp": "2026-01-01T00:00:00Z",
        "last_donation_id": "01HZY8J6Q5M4W1V0P9T3K2R7XA",
        "first_donated_at": "2026-01-01T00:00:00Z",
    })
}

fn donation_json(user_id: i64, amount: u64) -> serde_json::Value {
    json!({
        "id": "01HZY8J6Q5M4W1V0P9T3K2R7XA",
        "user_id": user_id,
        "amount": amount,
        "tier": "Warrior",
        "timestamp": "2026-01-01T00:00:00Z",
        "payment_id": null,
    })
}

fn error_json(code: &str, message: &str, details: serde_json::Value) -> serde_json::Value {
    json!({ "error": { "code": code, "message": message, "details": details } })
}

async fn setup() -> (MockServer, TipjarClient) {
    let server = MockServer::start().await;
    let client = TipjarClient::new(server.uri(), API_KEY).unwrap();
    (server, client)
}

fn donation_request(amount: i64) -> RecordDonationRequest {
    RecordDonationRequest {
        user_id: UserId::new(42),
        first_name: "Ann".into(),
        username: Some("ann".into()),
        amount,
        tier: None,
        payment_id: None,
    }
}

#[tokio::test]
async fn record_donation_sends_key_and_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/donations"))
        .and(header("x-api-key", API_KEY))
        .and(header("x-service-name", "bot"))
        .and(body_json(json!({
            "user_id": 42,
            "first_name": "Ann",
            "username": "ann",
            "amount": 10,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "donation": donation_json(42, 10),
            "account": account_json(42, 10),
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client.record_donation(&donation_request(10)).await.unwrap();
    assert_eq!(response.donation.amount, 10);
    assert_eq!(response.account.unwrap().total_donated, 10);
}

#[tokio::test]
async fn recorded_donation_without_account_is_still_success() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/donations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "donation": donation_json(42, 10),
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client.record_donation(&donation_request(10)).await.unwrap();
    assert_eq!(response.donation.amount, 10);
    assert!(response.account.is_none());
}

#[tokio::test]
async fn invalid_amount_maps_to_typed_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/donations"))
        .respond_with(ResponseTemplate::new(400).set_body_json(error_json(
            "invalid_amount",
            "amount must be positive",
            json!(null),
        )))
        .mount(&server)
        .await;

    let err = client.record_donation(&donation_request(-5)).await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidAmount(_)));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn duplicate_payment_carries_payment_id() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/payments/successful"))
        .respond_with(ResponseTemplate::new(409).set_body_json(error_json(
            "duplicate_payment",
            "Payment charge-1 already recorded",
            json!({ "payment_id": "charge-1" }),
        )))
        .mount(&server)
        .await;

    let err = client
        .report_successful_payment(&SuccessfulPaymentRequest {
            user_id: UserId::new(42),
            first_name: "Ann".into(),
            username: None,
            currency: "XTR".into(),
            total_amount: 10,
            invoice_payload: Some("stars-donation-42-10".into()),
            telegram_payment_charge_id: "charge-1".into(),
        })
        .await
        .unwrap_err();

    match err {
        ClientError::DuplicatePayment { payment_id } => assert_eq!(payment_id, "charge-1"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn storage_unavailable_is_retryable() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/leaderboard"))
        .respond_with(ResponseTemplate::new(503).set_body_json(error_json(
            "storage_unavailable",
            "Donation storage is unavailable",
            json!(null),
        )))
        .mount(&server)
        .await;

    let err = client.get_leaderboard(None).await.unwrap_err();
    assert!(matches!(err, ClientError::StorageUnavailable(_)));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn unknown_user_stats_is_none() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/users/999/stats"))
        .respond_with(ResponseTemplate::new(404).set_body_json(error_json(
            "not_found",
            "No donations from user 999",
            json!(null),
        )))
        .mount(&server)
        .await;

    assert!(client.get_user_stats(UserId::new(999)).await.unwrap().is_none());
}

#[tokio::test]
async fn user_stats_parse_flattened_account() {
    let (server, client) = setup().await;

    let mut body = account_json(42, 60);
    body["display_name"] = json!("@ann");

    Mock::given(method("GET"))
        .and(path("/v1/users/42/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let stats = client.get_user_stats(UserId::new(42)).await.unwrap().unwrap();
    assert_eq!(stats.account.total_donated, 60);
    assert_eq!(stats.display_name, "@ann");
}

#[tokio::test]
async fn leaderboard_passes_limit_and_renders_text() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/leaderboard"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "entries": [
                {
                    "rank": 1,
                    "marker": "gold",
                    "account": account_json(1, 200),
                    "text": "🥇 @ann - 200 Stars",
                },
                {
                    "rank": 2,
                    "marker": "silver",
                    "account": account_json(2, 100),
                    "text": "🥈 @ann - 100 Stars",
                },
            ]
        })))
        .mount(&server)
        .await;

    let leaderboard = client.get_leaderboard(Some(2)).await.unwrap();
    assert_eq!(leaderboard.entries.len(), 2);
    assert_eq!(leaderboard.entries[0].row.rank, 1);
    assert_eq!(
        leaderboard.to_text(),
        "🥇 @ann - 200 Stars\n🥈 @ann - 100 Stars"
    );
}

#[tokio::test]
async fn menu_callback_parses_prompt() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/menu/callback"))
        .and(body_json(json!({ "user_id": 42, "data": "stars:custom" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "type": "prompt_custom_amount" })),
        )
        .mount(&server)
        .await;

    let response = client
        .menu_callback(UserId::new(42), "stars:custom")
        .await
        .unwrap();
    assert!(matches!(response, CallbackResponse::PromptCustomAmount));
}

#[tokio::test]
async fn message_parses_rejection() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "type": "rejected",
            "message": "Please send a positive whole number of Stars.",
        })))
        .mount(&server)
        .await;

    let response = client.send_message(UserId::new(42), "abc").await.unwrap();
    assert!(matches!(response, MessageResponse::Rejected { .. }));
}

#[tokio::test]
async fn unparseable_error_body_is_generic_api_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/tiers"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    match client.list_tiers().await.unwrap_err() {
        ClientError::Api { code, status, .. } => {
            assert_eq!(code, "unknown");
            assert_eq!(status, 502);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
