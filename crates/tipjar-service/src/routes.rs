//! Router configuration.
//!
//! This module sets up the Axum router with all routes and middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{donations, health, menu, payments, stats, tiers};
use crate::state::AppState;

/// Create the service router with all routes and middleware.
///
/// # Routes
///
/// ## Public
/// - `GET /health` - Health check
///
/// ## Ledger (Service API Key auth)
/// - `POST /v1/donations` - Record a confirmed donation
/// - `GET /v1/donations/:donation_id` - One ledger entry
/// - `GET /v1/users/:user_id/stats` - Aggregate for one user
/// - `GET /v1/users/:user_id/donations` - Ledger entries for one user
/// - `GET /v1/leaderboard` - Top donors
///
/// ## Tiers (Service API Key auth)
/// - `GET /v1/tiers` - Configured tier table
/// - `GET /v1/tiers/classify` - Tier for an amount
///
/// ## Payments (Service API Key auth)
/// - `POST /v1/payments/pre-checkout` - Validate a pre-checkout query
/// - `POST /v1/payments/successful` - Record a successful Stars payment
///
/// ## Bot (Service API Key auth)
/// - `POST /v1/menu/callback` - Resolve a menu button press
/// - `POST /v1/messages` - Handle a text message
pub fn create_router(state: AppState) -> Router {
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout_seconds = state.config.request_timeout_seconds;

    let state = Arc::new(state);

    Router::new()
        // Health (public)
        .route("/health", get(health::health))
        // Ledger
        .route("/v1/donations", post(donations::record_donation))
        .route("/v1/donations/:donation_id", get(donations::get_donation))
        .route("/v1/users/:user_id/stats", get(stats::get_user_stats))
        .route(
            "/v1/users/:user_id/donations",
            get(donations::list_user_donations),
        )
        .route("/v1/leaderboard", get(stats::get_leaderboard))
        // Tiers
        .route("/v1/tiers", get(tiers::list_tiers))
        .route("/v1/tiers/classify", get(tiers::classify))
        // Payments
        .route("/v1/payments/pre-checkout", post(payments::pre_checkout))
        .route("/v1/payments/successful", post(payments::successful_payment))
        // Bot
        .route("/v1/menu/callback", post(menu::callback))
        .route("/v1/messages", post(menu::message))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            request_timeout_seconds,
        )))
        .with_state(state)
}
