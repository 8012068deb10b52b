//! Tier table handlers.

use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use tipjar_core::{classify_tier, Tier, TierEntry};

use crate::auth::ServiceAuth;
use crate::error::ApiError;
use crate::state::AppState;

/// Configured tiers.
#[derive(Debug, Serialize)]
pub struct TiersResponse {
    /// Tiers in menu order.
    pub tiers: Vec<TierEntry>,
}

/// List the configured tiers.
pub async fn list_tiers(
    State(state): State<Arc<AppState>>,
    _auth: ServiceAuth,
) -> Json<TiersResponse> {
    Json(TiersResponse {
        tiers: state.config.tiers.entries().to_vec(),
    })
}

/// Classify query parameters.
#[derive(Debug, Deserialize)]
pub struct ClassifyQuery {
    /// Amount to classify.
    pub amount: i64,
}

/// Classification result.
#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    /// The amount.
    pub amount: u64,
    /// Structured tier.
    pub tier: Tier,
    /// Label that would be stored.
    pub label: String,
}

/// Classify an amount against the configured tiers.
pub async fn classify(
    State(state): State<Arc<AppState>>,
    _auth: ServiceAuth,
    query: Result<Query<ClassifyQuery>, QueryRejection>,
) -> Result<Json<ClassifyResponse>, ApiError> {
    let Query(query) = query?;
    let amount = tipjar_core::validate_amount(query.amount)?;
    let tier = classify_tier(amount, &state.config.tiers);

    Ok(Json(ClassifyResponse {
        amount,
        label: tier.label(),
        tier,
    }))
}
