//! Donation recording and history handlers.

use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use tipjar_core::{classify_tier, DonationId, DonationRecord, UserAccount, UserId};
use tipjar_store::NewDonation;

use crate::auth::ServiceAuth;
use crate::error::ApiError;
use crate::handlers::parse_user_id;
use crate::state::AppState;

/// Record donation request.
#[derive(Debug, Deserialize)]
pub struct RecordDonationRequest {
    /// Donor platform id.
    pub user_id: UserId,
    /// Donor first name.
    pub first_name: String,
    /// Donor username.
    #[serde(default)]
    pub username: Option<String>,
    /// Amount in Stars. Kept as a raw JSON number so fractional or negative
    /// values are reported as `invalid_amount`.
    pub amount: serde_json::Number,
    /// Tier label; classified from the amount when absent.
    #[serde(default)]
    pub tier: Option<String>,
    /// Payment charge id for duplicate detection.
    #[serde(default)]
    pub payment_id: Option<String>,
}

/// Response after a donation was recorded.
#[derive(Debug, Serialize)]
pub struct DonationResponse {
    /// The stored ledger entry.
    pub donation: DonationRecord,
    /// The donor's updated aggregate; absent when it could not be read back
    /// after the write.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<UserAccount>,
}

/// Convert a JSON number into a signed integer amount.
pub(crate) fn integer_amount(number: &serde_json::Number) -> Result<i64, ApiError> {
    number
        .as_i64()
        .ok_or_else(|| ApiError::InvalidAmount(format!("{number} is not a whole number of Stars")))
}

/// Record a donation the front-end has already confirmed.
pub async fn record_donation(
    State(state): State<Arc<AppState>>,
    auth: ServiceAuth,
    Json(body): Json<RecordDonationRequest>,
) -> Result<Json<DonationResponse>, ApiError> {
    let amount = integer_amount(&body.amount)?;

    let tier = match body.tier {
        Some(tier) => tier,
        None => {
            let amount = tipjar_core::validate_amount(amount)?;
            classify_tier(amount, &state.config.tiers).label()
        }
    };

    tracing::debug!(
        service = %auth.service_name,
        user_id = %body.user_id,
        amount,
        tier = %tier,
        "Recording donation"
    );

    let mut donation = NewDonation::new(body.user_id, body.first_name, body.username, amount, tier);
    donation.payment_id = body.payment_id;

    let recorded = state.ledger.record_donation(donation)?;

    Ok(Json(DonationResponse {
        donation: recorded.record,
        account: recorded.account,
    }))
}

/// History query parameters.
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    /// Page size.
    pub limit: Option<usize>,
    /// Entries to skip.
    #[serde(default)]
    pub offset: usize,
}

/// Donation history response.
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    /// Ledger entries, newest first.
    pub donations: Vec<DonationRecord>,
    /// Page size used.
    pub limit: usize,
    /// Offset used.
    pub offset: usize,
}

/// List a user's ledger entries for audit.
pub async fn list_user_donations(
    State(state): State<Arc<AppState>>,
    _auth: ServiceAuth,
    Path(user_id): Path<String>,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let Query(query) = query?;
    let user_id = parse_user_id(&user_id)?;
    let limit = state.config.clamp_limit(query.limit);

    let donations = state.ledger.list_donations(user_id, limit, query.offset)?;

    Ok(Json(HistoryResponse {
        donations,
        limit,
        offset: query.offset,
    }))
}

/// Get one ledger entry by id.
pub async fn get_donation(
    State(state): State<Arc<AppState>>,
    _auth: ServiceAuth,
    Path(donation_id): Path<String>,
) -> Result<Json<DonationRecord>, ApiError> {
    let id: DonationId = donation_id
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid donation ID: {donation_id}")))?;

    state
        .ledger
        .get_donation(id)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Donation not found: {id}")))
}
