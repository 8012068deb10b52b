//! Payment event handlers.
//!
//! The front-end forwards the platform's pre-checkout query and successful
//! payment message here. A successful payment turns into exactly one ledger
//! entry, keyed by its charge id.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use tipjar_core::{
    classify_tier, thank_you_message, validate_amount, DonationRecord, InvoicePayload,
    UserAccount, UserId, STARS_CURRENCY,
};
use tipjar_store::NewDonation;

use crate::auth::ServiceAuth;
use crate::error::ApiError;
use crate::state::AppState;

/// Pre-checkout query forwarded by the front-end.
#[derive(Debug, Deserialize)]
pub struct PreCheckoutRequest {
    /// Paying user.
    pub user_id: UserId,
    /// Currency code.
    pub currency: String,
    /// Total amount in the currency's smallest unit.
    pub total_amount: i64,
    /// Payload of the invoice being paid.
    pub invoice_payload: String,
}

/// Answer for the pre-checkout query.
#[derive(Debug, Serialize)]
pub struct PreCheckoutResponse {
    /// Whether the payment may proceed.
    pub ok: bool,
    /// Reason shown to the user when `ok` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// Validate a pre-checkout query against the invoice it refers to.
pub async fn pre_checkout(
    _auth: ServiceAuth,
    Json(body): Json<PreCheckoutRequest>,
) -> Json<PreCheckoutResponse> {
    let verdict = validate_amount(body.total_amount).and_then(|amount| {
        body.invoice_payload
            .parse::<InvoicePayload>()?
            .verify(body.user_id, amount, &body.currency)
    });

    match verdict {
        Ok(()) => Json(PreCheckoutResponse {
            ok: true,
            error_message: None,
        }),
        Err(e) => {
            tracing::warn!(
                user_id = %body.user_id,
                payload = %body.invoice_payload,
                error = %e,
                "Pre-checkout rejected"
            );
            Json(PreCheckoutResponse {
                ok: false,
                error_message: Some("This invoice is no longer valid. Please start again.".into()),
            })
        }
    }
}

/// Successful payment message forwarded by the front-end.
#[derive(Debug, Deserialize)]
pub struct SuccessfulPaymentRequest {
    /// Paying user.
    pub user_id: UserId,
    /// Payer first name.
    pub first_name: String,
    /// Payer username.
    #[serde(default)]
    pub username: Option<String>,
    /// Currency code.
    pub currency: String,
    /// Total amount in the currency's smallest unit.
    pub total_amount: i64,
    /// Payload of the paid invoice.
    #[serde(default)]
    pub invoice_payload: Option<String>,
    /// Platform charge id; one ledger entry per charge.
    pub telegram_payment_charge_id: String,
}

/// Response after a payment was recorded.
#[derive(Debug, Serialize)]
pub struct SuccessfulPaymentResponse {
    /// The stored ledger entry.
    pub donation: DonationRecord,
    /// The donor's updated aggregate; absent when it could not be read back
    /// after the write.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<UserAccount>,
    /// Thank-you text to send to the donor.
    pub message: String,
}

/// Record a successful Stars payment.
pub async fn successful_payment(
    State(state): State<Arc<AppState>>,
    auth: ServiceAuth,
    Json(body): Json<SuccessfulPaymentRequest>,
) -> Result<Json<SuccessfulPaymentResponse>, ApiError> {
    if body.currency != STARS_CURRENCY {
        return Err(ApiError::BadRequest(format!(
            "Unsupported currency {}",
            body.currency
        )));
    }

    let amount = validate_amount(body.total_amount)?;

    // The charge already happened; a payload mismatch is logged, not refused.
    if let Some(payload) = &body.invoice_payload {
        let check = payload
            .parse::<InvoicePayload>()
            .and_then(|p| p.verify(body.user_id, amount, &body.currency));
        if let Err(e) = check {
            tracing::warn!(
                user_id = %body.user_id,
                charge_id = %body.telegram_payment_charge_id,
                error = %e,
                "Paid invoice does not match its payload"
            );
        }
    }

    let tier = classify_tier(amount, &state.config.tiers).label();

    tracing::info!(
        service = %auth.service_name,
        user_id = %body.user_id,
        charge_id = %body.telegram_payment_charge_id,
        amount,
        "Successful Stars payment"
    );

    let donation = NewDonation::new(
        body.user_id,
        body.first_name,
        body.username,
        body.total_amount,
        tier.clone(),
    )
    .with_payment_id(body.telegram_payment_charge_id);

    let recorded = state.ledger.record_donation(donation)?;

    Ok(Json(SuccessfulPaymentResponse {
        message: thank_you_message(amount, &tier),
        donation: recorded.record,
        account: recorded.account,
    }))
}
