//! API error types and responses.

use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use tipjar_core::DonationError;
use tipjar_store::StoreError;

/// API error type.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Unauthorized - missing or invalid credentials.
    #[error("unauthorized")]
    Unauthorized,

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Bad request - invalid input.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Amount is not a positive integer.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// Payment id already recorded.
    #[error("duplicate payment: {0}")]
    DuplicatePayment(String),

    /// Backing store unreachable; the caller may retry.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// JSON error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match &self {
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                self.to_string(),
                None,
            ),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone(), None),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone(), None),
            Self::InvalidAmount(msg) => (
                StatusCode::BAD_REQUEST,
                "invalid_amount",
                msg.clone(),
                None,
            ),
            Self::DuplicatePayment(id) => (
                StatusCode::CONFLICT,
                "duplicate_payment",
                format!("Payment {id} already recorded"),
                Some(serde_json::json!({ "payment_id": id })),
            ),
            Self::StorageUnavailable(msg) => {
                tracing::error!(error = %msg, "Storage unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "storage_unavailable",
                    "Donation storage is unavailable".to_string(),
                    None,
                )
            }
            Self::Internal(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<DonationError> for ApiError {
    fn from(err: DonationError) -> Self {
        match err {
            DonationError::InvalidAmount(msg) => Self::InvalidAmount(msg),
            other => Self::BadRequest(other.to_string()),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidDonation(e) => e.into(),
            StoreError::DuplicatePayment { payment_id } => Self::DuplicatePayment(payment_id),
            StoreError::Unavailable(msg) => Self::StorageUnavailable(msg),
            StoreError::Serialization(msg) => Self::Internal(msg),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}
