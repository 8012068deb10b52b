//! HTTP request handlers.

pub mod donations;
pub mod health;
pub mod menu;
pub mod payments;
pub mod stats;
pub mod tiers;

use tipjar_core::UserId;

use crate::error::ApiError;

/// Parse a user id from a path segment.
pub(crate) fn parse_user_id(raw: &str) -> Result<UserId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid user ID: {raw}")))
}
