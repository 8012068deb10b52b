//! Error types for tipjar.

use crate::ids::IdError;

/// Result type for tipjar operations.
pub type Result<T> = std::result::Result<T, DonationError>;

/// Errors that can occur in tipjar operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DonationError {
    /// Amount is zero, negative, or not an integer.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// Tier label is empty.
    #[error("invalid tier: {0}")]
    InvalidTier(String),

    /// Tier table has duplicate or non-positive amounts, or empty labels.
    #[error("invalid tier table: {0}")]
    InvalidTierTable(String),

    /// Invoice payload does not match the expected format or values.
    #[error("invalid invoice payload: {0}")]
    InvalidPayload(String),

    /// Unknown callback data from a menu button.
    #[error("unknown callback: {0}")]
    UnknownCallback(String),

    /// Invalid identifier.
    #[error("invalid identifier: {0}")]
    InvalidId(#[from] IdError),
}
