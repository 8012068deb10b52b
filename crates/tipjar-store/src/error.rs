//! Error types for tipjar storage.

use tipjar_core::DonationError;

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing store could not be reached or rejected the operation.
    ///
    /// The donation must be assumed unrecorded.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Serialization/deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// A ledger entry with the same payment id already exists.
    #[error("duplicate payment: {payment_id}")]
    DuplicatePayment {
        /// The payment id that was already recorded.
        payment_id: String,
    },

    /// The donation was rejected before reaching storage.
    #[error(transparent)]
    InvalidDonation(#[from] DonationError),
}
