//! Client error types.

/// Errors that can occur when using the tipjar client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server returned an error response.
    #[error("API error: {code} - {message}")]
    Api {
        /// Error code.
        code: String,
        /// Error message.
        message: String,
        /// HTTP status code.
        status: u16,
    },

    /// The amount was rejected; nothing was recorded.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// The payment was already recorded.
    #[error("duplicate payment: {payment_id}")]
    DuplicatePayment {
        /// The payment charge id.
        payment_id: String,
    },

    /// Service storage is down; the call may be retried.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl ClientError {
    /// Whether retrying the same call may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::StorageUnavailable(_))
            || matches!(self, Self::Http(e) if e.is_timeout() || e.is_connect())
    }
}
