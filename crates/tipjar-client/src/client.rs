//! Tipjar HTTP client implementation.

use reqwest::{Client, StatusCode};
use std::time::Duration;

use tipjar_core::{TierEntry, UserId};

use crate::error::ClientError;
use crate::types::{
    ApiErrorResponse, CallbackRequest, CallbackResponse, DonationResponse, HealthResponse,
    HistoryResponse, LeaderboardResponse, MessageRequest, MessageResponse, PreCheckoutRequest,
    PreCheckoutResponse, RecordDonationRequest, SuccessfulPaymentRequest,
    SuccessfulPaymentResponse, TiersResponse, UserStats,
};

/// Tipjar API client.
///
/// Provides the calls the bot front-end makes: recording donations and
/// payments, reading stats and the leaderboard, and resolving menu events.
#[derive(Debug, Clone)]
pub struct TipjarClient {
    client: Client,
    base_url: String,
    api_key: String,
    service_name: String,
}

impl TipjarClient {
    /// Create a new tipjar client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the tipjar service (e.g., `"http://tipjar:8080"`)
    /// * `api_key` - Service API key for authentication
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, ClientError> {
        Self::with_options(base_url, api_key, ClientOptions::default())
    }

    /// Create a new tipjar client with custom options.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_options(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        options: ClientOptions,
    ) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(options.timeout_seconds))
            .build()
            .map_err(|e| ClientError::Configuration(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            service_name: options.service_name,
        })
    }

    /// Check service health. Needs no API key.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        let url = format!("{}/health", self.base_url);
        let response = self.client.get(&url).send().await?;
        self.handle_response(response).await
    }

    /// Record a confirmed donation.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidAmount`] for a non-positive amount and
    /// [`ClientError::DuplicatePayment`] when the payment id was already
    /// recorded.
    pub async fn record_donation(
        &self,
        request: &RecordDonationRequest,
    ) -> Result<DonationResponse, ClientError> {
        tracing::debug!(user_id = %request.user_id, amount = request.amount, "Recording donation");
        self.post("/v1/donations", request).await
    }

    /// Report a successful Stars payment.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::DuplicatePayment`] if this charge was already
    /// recorded.
    pub async fn report_successful_payment(
        &self,
        request: &SuccessfulPaymentRequest,
    ) -> Result<SuccessfulPaymentResponse, ClientError> {
        tracing::debug!(
            user_id = %request.user_id,
            charge_id = %request.telegram_payment_charge_id,
            "Reporting successful payment"
        );
        self.post("/v1/payments/successful", request).await
    }

    /// Validate a pre-checkout query.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn pre_checkout(
        &self,
        request: &PreCheckoutRequest,
    ) -> Result<PreCheckoutResponse, ClientError> {
        self.post("/v1/payments/pre-checkout", request).await
    }

    /// Get a user's stats, or `None` if they never donated.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn get_user_stats(&self, user_id: UserId) -> Result<Option<UserStats>, ClientError> {
        let url = format!("{}/v1/users/{user_id}/stats", self.base_url);
        let response = self.authed(self.client.get(&url)).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        self.handle_response(response).await.map(Some)
    }

    /// List a user's ledger entries, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn list_user_donations(
        &self,
        user_id: UserId,
        limit: Option<usize>,
        offset: usize,
    ) -> Result<HistoryResponse, ClientError> {
        let url = format!("{}/v1/users/{user_id}/donations", self.base_url);
        let mut query = vec![("offset", offset.to_string())];
        if let Some(limit) = limit {
            query.push(("limit", limit.to_string()));
        }

        let response = self
            .authed(self.client.get(&url))
            .query(&query)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Get the top donors. `None` uses the service's default size.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn get_leaderboard(
        &self,
        limit: Option<usize>,
    ) -> Result<LeaderboardResponse, ClientError> {
        let url = format!("{}/v1/leaderboard", self.base_url);
        let mut request = self.authed(self.client.get(&url));
        if let Some(limit) = limit {
            request = request.query(&[("limit", limit)]);
        }

        let response = request.send().await?;
        self.handle_response(response).await
    }

    /// Get the configured tiers.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn list_tiers(&self) -> Result<Vec<TierEntry>, ClientError> {
        let url = format!("{}/v1/tiers", self.base_url);
        let response = self.authed(self.client.get(&url)).send().await?;
        let body: TiersResponse = self.handle_response(response).await?;
        Ok(body.tiers)
    }

    /// Resolve a menu button press.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn menu_callback(
        &self,
        user_id: UserId,
        data: &str,
    ) -> Result<CallbackResponse, ClientError> {
        self.post("/v1/menu/callback", &CallbackRequest { user_id, data })
            .await
    }

    /// Forward a text message.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn send_message(
        &self,
        user_id: UserId,
        text: &str,
    ) -> Result<MessageResponse, ClientError> {
        self.post("/v1/messages", &MessageRequest { user_id, text })
            .await
    }

    fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("x-api-key", &self.api_key)
            .header("x-service-name", &self.service_name)
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: serde::Serialize + ?Sized,
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}{path}", self.base_url);

        let response = self
            .authed(self.client.post(&url))
            .json(body)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Handle API response and convert errors.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        // Try to parse error response
        let error_body: Result<ApiErrorResponse, _> = response.json().await;

        match error_body {
            Ok(api_error) => {
                let code = api_error.error.code.as_str();
                let message = api_error.error.message;

                // Map specific error codes to typed errors
                match code {
                    "invalid_amount" => Err(ClientError::InvalidAmount(message)),
                    "duplicate_payment" => {
                        let payment_id = api_error
                            .error
                            .details
                            .as_ref()
                            .and_then(|d| d.get("payment_id"))
                            .and_then(serde_json::Value::as_str)
                            .map_or(message, str::to_string);

                        Err(ClientError::DuplicatePayment { payment_id })
                    }
                    "storage_unavailable" => Err(ClientError::StorageUnavailable(message)),
                    _ => Err(ClientError::Api {
                        code: code.to_string(),
                        message,
                        status: status.as_u16(),
                    }),
                }
            }
            Err(_) => Err(ClientError::Api {
                code: "unknown".to_string(),
                message: format!("HTTP {status}"),
                status: status.as_u16(),
            }),
        }
    }
}

/// Client options for customization.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Request timeout in seconds (default: 30).
    pub timeout_seconds: u64,
    /// Service name to include in requests.
    pub service_name: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            service_name: "bot".to_string(),
        }
    }
}

impl ClientOptions {
    /// Create options with a service name.
    #[must_use]
    pub fn with_service_name(name: impl Into<String>) -> Self {
        Self {
            service_name: name.into(),
            ..Self::default()
        }
    }
}
