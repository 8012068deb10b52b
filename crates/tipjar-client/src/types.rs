//! Request and response types for the tipjar client.

use serde::{Deserialize, Serialize};

use tipjar_core::{
    DonationRecord, LeaderboardRow, MenuButton, StarsInvoice, TierEntry, UserAccount, UserId,
};

/// Donation the front-end has already confirmed.
#[derive(Debug, Clone, Serialize)]
pub struct RecordDonationRequest {
    /// Donor platform id.
    pub user_id: UserId,
    /// Donor first name.
    pub first_name: String,
    /// Donor username.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Amount in Stars.
    pub amount: i64,
    /// Tier label; the service classifies the amount when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,
    /// Payment charge id for duplicate detection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,
}

/// Response after a donation was recorded.
#[derive(Debug, Clone, Deserialize)]
pub struct DonationResponse {
    /// The stored ledger entry.
    pub donation: DonationRecord,
    /// The donor's updated aggregate; `None` when the service recorded the
    /// donation but could not read the aggregate back.
    #[serde(default)]
    pub account: Option<UserAccount>,
}

/// Per-user stats.
#[derive(Debug, Clone, Deserialize)]
pub struct UserStats {
    /// The aggregate.
    #[serde(flatten)]
    pub account: UserAccount,
    /// Name to show in the profile.
    pub display_name: String,
}

/// A page of one user's ledger entries.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryResponse {
    /// Ledger entries, newest first.
    pub donations: Vec<DonationRecord>,
    /// Page size used.
    pub limit: usize,
    /// Offset used.
    pub offset: usize,
}

/// One leaderboard row with its rendered text.
#[derive(Debug, Clone, Deserialize)]
pub struct LeaderboardEntry {
    /// Rank, account and marker.
    #[serde(flatten)]
    pub row: LeaderboardRow,
    /// Ready-to-send text line.
    pub text: String,
}

/// Leaderboard response.
#[derive(Debug, Clone, Deserialize)]
pub struct LeaderboardResponse {
    /// Ranked rows, best first.
    pub entries: Vec<LeaderboardEntry>,
}

impl LeaderboardResponse {
    /// Render the leaderboard as one message, one row per line.
    #[must_use]
    pub fn to_text(&self) -> String {
        self.entries
            .iter()
            .map(|e| e.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TiersResponse {
    pub tiers: Vec<TierEntry>,
}

/// Pre-checkout query to validate.
#[derive(Debug, Clone, Serialize)]
pub struct PreCheckoutRequest {
    /// Paying user.
    pub user_id: UserId,
    /// Currency code.
    pub currency: String,
    /// Total amount.
    pub total_amount: i64,
    /// Payload of the invoice being paid.
    pub invoice_payload: String,
}

/// Pre-checkout answer.
#[derive(Debug, Clone, Deserialize)]
pub struct PreCheckoutResponse {
    /// Whether the payment may proceed.
    pub ok: bool,
    /// Reason to show when `ok` is false.
    #[serde(default)]
    pub error_message: Option<String>,
}

/// Successful payment to record.
#[derive(Debug, Clone, Serialize)]
pub struct SuccessfulPaymentRequest {
    /// Paying user.
    pub user_id: UserId,
    /// Payer first name.
    pub first_name: String,
    /// Payer username.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Currency code.
    pub currency: String,
    /// Total amount.
    pub total_amount: i64,
    /// Payload of the paid invoice.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_payload: Option<String>,
    /// Platform charge id.
    pub telegram_payment_charge_id: String,
}

/// Response after a payment was recorded.
#[derive(Debug, Clone, Deserialize)]
pub struct SuccessfulPaymentResponse {
    /// The stored ledger entry.
    pub donation: DonationRecord,
    /// The donor's updated aggregate; `None` when the service recorded the
    /// donation but could not read the aggregate back.
    #[serde(default)]
    pub account: Option<UserAccount>,
    /// Thank-you text to send.
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct CallbackRequest<'a> {
    pub user_id: UserId,
    pub data: &'a str,
}

/// Screens the front-end renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    /// Welcome text with the main menu.
    Main,
    /// Crypto addresses.
    Crypto,
    /// Stars tier picker.
    Stars,
}

/// What to do after a button press.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CallbackResponse {
    /// Edit the message to show a screen.
    Screen {
        /// Screen to render.
        screen: Screen,
        /// Inline keyboard rows.
        keyboard: Vec<Vec<MenuButton>>,
    },
    /// Send an invoice and answer the callback with a notice.
    Invoice {
        /// Invoice to send.
        invoice: StarsInvoice,
        /// Callback answer text.
        notice: String,
    },
    /// Ask the user to type an amount.
    PromptCustomAmount,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct MessageRequest<'a> {
    pub user_id: UserId,
    pub text: &'a str,
}

/// What to do after a text message.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageResponse {
    /// Not part of a prompt.
    Ignored,
    /// Send this invoice.
    Invoice {
        /// Invoice to send.
        invoice: StarsInvoice,
    },
    /// Invalid amount; reply with this text.
    Rejected {
        /// Reply text.
        message: String,
    },
}

/// Health check response.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service name.
    pub service: String,
    /// Service version.
    pub version: String,
}

/// API error response (for parsing error responses).
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}
