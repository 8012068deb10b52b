//! Stars invoices.
//!
//! The front-end sends these to the payment API verbatim. The payload string
//! identifies the donor and amount, so a pre-checkout query or a successful
//! payment can be checked against what was actually invoiced.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DonationError;
use crate::{classify_tier, TierTable, UserId};

/// Currency code of the in-platform Stars currency.
pub const STARS_CURRENCY: &str = "XTR";

const PAYLOAD_PREFIX: &str = "stars-donation-";

/// One labeled price portion of an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledPrice {
    /// Line label.
    pub label: String,
    /// Amount in Stars.
    pub amount: u64,
}

/// A Stars donation invoice, ready to send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarsInvoice {
    /// Chat to send the invoice to (the donor's private chat).
    pub chat_id: UserId,
    /// Invoice title.
    pub title: String,
    /// Invoice description.
    pub description: String,
    /// Opaque payload echoed back by the payment events.
    pub payload: String,
    /// Currency code, always `XTR`.
    pub currency: String,
    /// Price breakdown.
    pub prices: Vec<LabeledPrice>,
}

impl StarsInvoice {
    /// Build the invoice for a donation of `amount` Stars.
    #[must_use]
    pub fn for_donation(user_id: UserId, amount: u64, tiers: &TierTable) -> Self {
        let tier = classify_tier(amount, tiers);
        Self {
            chat_id: user_id,
            title: format!("{tier} Tier Donation"),
            description: format!("Thank you for donating {amount} Stars to support us!"),
            payload: InvoicePayload { user_id, amount }.to_string(),
            currency: STARS_CURRENCY.to_string(),
            prices: vec![LabeledPrice {
                label: format!("{amount} Telegram Stars"),
                amount,
            }],
        }
    }

    /// Sum of all price lines.
    #[must_use]
    pub fn total_amount(&self) -> u64 {
        self.prices.iter().map(|p| p.amount).sum()
    }
}

/// Parsed invoice payload: `stars-donation-{user_id}-{amount}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvoicePayload {
    /// Donor the invoice was issued to.
    pub user_id: UserId,
    /// Invoiced amount.
    pub amount: u64,
}

impl InvoicePayload {
    /// Check that a payment event matches this payload.
    ///
    /// # Errors
    ///
    /// Returns `DonationError::InvalidPayload` if the payer, amount or currency
    /// differ from what was invoiced.
    pub fn verify(&self, user_id: UserId, amount: u64, currency: &str) -> Result<(), DonationError> {
        if currency != STARS_CURRENCY {
            return Err(DonationError::InvalidPayload(format!(
                "unsupported currency {currency}"
            )));
        }
        if self.user_id != user_id {
            return Err(DonationError::InvalidPayload(format!(
                "invoice issued to {} but paid by {user_id}",
                self.user_id
            )));
        }
        if self.amount != amount {
            return Err(DonationError::InvalidPayload(format!(
                "invoiced {} Stars but charged {amount}",
                self.amount
            )));
        }
        Ok(())
    }
}

impl fmt::Display for InvoicePayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{PAYLOAD_PREFIX}{}-{}", self.user_id, self.amount)
    }
}

impl FromStr for InvoicePayload {
    type Err = DonationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DonationError::InvalidPayload(s.to_string());

        // User ids may be negative, so split on the last dash.
        let rest = s.strip_prefix(PAYLOAD_PREFIX).ok_or_else(invalid)?;
        let (user_id, amount) = rest.rsplit_once('-').ok_or_else(invalid)?;

        Ok(Self {
            user_id: user_id.parse().map_err(|_| invalid())?,
            amount: amount
                .parse()
                .ok()
                .filter(|a| *a > 0)
                .ok_or_else(invalid)?,
        })
    }
}

/// Reply sent to a donor after a successful payment.
#[must_use]
pub fn thank_you_message(amount: u64, tier: &str) -> String {
    format!(
        "🎉 Thank you so much for your generous donation of **{amount} Stars** ({tier} Tier)! \
         Your support means the world to us. ❤️"
    )
}
