//! Custom amount conversation state.
//!
//! A user is either idle or has pressed "Custom amount" and the bot is waiting
//! for them to type a number. The next text message from that user always
//! returns them to idle, whether or not it held a valid amount.

use serde::{Deserialize, Serialize};

use crate::error::{DonationError, Result};

/// Per-user conversation state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// No pending prompt.
    #[default]
    Idle,
    /// Waiting for a custom amount.
    AwaitingAmount,
}

/// Parse the text a user typed in reply to the custom amount prompt.
///
/// # Errors
///
/// Returns `DonationError::InvalidAmount` unless the text is a positive
/// integer.
pub fn parse_custom_amount(text: &str) -> Result<u64> {
    let trimmed = text.trim();
    trimmed
        .parse::<u64>()
        .ok()
        .filter(|amount| *amount > 0)
        .ok_or_else(|| {
            DonationError::InvalidAmount(format!("{trimmed:?} is not a positive whole number"))
        })
}
