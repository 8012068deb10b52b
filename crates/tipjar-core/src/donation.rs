//! Ledger entry types.
//!
//! A `DonationRecord` is created exactly once per confirmed payment and is
//! never mutated or deleted afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DonationError, Result};
use crate::{DonationId, UserId};

/// Display metadata for the person behind a donation.
///
/// Overwrites the account's stored names on every donation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Donor {
    /// The donor's platform id.
    pub user_id: UserId,

    /// First name as shown on the platform.
    pub first_name: String,

    /// Public handle, if the donor has one.
    pub username: Option<String>,
}

impl Donor {
    /// Create donor metadata.
    #[must_use]
    pub fn new(user_id: UserId, first_name: impl Into<String>, username: Option<String>) -> Self {
        Self {
            user_id,
            first_name: first_name.into(),
            username,
        }
    }
}

/// One append-only ledger entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonationRecord {
    /// Time-ordered entry id.
    pub id: DonationId,

    /// The donor.
    pub user_id: UserId,

    /// Donated amount in Stars. Always greater than zero.
    pub amount: u64,

    /// Tier label at the time of the donation.
    pub tier: String,

    /// When the entry was created.
    pub timestamp: DateTime<Utc>,

    /// Platform payment charge id, used to reject duplicate deliveries.
    pub payment_id: Option<String>,
}

impl DonationRecord {
    /// Create a new ledger entry stamped with the current UTC time.
    ///
    /// The timestamp is read from the new id, so timestamp order and id order
    /// never disagree.
    ///
    /// # Errors
    ///
    /// Returns `DonationError::InvalidAmount` if `amount` is zero and
    /// `DonationError::InvalidTier` if `tier` is blank.
    pub fn new(
        user_id: UserId,
        amount: u64,
        tier: impl Into<String>,
        payment_id: Option<String>,
    ) -> Result<Self> {
        if amount == 0 {
            return Err(DonationError::InvalidAmount(
                "amount must be greater than zero".into(),
            ));
        }

        let tier = tier.into();
        if tier.trim().is_empty() {
            return Err(DonationError::InvalidTier("tier label is empty".into()));
        }

        let id = DonationId::generate();
        Ok(Self {
            id,
            user_id,
            amount,
            tier,
            timestamp: id.created_at(),
            payment_id: payment_id.filter(|id| !id.trim().is_empty()),
        })
    }
}

/// Check that a raw amount is a positive integer and convert it.
///
/// # Errors
///
/// Returns `DonationError::InvalidAmount` for zero or negative amounts.
pub fn validate_amount(amount: i64) -> Result<u64> {
    u64::try_from(amount)
        .ok()
        .filter(|a| *a > 0)
        .ok_or_else(|| DonationError::InvalidAmount(format!("{amount} is not a positive amount")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_amounts() {
        assert!(matches!(
            validate_amount(-5),
            Err(DonationError::InvalidAmount(_))
        ));
        assert!(validate_amount(0).is_err());
        assert_eq!(validate_amount(10).unwrap(), 10);
    }

    #[test]
    fn record_requires_tier() {
        let result = DonationRecord::new(UserId::new(1), 5, "  ", None);
        assert!(matches!(result, Err(DonationError::InvalidTier(_))));
    }

    #[test]
    fn blank_payment_id_is_dropped() {
        let record = DonationRecord::new(UserId::new(1), 5, "Starter", Some(String::new())).unwrap();
        assert!(record.payment_id.is_none());
    }
}
