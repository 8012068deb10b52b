//! Validating facade over a [`Store`].
//!
//! Callers hand in raw values from payment events; the ledger rejects invalid
//! amounts and tiers before anything reaches storage, stamps the entry, and
//! logs the outcome.

use std::sync::Arc;

use tipjar_core::{validate_amount, DonationId, DonationRecord, Donor, UserAccount, UserId};

use crate::error::Result;
use crate::Store;

/// A donation as reported by the front-end, before validation.
#[derive(Debug, Clone)]
pub struct NewDonation {
    /// Donor platform id.
    pub user_id: UserId,
    /// Donor first name.
    pub first_name: String,
    /// Donor username, if any.
    pub username: Option<String>,
    /// Amount in Stars; must be positive.
    pub amount: i64,
    /// Tier label; must be non-empty.
    pub tier: String,
    /// Platform payment charge id, for duplicate detection.
    pub payment_id: Option<String>,
}

impl NewDonation {
    /// Create a donation without a payment id.
    #[must_use]
    pub fn new(
        user_id: UserId,
        first_name: impl Into<String>,
        username: Option<String>,
        amount: i64,
        tier: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            first_name: first_name.into(),
            username,
            amount,
            tier: tier.into(),
            payment_id: None,
        }
    }

    /// Attach the platform payment charge id.
    #[must_use]
    pub fn with_payment_id(mut self, payment_id: impl Into<String>) -> Self {
        self.payment_id = Some(payment_id.into());
        self
    }
}

/// Outcome of a committed donation.
#[derive(Debug, Clone)]
pub struct RecordedDonation {
    /// The stored ledger entry.
    pub record: DonationRecord,
    /// The donor's aggregate read back after the write, or `None` if that read
    /// failed. The donation is recorded either way.
    pub account: Option<UserAccount>,
}

/// Donation ledger: record donations, read stats and the leaderboard.
#[derive(Clone)]
pub struct Ledger {
    store: Arc<dyn Store>,
}

impl Ledger {
    /// Wrap a storage backend.
    #[must_use]
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Validate and record one donation.
    ///
    /// Returns the stored ledger entry with the donor's updated aggregate. On
    /// success a following [`Ledger::get_user_stats`] reflects the new total.
    /// Once the write has committed this never returns an error; a failed
    /// read-back only leaves `account` empty.
    ///
    /// # Errors
    ///
    /// - `StoreError::InvalidDonation` for a non-positive amount or blank tier;
    ///   storage is not touched.
    /// - `StoreError::DuplicatePayment` if the payment id was already recorded.
    /// - `StoreError::Unavailable` if storage fails; the donation must be
    ///   assumed unrecorded.
    pub fn record_donation(&self, donation: NewDonation) -> Result<RecordedDonation> {
        let amount = validate_amount(donation.amount)?;
        let record = DonationRecord::new(
            donation.user_id,
            amount,
            donation.tier,
            donation.payment_id,
        )?;
        let donor = Donor::new(donation.user_id, donation.first_name, donation.username);

        if let Err(e) = self.store.record_donation(&donor, &record) {
            tracing::warn!(
                user_id = %record.user_id,
                amount = record.amount,
                payment_id = ?record.payment_id,
                error = %e,
                "Donation not recorded"
            );
            return Err(e);
        }

        tracing::info!(
            user_id = %record.user_id,
            donation_id = %record.id,
            amount = record.amount,
            tier = %record.tier,
            "Donation recorded"
        );

        let account = match self.store.get_account(&record.user_id) {
            Ok(account) => account,
            Err(e) => {
                tracing::warn!(
                    user_id = %record.user_id,
                    donation_id = %record.id,
                    error = %e,
                    "Donation recorded but account read-back failed"
                );
                None
            }
        };

        Ok(RecordedDonation { record, account })
    }

    /// A user's aggregate, or `None` if they never donated.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub fn get_user_stats(&self, user_id: UserId) -> Result<Option<UserAccount>> {
        self.store.get_account(&user_id)
    }

    /// Up to `limit` accounts by `total_donated` descending, ties by
    /// `user_id` ascending. Empty when nobody has donated.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub fn get_leaderboard(&self, limit: usize) -> Result<Vec<UserAccount>> {
        self.store.top_accounts(limit)
    }

    /// A user's ledger entries, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub fn list_donations(
        &self,
        user_id: UserId,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<DonationRecord>> {
        self.store.list_donations_by_user(&user_id, limit, offset)
    }

    /// One ledger entry by id.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub fn get_donation(&self, donation_id: DonationId) -> Result<Option<DonationRecord>> {
        self.store.get_donation(&donation_id)
    }
}
