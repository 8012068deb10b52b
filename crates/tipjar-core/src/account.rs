//! Per-user donation aggregate.
//!
//! A `UserAccount` is derived from the ledger: it is created on a user's first
//! donation and folded forward on every later one. It is never deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{DonationId, DonationRecord, Donor, UserId};

/// Aggregated donation statistics for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    /// The user ID (primary key).
    pub user_id: UserId,

    /// Latest known first name.
    pub first_name: String,

    /// Latest known username.
    pub username: Option<String>,

    /// Sum of all ledger amounts for this user.
    pub total_donated: u64,

    /// Number of ledger entries for this user.
    pub donation_count: u64,

    /// Tier of the most recent donation.
    pub last_tier_donated: String,

    /// Timestamp of the most recent donation.
    pub last_donated_timestamp: DateTime<Utc>,

    /// Id of the most recent donation.
    pub last_donation_id: DonationId,

    /// Timestamp of the first donation.
    pub first_donated_at: DateTime<Utc>,
}

impl UserAccount {
    /// Build the aggregate contribution of a single ledger entry.
    ///
    /// This is both the initial account of a first-time donor and the delta
    /// that [`UserAccount::absorb`] folds into an existing account.
    #[must_use]
    pub fn from_donation(donor: &Donor, record: &DonationRecord) -> Self {
        Self {
            user_id: record.user_id,
            first_name: donor.first_name.clone(),
            username: donor.username.clone(),
            total_donated: record.amount,
            donation_count: 1,
            last_tier_donated: record.tier.clone(),
            last_donated_timestamp: record.timestamp,
            last_donation_id: record.id,
            first_donated_at: record.timestamp,
        }
    }

    /// Fold another contribution into this account.
    ///
    /// Totals add up and `first_donated_at` keeps the earlier value. Display
    /// names and the "last" fields come from whichever side holds the most
    /// recent donation, by timestamp and then by id, regardless of the order
    /// the writes landed in. The fold is associative and commutative, which
    /// lets storage engines combine deltas in any grouping.
    pub fn absorb(&mut self, other: Self) {
        self.total_donated = self.total_donated.saturating_add(other.total_donated);
        self.donation_count = self.donation_count.saturating_add(other.donation_count);
        self.first_donated_at = self.first_donated_at.min(other.first_donated_at);

        if other.recency() > self.recency() {
            self.first_name = other.first_name;
            self.username = other.username;
            self.last_tier_donated = other.last_tier_donated;
            self.last_donated_timestamp = other.last_donated_timestamp;
            self.last_donation_id = other.last_donation_id;
        }
    }

    fn recency(&self) -> (DateTime<Utc>, DonationId) {
        (self.last_donated_timestamp, self.last_donation_id)
    }

    /// Best display name: `@username` when known, else the first name.
    #[must_use]
    pub fn display_name(&self) -> String {
        match &self.username {
            Some(username) if !username.is_empty() => format!("@{username}"),
            _ => self.first_name.clone(),
        }
    }
}
