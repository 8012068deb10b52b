//! Donation ledger storage for tipjar.
//!
//! This crate provides durable storage for donation records and per-user
//! aggregates, plus the [`Ledger`] facade that validates donations before they
//! reach storage.
//!
//! # Architecture
//!
//! The `RocksDB` backend uses the following column families:
//!
//! - `accounts`: Per-user aggregates, keyed by `user_id`, updated by merge operands
//! - `donations`: Append-only ledger entries, keyed by `donation_id` (ULID)
//! - `donations_by_user`: Index for listing a user's donations
//! - `payments`: Recorded payment ids for idempotency
//!
//! A donation is written as a single `WriteBatch`, so the ledger entry and the
//! account update land together or not at all.
//!
//! # Example
//!
//! ```no_run
//! # #[cfg(feature = "rocksdb-backend")]
//! # fn main() {
//! use std::sync::Arc;
//! use tipjar_core::UserId;
//! use tipjar_store::{Ledger, NewDonation, RocksStore};
//!
//! let store = RocksStore::open("/tmp/tipjar-db").unwrap();
//! let ledger = Ledger::new(Arc::new(store));
//!
//! ledger
//!     .record_donation(NewDonation::new(UserId::new(42), "Ann", Some("ann1".into()), 10, "Warrior"))
//!     .unwrap();
//!
//! let stats = ledger.get_user_stats(UserId::new(42)).unwrap();
//! # }
//! # #[cfg(not(feature = "rocksdb-backend"))]
//! # fn main() {}
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod keys;
pub mod ledger;
pub mod memory;
#[cfg(feature = "rocksdb-backend")]
pub mod rocks;
pub mod schema;

pub use error::{Result, StoreError};
pub use ledger::{Ledger, NewDonation, RecordedDonation};
pub use memory::MemoryStore;
#[cfg(feature = "rocksdb-backend")]
pub use rocks::RocksStore;

use tipjar_core::{DonationId, DonationRecord, Donor, UserAccount, UserId};

/// The storage trait defining all database operations.
///
/// This trait abstracts the storage layer, allowing for different implementations
/// (e.g., `RocksDB`, in-memory for testing). Implementations never retry; a
/// failure is surfaced as `StoreError::Unavailable`.
pub trait Store: Send + Sync {
    // =========================================================================
    // Write Operations
    // =========================================================================

    /// Append a ledger entry and fold it into the donor's account atomically.
    ///
    /// Concurrent calls for the same user must not lose increments.
    ///
    /// # Errors
    ///
    /// - `StoreError::DuplicatePayment` if the record's payment id was already recorded.
    /// - `StoreError::Unavailable` if the database operation fails.
    fn record_donation(&self, donor: &Donor, record: &DonationRecord) -> Result<()>;

    // =========================================================================
    // Account Operations
    // =========================================================================

    /// Get a user's aggregate, or `None` if they never donated.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_account(&self, user_id: &UserId) -> Result<Option<UserAccount>>;

    /// Up to `limit` accounts in leaderboard order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn top_accounts(&self, limit: usize) -> Result<Vec<UserAccount>>;

    // =========================================================================
    // Ledger Operations
    // =========================================================================

    /// Get a ledger entry by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_donation(&self, donation_id: &DonationId) -> Result<Option<DonationRecord>>;

    /// List ledger entries for a user, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_donations_by_user(
        &self,
        user_id: &UserId,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<DonationRecord>>;

    /// Check if a payment id has already been recorded.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn has_payment(&self, payment_id: &str) -> Result<bool>;
}
