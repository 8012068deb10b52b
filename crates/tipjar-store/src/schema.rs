//! Database schema definitions and column families.
//!
//! This module defines the column families used in `RocksDB` storage.

/// Column family names for the `RocksDB` database.
pub mod cf {
    /// Per-user aggregates, keyed by sortable `user_id`.
    ///
    /// Values are updated through the merge operator only.
    pub const ACCOUNTS: &str = "accounts";

    /// Ledger entries, keyed by `donation_id` (ULID).
    pub const DONATIONS: &str = "donations";

    /// Index: donations by user, keyed by `user_id || donation_id`.
    /// Value is empty (index only).
    pub const DONATIONS_BY_USER: &str = "donations_by_user";

    /// Payment ids already recorded, keyed by payment id.
    /// Value is the `donation_id` bytes.
    pub const PAYMENTS: &str = "payments";
}

/// Name of the associative merge operator on the accounts column family.
pub const ACCOUNT_MERGE_OPERATOR: &str = "tipjar.account_totals";

/// Returns all column family names for database initialization.
#[must_use]
pub fn all_column_families() -> Vec<&'static str> {
    vec![
        cf::ACCOUNTS,
        cf::DONATIONS,
        cf::DONATIONS_BY_USER,
        cf::PAYMENTS,
    ]
}
