//! Key encoding utilities for `RocksDB`.
//!
//! This module provides functions for encoding and decoding keys used in column families.

use tipjar_core::{DonationId, UserId};

/// Create an account key from a user ID.
#[must_use]
pub fn account_key(user_id: &UserId) -> Vec<u8> {
    user_id.to_sortable_bytes().to_vec()
}

/// Create a donation key from a donation ID.
#[must_use]
pub fn donation_key(donation_id: &DonationId) -> Vec<u8> {
    donation_id.to_bytes().to_vec()
}

/// Create a user-donation index key.
///
/// Format: `user_id (8 bytes) || donation_id (16 bytes)`
///
/// Since ULIDs are time-ordered, donations for a user will be sorted by time.
#[must_use]
pub fn user_donation_key(user_id: &UserId, donation_id: &DonationId) -> Vec<u8> {
    let mut key = Vec::with_capacity(24);
    key.extend_from_slice(&user_id.to_sortable_bytes());
    key.extend_from_slice(&donation_id.to_bytes());
    key
}

/// Create a prefix for iterating all donations for a user.
#[must_use]
pub fn user_donations_prefix(user_id: &UserId) -> Vec<u8> {
    user_id.to_sortable_bytes().to_vec()
}

/// Extract the donation ID from a user-donation index key.
///
/// Returns `None` if the key is not exactly 24 bytes.
#[must_use]
pub fn extract_donation_id_from_user_key(key: &[u8]) -> Option<DonationId> {
    let bytes: [u8; 16] = key.get(8..24)?.try_into().ok()?;
    (key.len() == 24).then(|| DonationId::from_bytes(bytes))
}

/// Create a payment key from a payment charge id.
#[must_use]
pub fn payment_key(payment_id: &str) -> Vec<u8> {
    payment_id.as_bytes().to_vec()
}
