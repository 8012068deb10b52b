//! Identifier types for tipjar.
//!
//! `UserId` wraps the messaging platform's numeric user id. `DonationId` is a
//! ULID so ledger entries sort chronologically by key.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::{Mutex, OnceLock};
use ulid::{Generator, Ulid};

/// Process-wide generator so ids minted in the same millisecond still
/// increase.
static ID_GENERATOR: OnceLock<Mutex<Generator>> = OnceLock::new();

/// A donor identifier, as assigned by the messaging platform.
///
/// Platform ids are opaque signed 64-bit integers; they serialize as plain
/// JSON numbers.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Create a user id from the platform's integer id.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Return the raw integer id.
    #[must_use]
    pub const fn get(&self) -> i64 {
        self.0
    }

    /// Encode as 8 big-endian bytes that sort in the same order as the id.
    ///
    /// The sign bit is flipped so negative ids sort before positive ones.
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub const fn to_sortable_bytes(&self) -> [u8; 8] {
        ((self.0 as u64) ^ (1 << 63)).to_be_bytes()
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl FromStr for UserId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| IdError::InvalidUserId)
    }
}

impl fmt::Debug for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserId({})", self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A ledger entry identifier using ULID for time-ordering.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DonationId(Ulid);

impl DonationId {
    /// Generate a new `DonationId` with the current timestamp.
    ///
    /// Ids from one process are strictly increasing.
    #[must_use]
    pub fn generate() -> Self {
        let next = ID_GENERATOR
            .get_or_init(|| Mutex::new(Generator::new()))
            .lock()
            .ok()
            .and_then(|mut generator| generator.generate().ok());
        Self(next.unwrap_or_else(Ulid::new))
    }

    /// Creation time encoded in the id, at millisecond precision.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        DateTime::from(self.0.datetime())
    }

    /// Return the bytes of the ULID (16 bytes).
    #[must_use]
    pub fn to_bytes(&self) -> [u8; 16] {
        self.0.to_bytes()
    }

    /// Create a `DonationId` from bytes.
    #[must_use]
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(Ulid::from_bytes(bytes))
    }
}

impl FromStr for DonationId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ulid = Ulid::from_string(s).map_err(|_| IdError::InvalidUlid)?;
        Ok(Self(ulid))
    }
}

impl fmt::Debug for DonationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DonationId({})", self.0)
    }
}

impl fmt::Display for DonationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for DonationId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DonationId> for String {
    fn from(id: DonationId) -> Self {
        id.0.to_string()
    }
}

/// Errors that can occur when parsing identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    /// The input is not a valid integer user id.
    #[error("invalid user id")]
    InvalidUserId,

    /// The input is not a valid ULID.
    #[error("invalid ULID format")]
    InvalidUlid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn donation_ids_increase() {
        let ids: Vec<DonationId> = (0..100).map(|_| DonationId::generate()).collect();
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn created_at_follows_id_order() {
        let first = DonationId::generate();
        let second = DonationId::generate();
        assert!(first.created_at() <= second.created_at());
    }

    #[test]
    fn user_id_parses_and_displays() {
        let id: UserId = "7099729191".parse().unwrap();
        assert_eq!(id.get(), 7_099_729_191);
        assert_eq!(id.to_string(), "7099729191");
        assert!("ann".parse::<UserId>().is_err());
    }

    #[test]
    fn user_id_serializes_as_number() {
        let json = serde_json::to_string(&UserId::new(42)).unwrap();
        assert_eq!(json, "42");
    }

    #[test]
    fn sortable_bytes_preserve_order() {
        let ids = [i64::MIN, -100, -1, 0, 1, 42, i64::MAX];
        let encoded: Vec<_> = ids
            .iter()
            .map(|id| UserId::new(*id).to_sortable_bytes())
            .collect();
        let mut sorted = encoded.clone();
        sorted.sort_unstable();
        assert_eq!(encoded, sorted);
    }

    #[test]
    fn donation_id_string_form() {
        let id = DonationId::generate();
        let parsed: DonationId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
        assert_eq!(DonationId::from_bytes(id.to_bytes()), id);
    }
}
