//! Donation tiers.
//!
//! A tier table is an ordered list of fixed donation amounts and their labels.
//! Classification is by exact amount only: an amount that is not a key of the
//! table is a custom donation, even when it falls between two tiers.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DonationError, Result};

/// One row of a tier table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierEntry {
    /// Exact donation amount in Stars.
    pub amount: u64,

    /// Human-readable tier label.
    pub label: String,
}

/// Ordered mapping from fixed donation amounts to tier labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TierEntry>", into = "Vec<TierEntry>")]
pub struct TierTable {
    entries: Vec<TierEntry>,
}

impl TierTable {
    /// Build a table, keeping the given order.
    ///
    /// # Errors
    ///
    /// Returns `DonationError::InvalidTierTable` for a zero amount, a repeated
    /// amount, or a blank label.
    pub fn new(entries: Vec<TierEntry>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if entry.amount == 0 {
                return Err(DonationError::InvalidTierTable(
                    "tier amount must be greater than zero".into(),
                ));
            }
            if !seen.insert(entry.amount) {
                return Err(DonationError::InvalidTierTable(format!(
                    "duplicate tier amount {}",
                    entry.amount
                )));
            }
            if entry.label.trim().is_empty() {
                return Err(DonationError::InvalidTierTable(format!(
                    "tier {} has an empty label",
                    entry.amount
                )));
            }
        }
        Ok(Self { entries })
    }

    /// Build a table from `(amount, label)` pairs.
    ///
    /// # Errors
    ///
    /// Same as [`TierTable::new`].
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (u64, &'a str)>) -> Result<Self> {
        Self::new(
            pairs
                .into_iter()
                .map(|(amount, label)| TierEntry {
                    amount,
                    label: label.to_string(),
                })
                .collect(),
        )
    }

    /// Entries in configured order.
    #[must_use]
    pub fn entries(&self) -> &[TierEntry] {
        &self.entries
    }

    /// Label for an exact amount, if the amount is a tier.
    #[must_use]
    pub fn label_for(&self, amount: u64) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.amount == amount)
            .map(|entry| entry.label.as_str())
    }

    /// Number of tiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no tiers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for TierTable {
    fn default() -> Self {
        let entries = [
            (5, "Starter"),
            (10, "Warrior"),
            (25, "Guardian"),
            (50, "Champion"),
            (100, "Mythic"),
            (200, "Legend"),
            (500, "Eternal"),
            (1000, "Supreme"),
        ]
        .into_iter()
        .map(|(amount, label)| TierEntry {
            amount,
            label: label.to_string(),
        })
        .collect();
        Self { entries }
    }
}

impl TryFrom<Vec<TierEntry>> for TierTable {
    type Error = DonationError;

    fn try_from(entries: Vec<TierEntry>) -> Result<Self> {
        Self::new(entries)
    }
}

impl From<TierTable> for Vec<TierEntry> {
    fn from(table: TierTable) -> Self {
        table.entries
    }
}

/// Result of classifying an amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Tier {
    /// The amount is a configured tier.
    Named {
        /// Tier label.
        label: String,
    },
    /// The amount matches no tier.
    Custom {
        /// The donated amount.
        amount: u64,
    },
}

impl Tier {
    /// Whether this is a custom donation.
    #[must_use]
    pub const fn is_custom(&self) -> bool {
        matches!(self, Self::Custom { .. })
    }

    /// The label stored on ledger entries and accounts.
    #[must_use]
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named { label } => f.write_str(label.trim()),
            Self::Custom { amount } => write!(f, "Custom ({amount})"),
        }
    }
}

/// Classify an amount against a tier table by exact match.
#[must_use]
pub fn classify_tier(amount: u64, table: &TierTable) -> Tier {
    table.label_for(amount).map_or(Tier::Custom { amount }, |label| Tier::Named {
        label: label.to_string(),
    })
}
