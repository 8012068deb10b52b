//! Leaderboard ordering and ranking.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::UserAccount;

/// Number of leaderboard entries returned when no limit is given.
pub const DEFAULT_LEADERBOARD_LIMIT: usize = 10;

/// Leaderboard sort order: `total_donated` descending, then `user_id`
/// ascending so equal totals always come back in the same order.
#[must_use]
pub fn leaderboard_order(a: &UserAccount, b: &UserAccount) -> Ordering {
    b.total_donated
        .cmp(&a.total_donated)
        .then_with(|| a.user_id.cmp(&b.user_id))
}

/// Rank decoration shown next to a leaderboard entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankMarker {
    /// First place.
    Gold,
    /// Second place.
    Silver,
    /// Third place.
    Bronze,
    /// Fourth place and below.
    Ordinal(usize),
}

impl RankMarker {
    /// Marker for a 1-based rank.
    #[must_use]
    pub const fn for_rank(rank: usize) -> Self {
        match rank {
            1 => Self::Gold,
            2 => Self::Silver,
            3 => Self::Bronze,
            n => Self::Ordinal(n),
        }
    }
}

impl fmt::Display for RankMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gold => f.write_str("🥇"),
            Self::Silver => f.write_str("🥈"),
            Self::Bronze => f.write_str("🥉"),
            Self::Ordinal(n) => write!(f, "{n}."),
        }
    }
}

/// One display row of the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardRow {
    /// 1-based rank.
    pub rank: usize,
    /// Rank decoration.
    pub marker: RankMarker,
    /// The ranked account.
    pub account: UserAccount,
}

impl fmt::Display for LeaderboardRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} - {} Stars",
            self.marker,
            self.account.display_name(),
            self.account.total_donated
        )
    }
}

/// Pair each account with its rank, keeping the input order.
///
/// The input must already be in leaderboard order.
#[must_use]
pub fn format_leaderboard(entries: Vec<UserAccount>) -> Vec<LeaderboardRow> {
    entries
        .into_iter()
        .enumerate()
        .map(|(index, account)| LeaderboardRow {
            rank: index + 1,
            marker: RankMarker::for_rank(index + 1),
            account,
        })
        .collect()
}
