//! User statistics and leaderboard handlers.

use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use tipjar_core::{format_leaderboard, LeaderboardRow, UserAccount};

use crate::auth::ServiceAuth;
use crate::error::ApiError;
use crate::handlers::parse_user_id;
use crate::state::AppState;

/// Per-user stats response.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    /// The aggregate.
    #[serde(flatten)]
    pub account: UserAccount,
    /// Name to show in the profile.
    pub display_name: String,
}

/// Get a donor's stats; 404 if they never donated.
pub async fn get_user_stats(
    State(state): State<Arc<AppState>>,
    _auth: ServiceAuth,
    Path(user_id): Path<String>,
) -> Result<Json<StatsResponse>, ApiError> {
    let user_id = parse_user_id(&user_id)?;

    let account = state
        .ledger
        .get_user_stats(user_id)?
        .ok_or_else(|| ApiError::NotFound(format!("No donations from user {user_id}")))?;

    Ok(Json(StatsResponse {
        display_name: account.display_name(),
        account,
    }))
}

/// Leaderboard query parameters.
#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    /// Number of entries.
    pub limit: Option<usize>,
}

/// One rendered leaderboard row.
#[derive(Debug, Serialize)]
pub struct LeaderboardEntry {
    /// Rank, account and marker.
    #[serde(flatten)]
    pub row: LeaderboardRow,
    /// Ready-to-send text line.
    pub text: String,
}

/// Leaderboard response.
#[derive(Debug, Serialize)]
pub struct LeaderboardResponse {
    /// Ranked rows, best first. Empty when nobody has donated.
    pub entries: Vec<LeaderboardEntry>,
}

/// Get the top donors.
pub async fn get_leaderboard(
    State(state): State<Arc<AppState>>,
    _auth: ServiceAuth,
    query: Result<Query<LeaderboardQuery>, QueryRejection>,
) -> Result<Json<LeaderboardResponse>, ApiError> {
    let Query(query) = query?;
    let limit = state.config.clamp_limit(query.limit);
    let accounts = state.ledger.get_leaderboard(limit)?;

    let entries = format_leaderboard(accounts)
        .into_iter()
        .map(|row| LeaderboardEntry {
            text: row.to_string(),
            row,
        })
        .collect();

    Ok(Json(LeaderboardResponse { entries }))
}
