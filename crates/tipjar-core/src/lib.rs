//! Core types and utilities for tipjar.
//!
//! This crate provides the foundational types shared by the ledger store, the
//! HTTP service and the client SDK:
//!
//! - **Identifiers**: `UserId`, `DonationId`
//! - **Ledger**: `DonationRecord`, `Donor`, `UserAccount`
//! - **Tiers**: `TierTable`, `Tier`, `classify_tier`
//! - **Leaderboard**: `LeaderboardRow`, `RankMarker`, `format_leaderboard`
//! - **Front-end glue**: `StarsInvoice`, `CallbackAction`, `MenuButton`, `SessionState`
//!
//! # Stars Unit
//!
//! Amounts are counted in Telegram Stars (currency code `XTR`), the smallest
//! indivisible unit of the in-platform currency. They are stored as `u64`; a
//! recorded amount is always greater than zero.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod account;
pub mod donation;
pub mod error;
pub mod ids;
pub mod invoice;
pub mod leaderboard;
pub mod menu;
pub mod session;
pub mod tier;

pub use account::UserAccount;
pub use donation::{validate_amount, DonationRecord, Donor};
pub use error::{DonationError, Result};
pub use ids::{DonationId, IdError, UserId};
pub use invoice::{thank_you_message, InvoicePayload, LabeledPrice, StarsInvoice, STARS_CURRENCY};
pub use leaderboard::{
    format_leaderboard, leaderboard_order, LeaderboardRow, RankMarker, DEFAULT_LEADERBOARD_LIMIT,
};
pub use menu::{default_main_menu, stars_keyboard, ButtonAction, CallbackAction, MenuButton};
pub use session::{parse_custom_amount, SessionState};
pub use tier::{classify_tier, Tier, TierEntry, TierTable};
