//! Tipjar HTTP API Service.
//!
//! This crate provides the HTTP API the donation bot front-end talks to:
//!
//! - Donation recording and per-user statistics
//! - Ranked leaderboard
//! - Payment events (pre-checkout validation, successful payment)
//! - Menu callbacks and the custom amount conversation
//!
//! # Authentication
//!
//! Every `/v1` route requires the service API key in the `X-API-Key` header.
//! The front-end is the only intended caller.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are noisy for Axum handler functions
#![allow(clippy::missing_errors_doc)] // Axum handlers all return Result
#![allow(clippy::unused_async)] // Handlers are async for a uniform router signature

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod session;
pub mod state;

pub use config::{ConfigError, ServiceConfig};
pub use error::ApiError;
pub use routes::create_router;
pub use session::SessionRegistry;
pub use state::AppState;
