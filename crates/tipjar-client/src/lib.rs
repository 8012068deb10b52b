//! Tipjar Client SDK.
//!
//! This crate provides the client library the donation bot front-end uses to
//! talk to the tipjar service.
//!
//! # Example
//!
//! ```no_run
//! use tipjar_client::{RecordDonationRequest, TipjarClient};
//! use tipjar_core::UserId;
//!
//! # async fn example() -> Result<(), tipjar_client::ClientError> {
//! let client = TipjarClient::new("http://tipjar:8080", "your-service-api-key")?;
//!
//! let response = client
//!     .record_donation(&RecordDonationRequest {
//!         user_id: UserId::new(7_099_729_191),
//!         first_name: "Ann".to_string(),
//!         username: Some("ann".to_string()),
//!         amount: 25,
//!         tier: None,
//!         payment_id: None,
//!     })
//!     .await?;
//!
//! if let Some(account) = response.account {
//!     println!("Total donated: {} Stars", account.total_donated);
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod client;
mod error;
mod types;

pub use client::{ClientOptions, TipjarClient};
pub use error::ClientError;
pub use types::*;
