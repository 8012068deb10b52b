//! Application state.

use std::sync::Arc;

use tipjar_store::{Ledger, Store};

use crate::config::ServiceConfig;
use crate::session::SessionRegistry;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The donation ledger.
    pub ledger: Ledger,

    /// Service configuration.
    pub config: ServiceConfig,

    /// Custom amount sessions.
    pub sessions: Arc<SessionRegistry>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(store: Arc<dyn Store>, config: ServiceConfig) -> Self {
        if config.service_api_key.is_none() {
            tracing::warn!("SERVICE_API_KEY not configured - all /v1 requests will be rejected");
        }

        Self {
            ledger: Ledger::new(store),
            config,
            sessions: Arc::new(SessionRegistry::new()),
        }
    }
}
