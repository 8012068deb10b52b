//! Common test utilities for tipjar integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::sync::Arc;

use axum::Router;
use axum_test::{TestResponse, TestServer};
use serde_json::json;

use tipjar_service::{create_router, AppState, ServiceConfig};
use tipjar_store::{MemoryStore, Store};

/// Test harness containing everything needed for integration tests.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
    /// The service API key the front-end presents.
    pub service_api_key: String,
}

impl TestHarness {
    /// Create a new test harness with an empty in-memory ledger.
    pub fn new() -> Self {
        Self::with_config(ServiceConfig::default())
    }

    /// Create a harness from a custom config; the API key is always set.
    pub fn with_config(config: ServiceConfig) -> Self {
        Self::with_store(Arc::new(MemoryStore::new()), config)
    }

    /// Create a harness over a caller-supplied store.
    pub fn with_store(store: Arc<dyn Store>, config: ServiceConfig) -> Self {
        let service_api_key = "test-service-key".to_string();

        let config = ServiceConfig {
            listen_addr: "127.0.0.1:0".into(),
            service_api_key: Some(service_api_key.clone()),
            ..config
        };

        let state = AppState::new(store, config);
        let router: Router = create_router(state);

        let server = TestServer::new(router).expect("Failed to create test server");

        Self {
            server,
            service_api_key,
        }
    }

    /// Record a donation through the API and return the response.
    pub async fn donate(&self, user_id: i64, first_name: &str, amount: i64) -> TestResponse {
        self.server
            .post("/v1/donations")
            .add_header("x-api-key", self.service_api_key.clone())
            .json(&json!({
                "user_id": user_id,
                "first_name": first_name,
                "amount": amount,
            }))
            .await
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
