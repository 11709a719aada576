//! Integration tests for the Goodwill Global Exports catalog API.
//!
//! # Running Tests
//!
//! ```bash
//! # In-process API tests (in-memory storage, no network)
//! cargo test -p goodwill-integration-tests
//!
//! # Postgres-backed and live-server tests
//! TEST_DATABASE_URL=postgres://... SERVER_BASE_URL=http://localhost:5000 \
//!     cargo test -p goodwill-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `api_*` - Router driven with `tower::ServiceExt::oneshot`
//! - `postgres_storage` - `PgStorage` against a real database (ignored)
//! - `live_server` - HTTP against a running server via reqwest (ignored)

use std::collections::HashMap;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Method, Request, StatusCode},
};
use serde_json::Value;
use tower::ServiceExt;

use goodwill_server::config::ServerConfig;
use goodwill_server::routes;
use goodwill_server::seed::seed_if_empty;
use goodwill_server::services::Notifier;
use goodwill_server::state::AppState;
use goodwill_server::storage::{AnyStorage, MemStorage};

/// A decoded response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// JSON body, or `Value::Null` when the body is empty or not JSON.
    pub body: Value,
}

/// In-process application backed by a fresh in-memory store.
#[derive(Clone)]
pub struct TestApp {
    router: Router,
    state: AppState,
}

impl TestApp {
    /// Empty store, email disabled, form rate limiting off.
    #[must_use]
    pub fn new() -> Self {
        Self::with_env(&[("FORMS_RATE_LIMIT", "false")])
    }

    /// Build from explicit environment variables.
    ///
    /// # Panics
    ///
    /// Panics if the variables do not form a valid configuration.
    #[must_use]
    pub fn with_env(vars: &[(&str, &str)]) -> Self {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        let config = ServerConfig::from_lookup(|key| map.get(key).cloned())
            .unwrap_or_else(|e| panic!("invalid test configuration: {e}"));

        let storage = AnyStorage::Memory(MemStorage::new());
        let state = AppState::with_notifier(config, storage, Notifier::disabled());
        Self {
            router: routes::app(state.clone()),
            state,
        }
    }

    /// Same as [`TestApp::new`], with the sample content loaded.
    ///
    /// # Panics
    ///
    /// Panics if seeding fails.
    pub async fn seeded() -> Self {
        let app = Self::new();
        seed_if_empty(app.state.storage())
            .await
            .unwrap_or_else(|e| panic!("seeding failed: {e}"));
        app
    }

    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Send a request with optional JSON body and extra headers.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the router fails.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<&Value>,
        headers: &[(&str, &str)],
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let request = builder
            .body(body)
            .unwrap_or_else(|e| panic!("invalid request: {e}"));

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .unwrap_or_else(|e| match e {});

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap_or_else(|e| panic!("unreadable body: {e}"));
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, None, &[]).await
    }

    pub async fn post(&self, uri: &str, body: &Value) -> TestResponse {
        self.request(Method::POST, uri, Some(body), &[]).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.request(Method::DELETE, uri, None, &[]).await
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Base URL of a running server for live tests.
#[must_use]
pub fn server_base_url() -> String {
    std::env::var("SERVER_BASE_URL").unwrap_or_else(|_| "http://localhost:5000".to_string())
}
