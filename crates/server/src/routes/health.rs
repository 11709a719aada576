//! Health check endpoints.

use axum::{extract::State, http::StatusCode};

use crate::state::AppState;
use crate::storage::Storage;

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the storage backend does not answer.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.storage().ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, backend = state.storage().backend_name(), "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
