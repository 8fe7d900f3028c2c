//! Liveness and database reachability

use crate::api::error::ApiError;
use crate::api::pipeline::{self, Endpoint};
use crate::api::response::ApiResponse;
use crate::api::state::AppState;
use crate::domain::messages;
use axum::extract::State;
use axum::http::{Method, StatusCode};
use serde::Serialize;

pub static HEALTH: Endpoint = Endpoint {
    name: "health",
    methods: &[Method::GET],
};

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub database: &'static str,
    pub backend: &'static str,
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> ApiResponse {
    pipeline::run(&HEALTH, &state, StatusCode::OK, check(&state)).await
}

async fn check(state: &AppState) -> Result<HealthStatus, ApiError> {
    let store = state.store();
    if let Err(e) = store.test_connection().await {
        tracing::warn!(backend = store.backend_name(), error = %e, "Health check failed");
        return Err(ApiError::Unavailable(messages::DATABASE_UNAVAILABLE.to_string()));
    }

    Ok(HealthStatus {
        status: "ok",
        database: "ok",
        backend: store.backend_name(),
    })
}
