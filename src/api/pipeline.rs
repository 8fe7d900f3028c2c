//! Request pipeline shared by every endpoint
//!
//! A handler supplies its [`Endpoint`] descriptor and an async body; the
//! pipeline times it, converts the outcome into an [`ApiResponse`] with the
//! route's CORS headers, and logs the result.

use crate::api::error::ApiError;
use crate::api::response::{ApiResponse, CorsHeaders, ResponseBuilder};
use crate::api::state::AppState;
use crate::{log_error_with_context, log_request_complete};
use axum::http::{Method, StatusCode};
use serde::Serialize;
use std::future::Future;
use std::time::Instant;

/// Static description of one route
#[derive(Debug)]
pub struct Endpoint {
    /// Name used in logs, e.g. `patient.create`
    pub name: &'static str,
    /// Methods the route's path accepts, excluding `OPTIONS`
    pub methods: &'static [Method],
}

impl Endpoint {
    pub fn cors(&self, origin: &str) -> CorsHeaders {
        CorsHeaders::new(origin, self.methods)
    }
}

/// Run `body` and render its outcome
pub async fn run<T, F>(
    endpoint: &Endpoint,
    state: &AppState,
    success: StatusCode,
    body: F,
) -> ApiResponse
where
    T: Serialize,
    F: Future<Output = Result<T, ApiError>>,
{
    let started = Instant::now();
    let cors = endpoint.cors(state.cors_origin());

    let response = match body.await {
        Ok(payload) => ResponseBuilder::new(success).cors(&cors).json(&payload),
        Err(error) => {
            if error.is_server_error() {
                log_error_with_context!(&error, endpoint.name);
            } else {
                tracing::debug!(endpoint = endpoint.name, error = %error, "Request rejected");
            }
            error.into_api_response(&cors)
        }
    };

    log_request_complete!(endpoint.name, response.status_code(), started.elapsed());
    response
}

/// Answer an `OPTIONS` preflight
pub fn preflight(endpoint: &Endpoint, state: &AppState) -> ApiResponse {
    ResponseBuilder::new(StatusCode::NO_CONTENT)
        .cors(&endpoint.cors(state.cors_origin()))
        .empty()
}

/// Answer a method outside the route's whitelist
pub fn method_not_allowed(endpoint: &Endpoint, state: &AppState) -> ApiResponse {
    tracing::debug!(endpoint = endpoint.name, "Method not allowed");
    ApiError::MethodNotAllowed.into_api_response(&endpoint.cors(state.cors_origin()))
}
