//! Route table
//!
//! Each path gets its handlers plus an `OPTIONS` preflight and a 405 fallback
//! built from the same [`Endpoint`] descriptor, so every answer carries the
//! route's CORS headers.

use crate::api::error::ApiError;
use crate::api::handlers::{affiliation, health, patient, surgical_history};
use crate::api::pipeline::{self, Endpoint};
use crate::api::response::{ApiResponse, CorsHeaders};
use crate::api::state::AppState;
use crate::domain::messages;
use axum::extract::State;
use axum::http::Method;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, MethodRouter};
use axum::Router;
use std::any::Any;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

static ALL_METHODS: &[Method] = &[Method::GET, Method::POST];

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    let panic_origin = state.cors_origin().to_string();

    Router::new()
        .route("/health", with_cors(&health::HEALTH, get(health::health)))
        .route(
            "/patient",
            with_cors(&patient::CREATE, post(patient::create_patient)),
        )
        .route(
            "/patient/search",
            with_cors(&patient::SEARCH, post(patient::search_patients)),
        )
        .route(
            "/patient/:id",
            with_cors(&patient::DETAIL, get(patient::get_patient)),
        )
        .route(
            "/check-cui/:cui",
            with_cors(&patient::CHECK_CUI, get(patient::check_cui)),
        )
        .route(
            "/patient/surgical-history/:id",
            with_cors(
                &surgical_history::LIST,
                get(surgical_history::get_surgical_history)
                    .post(surgical_history::add_surgical_events),
            ),
        )
        .route(
            "/patient/student/:id",
            with_cors(&affiliation::STUDENT, get(affiliation::get_student_info)),
        )
        .route(
            "/patient/collaborator/:id",
            with_cors(
                &affiliation::COLLABORATOR,
                get(affiliation::get_collaborator_info),
            ),
        )
        .fallback(route_not_found)
        .layer(CatchPanicLayer::custom(move |panic| {
            panic_response(&panic_origin, panic)
        }))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Add the preflight and 405 answers for `endpoint`
fn with_cors(
    endpoint: &'static Endpoint,
    router: MethodRouter<AppState>,
) -> MethodRouter<AppState> {
    router
        .options(move |State(state): State<AppState>| async move {
            pipeline::preflight(endpoint, &state)
        })
        .fallback(move |State(state): State<AppState>| async move {
            pipeline::method_not_allowed(endpoint, &state)
        })
}

async fn route_not_found(State(state): State<AppState>) -> ApiResponse {
    tracing::debug!("No route matched");
    ApiError::NotFound(messages::ROUTE_NOT_FOUND.to_string())
        .into_api_response(&CorsHeaders::new(state.cors_origin(), ALL_METHODS))
}

fn panic_response(origin: &str, panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };

    tracing::error!(error = %detail, "Handler panicked");
    ApiError::Internal(detail)
        .into_api_response(&CorsHeaders::new(origin, ALL_METHODS))
        .into_response()
}
