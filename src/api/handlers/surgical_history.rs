//! Surgical history of a patient

use crate::api::error::ApiError;
use crate::api::handlers::{patient_id, PathSegment};
use crate::api::pipeline::{self, Endpoint};
use crate::api::response::ApiResponse;
use crate::api::state::AppState;
use crate::domain::{messages, SurgicalHistory, SurgicalHistoryDraft};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{Method, StatusCode};
use axum::Json;

pub static LIST: Endpoint = Endpoint {
    name: "surgical_history.get",
    methods: &[Method::GET, Method::POST],
};

pub static ADD: Endpoint = Endpoint {
    name: "surgical_history.add",
    methods: &[Method::GET, Method::POST],
};

/// `GET /patient/surgical-history/{id}`
///
/// Zero events, an unknown patient and a malformed id all answer 404.
pub async fn get_surgical_history(
    State(state): State<AppState>,
    segment: PathSegment,
) -> ApiResponse {
    pipeline::run(&LIST, &state, StatusCode::OK, list(&state, segment)).await
}

async fn list(state: &AppState, segment: PathSegment) -> Result<SurgicalHistory, ApiError> {
    let not_found = || ApiError::NotFound(messages::SURGICAL_HISTORY_NOT_FOUND.to_string());
    let patient_id = patient_id(segment).ok_or_else(not_found)?;

    let events = state.store().surgical_history(patient_id).await?;
    if events.is_empty() {
        return Err(not_found());
    }

    Ok(SurgicalHistory {
        patient_id,
        surgical_event_data: events,
    })
}

/// `POST /patient/surgical-history/{id}`
///
/// Stores every event or none; answers with the created rows.
pub async fn add_surgical_events(
    State(state): State<AppState>,
    segment: PathSegment,
    body: Result<Json<SurgicalHistoryDraft>, JsonRejection>,
) -> ApiResponse {
    pipeline::run(&ADD, &state, StatusCode::CREATED, add(&state, segment, body)).await
}

async fn add(
    state: &AppState,
    segment: PathSegment,
    body: Result<Json<SurgicalHistoryDraft>, JsonRejection>,
) -> Result<SurgicalHistory, ApiError> {
    let patient_id = patient_id(segment)
        .ok_or_else(|| ApiError::NotFound(messages::PATIENT_NOT_FOUND.to_string()))?;
    let Json(draft) = body?;
    let events = draft.validate()?;

    let created = state
        .store()
        .insert_surgical_events(patient_id, &events)
        .await?;

    tracing::info!(
        patient_id = %patient_id,
        count = created.len(),
        "Surgical events recorded"
    );
    Ok(SurgicalHistory {
        patient_id,
        surgical_event_data: created,
    })
}
