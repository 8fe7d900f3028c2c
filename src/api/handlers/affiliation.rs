//! Student and collaborator data of a patient

use crate::api::error::ApiError;
use crate::api::handlers::{patient_id, PathSegment};
use crate::api::pipeline::{self, Endpoint};
use crate::api::response::ApiResponse;
use crate::api::state::AppState;
use crate::domain::{messages, CollaboratorInfo, StudentInfo};
use axum::extract::State;
use axum::http::{Method, StatusCode};

pub static STUDENT: Endpoint = Endpoint {
    name: "student.get",
    methods: &[Method::GET],
};

pub static COLLABORATOR: Endpoint = Endpoint {
    name: "collaborator.get",
    methods: &[Method::GET],
};

/// `GET /patient/student/{id}`
pub async fn get_student_info(
    State(state): State<AppState>,
    segment: PathSegment,
) -> ApiResponse {
    pipeline::run(&STUDENT, &state, StatusCode::OK, student(&state, segment)).await
}

async fn student(state: &AppState, segment: PathSegment) -> Result<StudentInfo, ApiError> {
    let not_found = || ApiError::NotFound(messages::STUDENT_NOT_FOUND.to_string());
    let id = patient_id(segment).ok_or_else(not_found)?;
    state.store().student_info(id).await?.ok_or_else(not_found)
}

/// `GET /patient/collaborator/{id}`
pub async fn get_collaborator_info(
    State(state): State<AppState>,
    segment: PathSegment,
) -> ApiResponse {
    pipeline::run(
        &COLLABORATOR,
        &state,
        StatusCode::OK,
        collaborator(&state, segment),
    )
    .await
}

async fn collaborator(state: &AppState, segment: PathSegment) -> Result<CollaboratorInfo, ApiError> {
    let not_found = || ApiError::NotFound(messages::COLLABORATOR_NOT_FOUND.to_string());
    let id = patient_id(segment).ok_or_else(not_found)?;
    state
        .store()
        .collaborator_info(id)
        .await?
        .ok_or_else(not_found)
}
