//! Patient registration, lookup, search and CUI check

use crate::api::error::ApiError;
use crate::api::handlers::{patient_id, PathSegment};
use crate::api::pipeline::{self, Endpoint};
use crate::api::response::ApiResponse;
use crate::api::state::AppState;
use crate::domain::{
    messages, Cui, Patient, PatientDraft, PatientId, PatientSummary, SearchDraft,
};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{Method, StatusCode};
use axum::Json;
use serde::Serialize;

pub static CREATE: Endpoint = Endpoint {
    name: "patient.create",
    methods: &[Method::POST],
};

pub static DETAIL: Endpoint = Endpoint {
    name: "patient.get",
    methods: &[Method::GET],
};

pub static SEARCH: Endpoint = Endpoint {
    name: "patient.search",
    methods: &[Method::POST],
};

pub static CHECK_CUI: Endpoint = Endpoint {
    name: "patient.check_cui",
    methods: &[Method::GET],
};

/// Body of a successful registration
#[derive(Debug, Serialize)]
pub struct PatientCreated {
    pub id: PatientId,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct CuiCheck {
    pub cui: String,
    pub exists: bool,
}

/// `POST /patient`
pub async fn create_patient(
    State(state): State<AppState>,
    body: Result<Json<PatientDraft>, JsonRejection>,
) -> ApiResponse {
    pipeline::run(&CREATE, &state, StatusCode::CREATED, create(&state, body)).await
}

async fn create(
    state: &AppState,
    body: Result<Json<PatientDraft>, JsonRejection>,
) -> Result<PatientCreated, ApiError> {
    let Json(draft) = body?;
    let patient = draft.validate()?;
    let id = state.store().insert_patient(&patient).await?;

    tracing::info!(patient_id = %id, "Patient registered");
    Ok(PatientCreated {
        id,
        message: messages::PATIENT_CREATED,
    })
}

/// `GET /patient/{id}`
pub async fn get_patient(State(state): State<AppState>, segment: PathSegment) -> ApiResponse {
    pipeline::run(&DETAIL, &state, StatusCode::OK, detail(&state, segment)).await
}

async fn detail(state: &AppState, segment: PathSegment) -> Result<Patient, ApiError> {
    let not_found = || ApiError::NotFound(messages::PATIENT_NOT_FOUND.to_string());
    let id = patient_id(segment).ok_or_else(not_found)?;
    state.store().find_patient(id).await?.ok_or_else(not_found)
}

/// `POST /patient/search`
pub async fn search_patients(
    State(state): State<AppState>,
    body: Result<Json<SearchDraft>, JsonRejection>,
) -> ApiResponse {
    pipeline::run(&SEARCH, &state, StatusCode::OK, search(&state, body)).await
}

async fn search(
    state: &AppState,
    body: Result<Json<SearchDraft>, JsonRejection>,
) -> Result<Vec<PatientSummary>, ApiError> {
    let Json(draft) = body?;
    let query = draft.validate()?;
    let results = state.store().search_patients(&query).await?;

    tracing::debug!(
        search_type = %query.search_type,
        count = results.len(),
        "Patient search completed"
    );
    Ok(results)
}

/// `GET /check-cui/{cui}`
pub async fn check_cui(State(state): State<AppState>, segment: PathSegment) -> ApiResponse {
    pipeline::run(&CHECK_CUI, &state, StatusCode::OK, cui_exists(&state, segment)).await
}

async fn cui_exists(state: &AppState, segment: PathSegment) -> Result<CuiCheck, ApiError> {
    let Path(raw_cui) =
        segment.map_err(|_| ApiError::BadRequest(messages::CUI_INVALID.to_string()))?;
    let cui = Cui::new(raw_cui).map_err(ApiError::BadRequest)?;
    let exists = state.store().cui_exists(&cui).await?;
    Ok(CuiCheck {
        cui: cui.as_str().to_string(),
        exists,
    })
}
