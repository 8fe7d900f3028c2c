//! HTTP contract tests
//!
//! Drives the full router (pipeline, CORS, fallbacks, panic layer) against the
//! in-memory store without opening a socket.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use ficha::adapters::database::PatientStore;
use ficha::adapters::memory::MemoryStore;
use ficha::api::{build_router, AppState};
use ficha::domain::{
    messages, CollaboratorInfo, Cui, FichaError, NewPatient, NewSurgicalEvent, Patient,
    PatientId, PatientSummary, Result, SearchQuery, StudentInfo, SurgicalEvent,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

const ORIGIN: &str = "https://clinica.example.edu";

struct TestResponse {
    status: StatusCode,
    allow_origin: Option<String>,
    allow_methods: Option<String>,
    body: Value,
}

fn app_with(store: Arc<dyn PatientStore>) -> Router {
    build_router(AppState::new(store, ORIGIN))
}

fn app() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    (app_with(store.clone()), store)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let header = |name: &str| {
        response
            .headers()
            .get(name)
            .map(|v| v.to_str().unwrap().to_string())
    };
    let allow_origin = header("access-control-allow-origin");
    let allow_methods = header("access-control-allow-methods");

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    TestResponse {
        status,
        allow_origin,
        allow_methods,
        body,
    }
}

fn ana() -> Value {
    json!({
        "cui": "1234567890101",
        "names": "Ana Lucía",
        "lastNames": "Pérez García",
        "sex": "F",
        "birthdate": "2001-03-14"
    })
}

async fn register(app: &Router, body: Value) -> i64 {
    let res = send(app, Method::POST, "/patient", Some(body)).await;
    assert_eq!(res.status, StatusCode::CREATED, "{}", res.body);
    res.body["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_register_then_fetch() {
    let (app, _) = app();

    let res = send(&app, Method::POST, "/patient", Some(ana())).await;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.body["message"], messages::PATIENT_CREATED);
    assert_eq!(res.allow_origin.as_deref(), Some(ORIGIN));
    let id = res.body["id"].as_i64().unwrap();

    let res = send(&app, Method::GET, &format!("/patient/{id}"), None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["cui"], "1234567890101");
    assert_eq!(res.body["names"], "Ana Lucía");
    assert_eq!(res.body["lastNames"], "Pérez García");
    assert_eq!(res.body["sex"], "F");
    assert_eq!(res.body["birthdate"], "2001-03-14");
}

#[tokio::test]
async fn test_register_validation_messages() {
    let (app, _) = app();

    let mut missing_cui = ana();
    missing_cui.as_object_mut().unwrap().remove("cui");
    let res = send(&app, Method::POST, "/patient", Some(missing_cui)).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["message"], messages::CUI_REQUIRED);

    let mut short_cui = ana();
    short_cui["cui"] = json!("12345");
    let res = send(&app, Method::POST, "/patient", Some(short_cui)).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["message"], messages::CUI_INVALID);

    let mut bad_sex = ana();
    bad_sex["sex"] = json!("X");
    let res = send(&app, Method::POST, "/patient", Some(bad_sex)).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["message"], messages::SEX_INVALID);

    let mut long_names = ana();
    long_names["names"] = json!("A".repeat(101));
    let res = send(&app, Method::POST, "/patient", Some(long_names)).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["message"], messages::NAMES_TOO_LONG);

    let mut future = ana();
    future["birthdate"] = json!("2999-01-01");
    let res = send(&app, Method::POST, "/patient", Some(future)).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["message"], messages::BIRTHDATE_IN_FUTURE);
}

#[tokio::test]
async fn test_register_malformed_json() {
    let (app, _) = app();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/patient")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with(messages::INVALID_JSON));
}

#[tokio::test]
async fn test_duplicate_cui_conflicts() {
    let (app, _) = app();
    register(&app, ana()).await;

    let res = send(&app, Method::POST, "/patient", Some(ana())).await;
    assert_eq!(res.status, StatusCode::CONFLICT);
    assert_eq!(res.body["message"], messages::CUI_DUPLICATE);
}

#[tokio::test]
async fn test_check_cui() {
    let (app, _) = app();

    let res = send(&app, Method::GET, "/check-cui/1234567890101", None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["exists"], false);

    register(&app, ana()).await;
    let res = send(&app, Method::GET, "/check-cui/1234567890101", None).await;
    assert_eq!(res.body["exists"], true);

    let res = send(&app, Method::GET, "/check-cui/abc", None).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["message"], messages::CUI_INVALID);
}

#[tokio::test]
async fn test_unknown_or_malformed_patient_id_is_not_found() {
    let (app, _) = app();

    for uri in ["/patient/999", "/patient/abc"] {
        let res = send(&app, Method::GET, uri, None).await;
        assert_eq!(res.status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(res.body["message"], messages::PATIENT_NOT_FOUND);
        assert_eq!(res.allow_origin.as_deref(), Some(ORIGIN));
    }
}

#[tokio::test]
async fn test_search_by_names_returns_array() {
    let (app, _) = app();
    register(&app, ana()).await;
    register(
        &app,
        json!({
            "cui": "2345678901201",
            "names": "José",
            "lastNames": "López",
            "sex": "M",
            "birthdate": "1999-11-02"
        }),
    )
    .await;

    let res = send(
        &app,
        Method::POST,
        "/patient/search",
        Some(json!({"searchType": "Nombres", "query": "pérez"})),
    )
    .await;
    assert_eq!(res.status, StatusCode::OK);
    let rows = res.body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["nombres"], "Ana Lucía");
    assert_eq!(rows[0]["apellidos"], "Pérez García");

    let res = send(
        &app,
        Method::POST,
        "/patient/search",
        Some(json!({"searchType": "Nombres", "query": "nadie"})),
    )
    .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, json!([]));
}

#[tokio::test]
async fn test_search_by_carnet() {
    let (app, store) = app();
    let id = register(&app, ana()).await;
    store
        .insert_student(StudentInfo {
            patient_id: PatientId::new(id as i32),
            carnet: "22001".to_string(),
            career: "Medicina".to_string(),
            email: None,
        })
        .await
        .unwrap();

    let res = send(
        &app,
        Method::POST,
        "/patient/search",
        Some(json!({"searchType": "Carnet", "query": "22001"})),
    )
    .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body.as_array().unwrap().len(), 1);
    assert_eq!(res.body[0]["id"], id);

    let res = send(&app, Method::GET, &format!("/patient/student/{id}"), None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["carnet"], "22001");
    assert_eq!(res.body["career"], "Medicina");
}

#[tokio::test]
async fn test_search_requires_type_and_value() {
    let (app, _) = app();

    let res = send(
        &app,
        Method::POST,
        "/patient/search",
        Some(json!({"query": "Ana"})),
    )
    .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["message"], messages::SEARCH_TYPE_REQUIRED);

    let res = send(
        &app,
        Method::POST,
        "/patient/search",
        Some(json!({"searchType": "Nombres", "query": "  "})),
    )
    .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["message"], messages::SEARCH_VALUE_REQUIRED);
}

#[tokio::test]
async fn test_surgical_history_lifecycle() {
    let (app, _) = app();
    let id = register(&app, ana()).await;
    let uri = format!("/patient/surgical-history/{id}");

    let res = send(&app, Method::GET, &uri, None).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body["message"], messages::SURGICAL_HISTORY_NOT_FOUND);

    let res = send(
        &app,
        Method::POST,
        &uri,
        Some(json!({"surgicalEventData": [
            {"surgeryType": "Colecistectomía", "surgeryDate": "2020-02-03",
             "complications": "Infección leve"},
            {"surgeryType": "Apendicectomía", "surgeryDate": "2015-08-10"}
        ]})),
    )
    .await;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.body["surgicalEventData"].as_array().unwrap().len(), 2);

    let res = send(&app, Method::GET, &uri, None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["patientId"], id);
    let events = res.body["surgicalEventData"].as_array().unwrap();
    assert_eq!(events.len(), 2);
    // oldest first
    assert_eq!(events[0]["surgeryType"], "Apendicectomía");
    assert_eq!(events[0]["complications"], Value::Null);
    assert_eq!(events[1]["complications"], "Infección leve");
}

#[tokio::test]
async fn test_surgical_history_rejects_partial_batches() {
    let (app, _) = app();
    let id = register(&app, ana()).await;
    let uri = format!("/patient/surgical-history/{id}");

    let res = send(
        &app,
        Method::POST,
        &uri,
        Some(json!({"surgicalEventData": [
            {"surgeryType": "Apendicectomía", "surgeryDate": "2015-08-10"},
            {"surgeryType": "Rodilla"}
        ]})),
    )
    .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["message"], messages::SURGERY_DATE_REQUIRED);

    let res = send(&app, Method::GET, &uri, None).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);

    let res = send(&app, Method::POST, &uri, Some(json!({"surgicalEventData": []}))).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["message"], messages::SURGICAL_EVENTS_REQUIRED);
}

#[tokio::test]
async fn test_surgical_history_unknown_patient() {
    let (app, _) = app();

    let res = send(&app, Method::GET, "/patient/surgical-history/abc", None).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body["message"], messages::SURGICAL_HISTORY_NOT_FOUND);

    let res = send(
        &app,
        Method::POST,
        "/patient/surgical-history/404",
        Some(json!({"surgicalEventData": [
            {"surgeryType": "Apendicectomía", "surgeryDate": "2015-08-10"}
        ]})),
    )
    .await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body["message"], messages::PATIENT_NOT_FOUND);
}

#[tokio::test]
async fn test_undecodable_path_segments_answer_through_pipeline() {
    let (app, _) = app();

    for (uri, status, message) in [
        (
            "/patient/surgical-history/%FF",
            StatusCode::NOT_FOUND,
            messages::SURGICAL_HISTORY_NOT_FOUND,
        ),
        ("/patient/%FF", StatusCode::NOT_FOUND, messages::PATIENT_NOT_FOUND),
        ("/patient/student/%FF", StatusCode::NOT_FOUND, messages::STUDENT_NOT_FOUND),
        (
            "/patient/collaborator/%FF",
            StatusCode::NOT_FOUND,
            messages::COLLABORATOR_NOT_FOUND,
        ),
        ("/check-cui/%FF", StatusCode::BAD_REQUEST, messages::CUI_INVALID),
    ] {
        let res = send(&app, Method::GET, uri, None).await;
        assert_eq!(res.status, status, "{uri}");
        assert_eq!(res.body["message"], message, "{uri}");
        assert_eq!(res.allow_origin.as_deref(), Some(ORIGIN), "{uri}");
    }

    let res = send(
        &app,
        Method::POST,
        "/patient/surgical-history/%FF",
        Some(json!({"surgicalEventData": [
            {"surgeryType": "Apendicectomía", "surgeryDate": "2015-08-10"}
        ]})),
    )
    .await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body["message"], messages::PATIENT_NOT_FOUND);
    assert_eq!(res.allow_origin.as_deref(), Some(ORIGIN));
}

#[tokio::test]
async fn test_affiliation_not_found() {
    let (app, _) = app();
    let id = register(&app, ana()).await;

    let res = send(&app, Method::GET, &format!("/patient/student/{id}"), None).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body["message"], messages::STUDENT_NOT_FOUND);

    let res = send(&app, Method::GET, &format!("/patient/collaborator/{id}"), None).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body["message"], messages::COLLABORATOR_NOT_FOUND);
}

#[tokio::test]
async fn test_collaborator_info() {
    let (app, store) = app();
    let id = register(&app, ana()).await;
    store
        .insert_collaborator(CollaboratorInfo {
            patient_id: PatientId::new(id as i32),
            code: "COL-0042".to_string(),
            position: "Catedrática".to_string(),
            department: "Química".to_string(),
        })
        .await
        .unwrap();

    let res = send(&app, Method::GET, &format!("/patient/collaborator/{id}"), None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["code"], "COL-0042");
    assert_eq!(res.body["department"], "Química");
}

#[tokio::test]
async fn test_preflight_and_method_not_allowed() {
    let (app, _) = app();

    let res = send(&app, Method::OPTIONS, "/patient", None).await;
    assert_eq!(res.status, StatusCode::NO_CONTENT);
    assert_eq!(res.allow_origin.as_deref(), Some(ORIGIN));
    let methods = res.allow_methods.unwrap();
    assert!(methods.contains("POST"));
    assert!(methods.contains("OPTIONS"));

    let res = send(&app, Method::DELETE, "/patient/1", None).await;
    assert_eq!(res.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(res.body["message"], messages::METHOD_NOT_ALLOWED);
    assert_eq!(res.allow_origin.as_deref(), Some(ORIGIN));

    let res = send(&app, Method::GET, "/patient", None).await;
    assert_eq!(res.status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_unknown_route() {
    let (app, _) = app();

    let res = send(&app, Method::GET, "/no/such/route", None).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body["message"], messages::ROUTE_NOT_FOUND);
    assert_eq!(res.allow_origin.as_deref(), Some(ORIGIN));
}

#[tokio::test]
async fn test_health() {
    let (app, _) = app();

    let res = send(&app, Method::GET, "/health", None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["status"], "ok");
    assert_eq!(res.body["backend"], "memory");
}

/// Store whose every call fails or panics
struct BrokenStore {
    panic: bool,
}

impl BrokenStore {
    fn fail<T>(&self) -> Result<T> {
        if self.panic {
            panic!("store exploded");
        }
        Err(FichaError::Database("connection reset".to_string()))
    }
}

#[async_trait]
impl PatientStore for BrokenStore {
    fn backend_name(&self) -> &'static str {
        "broken"
    }

    async fn test_connection(&self) -> Result<()> {
        self.fail()
    }

    async fn insert_patient(&self, _patient: &NewPatient) -> Result<PatientId> {
        self.fail()
    }

    async fn find_patient(&self, _id: PatientId) -> Result<Option<Patient>> {
        self.fail()
    }

    async fn cui_exists(&self, _cui: &Cui) -> Result<bool> {
        self.fail()
    }

    async fn search_patients(&self, _query: &SearchQuery) -> Result<Vec<PatientSummary>> {
        self.fail()
    }

    async fn surgical_history(&self, _id: PatientId) -> Result<Vec<SurgicalEvent>> {
        self.fail()
    }

    async fn insert_surgical_events(
        &self,
        _id: PatientId,
        _events: &[NewSurgicalEvent],
    ) -> Result<Vec<SurgicalEvent>> {
        self.fail()
    }

    async fn student_info(&self, _id: PatientId) -> Result<Option<StudentInfo>> {
        self.fail()
    }

    async fn collaborator_info(&self, _id: PatientId) -> Result<Option<CollaboratorInfo>> {
        self.fail()
    }
}

#[tokio::test]
async fn test_store_failure_is_internal_error_with_cors() {
    let app = app_with(Arc::new(BrokenStore { panic: false }));

    let res = send(&app, Method::GET, "/patient/1", None).await;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.body["message"], messages::INTERNAL_ERROR);
    assert!(res.body["error"].as_str().unwrap().contains("connection reset"));
    assert_eq!(res.allow_origin.as_deref(), Some(ORIGIN));

    let res = send(&app, Method::GET, "/health", None).await;
    assert_eq!(res.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(res.body["message"], messages::DATABASE_UNAVAILABLE);
}

#[tokio::test]
async fn test_panic_is_internal_error_with_cors() {
    let app = app_with(Arc::new(BrokenStore { panic: true }));

    let res = send(&app, Method::GET, "/check-cui/1234567890101", None).await;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.body["message"], messages::INTERNAL_ERROR);
    assert_eq!(res.body["error"], "store exploded");
    assert_eq!(res.allow_origin.as_deref(), Some(ORIGIN));
}
