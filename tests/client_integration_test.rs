//! Patient API client and view tests
//!
//! Wire-level behavior is checked against a mockito server; the last tests run
//! the client against the real router on an ephemeral port.

use ficha::adapters::memory::MemoryStore;
use ficha::api::{build_router, AppState};
use ficha::client::{
    ApiOutcome, HealthReport, PatientApiClient, RegistrationView, SearchView, SharedSession,
    SurgicalHistoryView,
};
use ficha::config::ClientConfig;
use ficha::domain::{
    messages, ClientError, Cui, PatientDraft, PatientId, SearchQuery, SearchType,
    SurgicalEventDraft,
};
use mockito::Matcher;
use serde_json::json;
use std::sync::Arc;

fn client_for(url: &str) -> Arc<PatientApiClient> {
    let config = ClientConfig {
        backend_url: url.to_string(),
        timeout_seconds: 5,
    };
    Arc::new(PatientApiClient::new(&config).unwrap())
}

fn ana_draft() -> PatientDraft {
    PatientDraft {
        cui: Some("1234567890101".to_string()),
        names: Some("Ana".to_string()),
        last_names: Some("Pérez".to_string()),
        sex: Some("F".to_string()),
        birthdate: Some("2001-03-14".to_string()),
    }
}

#[tokio::test]
async fn test_search_sends_wire_names_and_builds_previews() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/patient/search")
        .match_body(Matcher::Json(json!({"searchType": "Carnet", "query": "22001"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"id": 3, "nombres": "Ana", "apellidos": "Pérez"}]"#)
        .create_async()
        .await;

    let client = client_for(&server.url());
    let previews = client
        .search_patients(&SearchQuery::new(SearchType::Carnet, "22001"))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(previews.len(), 1);
    assert_eq!(previews[0].id, PatientId::new(3));
    assert_eq!(previews[0].names, "Ana Pérez");
}

#[tokio::test]
async fn test_search_rows_missing_fields_are_contract_errors() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/patient/search")
        .with_status(200)
        .with_body(r#"[{"id": 3, "nombres": "Ana"}]"#)
        .create_async()
        .await;

    let client = client_for(&server.url());
    let err = client
        .search_patients(&SearchQuery::new(SearchType::Nombres, "Ana"))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::ContractChanged(ref m) if m.contains("apellidos")));
}

#[tokio::test]
async fn test_error_statuses_are_classified() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/patient/9")
        .with_status(404)
        .with_body(format!(r#"{{"message": "{}"}}"#, messages::PATIENT_NOT_FOUND))
        .create_async()
        .await;
    server
        .mock("POST", "/patient")
        .with_status(409)
        .with_body(format!(r#"{{"message": "{}"}}"#, messages::CUI_DUPLICATE))
        .create_async()
        .await;
    server
        .mock("GET", "/check-cui/1234567890101")
        .with_status(500)
        .with_body("<html>proxy error</html>")
        .create_async()
        .await;

    let client = client_for(&server.url());

    let err = client.get_patient(PatientId::new(9)).await.unwrap_err();
    assert_eq!(err, ClientError::NotFound(messages::PATIENT_NOT_FOUND.to_string()));

    let err = client.create_patient(&ana_draft()).await.unwrap_err();
    assert_eq!(err, ClientError::Conflict(messages::CUI_DUPLICATE.to_string()));

    let cui = Cui::new("1234567890101").unwrap();
    let err = client.check_cui(&cui).await.unwrap_err();
    assert!(matches!(err, ClientError::Server { status: 500, .. }));
}

#[tokio::test]
async fn test_non_json_success_is_contract_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/health")
        .with_status(200)
        .with_body("OK")
        .create_async()
        .await;

    let client = client_for(&server.url());
    let err = client.health().await.unwrap_err();
    assert!(matches!(err, ClientError::ContractChanged(_)));
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let client = client_for("http://127.0.0.1:9");
    let outcome: ApiOutcome<HealthReport> = client.health().await.into();
    assert_eq!(
        outcome.error(),
        Some("No se pudo conectar con el servidor. Intente de nuevo.")
    );
}

#[tokio::test]
async fn test_registration_view_selects_new_patient() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/patient")
        .match_body(Matcher::PartialJson(json!({"cui": "1234567890101", "lastNames": "Pérez"})))
        .with_status(201)
        .with_body(format!(r#"{{"id": 12, "message": "{}"}}"#, messages::PATIENT_CREATED))
        .create_async()
        .await;

    let session = SharedSession::new();
    let mut view = RegistrationView::new(client_for(&server.url()), session.clone());
    view.draft = ana_draft();

    let outcome = view.submit().await;
    mock.assert_async().await;
    assert_eq!(outcome, ApiOutcome::Result(PatientId::new(12)));

    let selected = session.snapshot().await.selected_patient.unwrap();
    assert_eq!(selected.id, PatientId::new(12));
    assert_eq!(selected.names, "Ana Pérez");
}

#[tokio::test]
async fn test_registration_view_validates_before_sending() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/patient")
        .expect(0)
        .create_async()
        .await;

    let mut view = RegistrationView::new(client_for(&server.url()), SharedSession::new());
    view.draft = PatientDraft {
        sex: Some("X".to_string()),
        ..ana_draft()
    };

    let outcome = view.submit().await;
    mock.assert_async().await;
    assert_eq!(outcome.error(), Some(messages::SEX_INVALID));
}

#[tokio::test]
async fn test_surgical_history_view_uses_selection() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/patient/search")
        .with_status(200)
        .with_body(r#"[{"id": 5, "nombres": "Luis", "apellidos": "García"}]"#)
        .create_async()
        .await;
    let history = server
        .mock("GET", "/patient/surgical-history/5")
        .with_status(200)
        .with_body(
            r#"{"patientId": 5, "surgicalEventData": [
                {"id": 1, "surgeryType": "Apendicectomía", "surgeryDate": "2015-08-10", "complications": null}
            ]}"#,
        )
        .create_async()
        .await;

    let client = client_for(&server.url());
    let session = SharedSession::new();

    let mut search = SearchView::new(client.clone(), session.clone());
    search.query = "García".to_string();
    assert!(search.submit().await.is_ok());
    assert!(search.select(0).await.is_some());
    assert_eq!(
        session.snapshot().await.last_search.unwrap().query,
        "García"
    );

    let mut view = SurgicalHistoryView::new(client, session);
    let outcome = view.load().await;
    history.assert_async().await;
    assert!(outcome.is_ok());
    assert!(view.render().contains("Apendicectomía"));
}

async fn spawn_api() -> Arc<PatientApiClient> {
    let state = AppState::new(Arc::new(MemoryStore::new()), "*");
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, build_router(state)).await.unwrap();
    });
    client_for(&format!("http://{addr}"))
}

#[tokio::test]
async fn test_client_against_real_router() {
    let client = spawn_api().await;

    let report = client.health().await.unwrap();
    assert_eq!(report.backend.as_deref(), Some("memory"));

    let created = client.create_patient(&ana_draft()).await.unwrap();
    assert_eq!(created.message, messages::PATIENT_CREATED);

    let patient = client.get_patient(created.id).await.unwrap();
    assert_eq!(patient.cui.as_str(), "1234567890101");

    let cui = Cui::new("1234567890101").unwrap();
    assert!(client.check_cui(&cui).await.unwrap());

    let err = client.create_patient(&ana_draft()).await.unwrap_err();
    assert_eq!(err, ClientError::Conflict(messages::CUI_DUPLICATE.to_string()));

    let previews = client
        .search_patients(&SearchQuery::new(SearchType::Nombres, "pérez"))
        .await
        .unwrap();
    assert_eq!(previews.len(), 1);
    assert_eq!(previews[0].names, "Ana Pérez");

    let history = client
        .add_surgical_events(
            created.id,
            &[SurgicalEventDraft {
                surgery_type: Some("Apendicectomía".to_string()),
                surgery_date: Some("2015-08-10".to_string()),
                complications: None,
            }],
        )
        .await
        .unwrap();
    assert_eq!(history.surgical_event_data.len(), 1);

    let history = client.get_surgical_history(created.id).await.unwrap();
    assert_eq!(history.patient_id, created.id);

    let err = client.get_student_info(created.id).await.unwrap_err();
    assert_eq!(err, ClientError::NotFound(messages::STUDENT_NOT_FOUND.to_string()));

    let err = client
        .get_collaborator_info(PatientId::new(999))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::NotFound(_)));
}
