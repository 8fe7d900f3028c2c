//! Patient API client
//!
//! Wraps the HTTP API with one method per endpoint. Every method performs a
//! single request and returns `Result<T, ClientError>`; nothing panics on a bad
//! response. Records are checked for the fields the client relies on, so a
//! server that changes its payloads yields [`ClientError::ContractChanged`]
//! instead of half-filled values.

use crate::config::ClientConfig;
use crate::domain::{
    ClientError, CollaboratorInfo, Cui, Patient, PatientDraft, PatientId, PatientPreview,
    SearchQuery, StudentInfo, SurgicalEventDraft, SurgicalHistory,
};
use reqwest::{Client, ClientBuilder, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// Either the value of a successful call or a user-facing error message
///
/// Serializes as `{"result": ...}` or `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiOutcome<T> {
    Result(T),
    Error(String),
}

impl<T> ApiOutcome<T> {
    pub fn is_ok(&self) -> bool {
        matches!(self, ApiOutcome::Result(_))
    }

    pub fn ok(self) -> Option<T> {
        match self {
            ApiOutcome::Result(value) => Some(value),
            ApiOutcome::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ApiOutcome::Result(_) => None,
            ApiOutcome::Error(message) => Some(message),
        }
    }
}

impl<T> From<Result<T, ClientError>> for ApiOutcome<T> {
    fn from(result: Result<T, ClientError>) -> Self {
        match result {
            Ok(value) => ApiOutcome::Result(value),
            Err(e) => ApiOutcome::Error(e.user_message()),
        }
    }
}

/// Response of a successful registration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PatientCreated {
    pub id: PatientId,
    pub message: String,
}

/// Response of `GET /health`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthReport {
    pub status: String,
    pub database: String,
    #[serde(default)]
    pub backend: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CuiCheck {
    exists: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchRequest<'a> {
    search_type: &'a str,
    query: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SurgicalEventsRequest<'a> {
    surgical_event_data: &'a [SurgicalEventDraft],
}

/// HTTP client for the patient API
#[derive(Debug, Clone)]
pub struct PatientApiClient {
    base_url: Url,
    http: Client,
}

impl PatientApiClient {
    /// Create a client for `config.backend_url`
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] if the URL is invalid or the HTTP
    /// client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let base_url = Url::parse(&config.backend_url).map_err(|e| {
            ClientError::Transport(format!("Invalid backend URL '{}': {e}", config.backend_url))
        })?;

        let http = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(config.timeout_seconds.min(30)))
            .build()
            .map_err(|e| ClientError::Transport(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { base_url, http })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `GET /health`
    pub async fn health(&self) -> Result<HealthReport, ClientError> {
        let value = self.send(self.request(Method::GET, &["health"])?).await?;
        decode(value, "health")
    }

    /// `POST /patient/search`, turned into previews
    pub async fn search_patients(
        &self,
        query: &SearchQuery,
    ) -> Result<Vec<PatientPreview>, ClientError> {
        let body = SearchRequest {
            search_type: query.search_type.as_str(),
            query: &query.query,
        };
        let value = self
            .send(self.request(Method::POST, &["patient", "search"])?.json(&body))
            .await?;
        previews_from(value)
    }

    /// `POST /patient`
    pub async fn create_patient(&self, draft: &PatientDraft) -> Result<PatientCreated, ClientError> {
        let value = self
            .send(self.request(Method::POST, &["patient"])?.json(draft))
            .await?;
        decode(value, "patient registration")
    }

    /// `GET /patient/{id}`
    pub async fn get_patient(&self, id: PatientId) -> Result<Patient, ClientError> {
        let value = self
            .send(self.request(Method::GET, &["patient", &id.to_string()])?)
            .await?;
        decode(value, "patient")
    }

    /// `GET /check-cui/{cui}`
    pub async fn check_cui(&self, cui: &Cui) -> Result<bool, ClientError> {
        let value = self
            .send(self.request(Method::GET, &["check-cui", cui.as_str()])?)
            .await?;
        decode::<CuiCheck>(value, "CUI check").map(|check| check.exists)
    }

    /// `GET /patient/surgical-history/{id}`
    pub async fn get_surgical_history(
        &self,
        id: PatientId,
    ) -> Result<SurgicalHistory, ClientError> {
        let value = self
            .send(self.request(
                Method::GET,
                &["patient", "surgical-history", &id.to_string()],
            )?)
            .await?;
        decode(value, "surgical history")
    }

    /// `POST /patient/surgical-history/{id}`
    pub async fn add_surgical_events(
        &self,
        id: PatientId,
        events: &[SurgicalEventDraft],
    ) -> Result<SurgicalHistory, ClientError> {
        let body = SurgicalEventsRequest {
            surgical_event_data: events,
        };
        let value = self
            .send(
                self.request(
                    Method::POST,
                    &["patient", "surgical-history", &id.to_string()],
                )?
                .json(&body),
            )
            .await?;
        decode(value, "surgical history")
    }

    /// `GET /patient/student/{id}`
    pub async fn get_student_info(&self, id: PatientId) -> Result<StudentInfo, ClientError> {
        let value = self
            .send(self.request(Method::GET, &["patient", "student", &id.to_string()])?)
            .await?;
        decode(value, "student info")
    }

    /// `GET /patient/collaborator/{id}`
    pub async fn get_collaborator_info(
        &self,
        id: PatientId,
    ) -> Result<CollaboratorInfo, ClientError> {
        let value = self
            .send(self.request(
                Method::GET,
                &["patient", "collaborator", &id.to_string()],
            )?)
            .await?;
        decode(value, "collaborator info")
    }

    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ClientError::Transport(format!("Backend URL cannot be a base: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(self.http.request(method, url))
    }

    /// Send a request and return the JSON body of a 2xx response
    async fn send(&self, request: RequestBuilder) -> Result<Value, ClientError> {
        let response = request
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ClientError::Transport(format!("Failed to read response body: {e}")))?;

        if !status.is_success() {
            let message = error_message(&text)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("").to_string());
            tracing::debug!(status = status.as_u16(), message = %message, "API call rejected");
            return Err(ClientError::from_status(status.as_u16(), message));
        }

        serde_json::from_str(&text)
            .map_err(|e| ClientError::ContractChanged(format!("response is not JSON: {e}")))
    }
}

/// The `message` field of an error body, if the body has one
fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<Value>(body)
        .ok()?
        .get("message")?
        .as_str()
        .map(str::to_string)
}

fn decode<T: DeserializeOwned>(value: Value, what: &str) -> Result<T, ClientError> {
    serde_json::from_value(value)
        .map_err(|e| ClientError::ContractChanged(format!("unexpected {what} payload: {e}")))
}

/// Turn search rows into previews, rejecting rows that lack `id`, `nombres`
/// or `apellidos`
fn previews_from(value: Value) -> Result<Vec<PatientPreview>, ClientError> {
    let rows = match value {
        Value::Array(rows) => rows,
        other => {
            return Err(ClientError::ContractChanged(format!(
                "search response is not a list: {other}"
            )))
        }
    };

    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            let missing = |field: &str| {
                ClientError::ContractChanged(format!(
                    "search result {index} is missing '{field}'"
                ))
            };
            let id = row
                .get("id")
                .and_then(Value::as_i64)
                .and_then(|id| i32::try_from(id).ok())
                .ok_or_else(|| missing("id"))?;
            let nombres = row
                .get("nombres")
                .and_then(Value::as_str)
                .ok_or_else(|| missing("nombres"))?;
            let apellidos = row
                .get("apellidos")
                .and_then(Value::as_str)
                .ok_or_else(|| missing("apellidos"))?;

            Ok(PatientPreview {
                id: PatientId::new(id),
                names: format!("{nombres} {apellidos}"),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_previews_concatenate_names() {
        let previews = previews_from(json!([
            { "id": 1, "nombres": "Ana", "apellidos": "Pérez" },
            { "id": 2, "nombres": "Luis", "apellidos": "García", "extra": true }
        ]))
        .unwrap();
        assert_eq!(previews.len(), 2);
        assert_eq!(previews[0].id, PatientId::new(1));
        assert_eq!(previews[0].names, "Ana Pérez");
    }

    #[test]
    fn test_preview_missing_field_is_contract_change() {
        let err = previews_from(json!([
            { "id": 1, "nombres": "Ana", "apellidos": "Pérez" },
            { "id": 2, "nombres": "Luis" }
        ]))
        .unwrap_err();
        assert_eq!(
            err,
            ClientError::ContractChanged("search result 1 is missing 'apellidos'".to_string())
        );
    }

    #[test]
    fn test_preview_requires_list() {
        let err = previews_from(json!({ "message": "ok" })).unwrap_err();
        assert!(matches!(err, ClientError::ContractChanged(_)));
    }

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(
            error_message(r#"{"message":"CUI ya existe."}"#),
            Some("CUI ya existe.".to_string())
        );
        assert_eq!(error_message("<html>"), None);
    }

    #[test]
    fn test_outcome_serialization() {
        let ok: ApiOutcome<i32> = Ok(3).into();
        assert_eq!(serde_json::to_value(&ok).unwrap(), json!({ "result": 3 }));

        let err: ApiOutcome<i32> = Err(ClientError::Server {
            status: 500,
            message: "x".into(),
        })
        .into();
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            json!({ "error": "Error del servidor. Contacte al administrador." })
        );
        assert!(!err.is_ok());
    }

    #[test]
    fn test_request_url_joins_segments() {
        let client = PatientApiClient::new(&ClientConfig {
            backend_url: "http://api.example/v1/".to_string(),
            timeout_seconds: 5,
        })
        .unwrap();
        let request = client
            .request(Method::GET, &["check-cui", "1234567890101"])
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(
            request.url().as_str(),
            "http://api.example/v1/check-cui/1234567890101"
        );
    }
}
