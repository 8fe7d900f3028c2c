//! Client views
//!
//! A view owns its input values and the last error message, and reaches the
//! session (selected patient, last search) through a [`SharedSession`]
//! handle injected at construction. Inputs are checked locally before any
//! request is sent; the server still validates everything it stores.

use crate::client::api::{ApiOutcome, PatientApiClient};
use crate::domain::{
    messages, FichaError, PatientDraft, PatientId, PatientPreview, SearchDraft, SearchQuery,
    SearchType, StudentInfo, SurgicalEventDraft, SurgicalHistory, SurgicalHistoryDraft,
};
use std::fmt::Write as _;
use std::sync::Arc;
use tokio::sync::RwLock;

/// State shared by every view of one session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub selected_patient: Option<PatientPreview>,
    pub last_search: Option<SearchQuery>,
}

/// Cloneable handle to the session state
#[derive(Debug, Clone, Default)]
pub struct SharedSession(Arc<RwLock<SessionState>>);

impl SharedSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn snapshot(&self) -> SessionState {
        self.0.read().await.clone()
    }

    pub async fn update(&self, f: impl FnOnce(&mut SessionState)) {
        let mut state = self.0.write().await;
        f(&mut *state);
    }
}

fn validation_message(error: FichaError) -> String {
    match error {
        FichaError::Validation(message) => message,
        other => other.to_string(),
    }
}

/// Patient search form and result list
pub struct SearchView {
    client: Arc<PatientApiClient>,
    session: SharedSession,
    pub search_type: SearchType,
    pub query: String,
    results: Vec<PatientPreview>,
    error: Option<String>,
}

impl SearchView {
    pub fn new(client: Arc<PatientApiClient>, session: SharedSession) -> Self {
        Self {
            client,
            session,
            search_type: SearchType::Nombres,
            query: String::new(),
            results: Vec::new(),
            error: None,
        }
    }

    pub fn results(&self) -> &[PatientPreview] {
        &self.results
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Run the search; a blank query fails locally without a request
    pub async fn submit(&mut self) -> ApiOutcome<Vec<PatientPreview>> {
        let draft = SearchDraft {
            search_type: Some(self.search_type.as_str().to_string()),
            query: Some(self.query.clone()),
        };
        let query = match draft.validate() {
            Ok(query) => query,
            Err(e) => return self.fail(validation_message(e)),
        };

        let outcome: ApiOutcome<Vec<PatientPreview>> =
            self.client.search_patients(&query).await.into();
        self.session
            .update(|state| state.last_search = Some(query))
            .await;

        match &outcome {
            ApiOutcome::Result(previews) => {
                self.results = previews.clone();
                self.error = None;
            }
            ApiOutcome::Error(message) => {
                self.results.clear();
                self.error = Some(message.clone());
            }
        }
        outcome
    }

    /// Make the result at `index` the session's selected patient
    pub async fn select(&mut self, index: usize) -> Option<PatientPreview> {
        let Some(preview) = self.results.get(index).cloned() else {
            self.error = Some(format!("No hay resultado en la posición {}.", index + 1));
            return None;
        };
        let selected = preview.clone();
        self.session
            .update(|state| state.selected_patient = Some(selected))
            .await;
        Some(preview)
    }

    pub fn render(&self) -> String {
        if let Some(error) = &self.error {
            return format!("Error: {error}");
        }
        if self.results.is_empty() {
            return "Sin resultados.".to_string();
        }
        let mut out = String::new();
        for (position, preview) in self.results.iter().enumerate() {
            let _ = writeln!(out, "{:>3}. [{}] {}", position + 1, preview.id, preview.names);
        }
        out
    }

    fn fail<T>(&mut self, message: String) -> ApiOutcome<T> {
        self.results.clear();
        self.error = Some(message.clone());
        ApiOutcome::Error(message)
    }
}

/// Patient registration form
pub struct RegistrationView {
    client: Arc<PatientApiClient>,
    session: SharedSession,
    pub draft: PatientDraft,
    created: Option<PatientId>,
    error: Option<String>,
}

impl RegistrationView {
    pub fn new(client: Arc<PatientApiClient>, session: SharedSession) -> Self {
        Self {
            client,
            session,
            draft: PatientDraft::default(),
            created: None,
            error: None,
        }
    }

    pub fn created(&self) -> Option<PatientId> {
        self.created
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Validate locally, then register; the new patient becomes the selection
    pub async fn submit(&mut self) -> ApiOutcome<PatientId> {
        let patient = match self.draft.validate() {
            Ok(patient) => patient,
            Err(e) => {
                let message = validation_message(e);
                self.error = Some(message.clone());
                return ApiOutcome::Error(message);
            }
        };

        match self.client.create_patient(&self.draft).await {
            Ok(created) => {
                let preview = PatientPreview {
                    id: created.id,
                    names: format!("{} {}", patient.names, patient.last_names),
                };
                self.session
                    .update(|state| state.selected_patient = Some(preview))
                    .await;
                self.created = Some(created.id);
                self.error = None;
                ApiOutcome::Result(created.id)
            }
            Err(e) => {
                let message = e.user_message();
                self.error = Some(message.clone());
                ApiOutcome::Error(message)
            }
        }
    }

    pub fn render(&self) -> String {
        match (&self.error, self.created) {
            (Some(error), _) => format!("Error: {error}"),
            (None, Some(id)) => format!("{} (id {id})", messages::PATIENT_CREATED),
            (None, None) => "Formulario sin enviar.".to_string(),
        }
    }
}

/// Surgical history of the selected patient
pub struct SurgicalHistoryView {
    client: Arc<PatientApiClient>,
    session: SharedSession,
    history: Option<SurgicalHistory>,
    error: Option<String>,
}

impl SurgicalHistoryView {
    pub fn new(client: Arc<PatientApiClient>, session: SharedSession) -> Self {
        Self {
            client,
            session,
            history: None,
            error: None,
        }
    }

    pub fn history(&self) -> Option<&SurgicalHistory> {
        self.history.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Load the history of the session's selected patient
    pub async fn load(&mut self) -> ApiOutcome<SurgicalHistory> {
        let Some(id) = self.selected_id().await else {
            return self.fail(messages::PATIENT_NOT_FOUND.to_string());
        };
        let outcome: ApiOutcome<SurgicalHistory> =
            self.client.get_surgical_history(id).await.into();
        self.apply(&outcome);
        outcome
    }

    /// Validate `events` locally, then add them to the selected patient
    pub async fn add(&mut self, events: Vec<SurgicalEventDraft>) -> ApiOutcome<SurgicalHistory> {
        let draft = SurgicalHistoryDraft {
            surgical_event_data: events,
        };
        if let Err(e) = draft.validate() {
            return self.fail(validation_message(e));
        }
        let Some(id) = self.selected_id().await else {
            return self.fail(messages::PATIENT_NOT_FOUND.to_string());
        };

        let outcome: ApiOutcome<SurgicalHistory> = self
            .client
            .add_surgical_events(id, &draft.surgical_event_data)
            .await
            .into();
        self.apply(&outcome);
        outcome
    }

    pub fn render(&self) -> String {
        if let Some(error) = &self.error {
            return format!("Error: {error}");
        }
        let Some(history) = &self.history else {
            return "Sin antecedentes cargados.".to_string();
        };
        let mut out = format!("Antecedentes quirúrgicos del paciente {}\n", history.patient_id);
        for event in &history.surgical_event_data {
            let _ = write!(out, "  {}  {}", event.surgery_date, event.surgery_type);
            if let Some(complications) = &event.complications {
                let _ = write!(out, " (complicaciones: {complications})");
            }
            out.push('\n');
        }
        out
    }

    async fn selected_id(&self) -> Option<PatientId> {
        self.session
            .snapshot()
            .await
            .selected_patient
            .map(|preview| preview.id)
    }

    fn apply(&mut self, outcome: &ApiOutcome<SurgicalHistory>) {
        match outcome {
            ApiOutcome::Result(history) => {
                self.history = Some(history.clone());
                self.error = None;
            }
            ApiOutcome::Error(message) => {
                self.history = None;
                self.error = Some(message.clone());
            }
        }
    }

    fn fail<T>(&mut self, message: String) -> ApiOutcome<T> {
        self.error = Some(message.clone());
        ApiOutcome::Error(message)
    }
}

/// Student data of the selected patient
pub struct StudentInfoView {
    client: Arc<PatientApiClient>,
    session: SharedSession,
    info: Option<StudentInfo>,
    error: Option<String>,
}

impl StudentInfoView {
    pub fn new(client: Arc<PatientApiClient>, session: SharedSession) -> Self {
        Self {
            client,
            session,
            info: None,
            error: None,
        }
    }

    pub fn info(&self) -> Option<&StudentInfo> {
        self.info.as_ref()
    }

    pub async fn load(&mut self) -> ApiOutcome<StudentInfo> {
        let selected = self.session.snapshot().await.selected_patient;
        let Some(preview) = selected else {
            let message = messages::STUDENT_NOT_FOUND.to_string();
            self.error = Some(message.clone());
            return ApiOutcome::Error(message);
        };

        let outcome: ApiOutcome<StudentInfo> =
            self.client.get_student_info(preview.id).await.into();
        match &outcome {
            ApiOutcome::Result(info) => {
                self.info = Some(info.clone());
                self.error = None;
            }
            ApiOutcome::Error(message) => {
                self.info = None;
                self.error = Some(message.clone());
            }
        }
        outcome
    }

    pub fn render(&self) -> String {
        match (&self.error, &self.info) {
            (Some(error), _) => format!("Error: {error}"),
            (None, Some(info)) => format!(
                "Carnet: {}\nCarrera: {}\nCorreo: {}",
                info.carnet,
                info.career,
                info.email.as_deref().unwrap_or("-")
            ),
            (None, None) => "Sin datos de estudiante.".to_string(),
        }
    }
}
