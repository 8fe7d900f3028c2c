//! Store abstraction
//!
//! Every HTTP handler talks to a [`PatientStore`]. Implementations acquire one
//! connection per call and release it before returning, whatever the outcome.

use crate::domain::{
    CollaboratorInfo, Cui, NewPatient, NewSurgicalEvent, Patient, PatientId, PatientSummary,
    Result, SearchQuery, StudentInfo, SurgicalEvent,
};
use async_trait::async_trait;

/// Maximum number of rows a search returns
pub const SEARCH_LIMIT: usize = 50;

/// Patient record storage
#[async_trait]
pub trait PatientStore: Send + Sync {
    /// Short backend name for logs and the health endpoint
    fn backend_name(&self) -> &'static str;

    /// Test the store connection
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached.
    async fn test_connection(&self) -> Result<()>;

    /// Insert a patient and return its new identifier
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::FichaError::Conflict`] with `CUI ya existe.`
    /// when the CUI is already registered.
    async fn insert_patient(&self, patient: &NewPatient) -> Result<PatientId>;

    /// Fetch one patient
    async fn find_patient(&self, id: PatientId) -> Result<Option<Patient>>;

    /// Whether a patient with this CUI exists
    async fn cui_exists(&self, cui: &Cui) -> Result<bool>;

    /// Search patients, at most [`SEARCH_LIMIT`] rows ordered by surname then names
    async fn search_patients(&self, query: &SearchQuery) -> Result<Vec<PatientSummary>>;

    /// All surgical events of a patient, oldest first. Unknown patients yield
    /// an empty list.
    async fn surgical_history(&self, id: PatientId) -> Result<Vec<SurgicalEvent>>;

    /// Insert surgical events atomically and return the stored rows
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::FichaError::NotFound`] when the patient does not exist.
    async fn insert_surgical_events(
        &self,
        id: PatientId,
        events: &[NewSurgicalEvent],
    ) -> Result<Vec<SurgicalEvent>>;

    /// Student data of a patient
    async fn student_info(&self, id: PatientId) -> Result<Option<StudentInfo>>;

    /// Collaborator data of a patient
    async fn collaborator_info(&self, id: PatientId) -> Result<Option<CollaboratorInfo>>;
}
