//! Client side of the patient API
//!
//! - [`api`] - [`PatientApiClient`], one method per endpoint, and [`ApiOutcome`]
//! - [`views`] - search, registration, surgical history and student views that
//!   validate input locally and render to text

pub mod api;
pub mod views;

pub use api::{ApiOutcome, HealthReport, PatientApiClient, PatientCreated};
pub use views::{
    RegistrationView, SearchView, SessionState, SharedSession, StudentInfoView,
    SurgicalHistoryView,
};
