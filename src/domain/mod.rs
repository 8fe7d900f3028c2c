//! Domain models and types for Ficha.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`PatientId`], [`Cui`])
//! - **Domain models** ([`Patient`], [`SurgicalEvent`], [`StudentInfo`], [`CollaboratorInfo`])
//! - **Wire drafts** ([`PatientDraft`], [`SearchDraft`], [`SurgicalHistoryDraft`]) whose
//!   `validate` methods produce the user-facing 400 messages
//! - **Error types** ([`FichaError`], [`ClientError`]) and the [`Result`] alias
//!
//! # Validation
//!
//! ```rust
//! use ficha::domain::{FichaError, PatientDraft};
//!
//! let draft = PatientDraft::default();
//! match draft.validate() {
//!     Err(FichaError::Validation(msg)) => assert_eq!(msg, "CUI es requerido."),
//!     _ => unreachable!(),
//! }
//! ```

pub mod errors;
pub mod ids;
pub mod messages;
pub mod patient;
pub mod result;
pub mod search;
pub mod student;
pub mod surgical;

// Re-export commonly used types for convenience
pub use errors::{ClientError, FichaError};
pub use ids::{Cui, PatientId, CUI_LENGTH};
pub use patient::{NewPatient, Patient, PatientDraft, PatientSummary, Sex, DATE_FORMAT};
pub use result::Result;
pub use search::{PatientPreview, SearchDraft, SearchQuery, SearchType};
pub use student::{CollaboratorInfo, StudentInfo};
pub use surgical::{
    NewSurgicalEvent, SurgicalEvent, SurgicalEventDraft, SurgicalHistory, SurgicalHistoryDraft,
};
