//! Request handlers, one module per resource

pub mod affiliation;
pub mod health;
pub mod patient;
pub mod surgical_history;

use crate::domain::PatientId;
use axum::extract::rejection::PathRejection;
use axum::extract::Path;

/// A path segment as extracted, including segments axum could not decode
///
/// Handlers take the rejection too, so undecodable segments such as `%FF`
/// still go through the pipeline and get a CORS-bearing `{message}` answer.
pub type PathSegment = Result<Path<String>, PathRejection>;

/// The patient id named by `segment`, if it decodes to a positive integer
pub(crate) fn patient_id(segment: PathSegment) -> Option<PatientId> {
    match segment {
        Ok(Path(raw)) => PatientId::parse(&raw),
        Err(rejection) => {
            tracing::debug!(reason = %rejection.body_text(), "Undecodable patient id");
            None
        }
    }
}
