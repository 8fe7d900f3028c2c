//! Student and collaborator information attached to a patient

use super::ids::PatientId;
use serde::{Deserialize, Serialize};

/// University student data (`estudiantes`), in API naming
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentInfo {
    pub patient_id: PatientId,
    pub carnet: String,
    pub career: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Staff data (`colaboradores`), in API naming
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollaboratorInfo {
    pub patient_id: PatientId,
    pub code: String,
    pub position: String,
    pub department: String,
}
