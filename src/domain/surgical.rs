//! Surgical history records
//!
//! One patient has zero or more surgical events. An empty history is a
//! distinct state from an unknown patient at the store level; the HTTP
//! lookup reports both as 404.

use super::errors::FichaError;
use super::ids::PatientId;
use super::messages;
use super::patient::{at_most, parse_date, required_text};
use super::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Width of the `tipo_cirugia` column
pub const MAX_SURGERY_TYPE_CHARS: usize = 100;
/// Width of the `complicaciones` column
pub const MAX_COMPLICATIONS_CHARS: usize = 500;

/// A stored surgical event, in API naming
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurgicalEvent {
    pub id: i32,
    pub surgery_type: String,
    pub surgery_date: NaiveDate,
    #[serde(default)]
    pub complications: Option<String>,
}

/// A validated surgical event, ready to insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSurgicalEvent {
    pub surgery_type: String,
    pub surgery_date: NaiveDate,
    pub complications: Option<String>,
}

/// Surgical event payload as received over HTTP
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurgicalEventDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surgery_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surgery_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complications: Option<String>,
}

impl SurgicalEventDraft {
    pub fn validate(&self) -> Result<NewSurgicalEvent> {
        let surgery_type =
            required_text(self.surgery_type.as_deref(), messages::SURGERY_TYPE_REQUIRED)?;
        let surgery_type = at_most(
            surgery_type,
            MAX_SURGERY_TYPE_CHARS,
            messages::SURGERY_TYPE_TOO_LONG,
        )?;
        let surgery_date = parse_date(
            self.surgery_date.as_deref(),
            messages::SURGERY_DATE_REQUIRED,
            messages::SURGERY_DATE_INVALID,
        )?;
        let complications = self
            .complications
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(|c| {
                at_most(
                    c.to_string(),
                    MAX_COMPLICATIONS_CHARS,
                    messages::COMPLICATIONS_TOO_LONG,
                )
            })
            .transpose()?;

        Ok(NewSurgicalEvent {
            surgery_type,
            surgery_date,
            complications,
        })
    }
}

/// Body of `POST /patient/surgical-history/{id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurgicalHistoryDraft {
    #[serde(default)]
    pub surgical_event_data: Vec<SurgicalEventDraft>,
}

impl SurgicalHistoryDraft {
    /// Validates every event; an empty list is rejected
    pub fn validate(&self) -> Result<Vec<NewSurgicalEvent>> {
        if self.surgical_event_data.is_empty() {
            return Err(FichaError::Validation(
                messages::SURGICAL_EVENTS_REQUIRED.to_string(),
            ));
        }
        self.surgical_event_data
            .iter()
            .map(SurgicalEventDraft::validate)
            .collect()
    }
}

/// Response body of the surgical history endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurgicalHistory {
    pub patient_id: PatientId,
    pub surgical_event_data: Vec<SurgicalEvent>,
}
