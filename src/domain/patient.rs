//! Patient domain model
//!
//! A patient is created once through registration and read afterwards. The
//! [`PatientDraft`] is the wire shape of a registration request: every field is
//! optional so that a missing field produces a descriptive validation message
//! instead of a generic deserialization failure.

use super::errors::FichaError;
use super::ids::{Cui, PatientId};
use super::messages;
use super::Result;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Date format used on the wire for every date field
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Width of the `nombres` and `apellidos` columns
pub const MAX_NAME_CHARS: usize = 100;

/// Patient sex as stored in `pacientes.sexo`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Sex {
    /// Single-letter storage code
    pub fn code(&self) -> &'static str {
        match self {
            Sex::Male => "M",
            Sex::Female => "F",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Sex {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "M" => Ok(Sex::Male),
            "F" => Ok(Sex::Female),
            _ => Err(messages::SEX_INVALID.to_string()),
        }
    }
}

/// A stored patient, in API naming
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: PatientId,
    pub cui: Cui,
    pub names: String,
    pub last_names: String,
    pub sex: Sex,
    pub birthdate: NaiveDate,
}

impl Patient {
    /// Display name used by previews
    pub fn full_name(&self) -> String {
        format!("{} {}", self.names, self.last_names)
    }
}

/// A validated registration, ready to insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPatient {
    pub cui: Cui,
    pub names: String,
    pub last_names: String,
    pub sex: Sex,
    pub birthdate: NaiveDate,
}

/// Registration payload as received over HTTP or built by the registration view
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cui: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub names: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_names: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sex: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthdate: Option<String>,
}

impl PatientDraft {
    /// Validates the draft against today's date
    ///
    /// # Errors
    ///
    /// Returns [`FichaError::Validation`] carrying the message for the first
    /// offending field, checked in the order cui, names, last names, sex,
    /// birthdate.
    pub fn validate(&self) -> Result<NewPatient> {
        self.validate_at(Utc::now().date_naive())
    }

    /// Validates the draft, rejecting birthdates after `today`
    pub fn validate_at(&self, today: NaiveDate) -> Result<NewPatient> {
        let cui = match self.cui.as_deref() {
            Some(raw) => Cui::new(raw).map_err(FichaError::Validation)?,
            None => return Err(FichaError::Validation(messages::CUI_REQUIRED.to_string())),
        };

        let names = required_text(self.names.as_deref(), messages::NAMES_REQUIRED)?;
        let names = at_most(names, MAX_NAME_CHARS, messages::NAMES_TOO_LONG)?;
        let last_names = required_text(self.last_names.as_deref(), messages::LAST_NAMES_REQUIRED)?;
        let last_names = at_most(last_names, MAX_NAME_CHARS, messages::LAST_NAMES_TOO_LONG)?;

        let sex = match self.sex.as_deref().map(str::trim) {
            None | Some("") => {
                return Err(FichaError::Validation(messages::SEX_REQUIRED.to_string()))
            }
            Some(raw) => raw.parse::<Sex>().map_err(FichaError::Validation)?,
        };

        let birthdate = parse_date(
            self.birthdate.as_deref(),
            messages::BIRTHDATE_REQUIRED,
            messages::BIRTHDATE_INVALID,
        )?;
        if birthdate > today {
            return Err(FichaError::Validation(
                messages::BIRTHDATE_IN_FUTURE.to_string(),
            ));
        }

        Ok(NewPatient {
            cui,
            names,
            last_names,
            sex,
            birthdate,
        })
    }
}

/// Returns the trimmed value or a validation error with `message`
pub(crate) fn required_text(value: Option<&str>, message: &str) -> Result<String> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(FichaError::Validation(message.to_string())),
    }
}

/// Rejects `value` when it has more than `max` characters
pub(crate) fn at_most(value: String, max: usize, message: &str) -> Result<String> {
    if value.chars().count() > max {
        return Err(FichaError::Validation(message.to_string()));
    }
    Ok(value)
}

/// Parses an optional `YYYY-MM-DD` date with distinct messages for missing and malformed
pub(crate) fn parse_date(value: Option<&str>, missing: &str, invalid: &str) -> Result<NaiveDate> {
    match value.map(str::trim) {
        None | Some("") => Err(FichaError::Validation(missing.to_string())),
        Some(raw) => NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .map_err(|_| FichaError::Validation(invalid.to_string())),
    }
}

/// Search row: the subset of a patient returned by `POST /patient/search`
///
/// Keeps the storage column names, which the API client turns into previews.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientSummary {
    pub id: PatientId,
    pub nombres: String,
    pub apellidos: String,
}
