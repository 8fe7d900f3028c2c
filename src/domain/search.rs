//! Patient search types

use super::errors::FichaError;
use super::ids::PatientId;
use super::messages;
use super::patient::required_text;
use super::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which column a search value is matched against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchType {
    /// Case-insensitive substring of `nombres || ' ' || apellidos`
    Nombres,
    /// Exact student carnet
    Carnet,
    /// Exact collaborator code
    CodigoColaborador,
}

impl SearchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchType::Nombres => "Nombres",
            SearchType::Carnet => "Carnet",
            SearchType::CodigoColaborador => "CodigoColaborador",
        }
    }
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchType {
    type Err = String;

    /// Accepts the wire names case-insensitively, plus the short CLI aliases
    /// `nombre`, `codigo` and `colaborador`.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nombres" | "nombre" => Ok(SearchType::Nombres),
            "carnet" => Ok(SearchType::Carnet),
            "codigocolaborador" | "codigo" | "colaborador" => Ok(SearchType::CodigoColaborador),
            other => Err(format!("Tipo de búsqueda inválido: {other}.")),
        }
    }
}

/// A validated search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub search_type: SearchType,
    pub query: String,
}

impl SearchQuery {
    pub fn new(search_type: SearchType, query: impl Into<String>) -> Self {
        Self {
            search_type,
            query: query.into(),
        }
    }
}

/// Search payload as received over HTTP
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchDraft {
    #[serde(default)]
    pub search_type: Option<String>,
    #[serde(default)]
    pub query: Option<String>,
}

impl SearchDraft {
    /// # Errors
    ///
    /// Returns [`FichaError::Validation`] when the type is missing or unknown, or
    /// the value is blank.
    pub fn validate(&self) -> Result<SearchQuery> {
        let search_type = match self.search_type.as_deref().map(str::trim) {
            None | Some("") => {
                return Err(FichaError::Validation(
                    messages::SEARCH_TYPE_REQUIRED.to_string(),
                ))
            }
            Some(raw) => raw.parse::<SearchType>().map_err(FichaError::Validation)?,
        };
        let query = required_text(self.query.as_deref(), messages::SEARCH_VALUE_REQUIRED)?;
        Ok(SearchQuery { search_type, query })
    }
}

/// Minimal patient projection shown in search results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientPreview {
    pub id: PatientId,
    pub names: String,
}
