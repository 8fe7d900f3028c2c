//! Domain identifier types with validation
//!
//! Newtype wrappers for the two patient keys: the surrogate database
//! identifier and the CUI, the national identity code used as the business key.

use super::messages;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of digits in a CUI
pub const CUI_LENGTH: usize = 13;

/// Surrogate patient identifier (`pacientes.id`)
///
/// # Examples
///
/// ```
/// use ficha::domain::ids::PatientId;
///
/// assert_eq!(PatientId::parse("42").map(|id| id.value()), Some(42));
/// assert!(PatientId::parse("abc").is_none());
/// assert!(PatientId::parse("-1").is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatientId(i32);

impl PatientId {
    /// Wraps a raw identifier
    pub fn new(id: i32) -> Self {
        Self(id)
    }

    /// Parses a path segment. Returns `None` for anything that is not a
    /// positive integer, so callers can treat malformed ids like unknown ones.
    pub fn parse(raw: &str) -> Option<Self> {
        raw.trim()
            .parse::<i32>()
            .ok()
            .filter(|id| *id > 0)
            .map(Self)
    }

    /// Returns the raw identifier
    pub fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Código Único de Identificación: 13 ASCII digits
///
/// # Examples
///
/// ```
/// use ficha::domain::ids::Cui;
///
/// let cui = Cui::new("1234567890101").unwrap();
/// assert_eq!(cui.as_str(), "1234567890101");
/// assert!(Cui::new("123").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cui(String);

impl Cui {
    /// Creates a new Cui, trimming surrounding whitespace
    ///
    /// # Returns
    ///
    /// Returns `Err` with the user-facing message when the value is blank or is
    /// not exactly 13 digits.
    pub fn new(cui: impl Into<String>) -> Result<Self, String> {
        let cui = cui.into();
        let cui = cui.trim();
        if cui.is_empty() {
            return Err(messages::CUI_REQUIRED.to_string());
        }
        if cui.len() != CUI_LENGTH || !cui.bytes().all(|b| b.is_ascii_digit()) {
            return Err(messages::CUI_INVALID.to_string());
        }
        Ok(Self(cui.to_string()))
    }

    /// Returns the CUI as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cui {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Cui {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Cui {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Cui> for String {
    fn from(cui: Cui) -> Self {
        cui.0
    }
}

impl AsRef<str> for Cui {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("1" => Some(1))]
    #[test_case(" 17 " => Some(17))]
    #[test_case("0" => None)]
    #[test_case("-4" => None)]
    #[test_case("abc" => None)]
    #[test_case("" => None)]
    #[test_case("99999999999" => None)]
    fn test_patient_id_parse(raw: &str) -> Option<i32> {
        PatientId::parse(raw).map(|id| id.value())
    }

    #[test]
    fn test_cui_valid() {
        let cui = Cui::new(" 2987654320101 ").unwrap();
        assert_eq!(cui.as_str(), "2987654320101");
        assert_eq!(cui.to_string(), "2987654320101");
    }

    #[test]
    fn test_cui_blank_is_required_error() {
        assert_eq!(Cui::new("   ").unwrap_err(), messages::CUI_REQUIRED);
    }

    #[test_case("123456789010" ; "twelve digits")]
    #[test_case("12345678901011" ; "fourteen digits")]
    #[test_case("12345678901a1" ; "letter inside")]
    fn test_cui_invalid(raw: &str) {
        assert_eq!(Cui::new(raw).unwrap_err(), messages::CUI_INVALID);
    }

    #[test]
    fn test_cui_serde_validates() {
        let ok: Cui = serde_json::from_str("\"1234567890101\"").unwrap();
        assert_eq!(ok.as_str(), "1234567890101");
        assert!(serde_json::from_str::<Cui>("\"12\"").is_err());
        assert_eq!(serde_json::to_string(&ok).unwrap(), "\"1234567890101\"");
    }
}
