//! Domain error types
//!
//! This module defines the error hierarchy for Ficha. Errors are domain-specific
//! and don't expose third-party types; adapters convert driver errors into these
//! variants at the boundary.

use thiserror::Error;

/// Main Ficha error type
///
/// This is the primary error type used by the store, configuration and
/// service layers. The HTTP layer maps it onto status codes.
#[derive(Debug, Error)]
pub enum FichaError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Database-related errors (connection, query, pool)
    #[error("Database error: {0}")]
    Database(String),

    /// Input that failed validation. The message is user-facing.
    #[error("{0}")]
    Validation(String),

    /// The requested resource does not exist. The message is user-facing.
    #[error("{0}")]
    NotFound(String),

    /// A uniqueness constraint was violated. The message is user-facing.
    #[error("{0}")]
    Conflict(String),

    /// Patient API client errors
    #[error("API client error: {0}")]
    Client(#[from] ClientError),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Patient API client errors
///
/// Raised by [`crate::client::PatientApiClient`]. Each variant maps to one
/// status range returned by the server, plus transport failures and schema
/// drift between client and server.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The request never produced an HTTP response
    #[error("Failed to reach the patient API: {0}")]
    Transport(String),

    /// 4xx other than 404/409
    #[error("Bad request ({status}): {message}")]
    BadRequest { status: u16, message: String },

    /// 404
    #[error("Not found: {0}")]
    NotFound(String),

    /// 409
    #[error("Conflict: {0}")]
    Conflict(String),

    /// 5xx
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// The server answered with a shape the client does not understand
    #[error("API contract changed: {0}")]
    ContractChanged(String),
}

impl ClientError {
    /// Localized message suitable for showing to the person using the client
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Transport(_) => {
                "No se pudo conectar con el servidor. Intente de nuevo.".to_string()
            }
            ClientError::BadRequest { message, .. } => format!("Solicitud inválida: {message}"),
            ClientError::NotFound(message) => format!("No encontrado: {message}"),
            ClientError::Conflict(message) => format!("Conflicto: {message}"),
            ClientError::Server { .. } => {
                "Error del servidor. Contacte al administrador.".to_string()
            }
            ClientError::ContractChanged(_) => {
                "La API cambió y la respuesta no es compatible con este cliente.".to_string()
            }
        }
    }

    /// Classify a non-success HTTP status and its server message
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            404 => ClientError::NotFound(message),
            409 => ClientError::Conflict(message),
            400..=499 => ClientError::BadRequest { status, message },
            500..=599 => ClientError::Server { status, message },
            _ => ClientError::ContractChanged(format!(
                "unexpected status {status}: {message}"
            )),
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for FichaError {
    fn from(err: std::io::Error) -> Self {
        FichaError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for FichaError {
    fn from(err: serde_json::Error) -> Self {
        FichaError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for FichaError {
    fn from(err: toml::de::Error) -> Self {
        FichaError::Configuration(format!("TOML parse error: {err}"))
    }
}
