//! HTTP error taxonomy
//!
//! Handlers return [`ApiError`]; the pipeline renders it through the response
//! builder so error responses carry the same CORS headers as successes.

use crate::api::response::{ApiResponse, CorsHeaders, ResponseBuilder};
use crate::domain::{messages, FichaError};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use serde::Serialize;
use thiserror::Error;

/// Errors a handler can answer with
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// 400 with a user-facing message
    #[error("{0}")]
    BadRequest(String),

    /// 404 with a resource-specific message
    #[error("{0}")]
    NotFound(String),

    /// 409, a uniqueness violation
    #[error("{0}")]
    Conflict(String),

    #[error("Método no permitido.")]
    MethodNotAllowed,

    /// 503, a dependency is unreachable
    #[error("{0}")]
    Unavailable(String),

    /// 500; the detail is returned in the `error` field
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Body of every error response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }

    pub fn body(&self) -> ErrorBody {
        match self {
            ApiError::Internal(detail) => ErrorBody {
                message: messages::INTERNAL_ERROR.to_string(),
                error: Some(detail.clone()),
            },
            ApiError::MethodNotAllowed => ErrorBody {
                message: messages::METHOD_NOT_ALLOWED.to_string(),
                error: None,
            },
            ApiError::BadRequest(message)
            | ApiError::NotFound(message)
            | ApiError::Conflict(message)
            | ApiError::Unavailable(message) => ErrorBody {
                message: message.clone(),
                error: None,
            },
        }
    }

    pub fn into_api_response(self, cors: &CorsHeaders) -> ApiResponse {
        ResponseBuilder::new(self.status_code())
            .cors(cors)
            .json(&self.body())
    }
}

impl From<FichaError> for ApiError {
    fn from(err: FichaError) -> Self {
        match err {
            FichaError::Validation(message) => ApiError::BadRequest(message),
            FichaError::NotFound(message) => ApiError::NotFound(message),
            FichaError::Conflict(message) => ApiError::Conflict(message),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(format!(
            "{} {}",
            messages::INVALID_JSON,
            rejection.body_text()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Method;
    use test_case::test_case;

    #[test_case(ApiError::BadRequest("x".into()) => 400)]
    #[test_case(ApiError::NotFound("x".into()) => 404)]
    #[test_case(ApiError::Conflict("x".into()) => 409)]
    #[test_case(ApiError::MethodNotAllowed => 405)]
    #[test_case(ApiError::Unavailable("x".into()) => 503)]
    #[test_case(ApiError::Internal("x".into()) => 500)]
    fn test_status_codes(error: ApiError) -> u16 {
        error.status_code().as_u16()
    }

    #[test]
    fn test_domain_errors_map_to_http() {
        assert_eq!(
            ApiError::from(FichaError::Validation(messages::CUI_REQUIRED.into())),
            ApiError::BadRequest(messages::CUI_REQUIRED.into())
        );
        assert_eq!(
            ApiError::from(FichaError::Conflict(messages::CUI_DUPLICATE.into())),
            ApiError::Conflict(messages::CUI_DUPLICATE.into())
        );
        assert!(matches!(
            ApiError::from(FichaError::Database("pool closed".into())),
            ApiError::Internal(ref detail) if detail.contains("pool closed")
        ));
    }

    #[test]
    fn test_internal_body_carries_error() {
        let body = serde_json::to_value(ApiError::Internal("boom".into()).body()).unwrap();
        assert_eq!(body["message"], messages::INTERNAL_ERROR);
        assert_eq!(body["error"], "boom");

        let body = serde_json::to_value(ApiError::NotFound("nada".into()).body()).unwrap();
        assert_eq!(body, serde_json::json!({ "message": "nada" }));
    }

    #[test]
    fn test_error_response_has_cors() {
        let response = ApiError::MethodNotAllowed
            .into_api_response(&CorsHeaders::permissive(&[Method::GET]));
        assert_eq!(response.status_code(), 405);
        assert_eq!(response.header("Access-Control-Allow-Origin"), Some("*"));
        assert_eq!(response.body(), r#"{"message":"Método no permitido."}"#);
    }
}
