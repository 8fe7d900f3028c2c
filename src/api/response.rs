//! Response builder
//!
//! Every handler answer, error or success, is assembled here so that status,
//! CORS headers and JSON body are produced the same way. An [`ApiResponse`]
//! serializes as the `{statusCode, headers, body}` envelope, with `body` a
//! JSON string, and converts into the `axum` response sent on the wire.

use crate::domain::messages;
use axum::http::{header, HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::collections::BTreeMap;

pub const ALLOW_ORIGIN: &str = "Access-Control-Allow-Origin";
pub const ALLOW_METHODS: &str = "Access-Control-Allow-Methods";
pub const ALLOW_HEADERS: &str = "Access-Control-Allow-Headers";

/// Origin used when no explicit one is configured
pub const ANY_ORIGIN: &str = "*";

/// CORS headers for one route
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsHeaders {
    allow_origin: String,
    allow_methods: String,
}

impl CorsHeaders {
    /// CORS for `origin` allowing `methods`; `OPTIONS` is always appended
    pub fn new(origin: impl Into<String>, methods: &[Method]) -> Self {
        let mut allowed: Vec<&str> = methods.iter().map(Method::as_str).collect();
        if !methods.contains(&Method::OPTIONS) {
            allowed.push("OPTIONS");
        }
        Self {
            allow_origin: origin.into(),
            allow_methods: allowed.join(", "),
        }
    }

    /// Any origin, with the given method whitelist
    pub fn permissive(methods: &[Method]) -> Self {
        Self::new(ANY_ORIGIN, methods)
    }

    pub fn allow_origin(&self) -> &str {
        &self.allow_origin
    }

    pub fn allow_methods(&self) -> &str {
        &self.allow_methods
    }
}

/// Immutable response descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    status_code: u16,
    headers: BTreeMap<String, String>,
    body: String,
}

impl ApiResponse {
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// The serialized JSON body; empty for bodiless responses
    pub fn body(&self) -> &str {
        &self.body
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        let mut headers = HeaderMap::with_capacity(self.headers.len());
        for (name, value) in &self.headers {
            match (
                HeaderName::try_from(name.as_str()),
                HeaderValue::try_from(value.as_str()),
            ) {
                (Ok(name), Ok(value)) => {
                    headers.insert(name, value);
                }
                _ => tracing::warn!(header = %name, "Dropping invalid response header"),
            }
        }
        (self.status(), headers, self.body).into_response()
    }
}

/// Fluent builder for [`ApiResponse`]
///
/// # Example
///
/// ```
/// use axum::http::{Method, StatusCode};
/// use ficha::api::response::{CorsHeaders, ResponseBuilder};
///
/// let response = ResponseBuilder::new(StatusCode::OK)
///     .cors(&CorsHeaders::permissive(&[Method::GET]))
///     .json(&serde_json::json!({ "exists": true }));
///
/// assert_eq!(response.status_code(), 200);
/// assert_eq!(response.header("Access-Control-Allow-Origin"), Some("*"));
/// assert_eq!(response.header("Access-Control-Allow-Methods"), Some("GET, OPTIONS"));
/// assert_eq!(response.body(), r#"{"exists":true}"#);
/// ```
#[derive(Debug, Clone)]
pub struct ResponseBuilder {
    status: StatusCode,
    headers: BTreeMap<String, String>,
}

impl ResponseBuilder {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: BTreeMap::new(),
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn cors(self, cors: &CorsHeaders) -> Self {
        self.header(ALLOW_ORIGIN, cors.allow_origin.clone())
            .header(ALLOW_METHODS, cors.allow_methods.clone())
            .header(ALLOW_HEADERS, "Content-Type")
    }

    /// Finish with a JSON body
    ///
    /// A payload that cannot be serialized turns the response into a 500 with
    /// the serializer error, keeping the headers already set.
    pub fn json<T: Serialize + ?Sized>(self, payload: &T) -> ApiResponse {
        match serde_json::to_string(payload) {
            Ok(body) => self.finish(body),
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize response body");
                let body = serde_json::json!({
                    "message": messages::INTERNAL_ERROR,
                    "error": e.to_string(),
                })
                .to_string();
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    ..self
                }
                .finish(body)
            }
        }
    }

    /// Finish without a body
    pub fn empty(self) -> ApiResponse {
        ApiResponse {
            status_code: self.status.as_u16(),
            headers: self.headers,
            body: String::new(),
        }
    }

    fn finish(self, body: String) -> ApiResponse {
        let mut response = self
            .header(header::CONTENT_TYPE.as_str(), "application/json")
            .empty();
        response.body = body;
        response
    }
}
