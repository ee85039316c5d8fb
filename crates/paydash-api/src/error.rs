//! HTTP error responses

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

/// Error body returned by every endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short error description
    pub error: String,
    /// Machine readable error code
    pub code: String,
    /// Offending input field, for validation errors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Errors surfaced by the request handlers
#[derive(Debug)]
pub enum ApiError {
    /// Error from the core or metrics libraries
    Core(paydash_core::Error),
    /// Body that axum could not read as JSON
    Json(JsonRejection),
}

impl From<paydash_core::Error> for ApiError {
    fn from(err: paydash_core::Error) -> Self {
        Self::Core(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Json(rejection)
    }
}

impl ApiError {
    fn status_and_body(&self) -> (StatusCode, ErrorResponse) {
        use paydash_core::Error;

        match self {
            Self::Json(rejection) => (
                rejection.status(),
                ErrorResponse {
                    error: "Invalid JSON body".to_string(),
                    code: "INVALID_JSON".to_string(),
                    field: None,
                    message: Some(rejection.body_text()),
                },
            ),
            Self::Core(Error::Validation { field, message }) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: "Invalid input".to_string(),
                    code: "VALIDATION_ERROR".to_string(),
                    field: Some(field.clone()),
                    message: Some(message.clone()),
                },
            ),
            Self::Core(err @ (Error::InvalidTimestamp { .. } | Error::UnknownStatus { .. })) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: "Invalid input".to_string(),
                    code: "VALIDATION_ERROR".to_string(),
                    field: None,
                    message: Some(err.to_string()),
                },
            ),
            Self::Core(err @ Error::LimitExceeded { .. }) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                ErrorResponse {
                    error: "Payload too large".to_string(),
                    code: "LIMIT_EXCEEDED".to_string(),
                    field: None,
                    message: Some(err.to_string()),
                },
            ),
            Self::Core(err @ Error::Configuration { .. }) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    error: "Server misconfigured".to_string(),
                    code: "CONFIGURATION_ERROR".to_string(),
                    field: None,
                    message: Some(err.to_string()),
                },
            ),
            Self::Core(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    error: "Internal server error".to_string(),
                    code: "INTERNAL_ERROR".to_string(),
                    field: None,
                    message: None,
                },
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();

        if status.is_server_error() {
            match &self {
                Self::Core(err) => error!("Request failed: {}", err),
                Self::Json(rejection) => error!("Request failed: {}", rejection.body_text()),
            }
        } else {
            warn!(status = status.as_u16(), code = %body.code, field = ?body.field, "Rejected request");
        }

        (status, Json(body)).into_response()
    }
}
