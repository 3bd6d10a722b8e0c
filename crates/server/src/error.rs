//! Application error handling

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use lang2fhir_core::{IssueType, OperationOutcome};

use crate::config::ConfigError;

/// Application error type
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    /// lang2fhir or the FHIR server failed, or answered with something unusable
    Upstream(String),
    /// Credentials for the upstream services are missing or inconsistent
    Unavailable(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, outcome) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, OperationOutcome::invalid(&msg)),
            AppError::Upstream(msg) => {
                tracing::warn!(error = %msg, "Upstream call failed");
                (StatusCode::BAD_GATEWAY, OperationOutcome::upstream(&msg))
            }
            AppError::Unavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                OperationOutcome::error(IssueType::NotSupported, &msg),
            ),
        };

        (status, Json(outcome)).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::Unavailable(err.to_string())
    }
}

impl From<lang2fhir_core::Error> for AppError {
    fn from(err: lang2fhir_core::Error) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::Upstream(format!("Upstream request timed out: {}", err))
        } else {
            AppError::Upstream(format!("HTTP request failed: {}", err))
        }
    }
}
