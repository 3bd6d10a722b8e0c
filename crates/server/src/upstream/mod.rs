//! Clients for the services the relay delegates to

pub mod fhir;
pub mod lang2fhir;

pub use fhir::FhirClient;
pub use lang2fhir::{Lang2FhirClient, SearchTranslation};

use serde::Deserialize;

use crate::error::AppError;

/// Error body shapes returned by lang2fhir and FHIR servers
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum UpstreamErrorBody {
    Detail { detail: String },
    Message { message: String },
    Outcome { issue: Vec<UpstreamIssue> },
}

#[derive(Debug, Deserialize)]
struct UpstreamIssue {
    diagnostics: Option<String>,
}

/// Turn a non-2xx response into an `AppError::Upstream`, keeping the most useful message
async fn check_status(service: &str, response: reqwest::Response) -> Result<reqwest::Response, AppError> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<UpstreamErrorBody>(&body) {
        Ok(UpstreamErrorBody::Detail { detail }) => detail,
        Ok(UpstreamErrorBody::Message { message }) => message,
        Ok(UpstreamErrorBody::Outcome { issue }) => issue
            .into_iter()
            .filter_map(|i| i.diagnostics)
            .collect::<Vec<_>>()
            .join("; "),
        Err(_) => body,
    };

    Err(AppError::Upstream(format!("{} error ({}): {}", service, status, message)))
}
