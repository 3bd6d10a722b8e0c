//! FHIR REST client for the configured backend (Medplum or Canvas)

use reqwest::StatusCode;
use serde_json::{Value as JsonValue, json};

use super::check_status;
use crate::config::FhirBackend;
use crate::error::AppError;

/// Client for a FHIR server's REST API
#[derive(Clone)]
pub struct FhirClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl FhirClient {
    pub fn new(http: reqwest::Client, backend: &FhirBackend) -> Self {
        Self {
            http,
            base_url: backend.fhir_base_url(),
            token: backend.token().to_string(),
        }
    }

    /// URL of a search, with the query appended verbatim
    pub fn search_url(&self, resource_type: &str, query: &str) -> String {
        if query.is_empty() {
            format!("{}/{}", self.base_url, resource_type)
        } else {
            format!("{}/{}?{}", self.base_url, resource_type, query)
        }
    }

    /// GET `{base}/{resource_type}?{query}` and return the searchset Bundle
    pub async fn search(&self, resource_type: &str, query: &str) -> Result<JsonValue, AppError> {
        let url = self.search_url(resource_type, query);
        tracing::debug!(url = %url, "FHIR search");

        let response = self
            .http
            .get(url)
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, "application/fhir+json")
            .send()
            .await?;

        check_status("FHIR server", response)
            .await?
            .json::<JsonValue>()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to parse search results: {}", e)))
    }

    /// POST a resource; returns the HTTP status and the created resource
    pub async fn create(
        &self,
        resource_type: &str,
        resource: &JsonValue,
    ) -> Result<(StatusCode, JsonValue), AppError> {
        let response = self
            .http
            .post(format!("{}/{}", self.base_url, resource_type))
            .bearer_auth(&self.token)
            .json(resource)
            .send()
            .await?;

        let response = check_status("FHIR server", response).await?;
        let status = response.status();
        let body = response.text().await?;

        // Canvas answers 201 with an empty body
        if body.trim().is_empty() {
            return Ok((status, json!({"resourceType": resource_type, "status": "created"})));
        }

        let created = serde_json::from_str(&body)
            .map_err(|e| AppError::Upstream(format!("Failed to parse created resource: {}", e)))?;
        Ok((status, created))
    }
}
