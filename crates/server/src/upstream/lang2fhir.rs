//! lang2fhir API client (natural language to FHIR resources and searches)

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::check_status;
use crate::error::AppError;

/// Client for the lang2fhir service
#[derive(Clone)]
pub struct Lang2FhirClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

/// Search translation returned by `POST /search`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchTranslation {
    #[serde(default)]
    pub resource_type: Option<String>,
    #[serde(default)]
    pub search_params: String,
}

#[derive(Serialize)]
struct SearchRequest<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct CreateRequest<'a> {
    version: &'a str,
    resource: &'a str,
    text: &'a str,
}

impl Lang2FhirClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    /// Translate a natural language query into a resource type and raw search parameters
    pub async fn search(&self, text: &str) -> Result<SearchTranslation, AppError> {
        let response = self
            .http
            .post(format!("{}/search", self.base_url))
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&SearchRequest { text })
            .send()
            .await?;

        check_status("lang2fhir", response)
            .await?
            .json::<SearchTranslation>()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to parse lang2fhir search response: {}", e)))
    }

    /// Generate a FHIR resource for `profile` from a natural language description
    pub async fn create(
        &self,
        profile: &str,
        text: &str,
        version: &str,
    ) -> Result<JsonValue, AppError> {
        let response = self
            .http
            .post(format!("{}/create", self.base_url))
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&CreateRequest {
                version,
                resource: profile,
                text,
            })
            .send()
            .await?;

        check_status("lang2fhir", response)
            .await?
            .json::<JsonValue>()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to parse lang2fhir resource: {}", e)))
    }
}
