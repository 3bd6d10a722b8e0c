//! Shared handler state

use std::sync::Arc;

use crate::config::{Config, Credentials, FhirBackend};
use crate::error::AppError;
use crate::upstream::{FhirClient, Lang2FhirClient};

/// State shared by all handlers: one HTTP connection pool and the upstream credentials
#[derive(Clone)]
pub struct AppState {
    http: reqwest::Client,
    lang2fhir_url: String,
    credentials: Arc<Credentials>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            lang2fhir_url: config.lang2fhir_url.clone(),
            credentials: Arc::new(config.credentials.clone()),
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// lang2fhir client, or 503 when PHENOML_TOKEN is missing
    pub fn lang2fhir(&self) -> Result<Lang2FhirClient, AppError> {
        let token = self.credentials.phenoml_token()?;
        Ok(Lang2FhirClient::new(
            self.http.clone(),
            self.lang2fhir_url.clone(),
            token,
        ))
    }

    /// FHIR client for the configured backend, or 503 when the backend is ambiguous
    pub fn fhir(&self) -> Result<(FhirClient, FhirBackend), AppError> {
        let backend = self.credentials.backend()?;
        Ok((FhirClient::new(self.http.clone(), &backend), backend))
    }
}
