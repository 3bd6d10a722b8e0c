//! Health and metrics endpoints

use std::collections::BTreeMap;

use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;

use crate::state::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    backend: Option<&'static str>,
    /// Which credential variables are set (never their values)
    credentials: BTreeMap<&'static str, bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    missing: Vec<String>,
}

/// GET /health - Report whether the relay has what it needs to reach lang2fhir and the FHIR server
pub async fn check(State(state): State<AppState>) -> impl IntoResponse {
    let creds = state.credentials();

    let credentials = BTreeMap::from([
        ("PHENOML_TOKEN", creds.phenoml_token.is_some()),
        ("MEDPLUM_TOKEN", creds.medplum_token.is_some()),
        ("CANVAS_TOKEN", creds.canvas_token.is_some()),
        (
            "CANVAS_INSTANCE_IDENTIFIER",
            creds.canvas_instance_identifier.is_some(),
        ),
    ]);

    let missing: Vec<String> = creds.missing().iter().map(|e| e.to_string()).collect();

    if missing.is_empty() {
        let backend = creds.backend().ok().map(|b| b.name());
        (
            StatusCode::OK,
            Json(HealthResponse {
                status: "healthy",
                backend,
                credentials,
                missing,
            }),
        )
    } else {
        tracing::warn!(missing = ?missing, "Health check found missing credentials");
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "unhealthy",
                backend: None,
                credentials,
                missing,
            }),
        )
    }
}

/// GET /metrics - Render collected metrics in Prometheus text format
pub async fn metrics(Extension(handle): Extension<PrometheusHandle>) -> impl IntoResponse {
    handle.render()
}
