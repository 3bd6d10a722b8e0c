//! lang2fhir-backed operation endpoints ($nl-search, $nl-create, $rewrite)

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use lang2fhir_core::{References, base_resource_type, rewrite_search_params, stamp_references};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::AppError;
use crate::state::AppState;
use crate::upstream::SearchTranslation;

/// Request body for natural language search
#[derive(Deserialize)]
pub struct NlSearchRequest {
    query: String,
}

/// Response body for natural language search
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NlSearchResponse {
    status: &'static str,
    search_params: SearchTranslation,
    search_url: String,
    search_results: JsonValue,
    resource_type_used: String,
}

/// Request body for natural language resource creation
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NlCreateRequest {
    text: String,
    profile: String,
    patient_id: Option<String>,
    practitioner_id: Option<String>,
    location_id: Option<String>,
    #[serde(default = "default_version")]
    version: String,
}

fn default_version() -> String {
    "R4".to_string()
}

/// Response body for natural language resource creation
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NlCreateResponse {
    status: u16,
    lang2fhir_result: JsonValue,
    fhir_resource: JsonValue,
    profile_used: String,
    base_resource_type: &'static str,
}

/// Request body for a bare rewrite
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewriteRequest {
    resource_type: String,
    #[serde(default)]
    search_params: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RewriteResponse {
    resource_type: String,
    search_params: String,
}

/// Resource types end up in a URL path; anything but a plain type name is rejected
fn is_resource_type_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric())
}

/// POST /fhir/$nl-search — Natural language search
///
/// Asks lang2fhir for a resource type and raw search parameters, qualifies
/// bare reference ids, and runs the search on the FHIR server.
pub async fn nl_search(
    State(state): State<AppState>,
    Json(body): Json<NlSearchRequest>,
) -> Result<impl IntoResponse, AppError> {
    if body.query.trim().is_empty() {
        return Err(AppError::BadRequest("No query provided".to_string()));
    }

    let lang2fhir = state.lang2fhir()?;
    let (fhir, _) = state.fhir()?;

    tracing::info!(query = &body.query, "Natural language search");

    let translation = lang2fhir.search(&body.query).await?;
    let resource_type = translation
        .resource_type
        .clone()
        .filter(|rt| is_resource_type_name(rt))
        .ok_or_else(|| {
            AppError::Upstream("Could not determine resource type from query".to_string())
        })?;

    tracing::info!(
        resource_type = %resource_type,
        params = %translation.search_params,
        "lang2fhir translated query"
    );

    let query = rewrite_search_params(&translation.search_params, &resource_type);
    let search_url = fhir.search_url(&resource_type, &query);
    let search_results = fhir.search(&resource_type, &query).await?;

    Ok(Json(NlSearchResponse {
        status: "success",
        search_params: translation,
        search_url,
        search_results,
        resource_type_used: resource_type,
    }))
}

/// POST /fhir/$nl-create — Natural language resource creation
///
/// Generates a resource for the requested profile with lang2fhir, links it
/// to the given patient/practitioner/location, and creates it on the FHIR server.
pub async fn nl_create(
    State(state): State<AppState>,
    Json(body): Json<NlCreateRequest>,
) -> Result<impl IntoResponse, AppError> {
    let base_type = base_resource_type(&body.profile)?;
    if body.text.trim().is_empty() {
        return Err(AppError::BadRequest("No text provided".to_string()));
    }

    let lang2fhir = state.lang2fhir()?;
    let (fhir, backend) = state.fhir()?;

    tracing::info!(
        profile = %body.profile,
        resource_type = base_type,
        backend = backend.name(),
        "Natural language create"
    );

    let mut resource = lang2fhir
        .create(&body.profile, &body.text, &body.version)
        .await?;

    stamp_references(
        &mut resource,
        base_type,
        &References {
            patient_id: body.patient_id.as_deref(),
            practitioner_id: body.practitioner_id.as_deref(),
            location_id: body.location_id.as_deref(),
            location_required: backend.is_canvas(),
        },
    );

    let (status, created) = fhir.create(base_type, &resource).await?;
    tracing::info!(status = status.as_u16(), resource_type = base_type, "Resource created");

    Ok((
        StatusCode::CREATED,
        Json(NlCreateResponse {
            status: status.as_u16(),
            lang2fhir_result: resource,
            fhir_resource: created,
            profile_used: body.profile,
            base_resource_type: base_type,
        }),
    ))
}

/// POST /fhir/$rewrite — Apply the reference rewrite without calling any upstream service
pub async fn rewrite(Json(body): Json<RewriteRequest>) -> Result<impl IntoResponse, AppError> {
    if !is_resource_type_name(&body.resource_type) {
        return Err(AppError::BadRequest(format!(
            "Invalid resource type: '{}'",
            body.resource_type
        )));
    }

    let search_params = rewrite_search_params(&body.search_params, &body.resource_type);
    Ok(Json(RewriteResponse {
        resource_type: body.resource_type,
        search_params,
    }))
}
