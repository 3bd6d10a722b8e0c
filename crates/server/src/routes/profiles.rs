//! Profile listing endpoint

use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileEntry {
    profile: &'static str,
    resource_type: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilesResponse {
    profiles: Vec<ProfileEntry>,
    resource_types: &'static [&'static str],
}

/// GET /profiles - List the lang2fhir profiles accepted by `$nl-create`
pub async fn list() -> Json<ProfilesResponse> {
    let profiles = lang2fhir_core::profiles()
        .filter_map(|profile| {
            lang2fhir_core::base_resource_type(profile)
                .ok()
                .map(|resource_type| ProfileEntry {
                    profile,
                    resource_type,
                })
        })
        .collect();

    Json(ProfilesResponse {
        profiles,
        resource_types: lang2fhir_core::resource_types(),
    })
}
