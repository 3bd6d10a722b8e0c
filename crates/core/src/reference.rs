//! Reference rewriting for lang2fhir search parameters
//!
//! lang2fhir answers a search request with a raw query string such as
//! `actor=0a1b-22&status=booked`. FHIR servers expect reference parameters
//! as `ResourceType/id`, so bare identifiers are qualified here before the
//! query is sent on. Whether a value is an identifier, and which type it
//! refers to, is decided heuristically from the value shape and the
//! parameter name.

use crate::profiles::resource_types;

/// Page size appended to every rewritten search
pub const PAGE_SIZE: u32 = 250;

const COUNT_PARAM: &str = "_count";

/// Common reference parameter names and the resource type they point to
const PARAM_RESOURCE_TYPES: &[(&str, &str)] = &[
    ("patient", "Patient"),
    ("subject", "Patient"),
    ("practitioner", "Practitioner"),
    ("actor", "Practitioner"),
    ("provider", "Practitioner"),
    ("schedule", "Schedule"),
    ("encounter", "Encounter"),
    ("organization", "Organization"),
    ("location", "Location"),
    ("slot", "Slot"),
    ("appointment", "Appointment"),
];

/// Rewrite a raw `name=value&...` query string for a search on `detected_resource_type`.
///
/// Identifier-shaped values get a `Type/` prefix when a type can be inferred
/// from the parameter name, and `_count=250` is appended unless that exact
/// segment is already present, so a lang2fhir-supplied `_count` never lifts
/// the cap and rewriting twice is a no-op. Segments that cannot be rewritten are passed through, so the
/// function never fails.
pub fn rewrite_search_params(raw: &str, detected_resource_type: &str) -> String {
    let mut parts: Vec<String> = Vec::new();
    let mut has_page_size = false;

    let segments = if raw.is_empty() { None } else { Some(raw.split('&')) };
    for segment in segments.into_iter().flatten() {
        match segment.split_once('=') {
            Some((name, value)) => {
                has_page_size |= name == COUNT_PARAM && value == PAGE_SIZE.to_string();
                parts.push(rewrite_param(name, value, detected_resource_type));
            }
            None => parts.push(segment.to_string()),
        }
    }

    if !has_page_size {
        parts.push(format!("{COUNT_PARAM}={PAGE_SIZE}"));
    }

    let rewritten = parts.join("&");
    tracing::debug!(
        resource_type = detected_resource_type,
        raw = raw,
        rewritten = %rewritten,
        "Rewrote search parameters"
    );
    rewritten
}

fn rewrite_param(name: &str, value: &str, detected_resource_type: &str) -> String {
    // Slot searches speak of "available" slots, FHIR calls them "free"
    let value = if detected_resource_type == "Slot" && name == "status" && value == "available" {
        "free"
    } else {
        value
    };

    if value.contains('/') || !is_identifier_shaped(value) {
        return format!("{name}={value}");
    }

    match infer_reference_type(name) {
        Some(resource_type) => format!("{name}={resource_type}/{value}"),
        None => format!("{name}={value}"),
    }
}

/// UUIDs carry dashes; some servers hand out long zero-padded numeric ids.
fn is_identifier_shaped(value: &str) -> bool {
    value.contains('-') || (value.starts_with('0') && value.chars().count() > 20)
}

fn infer_reference_type(name: &str) -> Option<String> {
    if let Some((_, resource_type)) = PARAM_RESOURCE_TYPES.iter().find(|(param, _)| *param == name)
    {
        return Some(resource_type.to_string());
    }

    if let Some(stem) = name.strip_suffix("Id") {
        return capitalize_first(stem);
    }

    resource_types()
        .iter()
        .find(|rt| rt.eq_ignore_ascii_case(name))
        .map(|rt| rt.to_string())
}

/// Uppercase the first character only; the remainder keeps its casing.
fn capitalize_first(stem: &str) -> Option<String> {
    let mut chars = stem.chars();
    let first = chars.next()?;
    Some(first.to_uppercase().chain(chars).collect())
}
