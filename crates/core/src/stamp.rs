//! Reference stamping for resources generated by lang2fhir
//!
//! lang2fhir produces a resource from free text but knows nothing about the
//! patient, practitioner or location it belongs to. The caller supplies those
//! ids and they are written into the resource before it is created.

use serde_json::{Value as JsonValue, json};

/// Resource types that reference the patient through a `patient` element as well
const PATIENT_ELEMENT_TYPES: &[&str] = &["encounter", "appointmentresponse", "appointmentrecurrence"];

/// Ids to link a generated resource to
#[derive(Debug, Clone, Default)]
pub struct References<'a> {
    pub patient_id: Option<&'a str>,
    pub practitioner_id: Option<&'a str>,
    pub location_id: Option<&'a str>,
    /// Canvas requires appointments to carry their location
    pub location_required: bool,
}

/// Link `resource` to the given ids and pin its `resourceType` to `base_type`.
///
/// Non-object JSON is left as is.
pub fn stamp_references(resource: &mut JsonValue, base_type: &str, refs: &References<'_>) {
    let Some(obj) = resource.as_object_mut() else {
        return;
    };

    let kind = base_type.to_ascii_lowercase();
    let patient_ref = refs.patient_id.map(|id| reference("Patient", id));

    if kind == "appointment" {
        let mut participants = Vec::new();
        if let Some(patient) = patient_ref {
            participants.push(json!({"actor": patient, "status": "accepted"}));
        }
        if let Some(id) = refs.practitioner_id {
            participants.push(json!({"actor": reference("Practitioner", id), "status": "accepted"}));
        }
        obj.insert("participant".to_string(), JsonValue::Array(participants));
        obj.insert("status".to_string(), json!("booked"));

        if refs.location_required {
            match refs.location_id {
                Some(id) => {
                    obj.insert(
                        "supportingInformation".to_string(),
                        json!([reference("Location", id)]),
                    );
                }
                None => tracing::warn!("Appointment created without a location id"),
            }
        }
    } else if kind != "patient" {
        if let Some(patient) = patient_ref {
            obj.insert("subject".to_string(), patient.clone());
            if PATIENT_ELEMENT_TYPES.contains(&kind.as_str()) {
                obj.insert("patient".to_string(), patient);
            }
        }
    }

    obj.insert("resourceType".to_string(), json!(base_type));
}

fn reference(resource_type: &str, id: &str) -> JsonValue {
    json!({ "reference": format!("{resource_type}/{id}") })
}
