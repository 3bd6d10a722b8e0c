//! lang2fhir profiles and the FHIR resource types they produce

use once_cell::sync::Lazy;

use crate::error::Error;

/// Every profile lang2fhir can generate, paired with its base resource type
const PROFILES: &[(&str, &str)] = &[
    ("appointment", "Appointment"),
    ("condition-encounter-diagnosis", "Condition"),
    ("medicationrequest", "MedicationRequest"),
    ("careplan", "CarePlan"),
    ("condition-problems-health-concerns", "Condition"),
    ("coverage", "Coverage"),
    ("encounter", "Encounter"),
    ("invoice", "Invoice"),
    ("observation-clinical-result", "Observation"),
    ("observation-lab", "Observation"),
    ("patient", "Patient"),
    ("procedure", "Procedure"),
    ("questionnaire", "Questionnaire"),
    ("questionnaireresponse", "QuestionnaireResponse"),
    ("simple-observation", "Observation"),
    ("schedule", "Schedule"),
    ("slot", "Slot"),
    ("vital-signs", "Observation"),
];

/// Distinct resource types, sorted so lookups over them are deterministic
static RESOURCE_TYPES: Lazy<Vec<&'static str>> = Lazy::new(|| {
    let mut types: Vec<&'static str> = PROFILES.iter().map(|(_, rt)| *rt).collect();
    types.sort_unstable();
    types.dedup();
    types
});

/// Profile names in table order
pub fn profiles() -> impl Iterator<Item = &'static str> {
    PROFILES.iter().map(|(profile, _)| *profile)
}

/// Distinct resource types known to the relay
pub fn resource_types() -> &'static [&'static str] {
    &RESOURCE_TYPES
}

/// Resolve a profile to the resource type the FHIR server expects
pub fn base_resource_type(profile: &str) -> Result<&'static str, Error> {
    PROFILES
        .iter()
        .find(|(name, _)| *name == profile)
        .map(|(_, rt)| *rt)
        .ok_or_else(|| Error::UnknownProfile {
            profile: profile.to_string(),
            valid: profiles().collect::<Vec<_>>().join(", "),
        })
}
