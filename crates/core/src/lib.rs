//! lang2fhir-core: search rewriting and resource helpers for the lang2fhir relay
//!
//! This crate holds the pure logic of the relay: the profile table, the
//! reference-parameter rewriter applied to lang2fhir search output, reference
//! stamping for generated resources, and the OperationOutcome body used in
//! error responses.

pub mod error;
pub mod outcome;
pub mod profiles;
pub mod reference;
pub mod stamp;

pub use error::Error;
pub use outcome::{IssueSeverity, IssueType, OperationOutcome, OperationOutcomeIssue};
pub use profiles::{base_resource_type, profiles, resource_types};
pub use reference::{PAGE_SIZE, rewrite_search_params};
pub use stamp::{References, stamp_references};
