use serde::{Deserialize, Serialize};

/// Severity of the issue
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Error,
}

/// Type of issue (the subset of the FHIR value set the relay reports)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum IssueType {
    Invalid,
    Login,
    NotSupported,
    Transient,
    Throttled,
}

/// A single issue inside an OperationOutcome
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OperationOutcomeIssue {
    pub severity: IssueSeverity,
    pub code: IssueType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<String>,
}

/// FHIR OperationOutcome resource (simplified)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OperationOutcome {
    pub resource_type: String,
    pub issue: Vec<OperationOutcomeIssue>,
}

impl OperationOutcome {
    /// Error outcome with an explicit issue type
    pub fn error(code: IssueType, message: &str) -> Self {
        Self {
            resource_type: "OperationOutcome".to_string(),
            issue: vec![OperationOutcomeIssue {
                severity: IssueSeverity::Error,
                code,
                diagnostics: Some(message.to_string()),
            }],
        }
    }

    /// Invalid request content
    pub fn invalid(message: &str) -> Self {
        Self::error(IssueType::Invalid, message)
    }

    /// Missing or wrong credentials
    pub fn unauthorized(message: &str) -> Self {
        Self::error(IssueType::Login, message)
    }

    /// Upstream service failed or answered with something unusable
    pub fn upstream(message: &str) -> Self {
        Self::error(IssueType::Transient, message)
    }
}
