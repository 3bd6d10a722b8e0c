//! Server configuration

use thiserror::Error;

const DEFAULT_LANG2FHIR_URL: &str = "https://experiment.app.pheno.ml/lang2fhir";
const DEFAULT_MEDPLUM_BASE_URL: &str = "https://api.medplum.com";

/// Server configuration loaded from environment variables
pub struct Config {
    pub bind_address: String,
    pub api_key: Option<String>,
    pub cors_origins: Vec<String>,
    pub rate_limit_rps: u32,
    pub lang2fhir_url: String,
    pub credentials: Credentials,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            bind_address: std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8080".into()),
            api_key: env_opt("API_KEY"),
            cors_origins: std::env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "*".into())
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            rate_limit_rps: std::env::var("RATE_LIMIT_RPS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(100),
            lang2fhir_url: std::env::var("LANG2FHIR_URL")
                .unwrap_or_else(|_| DEFAULT_LANG2FHIR_URL.into()),
            credentials: Credentials::from_env(),
        }
    }
}

/// Tokens and endpoints for the upstream services.
///
/// Checked per request so a misconfigured relay still starts and reports
/// what is missing on `/health`.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub phenoml_token: Option<String>,
    pub medplum_token: Option<String>,
    pub medplum_base_url: Option<String>,
    pub canvas_token: Option<String>,
    pub canvas_instance_identifier: Option<String>,
    /// Overrides the instance-derived Canvas FHIR URL (sandbox or local proxies)
    pub canvas_base_url: Option<String>,
}

/// Credential problems that keep the relay from serving operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("PHENOML_TOKEN environment variable not set")]
    MissingPhenomlToken,
    #[error("Exactly one of MEDPLUM_TOKEN or CANVAS_TOKEN environment variable must be set")]
    NoBackend,
    #[error("Only one of MEDPLUM_TOKEN or CANVAS_TOKEN should be set")]
    AmbiguousBackend,
    #[error("CANVAS_INSTANCE_IDENTIFIER (required when using CANVAS_TOKEN) not set")]
    MissingCanvasInstance,
}

/// The FHIR server resources are searched on and created in
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FhirBackend {
    Medplum { base_url: String, token: String },
    Canvas {
        instance: String,
        token: String,
        base_url: Option<String>,
    },
}

impl FhirBackend {
    /// Base URL of the FHIR REST API
    pub fn fhir_base_url(&self) -> String {
        match self {
            FhirBackend::Medplum { base_url, .. } => {
                format!("{}/fhir/R4", base_url.trim_end_matches('/'))
            }
            FhirBackend::Canvas {
                base_url: Some(base_url),
                ..
            } => base_url.trim_end_matches('/').to_string(),
            FhirBackend::Canvas { instance, .. } => {
                format!("https://fumage-{instance}.canvasmedical.com")
            }
        }
    }

    pub fn token(&self) -> &str {
        match self {
            FhirBackend::Medplum { token, .. } | FhirBackend::Canvas { token, .. } => token,
        }
    }

    pub fn is_canvas(&self) -> bool {
        matches!(self, FhirBackend::Canvas { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            FhirBackend::Medplum { .. } => "medplum",
            FhirBackend::Canvas { .. } => "canvas",
        }
    }
}

impl Credentials {
    pub fn from_env() -> Self {
        Self {
            phenoml_token: env_opt("PHENOML_TOKEN"),
            medplum_token: env_opt("MEDPLUM_TOKEN"),
            medplum_base_url: env_opt("MEDPLUM_BASE_URL"),
            canvas_token: env_opt("CANVAS_TOKEN"),
            canvas_instance_identifier: env_opt("CANVAS_INSTANCE_IDENTIFIER"),
            canvas_base_url: env_opt("CANVAS_BASE_URL"),
        }
    }

    pub fn phenoml_token(&self) -> Result<&str, ConfigError> {
        self.phenoml_token
            .as_deref()
            .ok_or(ConfigError::MissingPhenomlToken)
    }

    /// Pick the FHIR backend; exactly one of Medplum or Canvas must be configured
    pub fn backend(&self) -> Result<FhirBackend, ConfigError> {
        match (&self.medplum_token, &self.canvas_token) {
            (Some(_), Some(_)) => Err(ConfigError::AmbiguousBackend),
            (None, None) => Err(ConfigError::NoBackend),
            (Some(token), None) => Ok(FhirBackend::Medplum {
                base_url: self
                    .medplum_base_url
                    .clone()
                    .unwrap_or_else(|| DEFAULT_MEDPLUM_BASE_URL.to_string()),
                token: token.clone(),
            }),
            (None, Some(token)) => {
                let instance = self
                    .canvas_instance_identifier
                    .clone()
                    .ok_or(ConfigError::MissingCanvasInstance)?;
                Ok(FhirBackend::Canvas {
                    instance,
                    token: token.clone(),
                    base_url: self.canvas_base_url.clone(),
                })
            }
        }
    }

    /// Every credential problem at once, for health reporting
    pub fn missing(&self) -> Vec<ConfigError> {
        let mut missing = Vec::new();
        if self.phenoml_token.is_none() {
            missing.push(ConfigError::MissingPhenomlToken);
        }
        if let Err(e) = self.backend() {
            missing.push(e);
        }
        missing
    }
}

/// Read an environment variable, treating empty values as unset
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds() -> Credentials {
        Credentials {
            phenoml_token: Some("pheno".into()),
            ..Default::default()
        }
    }

    #[test]
    fn medplum_defaults_to_public_api() {
        let c = Credentials {
            medplum_token: Some("mp".into()),
            ..creds()
        };
        let backend = c.backend().unwrap();
        assert_eq!(backend.fhir_base_url(), "https://api.medplum.com/fhir/R4");
        assert_eq!(backend.token(), "mp");
        assert!(!backend.is_canvas());
    }

    #[test]
    fn medplum_base_url_override() {
        let c = Credentials {
            medplum_token: Some("mp".into()),
            medplum_base_url: Some("http://localhost:8103/".into()),
            ..creds()
        };
        assert_eq!(
            c.backend().unwrap().fhir_base_url(),
            "http://localhost:8103/fhir/R4"
        );
    }

    #[test]
    fn canvas_needs_instance() {
        let c = Credentials {
            canvas_token: Some("cv".into()),
            ..creds()
        };
        assert_eq!(c.backend(), Err(ConfigError::MissingCanvasInstance));

        let c = Credentials {
            canvas_instance_identifier: Some("acme".into()),
            ..c
        };
        let backend = c.backend().unwrap();
        assert!(backend.is_canvas());
        assert_eq!(backend.fhir_base_url(), "https://fumage-acme.canvasmedical.com");

        let c = Credentials {
            canvas_base_url: Some("http://localhost:9000/".into()),
            ..c
        };
        assert_eq!(c.backend().unwrap().fhir_base_url(), "http://localhost:9000");
    }

    #[test]
    fn exactly_one_backend() {
        assert_eq!(creds().backend(), Err(ConfigError::NoBackend));

        let both = Credentials {
            medplum_token: Some("mp".into()),
            canvas_token: Some("cv".into()),
            ..creds()
        };
        assert_eq!(both.backend(), Err(ConfigError::AmbiguousBackend));
    }

    #[test]
    fn missing_collects_everything() {
        let missing = Credentials::default().missing();
        assert_eq!(
            missing,
            vec![ConfigError::MissingPhenomlToken, ConfigError::NoBackend]
        );

        let ready = Credentials {
            medplum_token: Some("mp".into()),
            ..creds()
        };
        assert!(ready.missing().is_empty());
    }
}
