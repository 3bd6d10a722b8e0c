use thiserror::Error;

/// Errors raised by the core helpers
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid profile: {profile}. Valid profiles are: {valid}")]
    UnknownProfile { profile: String, valid: String },
}
