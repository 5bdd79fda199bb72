//! Template error types.

use thiserror::Error;

/// Template parsing and substitution error.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("failed to parse template: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("missing value for {0}")]
    MissingValue(String),
    #[error("invalid value assignment: {0}")]
    InvalidAssignment(String),
    #[error("failed to read file: {0}")]
    ReadFile(#[from] std::io::Error),
    #[error("failed to load env file: {0}")]
    EnvFile(#[from] dotenvy::Error),
}
