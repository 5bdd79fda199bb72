//! Configuration error types.

use thiserror::Error;

use crate::template::TemplateError;

/// Configuration loading error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read template file: {0}")]
    ReadFile(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("missing value for {0}")]
    MissingValue(String),
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("template error: {0}")]
    Template(TemplateError),
}

impl From<TemplateError> for ConfigError {
    fn from(err: TemplateError) -> Self {
        match err {
            TemplateError::MissingValue(key) => ConfigError::MissingValue(key),
            TemplateError::Parse(e) => ConfigError::Parse(e),
            TemplateError::ReadFile(e) => ConfigError::ReadFile(e),
            other => ConfigError::Template(other),
        }
    }
}
