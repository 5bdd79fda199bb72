//! Placeholder value map.

use serde_yaml::{Mapping, Value};
use std::{collections::HashMap, env, fs, path::Path};
use tracing::debug;

use super::{TemplateError, is_token_name};

/// Env file loaded when none is named, relative to the working directory.
const DEFAULT_ENV_FILE: &str = ".env";

/// Values used to resolve placeholders.
///
/// Explicit assignments take precedence over process environment variables.
/// Environment lookup can be switched off for fully reproducible output.
#[derive(Debug, Clone)]
pub struct Values {
    explicit: HashMap<String, String>,
    use_env: bool,
}

impl Default for Values {
    fn default() -> Self {
        Self {
            explicit: HashMap::new(),
            use_env: true,
        }
    }
}

impl Values {
    /// Empty value map that falls back to the environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty value map that ignores the environment.
    pub fn explicit_only() -> Self {
        Self {
            explicit: HashMap::new(),
            use_env: false,
        }
    }

    /// Build the value map the command line describes.
    ///
    /// Later sources win: the environment (unless `use_env` is false), then
    /// the values file, then each `NAME=VALUE` assignment in order.
    pub fn from_sources(
        use_env: bool,
        values_file: Option<&Path>,
        assignments: &[String],
    ) -> Result<Self, TemplateError> {
        let mut values = if use_env {
            Self::new()
        } else {
            Self::explicit_only()
        };

        if let Some(path) = values_file {
            values.extend_from_file(path)?;
        }
        for assignment in assignments {
            values.assign(assignment)?;
        }

        Ok(values)
    }

    /// Load variables from an env file into the process environment.
    ///
    /// Without a path, `.env` in the working directory is loaded if present;
    /// parent directories are not searched. An explicit path that cannot be
    /// loaded is an error. Returns whether a file was loaded.
    pub fn load_env_file(path: Option<&Path>) -> Result<bool, TemplateError> {
        match path {
            Some(path) => {
                dotenvy::from_path(path)?;
                debug!(path = %path.display(), "Loaded env file");
                Ok(true)
            }
            None => load_optional_env_file(Path::new(DEFAULT_ENV_FILE)),
        }
    }

    /// Set a token value, replacing any previous one.
    pub fn set(&mut self, token: impl Into<String>, value: impl Into<String>) {
        self.explicit.insert(token.into(), value.into());
    }

    /// Parse and apply a `NAME=VALUE` assignment.
    pub fn assign(&mut self, assignment: &str) -> Result<(), TemplateError> {
        let (token, value) = assignment.split_once('=').ok_or_else(|| {
            TemplateError::InvalidAssignment(format!("{assignment:?} has no '='"))
        })?;

        let token = token.trim();
        if !is_token_name(token) {
            return Err(TemplateError::InvalidAssignment(format!(
                "{token:?} is not a valid placeholder name"
            )));
        }

        self.set(token, value);
        Ok(())
    }

    /// Apply every entry of a YAML mapping file (`NAME: value`).
    ///
    /// Scalar values are taken as text; `null` is an empty string.
    pub fn extend_from_file(&mut self, path: &Path) -> Result<(), TemplateError> {
        let content = fs::read_to_string(path)?;
        let mapping: Mapping = serde_yaml::from_str(&content)?;

        for (key, value) in mapping {
            let Value::String(token) = key else {
                return Err(TemplateError::InvalidAssignment(format!(
                    "non-string key in {}",
                    path.display()
                )));
            };
            if !is_token_name(&token) {
                return Err(TemplateError::InvalidAssignment(format!(
                    "{token:?} is not a valid placeholder name"
                )));
            }

            let text = match value {
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                Value::Null => String::new(),
                _ => {
                    return Err(TemplateError::InvalidAssignment(format!(
                        "{token}: value must be a scalar"
                    )));
                }
            };
            self.set(token, text);
        }

        debug!(path = %path.display(), count = self.explicit.len(), "Loaded values file");
        Ok(())
    }

    /// Value for `token`, if any.
    pub fn get(&self, token: &str) -> Option<String> {
        if let Some(value) = self.explicit.get(token) {
            return Some(value.clone());
        }
        if self.use_env {
            return env::var(token).ok();
        }
        None
    }
}

/// Load `path` if it exists; a missing file is not an error.
pub(crate) fn load_optional_env_file(path: &Path) -> Result<bool, TemplateError> {
    match dotenvy::from_path(path) {
        Ok(()) => {
            debug!(path = %path.display(), "Loaded env file");
            Ok(true)
        }
        Err(e) if e.not_found() => Ok(false),
        Err(e) => Err(e.into()),
    }
}
