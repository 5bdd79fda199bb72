//! Placeholder templates.
//!
//! A template is a YAML document whose string scalars may contain
//! `{NAME}` placeholders. Substitution happens on the parsed document, so a
//! supplied value can change a scalar but never the document structure.

mod error;
mod values;

pub use error::TemplateError;
pub use values::Values;

use serde_yaml::{Mapping, Value};
use std::{fs, ops::Range, path::Path};
use tracing::{debug, warn};

/// Template shipped with the binary, used when no template path is given.
pub const DEFAULT_TEMPLATE: &str = include_str!("../../templates/config.yaml");

/// A single placeholder occurrence inside a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// Token name without braces, e.g. `HOSTNAME`.
    pub token: String,
    /// Key path of the scalar holding the token, e.g. `Servers[1].host`.
    pub path: String,
}

/// A parsed configuration template.
#[derive(Debug, Clone)]
pub struct Template {
    document: Value,
}

impl Template {
    /// Parse a template from YAML source.
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let document: Value = serde_yaml::from_str(source)?;
        Ok(Self { document })
    }

    /// The built-in template.
    pub fn builtin() -> Result<Self, TemplateError> {
        Self::parse(DEFAULT_TEMPLATE)
    }

    /// Read and parse a template file, or the built-in template when `path`
    /// is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self, TemplateError> {
        match path {
            Some(path) => {
                let content = fs::read_to_string(path)?;
                debug!(path = %path.display(), "Read template file");
                Self::parse(&content)
            }
            None => {
                debug!("Using built-in template");
                Self::builtin()
            }
        }
    }

    /// Every placeholder occurrence, in document order.
    pub fn placeholders(&self) -> Vec<Placeholder> {
        let mut found = Vec::new();
        collect(&self.document, "", &mut found);
        found
    }

    /// Replace every placeholder with its value.
    ///
    /// Substitution is all or nothing: if any token has no value, nothing is
    /// returned and the error names the key path of the first unresolved
    /// occurrence. Substituted text is not scanned again.
    pub fn substitute(&self, values: &Values) -> Result<Value, TemplateError> {
        let mut document = self.document.clone();
        let mut missing = Vec::new();
        resolve(&mut document, "", values, &mut missing);

        for placeholder in &missing {
            warn!(
                token = %placeholder.token,
                key = %placeholder.path,
                "Unresolved placeholder"
            );
        }

        match missing.into_iter().next() {
            Some(first) => Err(TemplateError::MissingValue(first.path)),
            None => {
                debug!("All placeholders resolved");
                Ok(document)
            }
        }
    }
}

/// Whether `name` is a valid token name: `[A-Z_][A-Z0-9_]*`.
pub fn is_token_name(name: &str) -> bool {
    let bytes = name.as_bytes();
    !bytes.is_empty()
        && bytes
            .iter()
            .enumerate()
            .all(|(i, &b)| is_token_byte(b, i == 0))
}

fn is_token_byte(b: u8, first: bool) -> bool {
    b.is_ascii_uppercase() || b == b'_' || (!first && b.is_ascii_digit())
}

/// Byte ranges of every `{NAME}` token in `text`, braces included.
pub(crate) fn find_tokens(text: &str) -> Vec<Range<usize>> {
    let bytes = text.as_bytes();
    let mut spans = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'{' {
            let start = i + 1;
            let mut end = start;
            while end < bytes.len() && is_token_byte(bytes[end], end == start) {
                end += 1;
            }
            if end > start && end < bytes.len() && bytes[end] == b'}' {
                spans.push(i..end + 1);
                i = end + 1;
                continue;
            }
        }
        i += 1;
    }

    spans
}

fn collect(value: &Value, path: &str, found: &mut Vec<Placeholder>) {
    match value {
        Value::String(text) => {
            for span in find_tokens(text) {
                found.push(Placeholder {
                    token: text[span.start + 1..span.end - 1].to_string(),
                    path: path.to_string(),
                });
            }
        }
        Value::Mapping(mapping) => {
            for (key, child) in mapping {
                collect(child, &child_path(path, key), found);
            }
        }
        Value::Sequence(items) => {
            for (index, child) in items.iter().enumerate() {
                collect(child, &format!("{path}[{index}]"), found);
            }
        }
        Value::Tagged(tagged) => collect(&tagged.value, path, found),
        Value::Null | Value::Bool(_) | Value::Number(_) => {}
    }
}

fn resolve(value: &mut Value, path: &str, values: &Values, missing: &mut Vec<Placeholder>) {
    match value {
        Value::String(text) => {
            if let Some(resolved) = substitute_text(text, path, values, missing) {
                *text = resolved;
            }
        }
        Value::Mapping(mapping) => resolve_mapping(mapping, path, values, missing),
        Value::Sequence(items) => {
            for (index, child) in items.iter_mut().enumerate() {
                resolve(child, &format!("{path}[{index}]"), values, missing);
            }
        }
        Value::Tagged(tagged) => resolve(&mut tagged.value, path, values, missing),
        Value::Null | Value::Bool(_) | Value::Number(_) => {}
    }
}

fn resolve_mapping(
    mapping: &mut Mapping,
    path: &str,
    values: &Values,
    missing: &mut Vec<Placeholder>,
) {
    for (key, child) in mapping.iter_mut() {
        resolve(child, &child_path(path, key), values, missing);
    }
}

/// Substituted copy of `text`, or `None` when it holds no tokens.
fn substitute_text(
    text: &str,
    path: &str,
    values: &Values,
    missing: &mut Vec<Placeholder>,
) -> Option<String> {
    let spans = find_tokens(text);
    if spans.is_empty() {
        return None;
    }

    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for span in spans {
        out.push_str(&text[last..span.start]);
        let token = &text[span.start + 1..span.end - 1];
        match values.get(token) {
            Some(value) => out.push_str(&value),
            None => missing.push(Placeholder {
                token: token.to_string(),
                path: path.to_string(),
            }),
        }
        last = span.end;
    }
    out.push_str(&text[last..]);

    Some(out)
}

fn child_path(parent: &str, key: &Value) -> String {
    match key {
        Value::Number(n) => format!("{parent}[{n}]"),
        other => {
            let name = match other {
                Value::String(s) => s.clone(),
                Value::Bool(b) => b.to_string(),
                _ => "?".to_string(),
            };
            if parent.is_empty() {
                name
            } else {
                format!("{parent}.{name}")
            }
        }
    }
}

#[cfg(test)]
mod tests;
