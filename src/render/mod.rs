//! Output rendering: `config.inc.php` and configuration dumps.

mod php;

pub use php::render_php;

use clap::ValueEnum;
use sha2::{Digest, Sha256};
use std::{
    fs,
    io::{self, Write},
    path::Path,
};
use tempfile::NamedTempFile;
use tracing::info;

use crate::config::Config;

/// Rendering error.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Format for `dump` output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DumpFormat {
    #[default]
    Yaml,
    Json,
}

/// Serialize the redacted configuration.
pub fn render_dump(config: &Config, format: DumpFormat) -> Result<String, RenderError> {
    let redacted = config.redacted();
    Ok(match format {
        DumpFormat::Yaml => serde_yaml::to_string(&redacted)?,
        DumpFormat::Json => {
            let mut out = serde_json::to_string_pretty(&redacted)?;
            out.push('\n');
            out
        }
    })
}

/// Hex SHA-256 of `contents`.
pub fn fingerprint(contents: &str) -> String {
    hex::encode(Sha256::digest(contents.as_bytes()))
}

/// Write `contents` to `path` through a fresh temporary file in the same
/// directory, so readers never see a partial file.
///
/// The temporary file is created exclusively with owner-only permissions
/// and is removed if anything fails before it replaces `path`. An existing
/// symlink at `path` is replaced, not followed.
///
/// Returns the fingerprint of what was written.
pub fn write_output(path: &Path, contents: &str) -> Result<String, RenderError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents.as_bytes())?;
    restrict_permissions(tmp.as_file())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;

    let digest = fingerprint(contents);
    info!(
        path = %path.display(),
        bytes = contents.len(),
        sha256 = %digest,
        "Configuration written"
    );
    Ok(digest)
}

/// The output holds credentials: owner read/write, group read.
#[cfg(unix)]
fn restrict_permissions(file: &fs::File) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(0o640))
}

#[cfg(not(unix))]
fn restrict_permissions(_file: &fs::File) -> io::Result<()> {
    Ok(())
}
