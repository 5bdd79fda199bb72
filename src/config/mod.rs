//! Configuration model, loading and validation.
//!
//! A [`Config`] is built once from a template: placeholders are resolved,
//! the document is deserialized with serde_yaml, then validated. It is
//! read-only afterwards.

mod error;
mod options;
mod scalar;
mod server;
mod storage;

pub use error::ConfigError;
pub use options::{Gd2Available, RecodingEngine, SendErrorReports};
pub use server::{AuthType, ConnectType, ServerEntry};
pub use storage::{StorageRole, StorageTables};

use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, path::Path};
use tracing::{info, warn};

use crate::template::{Template, Values};

/// Placeholder shown instead of secrets in redacted output.
pub const REDACTED: &str = "***";

/// Length phpMyAdmin expects for `blowfish_secret`, in bytes.
const BLOWFISH_SECRET_LEN: usize = 32;

/// Root configuration structure (`$cfg`).
///
/// Required: at least one server with a host. Everything else falls back to
/// phpMyAdmin's own defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Secret used by cookie authentication to encrypt the password.
    pub blowfish_secret: String,
    /// Server profiles keyed by their positive index.
    #[serde(rename = "Servers")]
    pub servers: BTreeMap<u32, ServerEntry>,
    #[serde(
        rename = "PmaNoRelation_DisableWarning",
        deserialize_with = "scalar::flag::deserialize"
    )]
    pub pma_no_relation_disable_warning: bool,
    #[serde(rename = "SuhosinDisableWarning", deserialize_with = "scalar::flag::deserialize")]
    pub suhosin_disable_warning: bool,
    #[serde(
        rename = "ServerLibraryDifference_DisableWarning",
        deserialize_with = "scalar::flag::deserialize"
    )]
    pub server_library_difference_disable_warning: bool,
    /// Check for new phpMyAdmin versions.
    #[serde(rename = "VersionCheck", deserialize_with = "scalar::flag::deserialize")]
    pub version_check: bool,
    /// Directory for uploading files; empty disables it.
    #[serde(rename = "UploadDir")]
    pub upload_dir: String,
    /// Directory for saving exports on the server; empty disables it.
    #[serde(rename = "SaveDir")]
    pub save_dir: String,
    #[serde(rename = "SendErrorReports")]
    pub send_error_reports: SendErrorReports,
    #[serde(rename = "ShowPhpInfo", deserialize_with = "scalar::flag::deserialize")]
    pub show_php_info: bool,
    #[serde(rename = "ShowChgPassword", deserialize_with = "scalar::flag::deserialize")]
    pub show_chg_password: bool,
    /// Allow login to any database server from the login form.
    #[serde(rename = "AllowArbitraryServer", deserialize_with = "scalar::flag::deserialize")]
    pub allow_arbitrary_server: bool,
    /// Seconds a login cookie stays valid.
    #[serde(rename = "LoginCookieValidity", with = "scalar::seconds")]
    pub login_cookie_validity: u64,
    #[serde(rename = "BrowseMIME", deserialize_with = "scalar::flag::deserialize")]
    pub browse_mime: bool,
    #[serde(rename = "PDFDefaultPageSize")]
    pub pdf_default_page_size: String,
    #[serde(rename = "DefaultCharset")]
    pub default_charset: String,
    #[serde(rename = "RecodingEngine")]
    pub recoding_engine: RecodingEngine,
    #[serde(rename = "AllowAnywhereRecoding", deserialize_with = "scalar::flag::deserialize")]
    pub allow_anywhere_recoding: bool,
    #[serde(rename = "IconvExtraParams")]
    pub iconv_extra_params: String,
    #[serde(rename = "GD2Available")]
    pub gd2_available: Gd2Available,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            blowfish_secret: String::new(),
            servers: BTreeMap::new(),
            pma_no_relation_disable_warning: false,
            suhosin_disable_warning: false,
            server_library_difference_disable_warning: false,
            version_check: true,
            upload_dir: String::new(),
            save_dir: String::new(),
            send_error_reports: SendErrorReports::default(),
            show_php_info: false,
            show_chg_password: true,
            allow_arbitrary_server: false,
            login_cookie_validity: 1440,
            browse_mime: true,
            pdf_default_page_size: "A4".to_string(),
            default_charset: "utf-8".to_string(),
            recoding_engine: RecodingEngine::default(),
            allow_anywhere_recoding: false,
            iconv_extra_params: "//TRANSLIT".to_string(),
            gd2_available: Gd2Available::default(),
        }
    }
}

impl Config {
    /// Load configuration from a template file, or the built-in template
    /// when `path` is `None`.
    pub fn load(path: Option<&Path>, values: &Values) -> Result<Self, ConfigError> {
        let template = Template::load(path)?;
        Self::from_template(&template, values)
    }

    /// Resolve `template` with `values`, then deserialize and validate.
    pub fn from_template(template: &Template, values: &Values) -> Result<Self, ConfigError> {
        let document = template.substitute(values)?;
        let config: Config = serde_yaml::from_value(document)?;
        config.validate()?;

        info!(servers = config.servers.len(), "Configuration loaded");
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.servers.is_empty() {
            return Err(ConfigError::Validation(
                "at least one server is required".into(),
            ));
        }

        for (index, server) in &self.servers {
            validate_server(*index, server)?;
        }

        let uses_cookie = self
            .servers
            .values()
            .any(|server| server.auth_type == AuthType::Cookie);

        if uses_cookie {
            if self.blowfish_secret.is_empty() {
                return Err(ConfigError::MissingValue("blowfish_secret".into()));
            }
            if self.blowfish_secret.len() < BLOWFISH_SECRET_LEN {
                warn!(
                    length = self.blowfish_secret.len(),
                    expected = BLOWFISH_SECRET_LEN,
                    "blowfish_secret is shorter than recommended"
                );
            }
        }

        if self.login_cookie_validity == 0 {
            return Err(ConfigError::Validation(
                "LoginCookieValidity must be a positive integer".into(),
            ));
        }

        if self.default_charset.is_empty() {
            return Err(ConfigError::MissingValue("DefaultCharset".into()));
        }

        Ok(())
    }

    /// Copy with secrets replaced by [`REDACTED`], for display.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        redact(&mut copy.blowfish_secret);
        for server in copy.servers.values_mut() {
            redact(&mut server.password);
            redact(&mut server.controlpass);
        }
        copy
    }
}

fn redact(secret: &mut String) {
    if !secret.is_empty() {
        *secret = REDACTED.to_string();
    }
}

fn validate_server(index: u32, server: &ServerEntry) -> Result<(), ConfigError> {
    if index == 0 {
        return Err(ConfigError::Validation(
            "server index must be positive, got 0".into(),
        ));
    }

    let key = |field: &str| format!("Servers[{}].{}", index, field);

    if server.host.is_empty() {
        return Err(ConfigError::MissingValue(key("host")));
    }

    if let Some(unknown) = server.extra.keys().next() {
        return Err(ConfigError::Validation(format!(
            "Servers[{}]: unknown key {:?}",
            index, unknown
        )));
    }

    validate_port(&server.port)
        .map_err(|e| ConfigError::Validation(format!("{}: {}", key("port"), e)))?;
    validate_port(&server.controlport)
        .map_err(|e| ConfigError::Validation(format!("{}: {}", key("controlport"), e)))?;

    if server.connect_type == ConnectType::Socket && server.socket.is_empty() {
        return Err(ConfigError::MissingValue(key("socket")));
    }

    match server.auth_type {
        AuthType::Config if server.user.is_empty() => {
            return Err(ConfigError::MissingValue(key("user")));
        }
        AuthType::Signon if server.signon_url.is_empty() => {
            return Err(ConfigError::MissingValue(key("SignonURL")));
        }
        _ => {}
    }

    if server.storage_enabled() {
        for (role, table) in server.tables.iter() {
            if table.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "{} must not be empty when pmadb is set",
                    key(role.key())
                )));
            }
        }
        if server.controluser.is_empty() {
            warn!(
                server = index,
                "pmadb is set without controluser, storage features need a control user"
            );
        }
    }

    Ok(())
}

/// Empty is allowed and means the client default.
fn validate_port(port: &str) -> Result<(), String> {
    if port.is_empty() {
        return Ok(());
    }
    match port.parse::<u16>() {
        Ok(p) if p > 0 => Ok(()),
        _ => Err(format!("invalid port {:?}", port)),
    }
}
