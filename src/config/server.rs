//! Server connection profiles.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::scalar;
use super::storage::StorageTables;

/// How phpMyAdmin authenticates users against this server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthType {
    #[default]
    Cookie,
    Config,
    Signon,
    Http,
}

impl AuthType {
    pub fn as_str(self) -> &'static str {
        match self {
            AuthType::Cookie => "cookie",
            AuthType::Config => "config",
            AuthType::Signon => "signon",
            AuthType::Http => "http",
        }
    }
}

/// Transport used to reach the database server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectType {
    #[default]
    Tcp,
    Socket,
}

impl ConnectType {
    pub fn as_str(self) -> &'static str {
        match self {
            ConnectType::Tcp => "tcp",
            ConnectType::Socket => "socket",
        }
    }
}

/// One database server profile (`$cfg['Servers'][$i]`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerEntry {
    /// Authentication method.
    pub auth_type: AuthType,
    /// Database server hostname or IP address (required).
    pub host: String,
    /// Database server port; empty means the client default.
    #[serde(deserialize_with = "scalar::text::deserialize")]
    pub port: String,
    /// TCP or unix socket.
    pub connect_type: ConnectType,
    /// Socket path, required when `connect_type` is socket.
    pub socket: String,
    /// Use the compressed client protocol.
    #[serde(deserialize_with = "scalar::flag::deserialize")]
    pub compress: bool,
    #[serde(
        rename = "AllowNoPassword",
        deserialize_with = "scalar::flag::deserialize"
    )]
    pub allow_no_password: bool,
    /// Login user for `config` authentication.
    pub user: String,
    /// Login password for `config` authentication.
    pub password: String,
    #[serde(rename = "SignonSession")]
    pub signon_session: String,
    /// Login page for `signon` authentication.
    #[serde(rename = "SignonURL")]
    pub signon_url: String,
    /// Host for the control connection; empty means `host`.
    pub controlhost: String,
    #[serde(deserialize_with = "scalar::text::deserialize")]
    pub controlport: String,
    /// User with access to the configuration storage database.
    pub controluser: String,
    pub controlpass: String,
    /// Configuration storage database; empty disables storage features.
    pub pmadb: String,
    /// Configuration storage tables.
    #[serde(flatten)]
    pub tables: StorageTables,
    /// Regular expression of databases hidden from the navigation panel.
    pub hide_db: String,
    /// Keys not recognised above; a non-empty map fails validation.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl ServerEntry {
    /// Whether the configuration storage features are enabled.
    pub fn storage_enabled(&self) -> bool {
        !self.pmadb.is_empty()
    }
}
