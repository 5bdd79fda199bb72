//! Enumerated directive values.

use serde::{Deserialize, Serialize};

/// Whether to send JavaScript error reports to the phpMyAdmin team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SendErrorReports {
    #[default]
    Ask,
    Always,
    Never,
}

impl SendErrorReports {
    pub fn as_str(self) -> &'static str {
        match self {
            SendErrorReports::Ask => "ask",
            SendErrorReports::Always => "always",
            SendErrorReports::Never => "never",
        }
    }
}

/// Character set conversion engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecodingEngine {
    #[default]
    Auto,
    Iconv,
    Recode,
    Mb,
    None,
}

impl RecodingEngine {
    pub fn as_str(self) -> &'static str {
        match self {
            RecodingEngine::Auto => "auto",
            RecodingEngine::Iconv => "iconv",
            RecodingEngine::Recode => "recode",
            RecodingEngine::Mb => "mb",
            RecodingEngine::None => "none",
        }
    }
}

/// Availability of the GD 2 image library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gd2Available {
    Yes,
    No,
    #[default]
    Auto,
}

impl Gd2Available {
    pub fn as_str(self) -> &'static str {
        match self {
            Gd2Available::Yes => "yes",
            Gd2Available::No => "no",
            Gd2Available::Auto => "auto",
        }
    }
}
