//! `config.inc.php` emitter.

use chrono::{DateTime, Utc};
use std::fmt;

use crate::config::{AuthType, Config, ConnectType, ServerEntry};

/// A PHP literal.
enum Php<'a> {
    Str(&'a str),
    Bool(bool),
    Int(u64),
}

impl fmt::Display for Php<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Php::Str(s) => write!(f, "'{}'", escape(s)),
            Php::Bool(b) => write!(f, "{}", if *b { "true" } else { "false" }),
            Php::Int(n) => write!(f, "{}", n),
        }
    }
}

/// Escape text for a single-quoted PHP string literal.
pub(crate) fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if c == '\\' || c == '\'' {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

struct Writer {
    out: String,
}

impl Writer {
    fn line(&mut self, text: &str) {
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn global(&mut self, key: &str, value: Php<'_>) {
        self.line(&format!("$cfg['{}'] = {};", key, value));
    }

    fn server(&mut self, index: u32, key: &str, value: Php<'_>) {
        self.line(&format!("$cfg['Servers'][{}]['{}'] = {};", index, key, value));
    }

    fn server_opt(&mut self, index: u32, key: &str, value: &str) {
        if !value.is_empty() {
            self.server(index, key, Php::Str(value));
        }
    }
}

/// Render the body of phpMyAdmin's `config.inc.php`.
pub fn render_php(config: &Config, generated_at: DateTime<Utc>) -> String {
    let mut w = Writer { out: String::new() };

    w.line("<?php");
    w.line(&format!(
        "/* Generated by pmaconf {} at {}. Do not edit by hand. */",
        env!("CARGO_PKG_VERSION"),
        generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    w.line("");

    w.global("blowfish_secret", Php::Str(&config.blowfish_secret));
    w.line("");

    for (index, server) in &config.servers {
        write_server(&mut w, *index, server);
        w.line("");
    }

    w.global(
        "PmaNoRelation_DisableWarning",
        Php::Bool(config.pma_no_relation_disable_warning),
    );
    w.global("SuhosinDisableWarning", Php::Bool(config.suhosin_disable_warning));
    w.global(
        "ServerLibraryDifference_DisableWarning",
        Php::Bool(config.server_library_difference_disable_warning),
    );
    w.global("VersionCheck", Php::Bool(config.version_check));
    w.global("UploadDir", Php::Str(&config.upload_dir));
    w.global("SaveDir", Php::Str(&config.save_dir));
    w.global("SendErrorReports", Php::Str(config.send_error_reports.as_str()));
    w.global("ShowPhpInfo", Php::Bool(config.show_php_info));
    w.global("ShowChgPassword", Php::Bool(config.show_chg_password));
    w.global("AllowArbitraryServer", Php::Bool(config.allow_arbitrary_server));
    w.global("LoginCookieValidity", Php::Int(config.login_cookie_validity));
    w.global("BrowseMIME", Php::Bool(config.browse_mime));
    w.global("PDFDefaultPageSize", Php::Str(&config.pdf_default_page_size));
    w.global("DefaultCharset", Php::Str(&config.default_charset));
    w.global("RecodingEngine", Php::Str(config.recoding_engine.as_str()));
    w.global("AllowAnywhereRecoding", Php::Bool(config.allow_anywhere_recoding));
    w.global("IconvExtraParams", Php::Str(&config.iconv_extra_params));
    w.global("GD2Available", Php::Str(config.gd2_available.as_str()));

    w.out
}

fn write_server(w: &mut Writer, index: u32, server: &ServerEntry) {
    w.server(index, "auth_type", Php::Str(server.auth_type.as_str()));
    w.server(index, "host", Php::Str(&server.host));
    w.server_opt(index, "port", &server.port);
    w.server(index, "connect_type", Php::Str(server.connect_type.as_str()));
    if server.connect_type == ConnectType::Socket {
        w.server_opt(index, "socket", &server.socket);
    }
    w.server(index, "compress", Php::Bool(server.compress));
    w.server(index, "AllowNoPassword", Php::Bool(server.allow_no_password));

    match server.auth_type {
        AuthType::Config => {
            w.server(index, "user", Php::Str(&server.user));
            w.server(index, "password", Php::Str(&server.password));
        }
        AuthType::Signon => {
            w.server_opt(index, "SignonSession", &server.signon_session);
            w.server_opt(index, "SignonURL", &server.signon_url);
        }
        AuthType::Cookie | AuthType::Http => {}
    }

    w.server_opt(index, "controlhost", &server.controlhost);
    w.server_opt(index, "controlport", &server.controlport);
    w.server_opt(index, "controluser", &server.controluser);
    w.server_opt(index, "controlpass", &server.controlpass);

    if server.storage_enabled() {
        w.server(index, "pmadb", Php::Str(&server.pmadb));
        for (role, table) in server.tables.iter() {
            w.server(index, role.key(), Php::Str(table));
        }
    }

    w.server_opt(index, "hide_db", &server.hide_db);
}
