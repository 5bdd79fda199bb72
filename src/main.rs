mod config;
mod render;
mod template;

use chrono::Utc;
use clap::{Parser, Subcommand};
use config::{Config, ConfigError};
use render::{DumpFormat, RenderError};
use std::path::PathBuf;
use std::process::ExitCode;
use template::{Template, TemplateError, Values};
use tracing::{Level, debug, error, info};
use tracing_subscriber::{EnvFilter, fmt};

/// Resolve a phpMyAdmin configuration template and render `config.inc.php`.
#[derive(Parser, Debug)]
#[command(name = "pmaconf")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Template file; the built-in template is used when omitted
    #[arg(short, long, global = true, env = "PMACONF_TEMPLATE")]
    template: Option<PathBuf>,

    /// Placeholder value as NAME=VALUE (repeatable)
    #[arg(short = 's', long = "set", global = true, value_name = "NAME=VALUE")]
    set: Vec<String>,

    /// YAML file mapping placeholder names to values
    #[arg(long, global = true, env = "PMACONF_VALUES")]
    values: Option<PathBuf>,

    /// Env file to load before resolving (default: .env if present)
    #[arg(long, global = true, env = "PMACONF_ENV_FILE")]
    env_file: Option<PathBuf>,

    /// Do not resolve placeholders from environment variables
    #[arg(long, global = true)]
    no_env: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "PMACONF_LOG_LEVEL", default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve, validate and write config.inc.php
    Render {
        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Resolve and validate without writing anything
    Check,
    /// List the placeholders a template needs
    Placeholders,
    /// Print the resolved configuration with secrets redacted
    Dump {
        #[arg(short, long, value_enum, default_value_t = DumpFormat::Yaml)]
        format: DumpFormat,
    },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

fn init_tracing(log_level: &str) {
    let level = match log_level {
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        "trace" => Level::TRACE,
        _ => Level::INFO,
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    // stderr keeps rendered output on stdout clean
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn build_values(cli: &Cli) -> Result<Values, TemplateError> {
    Values::load_env_file(cli.env_file.as_deref())?;
    Values::from_sources(!cli.no_env, cli.values.as_deref(), &cli.set)
}

fn run(cli: &Cli) -> Result<(), CliError> {
    if let Command::Placeholders = cli.command {
        let template = Template::load(cli.template.as_deref()).map_err(ConfigError::from)?;
        for placeholder in template.placeholders() {
            println!("{}\t{}", placeholder.token, placeholder.path);
        }
        return Ok(());
    }

    let values = build_values(cli)?;
    let config = Config::load(cli.template.as_deref(), &values)?;
    debug!(config = ?config.redacted(), "Resolved configuration");

    match cli.command {
        Command::Render { ref output } => {
            let contents = render::render_php(&config, Utc::now());
            match output {
                Some(path) => {
                    render::write_output(path, &contents)?;
                }
                None => print!("{}", contents),
            }
        }
        Command::Check => {
            info!(servers = config.servers.len(), "Configuration is valid");
        }
        Command::Dump { format } => {
            print!("{}", render::render_dump(&config, format)?);
        }
        Command::Placeholders => {}
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(&cli.log_level);

    let template = cli
        .template
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<built-in>".to_string());
    debug!(template = %template, "Starting");

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, template = %template, "Configuration failed");
            ExitCode::FAILURE
        }
    }
}
