// src/cli.rs
//! Command-line front end for `bench-report`
//!
//! Reads a controls document, layers CLI flags over the TOML/env
//! configuration, and hands the result to [`crate::build_outputter`].
//!
//! Configuration precedence: CLI > config file > environment > defaults.

use crate::config::{Config, Format};
use crate::errors::{ConfigError, OutputError};
use crate::logging::{codes, LogLevel, LoggerBackend, LoggingPreferences};
use crate::outputter::{build_outputter, Outputter};
use bench_check::{CheckError, Controls};
use clap::{ArgAction, Parser};
use std::io::Read;
use std::path::PathBuf;

/// Route benchmark check results to JSON, PostgreSQL, or the console.
#[derive(Parser, Debug)]
#[command(name = "bench-report")]
#[command(version, about, long_about = None)]
#[command(after_help = "Examples:\n  bench-report --controls results.json\n  \
    bench-report --controls - --json --output-file report.json\n  \
    bench-report --controls results.json --pgsql --value PGSQL_HOST=db --value PGSQL_USER=bench --value PGSQL_DBNAME=scans")]
pub struct Cli {
    // === Input ===
    /// Controls document to report on ("-" reads stdin)
    #[arg(long, value_name = "FILE|-")]
    pub controls: String,

    /// TOML configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Recompute group and total counters from check states before reporting
    #[arg(long)]
    pub recount: bool,

    // === Format ===
    /// Emit a JSON document (overrides --pgsql and --format)
    #[arg(long)]
    pub json: bool,

    /// Store results in PostgreSQL (overrides --format)
    #[arg(long)]
    pub pgsql: bool,

    /// Output format by name or code: json, pgsql, console
    #[arg(long, value_name = "NAME")]
    pub format: Option<String>,

    // === Sink settings ===
    /// Write the JSON document to this file instead of stdout
    #[arg(long, value_name = "FILE")]
    pub output_file: Option<String>,

    /// Omit the remediation section of the console report
    #[arg(long = "noremediations")]
    pub no_remediations: bool,

    /// Print raw audit output under failed checks
    #[arg(long)]
    pub include_test_output: bool,

    /// Sink parameter such as PGSQL_HOST=db (repeatable)
    #[arg(long = "value", value_name = "KEY=VALUE", action = ArgAction::Append)]
    pub values: Vec<String>,

    // === Logging ===
    /// Minimum log level: error, warning, info, debug
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Emit log events as JSON lines
    #[arg(long)]
    pub structured_logs: bool,

    /// Log backend: console or facade
    #[arg(long, value_name = "BACKEND")]
    pub log_backend: Option<String>,
}

/// Failures of a `bench-report` run
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to read controls from '{source_name}': {error}")]
    ReadControls {
        source_name: String,
        #[source]
        error: std::io::Error,
    },

    #[error("Invalid controls document '{source_name}': {error}")]
    DecodeControls {
        source_name: String,
        #[source]
        error: CheckError,
    },

    #[error("Invalid logging option: {0}")]
    Logging(String),

    #[error(transparent)]
    Output(#[from] OutputError),
}

impl CliError {
    /// 1 when the sink failed, 2 for usage or configuration problems
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Output(_) => 1,
            _ => 2,
        }
    }
}

impl Cli {
    /// Format requested on the command line, if any
    pub fn requested_format(&self) -> Result<Option<Format>, ConfigError> {
        if self.json {
            return Ok(Some(Format::Json));
        }
        if self.pgsql {
            return Ok(Some(Format::PgSql));
        }
        self.format.as_deref().map(str::parse).transpose()
    }

    /// Build the effective configuration: config file (or environment)
    /// first, then every flag that was given
    pub fn resolve_config(&self) -> Result<Config, ConfigError> {
        let mut config = match &self.config {
            Some(path) => Config::load(path).map_err(|e| {
                let code = match e {
                    ConfigError::Parse(_) => codes::config::CONFIG_PARSE_FAILED,
                    _ => codes::config::CONFIG_READ_FAILED,
                };
                crate::log_error!(
                    code,
                    "Could not load configuration",
                    "path" => path.display(),
                    "error" => e
                );
                e
            })?,
            None => Config::from_env(),
        };

        if let Some(format) = self.requested_format()? {
            config.format = format;
        }
        if let Some(filename) = &self.output_file {
            config.json.filename = Some(filename.clone());
        }
        if self.no_remediations {
            config.console.no_remediations = true;
        }
        if self.include_test_output {
            config.console.include_test_output = true;
        }
        config.merge_values(&self.values).map_err(|e| {
            crate::log_error!(
                codes::config::CONFIG_INVALID_VALUE,
                "Rejected --value override",
                "error" => e
            );
            e
        })?;

        Ok(config)
    }

    pub fn logging_preferences(&self) -> Result<LoggingPreferences, CliError> {
        let mut preferences = LoggingPreferences::default();
        if let Some(level) = &self.log_level {
            preferences.min_log_level = level.parse::<LogLevel>().map_err(CliError::Logging)?;
        }
        if let Some(backend) = &self.log_backend {
            preferences.backend = backend.parse::<LoggerBackend>().map_err(CliError::Logging)?;
        }
        if self.structured_logs {
            preferences.use_structured_logging = true;
        }
        Ok(preferences)
    }

    pub fn load_controls(&self) -> Result<Controls, CliError> {
        let content = if self.controls == "-" {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|error| CliError::ReadControls {
                    source_name: "stdin".to_string(),
                    error,
                })?;
            buf
        } else {
            std::fs::read_to_string(&self.controls).map_err(|error| CliError::ReadControls {
                source_name: self.controls.clone(),
                error,
            })?
        };

        Controls::from_json(&content).map_err(|error| {
            crate::log_error!(
                codes::config::CONTROLS_LOAD_FAILED,
                "Controls document rejected",
                "source" => self.controls,
                "error" => error
            );
            CliError::DecodeControls {
                source_name: self.controls.clone(),
                error,
            }
        })
    }
}

/// Load, select, emit
pub fn run(cli: &Cli) -> Result<(), CliError> {
    let config = cli.resolve_config()?;
    let mut controls = cli.load_controls()?;
    let summary = if cli.recount {
        controls.tally()
    } else {
        controls.summary()
    };

    crate::log_info!(
        "Controls loaded",
        "id" => controls.id,
        "groups" => controls.groups.len(),
        "total" => summary.total()
    );

    let mut outputter = build_outputter(&summary, &config);
    outputter.output(&controls, &summary).map_err(|e| {
        crate::log_error!(
            codes::output::EMISSION_FAILED,
            "Report emission failed",
            "format" => outputter.format(),
            "error" => e
        );
        e
    })?;

    Ok(())
}
