// src/config.rs
//! # Outputter Configuration
//!
//! [`Config`] aggregates every setting needed to construct any output
//! strategy. It can be built in code, loaded from TOML, or seeded from the
//! environment:
//!
//! ```toml
//! format = "json"
//!
//! [console]
//! no_remediations = false
//! include_test_output = true
//!
//! [json]
//! filename = "report.json"
//!
//! [values]
//! PGSQL_HOST = "db.internal"
//! ```
//!
//! Missing TOML fields fall back to environment values, then to built-in
//! defaults.

use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::path::Path;
use std::str::FromStr;

/// Environment variable names for configuration
pub mod env_vars {
    pub const OUTPUT_FORMAT: &str = "BENCH_OUTPUT_FORMAT";
    pub const NO_REMEDIATIONS: &str = "BENCH_NO_REMEDIATIONS";
    pub const INCLUDE_TEST_OUTPUT: &str = "BENCH_INCLUDE_TEST_OUTPUT";
    pub const JSON_FILE: &str = "BENCH_JSON_FILE";
    /// Every variable with this prefix is copied into [`super::Config::values`]
    pub const PGSQL_PREFIX: &str = "PGSQL_";
}

/// Output format selector.
///
/// Each recognized variant has a stable integer code. Any other code is kept
/// as [`Format::Unrecognized`] and is treated like the console default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "FormatRepr", into = "FormatRepr")]
pub enum Format {
    /// Structured JSON document
    Json,
    /// PostgreSQL database sink
    PgSql,
    /// Human-readable console report
    #[default]
    Console,
    /// Code outside the known set. Build it with [`Format::from_code`];
    /// a hand-built `Unrecognized(10)` is still routed as JSON.
    Unrecognized(i32),
}

impl Format {
    pub const JSON_CODE: i32 = 10;
    pub const PGSQL_CODE: i32 = 11;
    pub const CONSOLE_CODE: i32 = 12;

    pub fn code(&self) -> i32 {
        match self {
            Format::Json => Self::JSON_CODE,
            Format::PgSql => Self::PGSQL_CODE,
            Format::Console => Self::CONSOLE_CODE,
            Format::Unrecognized(code) => *code,
        }
    }

    /// Never fails: unknown codes become `Unrecognized`
    pub fn from_code(code: i32) -> Self {
        match code {
            Self::JSON_CODE => Format::Json,
            Self::PGSQL_CODE => Format::PgSql,
            Self::CONSOLE_CODE => Format::Console,
            other => Format::Unrecognized(other),
        }
    }

    pub fn name(&self) -> Option<&'static str> {
        match self {
            Format::Json => Some("json"),
            Format::PgSql => Some("pgsql"),
            Format::Console => Some("console"),
            Format::Unrecognized(_) => None,
        }
    }
}

impl FromStr for Format {
    type Err = ConfigError;

    /// Accepts a format name or an integer code
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(code) = trimmed.parse::<i32>() {
            return Ok(Format::from_code(code));
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "json" => Ok(Format::Json),
            "pgsql" | "postgres" | "postgresql" => Ok(Format::PgSql),
            "console" | "text" => Ok(Format::Console),
            _ => Err(ConfigError::UnknownFormat {
                name: trimmed.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "unrecognized({})", self.code()),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum FormatRepr {
    Code(i32),
    Name(String),
}

impl TryFrom<FormatRepr> for Format {
    type Error = ConfigError;

    fn try_from(repr: FormatRepr) -> Result<Self, Self::Error> {
        match repr {
            FormatRepr::Code(code) => Ok(Format::from_code(code)),
            FormatRepr::Name(name) => name.parse(),
        }
    }
}

impl From<Format> for FormatRepr {
    fn from(format: Format) -> Self {
        match format.name() {
            Some(name) => FormatRepr::Name(name.to_string()),
            None => FormatRepr::Code(format.code()),
        }
    }
}

/// Console report settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Suppress the remediation section
    pub no_remediations: bool,

    /// Print raw audit output under failed checks
    pub include_test_output: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            no_remediations: env::var(env_vars::NO_REMEDIATIONS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            include_test_output: env::var(env_vars::INCLUDE_TEST_OUTPUT)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }
}

/// Structured output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JsonConfig {
    /// Destination file; stdout when `None`
    pub filename: Option<String>,
}

impl Default for JsonConfig {
    fn default() -> Self {
        Self {
            filename: env::var(env_vars::JSON_FILE).ok().filter(|v| !v.is_empty()),
        }
    }
}

/// Complete outputter configuration.
///
/// Read-only input to [`crate::build_outputter`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub console: ConsoleConfig,

    pub json: JsonConfig,

    pub format: Format,

    /// Database connection parameters (`PGSQL_HOST`, `PGSQL_USER`, ...)
    pub values: HashMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            console: ConsoleConfig::default(),
            json: JsonConfig::default(),
            format: env::var(env_vars::OUTPUT_FORMAT)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_default(),
            values: env::vars()
                .filter(|(k, _)| k.starts_with(env_vars::PGSQL_PREFIX))
                .collect(),
        }
    }
}

impl Config {
    /// Configuration seeded from environment variables only
    pub fn from_env() -> Self {
        Self::default()
    }

    /// Parse a TOML document; absent fields use environment/built-in defaults
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    /// Load a TOML configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    pub fn with_json_file(mut self, filename: impl Into<String>) -> Self {
        self.json.filename = Some(filename.into());
        self
    }

    pub fn with_console(mut self, no_remediations: bool, include_test_output: bool) -> Self {
        self.console = ConsoleConfig {
            no_remediations,
            include_test_output,
        };
        self
    }

    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Apply `KEY=VALUE` overrides to [`Config::values`].
    ///
    /// Nothing is applied if any entry is malformed.
    pub fn merge_values<S: AsRef<str>>(&mut self, entries: &[S]) -> Result<(), ConfigError> {
        let mut parsed = Vec::with_capacity(entries.len());
        for entry in entries {
            let entry = entry.as_ref();
            match entry.split_once('=') {
                Some((key, value)) if !key.trim().is_empty() => {
                    parsed.push((key.trim().to_string(), value.to_string()));
                }
                _ => {
                    return Err(ConfigError::InvalidValue {
                        entry: entry.to_string(),
                    })
                }
            }
        }
        self.values.extend(parsed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_format_codes_are_distinct_and_stable() {
        assert_eq!(Format::Json.code(), 10);
        assert_eq!(Format::PgSql.code(), 11);
        assert_eq!(Format::Console.code(), 12);
        assert_eq!(Format::from_code(11), Format::PgSql);
        assert_eq!(Format::from_code(99), Format::Unrecognized(99));
        assert_eq!(Format::from_code(99).code(), 99);
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("JSON".parse::<Format>().unwrap(), Format::Json);
        assert_eq!("postgres".parse::<Format>().unwrap(), Format::PgSql);
        assert_eq!("12".parse::<Format>().unwrap(), Format::Console);
        assert_eq!("-3".parse::<Format>().unwrap(), Format::Unrecognized(-3));
        assert_matches!(
            "xml".parse::<Format>(),
            Err(ConfigError::UnknownFormat { name }) if name == "xml"
        );
    }

    #[test]
    fn test_toml_full_document() {
        let config = Config::from_toml_str(
            r#"
            format = "pgsql"

            [console]
            no_remediations = true
            include_test_output = true

            [json]
            filename = "out.json"

            [values]
            PGSQL_HOST = "db"
            PGSQL_USER = "bench"
            "#,
        )
        .unwrap();

        assert_eq!(config.format, Format::PgSql);
        assert!(config.console.no_remediations);
        assert!(config.console.include_test_output);
        assert_eq!(config.json.filename.as_deref(), Some("out.json"));
        assert_eq!(config.values.get("PGSQL_HOST").map(String::as_str), Some("db"));
    }

    #[test]
    fn test_toml_integer_format_code() {
        let config = Config::from_toml_str("format = 42").unwrap();
        assert_eq!(config.format, Format::Unrecognized(42));
    }

    #[test]
    fn test_toml_unknown_format_name_is_rejected() {
        assert_matches!(
            Config::from_toml_str("format = \"yaml\""),
            Err(ConfigError::Parse(_))
        );
    }

    #[test]
    fn test_format_serializes_as_name_or_code() {
        #[derive(Serialize)]
        struct Wrapper {
            format: Format,
        }
        let named = toml::to_string(&Wrapper { format: Format::Json }).unwrap();
        let coded = toml::to_string(&Wrapper {
            format: Format::Unrecognized(7),
        })
        .unwrap();

        assert_eq!(named.trim(), "format = \"json\"");
        assert_eq!(coded.trim(), "format = 7");
    }

    #[test]
    fn test_merge_values() {
        let mut config = Config::from_toml_str("").unwrap().with_value("PGSQL_PORT", "5432");
        config
            .merge_values(&["PGSQL_HOST=db", "PGSQL_PASSWORD=a=b"])
            .unwrap();

        assert_eq!(config.values["PGSQL_HOST"], "db");
        assert_eq!(config.values["PGSQL_PASSWORD"], "a=b");
        assert_eq!(config.values["PGSQL_PORT"], "5432");
    }

    #[test]
    fn test_merge_values_rejects_malformed_entry() {
        let mut config = Config::from_toml_str("").unwrap();
        let before = config.values.clone();

        assert_matches!(
            config.merge_values(&["PGSQL_HOST=db", "oops"]),
            Err(ConfigError::InvalidValue { entry }) if entry == "oops"
        );
        assert_eq!(config.values, before);
    }

    #[test]
    fn test_load_missing_file() {
        assert_matches!(
            Config::load("/definitely/not/here.toml"),
            Err(ConfigError::Io { .. })
        );
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bench.toml");
        std::fs::write(&path, "format = \"json\"\n[json]\nfilename = \"r.json\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.format, Format::Json);
        assert_eq!(config.json.filename.as_deref(), Some("r.json"));
    }
}
