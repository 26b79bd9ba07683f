// src/errors.rs
//! Error types for output strategies
//!
//! - [`BuildError`]: strategy construction mistakes (programming errors)
//! - [`OutputError`]: failures raised while emitting a report
//! - [`ConfigError`]: configuration loading failures

/// Outputter construction errors
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("build_outputter_func: nil outputter")]
    NilOutputter,
}

/// Report emission errors.
///
/// Strategies return these unchanged to the caller; nothing in this crate
/// retries or wraps them.
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Controls(#[from] bench_check::CheckError),

    #[error("Missing required sink parameter '{key}'")]
    MissingParameter { key: String },

    #[error("Unsupported PGSQL_SSLMODE '{mode}': connections are made without TLS (use disable or prefer)")]
    UnsupportedSslMode { mode: String },

    #[error("Database error: {0}")]
    Database(#[from] postgres::Error),

    #[error("Hostname lookup failed: {reason}")]
    Hostname { reason: String },

    #[error("{0}")]
    Custom(Box<dyn std::error::Error + Send + Sync>),
}

impl OutputError {
    /// Wrap an arbitrary error raised by a custom sink
    pub fn custom<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        OutputError::Custom(error.into())
    }

    pub fn missing_parameter(key: &str) -> Self {
        OutputError::MissingParameter {
            key: key.to_string(),
        }
    }

    /// Whether the sink itself failed (as opposed to bad input or settings)
    pub fn is_sink_failure(&self) -> bool {
        matches!(
            self,
            OutputError::Io(_) | OutputError::Database(_) | OutputError::Hostname { .. }
        )
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read configuration '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Unknown output format '{name}'. Supported formats: [json, pgsql, console]")]
    UnknownFormat { name: String },

    #[error("Invalid value entry '{entry}': expected KEY=VALUE")]
    InvalidValue { entry: String },
}
