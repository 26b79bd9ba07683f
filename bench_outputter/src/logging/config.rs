//! Runtime logging preferences

use super::events::LogLevel;
use std::env;
use std::str::FromStr;

/// Environment variable names for logging preferences
pub mod env_vars {
    pub const LOG_LEVEL: &str = "BENCH_LOG_LEVEL";
    pub const LOG_STRUCTURED: &str = "BENCH_LOG_STRUCTURED";
    pub const LOG_BACKEND: &str = "BENCH_LOG_BACKEND";
}

/// Where log events end up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoggerBackend {
    /// Direct stderr output, human or JSON lines
    Console,
    /// The `log` crate facade
    Facade,
}

impl FromStr for LoggerBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "console" => Ok(LoggerBackend::Console),
            "facade" | "log" => Ok(LoggerBackend::Facade),
            other => Err(format!("unknown log backend '{}'", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoggingPreferences {
    /// Minimum level that gets emitted
    pub min_log_level: LogLevel,

    /// Whether the console backend writes JSON lines
    pub use_structured_logging: bool,

    pub backend: LoggerBackend,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            min_log_level: env::var(env_vars::LOG_LEVEL)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(LogLevel::Warning),
            use_structured_logging: env::var(env_vars::LOG_STRUCTURED)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            backend: env::var(env_vars::LOG_BACKEND)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(LoggerBackend::Console),
        }
    }
}
