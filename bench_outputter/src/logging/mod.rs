//! Global logging for the reporting layer
//!
//! Provides a process-wide [`LoggingService`] behind a `OnceLock`, typed event
//! codes, and the `log_*!` macros. Logging before initialization is a no-op,
//! so library callers that never initialize it see no output.

pub mod codes;
pub mod config;
pub mod events;
pub mod macros;
pub mod service;

use std::sync::{Arc, OnceLock};

pub use codes::Code;
pub use config::{LoggerBackend, LoggingPreferences};
pub use events::{LogEvent, LogLevel};
pub use service::{ConsoleLogger, FacadeLogger, Logger, LoggingService, MemoryLogger, StructuredLogger};

static GLOBAL_LOGGER: OnceLock<Arc<LoggingService>> = OnceLock::new();

/// Initialize global logging from preferences
pub fn init_global_logging(preferences: &LoggingPreferences) -> Result<(), String> {
    let service = Arc::new(LoggingService::with_preferences(preferences));

    GLOBAL_LOGGER
        .set(service.clone())
        .map_err(|_| "Global logger already initialized".to_string())?;

    service.log_event(
        LogEvent::debug_with_code(
            codes::success::SYSTEM_INITIALIZATION_COMPLETED,
            "Global logging system initialized",
        )
        .with_context("min_level", preferences.min_log_level.as_str()),
    );

    Ok(())
}

/// Initialize with custom service (primarily for testing)
pub fn init_global_logging_with_service(service: Arc<LoggingService>) -> Result<(), String> {
    GLOBAL_LOGGER
        .set(service)
        .map_err(|_| "Global logger already initialized".to_string())
}

pub fn is_initialized() -> bool {
    GLOBAL_LOGGER.get().is_some()
}

/// Safe access to global logger
pub fn try_get_global_logger() -> Option<&'static LoggingService> {
    GLOBAL_LOGGER.get().map(|service| service.as_ref())
}

fn emit(mut event: LogEvent, context: Vec<(&str, &str)>) {
    if let Some(logger) = try_get_global_logger() {
        if !logger.should_log(event.level) {
            return;
        }
        for (key, value) in context {
            event = event.with_context(key, value);
        }
        logger.log_event(event);
    }
}

/// Log error with context (used by `log_error!`)
pub fn log_error_with_context(code: Code, message: &str, context: Vec<(&str, &str)>) {
    emit(LogEvent::error(code, message), context);
}

/// Log warning with context (used by `log_warning!`)
pub fn log_warning_with_context(code: Code, message: &str, context: Vec<(&str, &str)>) {
    emit(LogEvent::warning_with_code(code, message), context);
}

/// Log success with context (used by `log_success!`)
pub fn log_success_with_context(code: Code, message: &str, context: Vec<(&str, &str)>) {
    emit(LogEvent::success(code, message), context);
}

/// Log info with context (used by `log_info!`)
pub fn log_info_with_context(message: &str, context: Vec<(&str, &str)>) {
    emit(LogEvent::info(message), context);
}

/// Log debug with context (used by `log_debug!`)
pub fn log_debug_with_context(code: Code, message: &str, context: Vec<(&str, &str)>) {
    emit(LogEvent::debug_with_code(code, message), context);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_before_init_is_silent() {
        // Must not panic whether or not another test initialized the service
        log_info_with_context("nothing to see", vec![("k", "v")]);
        log_error_with_context(codes::output::EMISSION_FAILED, "still fine", vec![]);
    }

    #[test]
    fn test_double_init_is_rejected() {
        let prefs = LoggingPreferences {
            min_log_level: LogLevel::Error,
            use_structured_logging: false,
            backend: LoggerBackend::Console,
        };
        let _ = init_global_logging(&prefs);

        assert!(is_initialized());
        assert!(init_global_logging(&prefs).is_err());
    }
}
