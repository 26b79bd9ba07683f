//! # bench-report CLI
//!
//! Exit codes: 0 on success, 1 when the sink fails, 2 for usage or
//! configuration errors.

use bench_outputter::cli::{self, Cli};
use bench_outputter::logging::{self, LoggerBackend};
use bench_outputter::{log_info, log_success};
use clap::Parser;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();

    let preferences = match args.logging_preferences() {
        Ok(preferences) => preferences,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    if preferences.backend == LoggerBackend::Facade {
        env_logger::Builder::new()
            .filter_level(preferences.min_log_level.to_facade_level().to_level_filter())
            .parse_default_env()
            .init();
    }
    logging::init_global_logging(&preferences)?;
    log_info!("bench-report starting", "version" => env!("CARGO_PKG_VERSION"));

    if let Err(e) = cli::run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }

    log_success!(
        logging::codes::success::REPORT_EMITTED,
        "Report complete",
        "controls" => args.controls
    );
    Ok(())
}
