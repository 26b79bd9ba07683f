//! # Bench Outputter
//!
//! Result-reporting layer for benchmark check runs. Takes a finished
//! [`Controls`] tree and its [`Summary`] and routes them to one sink:
//! a JSON document, a PostgreSQL row, or a colored console report.
//!
//! ```no_run
//! use bench_outputter::prelude::*;
//!
//! # fn run(controls: &Controls) -> Result<(), OutputError> {
//! let config = Config::from_env().with_format(Format::Json);
//! let summary = controls.summary();
//! let mut outputter = build_outputter(&summary, &config);
//! outputter.output(controls, &summary)?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod errors;
#[macro_use]
pub mod logging;
pub mod outputter;

#[cfg(feature = "cli")]
pub mod cli;

pub use bench_check::{Check, Controls, Group, State, Summary};
pub use config::{Config, ConsoleConfig, Format, JsonConfig};
pub use errors::{BuildError, ConfigError, OutputError};
pub use outputter::{
    build_outputter, build_outputter_func, ConsoleOutputter, JsonOutputter, OutputFunc, Outputter,
    PgSqlOutputter, PostgresStore, ScanRecord, ScanResultStore, SelectedOutputter,
};

/// Common imports for callers wiring up a report
pub mod prelude {
    pub use crate::config::{Config, Format};
    pub use crate::errors::{BuildError, OutputError};
    pub use crate::outputter::{build_outputter, build_outputter_func, Outputter, SelectedOutputter};
    pub use bench_check::{Controls, State, Summary};
}
