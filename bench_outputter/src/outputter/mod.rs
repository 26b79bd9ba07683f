// src/outputter/mod.rs
//! Output strategies for benchmark results
//!
//! Every strategy implements [`Outputter`], a single-method capability:
//! given the controls tree and its summary, emit the report or fail.
//!
//! # Key Components
//!
//! - [`JsonOutputter`] - structured JSON document to a file or stdout
//! - [`ConsoleOutputter`] - colored, human-readable report
//! - [`PgSqlOutputter`] - one row per run in a PostgreSQL table
//! - [`OutputFunc`] - adapts any matching closure into an `Outputter`
//! - [`build_outputter`] - picks one of the built-in strategies from a [`crate::Config`]
//!
//! Strategy instances are built fresh for each report and invoked once.
//! Invoking one twice emits twice; nothing here deduplicates.

pub mod console;
pub mod func;
pub mod json;
pub mod pgsql;
pub mod selector;

pub use console::ConsoleOutputter;
pub use func::{build_outputter_func, OutputFunc};
pub use json::JsonOutputter;
pub use pgsql::{PgSqlOutputter, PostgresStore, ScanRecord, ScanResultStore};
pub use selector::{build_outputter, SelectedOutputter};

use crate::errors::OutputError;
use bench_check::{Controls, Summary};

/// The output strategy for a completed set of controls
pub trait Outputter {
    /// Emit one report for `controls`.
    ///
    /// Sink failures are returned as-is; no retry happens at this layer.
    fn output(&mut self, controls: &Controls, summary: &Summary) -> Result<(), OutputError>;
}

impl<T: Outputter + ?Sized> Outputter for Box<T> {
    fn output(&mut self, controls: &Controls, summary: &Summary) -> Result<(), OutputError> {
        (**self).output(controls, summary)
    }
}

impl<T: Outputter + ?Sized> Outputter for &mut T {
    fn output(&mut self, controls: &Controls, summary: &Summary) -> Result<(), OutputError> {
        (**self).output(controls, summary)
    }
}
