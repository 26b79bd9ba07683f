// src/outputter/func.rs
//! Function adapter: any `(controls, summary) -> Result` closure as an [`Outputter`]

use super::Outputter;
use crate::errors::{BuildError, OutputError};
use crate::logging::codes;
use bench_check::{Controls, Summary};

/// Wraps a closure so it satisfies [`Outputter`].
///
/// `output` forwards its arguments untouched and returns the closure's
/// result unchanged.
pub struct OutputFunc<F> {
    op: F,
}

impl<F> OutputFunc<F>
where
    F: FnMut(&Controls, &Summary) -> Result<(), OutputError>,
{
    pub fn new(op: F) -> Self {
        Self { op }
    }
}

impl<F> Outputter for OutputFunc<F>
where
    F: FnMut(&Controls, &Summary) -> Result<(), OutputError>,
{
    fn output(&mut self, controls: &Controls, summary: &Summary) -> Result<(), OutputError> {
        (self.op)(controls, summary)
    }
}

impl<F> std::fmt::Debug for OutputFunc<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutputFunc").finish_non_exhaustive()
    }
}

/// Extension point for custom sinks.
///
/// Fails with [`BuildError::NilOutputter`] when no function is given.
pub fn build_outputter_func<F>(op: Option<F>) -> Result<OutputFunc<F>, BuildError>
where
    F: FnMut(&Controls, &Summary) -> Result<(), OutputError>,
{
    match op {
        Some(op) => Ok(OutputFunc::new(op)),
        None => {
            crate::log_error!(
                codes::output::ADAPTER_CONSTRUCTION_FAILED,
                "Refusing to build an outputter around a missing function"
            );
            Err(BuildError::NilOutputter)
        }
    }
}
