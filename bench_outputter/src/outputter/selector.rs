// src/outputter/selector.rs
//! Strategy selection from a summary and a [`Config`]

use super::{ConsoleOutputter, JsonOutputter, Outputter, PgSqlOutputter};
use crate::config::{Config, Format};
use crate::errors::OutputError;
use crate::logging::codes;
use bench_check::{Controls, Summary};

/// A built-in strategy chosen by [`build_outputter`]
#[derive(Debug)]
pub enum SelectedOutputter {
    Json(JsonOutputter),
    PgSql(PgSqlOutputter),
    Console(ConsoleOutputter),
}

impl SelectedOutputter {
    /// The format this strategy emits
    pub fn format(&self) -> Format {
        match self {
            SelectedOutputter::Json(_) => Format::Json,
            SelectedOutputter::PgSql(_) => Format::PgSql,
            SelectedOutputter::Console(_) => Format::Console,
        }
    }

    pub fn is_console(&self) -> bool {
        matches!(self, SelectedOutputter::Console(_))
    }
}

impl Outputter for SelectedOutputter {
    fn output(&mut self, controls: &Controls, summary: &Summary) -> Result<(), OutputError> {
        match self {
            SelectedOutputter::Json(o) => o.output(controls, summary),
            SelectedOutputter::PgSql(o) => o.output(controls, summary),
            SelectedOutputter::Console(o) => o.output(controls, summary),
        }
    }
}

impl From<JsonOutputter> for SelectedOutputter {
    fn from(o: JsonOutputter) -> Self {
        SelectedOutputter::Json(o)
    }
}

impl From<PgSqlOutputter> for SelectedOutputter {
    fn from(o: PgSqlOutputter) -> Self {
        SelectedOutputter::PgSql(o)
    }
}

impl From<ConsoleOutputter> for SelectedOutputter {
    fn from(o: ConsoleOutputter) -> Self {
        SelectedOutputter::Console(o)
    }
}

/// Pick the output strategy for a finished run.
///
/// A run with no results at all always gets the console report, whatever
/// `config.format` says. Otherwise JSON and PostgreSQL are honored and
/// everything else (including unrecognized format codes) falls back to
/// the console. Never fails.
pub fn build_outputter(summary: &Summary, config: &Config) -> SelectedOutputter {
    let non_empty = summary.fail > 0 || summary.warn > 0 || summary.pass > 0 || summary.info > 0;

    // Route by code so a hand-built Unrecognized(10) behaves like Json
    let requested = Format::from_code(config.format.code());
    if !non_empty && matches!(requested, Format::Json | Format::PgSql) {
        crate::log_warning!(
            codes::output::EMPTY_RUN_FALLBACK,
            "No results to report; using the console instead",
            "requested" => requested
        );
    }

    let selected = match requested {
        Format::Json if non_empty => {
            SelectedOutputter::Json(JsonOutputter::new(config.json.filename.clone()))
        }
        Format::PgSql if non_empty => {
            SelectedOutputter::PgSql(PgSqlOutputter::new(config.values.clone()))
        }
        _ => SelectedOutputter::Console(ConsoleOutputter::new(
            config.console.no_remediations,
            config.console.include_test_output,
        )),
    };

    crate::log_debug!(
        codes::success::OUTPUTTER_SELECTED,
        "Output strategy selected",
        "requested" => config.format,
        "selected" => selected.format(),
        "total" => summary.total()
    );

    selected
}
