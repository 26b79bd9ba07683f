// src/outputter/json.rs
//! Structured JSON output

use super::Outputter;
use crate::errors::OutputError;
use crate::logging::codes;
use bench_check::{Controls, Summary};
use std::fs::File;
use std::io::{self, Write};

/// Writes the controls tree as a pretty-printed JSON document.
///
/// With a filename the document replaces the file's contents; otherwise it
/// goes to stdout (or to the writer installed with [`JsonOutputter::with_writer`]).
pub struct JsonOutputter {
    filename: Option<String>,
    writer: Option<Box<dyn Write>>,
}

impl JsonOutputter {
    pub fn new(filename: Option<String>) -> Self {
        Self {
            filename: filename.filter(|f| !f.is_empty()),
            writer: None,
        }
    }

    pub fn to_file(filename: impl Into<String>) -> Self {
        Self::new(Some(filename.into()))
    }

    pub fn to_stdout() -> Self {
        Self::new(None)
    }

    /// Send stdout-bound output to `writer` instead
    pub fn with_writer(mut self, writer: Box<dyn Write>) -> Self {
        self.writer = Some(writer);
        self
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    /// Serialize `controls` into `w`
    pub fn write_to<W: Write + ?Sized>(&self, w: &mut W, controls: &Controls) -> Result<(), OutputError> {
        let document = controls.to_json()?;
        w.write_all(document.as_bytes())?;
        w.write_all(b"\n")?;
        w.flush()?;
        Ok(())
    }
}

impl Outputter for JsonOutputter {
    fn output(&mut self, controls: &Controls, _summary: &Summary) -> Result<(), OutputError> {
        if let Some(filename) = &self.filename {
            let mut file = File::create(filename)?;
            self.write_to(&mut file, controls)?;
            crate::log_success!(
                codes::success::REPORT_EMITTED,
                "JSON report written",
                "file" => filename
            );
            return Ok(());
        }

        match self.writer.take() {
            Some(mut writer) => {
                let result = self.write_to(writer.as_mut(), controls);
                self.writer = Some(writer);
                result
            }
            None => {
                let stdout = io::stdout();
                let mut lock = stdout.lock();
                self.write_to(&mut lock, controls)
            }
        }
    }
}

impl std::fmt::Debug for JsonOutputter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonOutputter")
            .field("filename", &self.filename)
            .field("custom_writer", &self.writer.is_some())
            .finish()
    }
}
