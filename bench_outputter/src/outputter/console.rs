// src/outputter/console.rs
//! Human-readable console report
//!
//! Layout:
//!
//! ```text
//! [INFO] 1.6.0 Docker Benchmark
//! [INFO] 1 Host Configuration
//! [PASS] 1.1 Separate partition
//! [FAIL] 1.2 Audit daemon
//!
//! == Remediations ==
//! 1.2 Install auditd
//!
//! == Summary ==
//! 1 checks PASS
//! 1 checks FAIL
//! 0 checks WARN
//! 0 checks INFO
//! ```

use super::Outputter;
use crate::errors::OutputError;
use bench_check::{Controls, State, Summary};
use owo_colors::OwoColorize;
use std::io::{self, Write};

/// Prints the controls tree with colored state tags
pub struct ConsoleOutputter {
    no_remediations: bool,
    include_test_output: bool,
    color: Option<bool>,
    writer: Option<Box<dyn Write>>,
}

impl ConsoleOutputter {
    pub fn new(no_remediations: bool, include_test_output: bool) -> Self {
        Self {
            no_remediations,
            include_test_output,
            color: None,
            writer: None,
        }
    }

    /// Force color on or off (default: on for stdout unless `NO_COLOR` is set)
    pub fn with_color(mut self, enabled: bool) -> Self {
        self.color = Some(enabled);
        self
    }

    /// Print to `writer` instead of stdout; color defaults to off
    pub fn with_writer(mut self, writer: Box<dyn Write>) -> Self {
        self.writer = Some(writer);
        self
    }

    pub fn no_remediations(&self) -> bool {
        self.no_remediations
    }

    pub fn include_test_output(&self) -> bool {
        self.include_test_output
    }

    fn use_color(&self) -> bool {
        match self.color {
            Some(enabled) => enabled,
            None => self.writer.is_none() && std::env::var_os("NO_COLOR").is_none(),
        }
    }

    /// Render the full report into `w`
    pub fn render<W: Write + ?Sized>(
        &self,
        w: &mut W,
        controls: &Controls,
        summary: &Summary,
        color: bool,
    ) -> io::Result<()> {
        writeln!(
            w,
            "{} {} {}",
            state_tag(State::Info, color),
            controls.id,
            controls.description
        )?;
        for group in &controls.groups {
            writeln!(
                w,
                "{} {} {}",
                state_tag(State::Info, color),
                group.id,
                group.description
            )?;
            for check in &group.checks {
                writeln!(
                    w,
                    "{} {} {}",
                    state_tag(check.state, color),
                    check.id,
                    check.description
                )?;
                if self.include_test_output
                    && check.state == State::Fail
                    && !check.actual_value.is_empty()
                {
                    for row in check.actual_value.split('\n') {
                        writeln!(w, "\t {}", row)?;
                    }
                }
            }
        }
        writeln!(w)?;

        if !self.no_remediations && (summary.fail > 0 || summary.warn > 0) {
            writeln!(w, "{}", paint("== Remediations ==", State::Warn, color))?;
            for check in controls.checks().filter(|c| c.state.needs_remediation()) {
                writeln!(w, "{} {}", check.id, check.remediation)?;
            }
            writeln!(w)?;
        }

        writeln!(w, "{}", paint("== Summary ==", summary.worst_state(), color))?;
        writeln!(w, "{} checks PASS", summary.pass)?;
        writeln!(w, "{} checks FAIL", summary.fail)?;
        writeln!(w, "{} checks WARN", summary.warn)?;
        writeln!(w, "{} checks INFO", summary.info)?;
        w.flush()
    }
}

impl Outputter for ConsoleOutputter {
    fn output(&mut self, controls: &Controls, summary: &Summary) -> Result<(), OutputError> {
        let color = self.use_color();
        match self.writer.take() {
            Some(mut writer) => {
                let result = self.render(writer.as_mut(), controls, summary, color);
                self.writer = Some(writer);
                result?;
            }
            None => {
                let stdout = io::stdout();
                let mut lock = stdout.lock();
                self.render(&mut lock, controls, summary, color)?;
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for ConsoleOutputter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleOutputter")
            .field("no_remediations", &self.no_remediations)
            .field("include_test_output", &self.include_test_output)
            .field("color", &self.color)
            .field("custom_writer", &self.writer.is_some())
            .finish()
    }
}

fn state_tag(state: State, color: bool) -> String {
    paint(&format!("[{}]", state), state, color)
}

fn paint(text: &str, state: State, color: bool) -> String {
    if !color {
        return text.to_string();
    }
    match state {
        State::Pass => text.green().to_string(),
        State::Fail => text.red().to_string(),
        State::Warn => text.yellow().to_string(),
        State::Info => text.blue().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bench_check::{Check, Group};

    fn controls() -> Controls {
        let mut controls = Controls::new("1.6.0", "Docker Benchmark")
            .with_group(
                Group::new("1", "Host Configuration")
                    .with_check(
                        Check::new("1.1", "Separate partition", State::Pass)
                            .with_remediation("unused"),
                    )
                    .with_check(
                        Check::new("1.2", "Audit daemon", State::Fail)
                            .with_remediation("Install auditd")
                            .with_actual_value("auditd: not found\nexit 1"),
                    ),
            )
            .with_group(
                Group::new("2", "Daemon").with_check(
                    Check::new("2.1", "Restrict traffic", State::Warn)
                        .with_remediation("Set --icc=false"),
                ),
            );
        controls.tally();
        controls
    }

    fn render(outputter: &ConsoleOutputter, controls: &Controls, summary: &Summary) -> String {
        let mut buf = Vec::new();
        outputter.render(&mut buf, controls, summary, false).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_full_report_layout() {
        let controls = controls();
        let text = render(&ConsoleOutputter::new(false, false), &controls, &controls.summary());

        let expected = "\
[INFO] 1.6.0 Docker Benchmark
[INFO] 1 Host Configuration
[PASS] 1.1 Separate partition
[FAIL] 1.2 Audit daemon
[INFO] 2 Daemon
[WARN] 2.1 Restrict traffic

== Remediations ==
1.2 Install auditd
2.1 Set --icc=false

== Summary ==
1 checks PASS
1 checks FAIL
1 checks WARN
0 checks INFO
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_no_remediations_hides_section() {
        let controls = controls();
        let text = render(&ConsoleOutputter::new(true, false), &controls, &controls.summary());

        assert!(!text.contains("== Remediations =="));
        assert!(text.contains("== Summary =="));
    }

    #[test]
    fn test_remediations_skipped_when_nothing_failed() {
        let controls = controls();
        let text = render(
            &ConsoleOutputter::new(false, false),
            &controls,
            &Summary::new(3, 0, 0, 0),
        );

        assert!(!text.contains("== Remediations =="));
    }

    #[test]
    fn test_include_test_output_indents_raw_rows() {
        let controls = controls();
        let text = render(&ConsoleOutputter::new(true, true), &controls, &controls.summary());

        assert!(text.contains("[FAIL] 1.2 Audit daemon\n\t auditd: not found\n\t exit 1\n"));
    }

    #[test]
    fn test_colored_tags() {
        let controls = controls();
        let mut buf = Vec::new();
        ConsoleOutputter::new(false, false)
            .render(&mut buf, &controls, &controls.summary(), true)
            .unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains(&"[FAIL]".red().to_string()));
        assert!(text.contains(&"== Summary ==".red().to_string()));
    }

    #[test]
    fn test_custom_writer_disables_color_by_default() {
        let outputter = ConsoleOutputter::new(false, false).with_writer(Box::new(io::sink()));
        assert!(!outputter.use_color());
        assert!(outputter.with_color(true).use_color());
    }
}
