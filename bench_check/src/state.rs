// src/state.rs
//! Check outcome states

use serde::{Deserialize, Serialize};

/// Outcome of a single benchmark check
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum State {
    /// Check passed
    Pass,

    /// Check failed
    Fail,

    /// Check could not be verified automatically, manual review needed
    Warn,

    /// Informational check, never counts toward compliance
    #[default]
    Info,
}

impl State {
    pub fn as_str(&self) -> &'static str {
        match self {
            State::Pass => "PASS",
            State::Fail => "FAIL",
            State::Warn => "WARN",
            State::Info => "INFO",
        }
    }

    /// Whether a remediation should be reported for this state
    pub fn needs_remediation(&self) -> bool {
        !matches!(self, State::Pass)
    }
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
