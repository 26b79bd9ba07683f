// src/controls.rs
//! # Controls Tree
//!
//! The detailed result tree of a benchmark run: a [`Controls`] document holds
//! [`Group`]s, each holding [`Check`]s with their final [`State`].
//!
//! JSON field names follow the report format consumed by downstream tooling
//! (`tests`, `results`, `test_number`, `total_pass`, ...).

use crate::error::CheckError;
use crate::state::State;
use crate::summary::Summary;
use serde::{Deserialize, Serialize};

/// Complete result tree for one benchmark
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Controls {
    /// Benchmark identifier (e.g. "1.6.0")
    #[serde(default)]
    pub id: String,

    /// Benchmark title
    #[serde(rename = "text", default)]
    pub description: String,

    /// Check groups in report order
    #[serde(rename = "tests", default)]
    pub groups: Vec<Group>,

    /// Run totals
    #[serde(flatten)]
    pub summary: Summary,
}

/// A section of related checks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Group {
    #[serde(rename = "section", default)]
    pub id: String,

    #[serde(rename = "desc", default)]
    pub description: String,

    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub group_type: String,

    #[serde(rename = "results", default)]
    pub checks: Vec<Check>,

    #[serde(default)]
    pub pass: u32,

    #[serde(default)]
    pub fail: u32,

    #[serde(default)]
    pub warn: u32,

    #[serde(default)]
    pub info: u32,
}

/// A single check and its outcome
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Check {
    #[serde(rename = "test_number", default)]
    pub id: String,

    #[serde(rename = "test_desc", default)]
    pub description: String,

    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub check_type: String,

    #[serde(default)]
    pub test_info: Vec<String>,

    #[serde(rename = "status", default)]
    pub state: State,

    /// Raw output captured from the audit command
    #[serde(default)]
    pub actual_value: String,

    #[serde(default)]
    pub scored: bool,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub remediation: String,
}

impl Controls {
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    /// Append a group (builder style)
    pub fn with_group(mut self, group: Group) -> Self {
        self.groups.push(group);
        self
    }

    /// Parse a controls document
    pub fn from_json(input: &str) -> Result<Self, CheckError> {
        serde_json::from_str(input).map_err(CheckError::Decode)
    }

    /// Pretty-printed JSON document
    pub fn to_json(&self) -> Result<String, CheckError> {
        serde_json::to_string_pretty(self).map_err(CheckError::Encode)
    }

    /// Totals as recorded in the document
    pub fn summary(&self) -> Summary {
        self.summary
    }

    /// Recompute per-group and overall counters from check states.
    ///
    /// Returns the new overall summary.
    pub fn tally(&mut self) -> Summary {
        let mut total = Summary::default();
        for group in &mut self.groups {
            let group_summary = group.tally();
            total = total + group_summary;
        }
        self.summary = total;
        total
    }

    /// Iterate over every check in report order
    pub fn checks(&self) -> impl Iterator<Item = &Check> {
        self.groups.iter().flat_map(|g| g.checks.iter())
    }
}

impl Group {
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    pub fn with_check(mut self, check: Check) -> Self {
        self.checks.push(check);
        self
    }

    fn tally(&mut self) -> Summary {
        let summary = self
            .checks
            .iter()
            .fold(Summary::default(), |acc, c| acc.record(c.state));
        self.pass = summary.pass;
        self.fail = summary.fail;
        self.warn = summary.warn;
        self.info = summary.info;
        summary
    }
}

impl Check {
    pub fn new(id: impl Into<String>, description: impl Into<String>, state: State) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            state,
            ..Self::default()
        }
    }

    pub fn with_remediation(mut self, remediation: impl Into<String>) -> Self {
        self.remediation = remediation.into();
        self
    }

    pub fn with_actual_value(mut self, actual_value: impl Into<String>) -> Self {
        self.actual_value = actual_value.into();
        self
    }

    pub fn scored(mut self, scored: bool) -> Self {
        self.scored = scored;
        self
    }
}
