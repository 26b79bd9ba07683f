// src/summary.rs
//! Aggregate pass/fail/warn/info counters for a completed check run

use crate::state::State;
use serde::{Deserialize, Serialize};

/// Totals for a completed run.
///
/// A `Summary` is a plain value: it is `Copy` and has no setters. Use
/// [`Summary::record`] to derive a new summary with one more result counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Summary {
    #[serde(rename = "total_pass", default)]
    pub pass: u32,

    #[serde(rename = "total_fail", default)]
    pub fail: u32,

    #[serde(rename = "total_warn", default)]
    pub warn: u32,

    #[serde(rename = "total_info", default)]
    pub info: u32,
}

impl Summary {
    pub const fn new(pass: u32, fail: u32, warn: u32, info: u32) -> Self {
        Self {
            pass,
            fail,
            warn,
            info,
        }
    }

    /// True when the run produced no results at all
    pub fn is_empty(&self) -> bool {
        self.pass == 0 && self.fail == 0 && self.warn == 0 && self.info == 0
    }

    pub fn total(&self) -> u64 {
        u64::from(self.pass) + u64::from(self.fail) + u64::from(self.warn) + u64::from(self.info)
    }

    /// Return a copy with one more result of `state` counted
    #[must_use]
    pub fn record(self, state: State) -> Self {
        let mut next = self;
        match state {
            State::Pass => next.pass = next.pass.saturating_add(1),
            State::Fail => next.fail = next.fail.saturating_add(1),
            State::Warn => next.warn = next.warn.saturating_add(1),
            State::Info => next.info = next.info.saturating_add(1),
        }
        next
    }

    /// Highest severity seen: FAIL, then WARN, otherwise PASS.
    ///
    /// INFO results never raise the severity.
    pub fn worst_state(&self) -> State {
        if self.fail > 0 {
            State::Fail
        } else if self.warn > 0 {
            State::Warn
        } else {
            State::Pass
        }
    }
}

impl std::ops::Add for Summary {
    type Output = Summary;

    fn add(self, rhs: Summary) -> Summary {
        Summary {
            pass: self.pass.saturating_add(rhs.pass),
            fail: self.fail.saturating_add(rhs.fail),
            warn: self.warn.saturating_add(rhs.warn),
            info: self.info.saturating_add(rhs.info),
        }
    }
}
