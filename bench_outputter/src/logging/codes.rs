//! Event codes for the reporting layer
//!
//! Every logged event carries a [`Code`]. Codes are grouped by the stage that
//! emits them so log consumers can filter on a prefix.

/// Code attached to a log event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Generic code for events logged without an explicit one
pub mod generic {
    use super::Code;

    pub const INFO: Code = Code::new("I000");
}

/// Configuration loading codes
pub mod config {
    use super::Code;

    pub const CONFIG_READ_FAILED: Code = Code::new("E010");
    pub const CONFIG_PARSE_FAILED: Code = Code::new("E011");
    pub const CONFIG_INVALID_VALUE: Code = Code::new("E012");
    pub const CONTROLS_LOAD_FAILED: Code = Code::new("E013");
}

/// Output construction and emission codes
pub mod output {
    use super::Code;

    pub const ADAPTER_CONSTRUCTION_FAILED: Code = Code::new("E100");
    pub const EMISSION_FAILED: Code = Code::new("E101");
    pub const MISSING_SINK_PARAMETER: Code = Code::new("E102");
    /// A non-console format was requested for a run with no results
    pub const EMPTY_RUN_FALLBACK: Code = Code::new("W100");
}

/// Success codes
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("OK000");
    pub const OUTPUTTER_SELECTED: Code = Code::new("OUT001");
    pub const REPORT_EMITTED: Code = Code::new("OUT002");
    pub const REPORT_STORED: Code = Code::new("OUT003");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_display_as_their_string() {
        assert_eq!(output::EMISSION_FAILED.to_string(), "E101");
        assert_eq!(success::OUTPUTTER_SELECTED.as_str(), "OUT001");
        assert_eq!(Code::new("X1"), Code::new("X1"));
    }
}
