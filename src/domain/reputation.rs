//! Reputation Verdict
//!
//! Interprets the `status` string returned by the external reputation
//! service. Only the exact status `"Good"` passes; everything else,
//! including a missing status or a failed lookup, is treated as not good.

use std::fmt;

/// Status that lets a token through the reputation gate
pub const GOOD_STATUS: &str = "Good";

/// Status assumed when the service gives no answer
pub const DEFAULT_STATUS: &str = "Risky";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reputation {
    Good,
    /// Any other outcome, carrying the status that was reported or assumed
    NotGood(String),
}

impl Reputation {
    /// Map a reported status to a verdict. Comparison is exact and case-sensitive.
    pub fn from_status(status: Option<&str>) -> Self {
        match status {
            Some(GOOD_STATUS) => Reputation::Good,
            Some(other) => Reputation::NotGood(other.to_string()),
            None => Reputation::risky(),
        }
    }

    /// Fail-closed verdict used on transport or decode failures
    pub fn risky() -> Self {
        Reputation::NotGood(DEFAULT_STATUS.to_string())
    }

    pub fn is_good(&self) -> bool {
        matches!(self, Reputation::Good)
    }

    pub fn status(&self) -> &str {
        match self {
            Reputation::Good => GOOD_STATUS,
            Reputation::NotGood(status) => status,
        }
    }
}

impl fmt::Display for Reputation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.status())
    }
}
