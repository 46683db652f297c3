//! Status and severity vocabularies for Allure 1.x reports.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Outcome of a test case or step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Status {
    /// Test passed successfully
    Passed,
    /// Test failed due to an assertion failure (product defect)
    Failed,
    /// Test broken by an unexpected error (test defect)
    Broken,
    /// Test was skipped
    Skipped,
    /// Test is ignored until it is implemented or fixed
    Pending,
}

impl Status {
    /// Returns the string written to the `status` attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Passed => "passed",
            Status::Failed => "failed",
            Status::Broken => "broken",
            Status::Skipped => "skipped",
            Status::Pending => "pending",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Status {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "passed" => Ok(Status::Passed),
            "failed" => Ok(Status::Failed),
            "broken" => Ok(Status::Broken),
            "skipped" => Ok(Status::Skipped),
            "pending" => Ok(Status::Pending),
            other => Err(Error::InvalidStatus(other.to_string())),
        }
    }
}

/// Test severity level for prioritization.
///
/// Written as the value of a `severity` label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum Severity {
    /// System is unusable, blocker issue
    Blocker,
    /// Major functionality is broken
    Critical,
    /// Standard test importance
    #[default]
    Normal,
    /// Minor issues
    Minor,
    /// Cosmetic or trivial issues
    Trivial,
}

impl Severity {
    /// Returns the string representation used in severity labels.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Blocker => "blocker",
            Severity::Critical => "critical",
            Severity::Normal => "normal",
            Severity::Minor => "minor",
            Severity::Trivial => "trivial",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Severity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "blocker" => Ok(Severity::Blocker),
            "critical" => Ok(Severity::Critical),
            "normal" => Ok(Severity::Normal),
            "minor" => Ok(Severity::Minor),
            "trivial" => Ok(Severity::Trivial),
            other => Err(Error::InvalidSeverity(other.to_string())),
        }
    }
}
