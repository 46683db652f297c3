//! Error types for report generation.
//!
//! This module provides a unified error type for all reporting operations,
//! covering I/O failures, XML serialization failures, and calls made while
//! the reporter has no suite, case, or step to apply them to.

use thiserror::Error;

/// Result type alias for reporting operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reporting results.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// I/O error occurred while writing report files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// XML serialization error.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// No suite has been started.
    ///
    /// Returned when an operation needs an open suite and the suite queue
    /// is empty.
    #[error("No active suite - call start_suite before reporting results")]
    NoActiveSuite,

    /// No test case is registered in the current suite.
    #[error("No active test case - call start_case before adding case data")]
    NoActiveCase,

    /// No step is open in the current suite.
    #[error("No active step - call start_step before end_step")]
    NoActiveStep,

    /// A status string did not match any known status.
    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    /// A severity string did not match any known severity.
    #[error("Invalid severity: {0}")]
    InvalidSeverity(String),
}
