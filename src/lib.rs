//! Allure XML - Allure 1.x XML report generation for test harnesses.
//!
//! This crate accumulates results from a test run (suites, test cases,
//! nested steps, attachments) and serializes them to a results directory in
//! the layout consumed by the Allure 1.x report generator. It includes:
//!
//! - The Allure 1.x data model (suites, cases, steps, labels, attachments)
//! - Enum types for test status and severity
//! - An XML serializer producing `{uuid}-testsuite.xml` documents
//! - A file writer for the results directory and attachment blobs
//! - A [`Reporter`] that tracks the open suites, cases, and steps
//!
//! # Example
//!
//! ```no_run
//! use allure_xml::{current_time_ms, Reporter, Status};
//!
//! let mut reporter = Reporter::with_results_dir("allure-results");
//!
//! reporter.start_suite("Authentication", current_time_ms());
//! reporter.start_case("login with valid credentials", current_time_ms()).unwrap();
//! reporter.add_label("severity", "critical").unwrap();
//!
//! reporter.step("submit the login form", |_| {
//!     // drive the system under test here
//! }).unwrap();
//!
//! reporter.end_case(Status::Passed, None, current_time_ms()).unwrap();
//! reporter.end_suite(current_time_ms()).unwrap();
//! ```

pub mod enums;
pub mod error;
pub mod model;
pub mod reporter;
mod serialize;
pub mod writer;

// Re-exports for convenience
pub use enums::{Severity, Status};
pub use error::{Error, Result};
pub use model::{current_time_ms, Attachment, Failure, Label, Step, Suite, TestCase};
pub use reporter::Reporter;
pub use writer::{ReportWriter, DEFAULT_RESULTS_DIR};
