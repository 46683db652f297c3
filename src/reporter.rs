//! Suite-oriented reporting interface driven by a test harness.
//!
//! A [`Reporter`] keeps the open suites in a queue: `start_suite` appends,
//! `end_suite` closes the suite at the front, so suites close in the order
//! they were started. Case and step operations apply to the front suite.

use std::path::Path;

use crate::enums::Status;
use crate::error::{Error, Result};
use crate::model::{current_time_ms, Attachment, Failure, Suite, TestCase};
use crate::writer::{ReportWriter, DEFAULT_RESULTS_DIR};

/// Accumulates suites, cases, and steps from a test run and writes each
/// completed suite to the results directory.
#[derive(Debug, Clone)]
pub struct Reporter {
    suites: Vec<Suite>,
    writer: ReportWriter,
}

impl Reporter {
    /// Creates a reporter writing to the default results directory.
    pub fn new() -> Self {
        Self::with_results_dir(DEFAULT_RESULTS_DIR)
    }

    /// Creates a reporter writing to a custom results directory.
    pub fn with_results_dir(path: impl AsRef<Path>) -> Self {
        Self {
            suites: Vec::new(),
            writer: ReportWriter::with_results_dir(path),
        }
    }

    /// Creates a reporter that resumes reporting over suites opened
    /// elsewhere, writing to the default results directory.
    pub fn with_suites(suites: impl IntoIterator<Item = Suite>) -> Self {
        Self {
            suites: suites.into_iter().collect(),
            writer: ReportWriter::new(),
        }
    }

    /// Returns the suite the next `end_suite` call will close, if any.
    pub fn current_suite(&self) -> Option<&Suite> {
        self.suites.first()
    }

    /// Returns the results directory path.
    pub fn results_dir(&self) -> &Path {
        self.writer.results_dir()
    }

    /// Returns the underlying report writer.
    pub fn writer(&self) -> &ReportWriter {
        &self.writer
    }

    /// Opens a new suite.
    pub fn start_suite(&mut self, name: impl Into<String>, start: i64) {
        self.suites.push(Suite::new(name, start));
    }

    /// Closes the suite that has been open longest and removes it.
    ///
    /// The suite is written to the results directory if it contains at
    /// least one test case; empty suites are dropped without producing a
    /// file. With suites A and B open, the first `end_suite` closes A.
    pub fn end_suite(&mut self, stop: i64) -> Result<()> {
        if self.suites.is_empty() {
            return Err(Error::NoActiveSuite);
        }
        let mut suite = self.suites.remove(0);
        suite.stop = stop;
        if suite.has_tests() {
            self.writer.write_suite(&suite)?;
        }
        Ok(())
    }

    /// Opens a new test case in the current suite.
    pub fn start_case(&mut self, name: impl Into<String>, start: i64) -> Result<()> {
        self.current_suite_mut()?.start_case(name, start);
        Ok(())
    }

    /// Closes the current test case with the given outcome.
    ///
    /// Restores the previously started case as current. Does nothing when
    /// the current suite has no case registered.
    pub fn end_case(&mut self, status: Status, failure: Option<Failure>, stop: i64) -> Result<()> {
        self.current_suite_mut()?.end_case(status, failure, stop);
        Ok(())
    }

    /// Records a case that is ignored: started and immediately ended with
    /// status `pending` and a "Test ignored" failure message. Start and
    /// stop times are both `start`.
    pub fn pending_case(&mut self, name: impl Into<String>, start: i64) -> Result<()> {
        self.start_case(name, start)?;
        self.end_case(Status::Pending, Some(Failure::new("Test ignored")), start)
    }

    /// Adds a label to the current test case.
    pub fn add_label(&mut self, name: impl Into<String>, value: impl Into<String>) -> Result<()> {
        self.current_case_mut()?.add_label(name, value);
        Ok(())
    }

    /// Sets the description of the current test case.
    pub fn set_description(&mut self, text: impl Into<String>) -> Result<()> {
        self.current_case_mut()?.set_description(text);
        Ok(())
    }

    /// Opens a new step in the current suite, nested under the step opened
    /// before it.
    pub fn start_step(&mut self, name: impl Into<String>, start: i64) -> Result<()> {
        self.current_suite_mut()?.start_step(name, start);
        Ok(())
    }

    /// Closes the innermost open step with the given outcome.
    pub fn end_step(&mut self, status: Status, stop: i64) -> Result<()> {
        self.current_suite_mut()?.end_step(status, stop)
    }

    /// Runs `body` inside a step named `name`, timing it with the wall
    /// clock and recording it as passed.
    ///
    /// If `body` panics, the panic propagates and the step is left open;
    /// no status is recorded for it.
    pub fn step<F, R>(&mut self, name: impl Into<String>, body: F) -> Result<R>
    where
        F: FnOnce(&mut Self) -> R,
    {
        self.start_step(name, current_time_ms())?;
        let value = body(self);
        self.end_step(Status::Passed, current_time_ms())?;
        Ok(value)
    }

    /// Writes the content as an attachment blob and records it on the
    /// current test case.
    ///
    /// Every attachment is currently stored as `text/plain` with a `txt`
    /// extension regardless of the hint.
    pub fn add_attachment(
        &mut self,
        name: impl Into<String>,
        content: &[u8],
        type_hint: &str,
    ) -> Result<()> {
        let (mime_type, extension) = buffer_info(content, type_hint);
        let source = self.writer.write_attachment(content, extension)?;
        self.current_case_mut()?
            .add_attachment(Attachment::new(name, source, mime_type, content.len()));
        Ok(())
    }

    fn current_suite_mut(&mut self) -> Result<&mut Suite> {
        self.suites.first_mut().ok_or(Error::NoActiveSuite)
    }

    fn current_case_mut(&mut self) -> Result<&mut TestCase> {
        self.current_suite_mut()?
            .current_case_mut()
            .ok_or(Error::NoActiveCase)
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new()
    }
}

// TODO: derive the mime type and extension from the hint instead of
// storing every attachment as plain text.
fn buffer_info(_content: &[u8], _type_hint: &str) -> (&'static str, &'static str) {
    ("text/plain", "txt")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_current_suite_is_the_oldest_open_one() {
        let mut reporter = Reporter::new();
        reporter.start_suite("first", 1);
        reporter.start_suite("second", 2);
        assert_eq!(
            reporter.current_suite().map(|s| s.name.as_str()),
            Some("first")
        );
    }

    #[test]
    fn test_end_suite_without_suite() {
        let mut reporter = Reporter::new();
        let err = reporter.end_suite(1).unwrap_err();
        assert!(matches!(err, Error::NoActiveSuite));
    }

    #[test]
    fn test_case_ops_without_suite() {
        let mut reporter = Reporter::new();
        assert!(matches!(
            reporter.start_case("c", 1).unwrap_err(),
            Error::NoActiveSuite
        ));
        assert!(matches!(
            reporter.add_label("k", "v").unwrap_err(),
            Error::NoActiveSuite
        ));
        assert!(matches!(
            reporter.start_step("s", 1).unwrap_err(),
            Error::NoActiveSuite
        ));
    }

    #[test]
    fn test_case_data_without_case() {
        let mut reporter = Reporter::new();
        reporter.start_suite("suite", 1);
        assert!(matches!(
            reporter.add_label("k", "v").unwrap_err(),
            Error::NoActiveCase
        ));
        assert!(matches!(
            reporter.set_description("text").unwrap_err(),
            Error::NoActiveCase
        ));
    }

    #[test]
    fn test_end_step_without_step() {
        let mut reporter = Reporter::new();
        reporter.start_suite("suite", 1);
        let err = reporter.end_step(Status::Passed, 2).unwrap_err();
        assert!(matches!(err, Error::NoActiveStep));
    }

    #[test]
    fn test_step_wrapper_returns_value() {
        let mut reporter = Reporter::new();
        reporter.start_suite("suite", 1);
        reporter.start_case("case", 2).unwrap();

        let value = reporter.step("compute", |_| 2 + 2).unwrap();
        assert_eq!(value, 4);

        let suite = reporter.current_suite().unwrap();
        let steps = &suite.test_cases[0].steps;
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].name, "compute");
        assert_eq!(steps[0].status, Some(Status::Passed));
        assert!(steps[0].stop >= steps[0].start);
    }

    #[test]
    fn test_step_wrapper_nests() {
        let mut reporter = Reporter::new();
        reporter.start_suite("suite", 1);
        reporter.start_case("case", 2).unwrap();

        reporter
            .step("outer", |r| r.step("inner", |_| ()).unwrap())
            .unwrap();

        let suite = reporter.current_suite().unwrap();
        let steps = &suite.test_cases[0].steps;
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].steps.len(), 1);
        assert_eq!(steps[0].steps[0].name, "inner");
    }

    #[test]
    fn test_pending_case() {
        let mut reporter = Reporter::new();
        reporter.start_suite("suite", 1);
        reporter.pending_case("not yet written", 5).unwrap();

        let case = &reporter.current_suite().unwrap().test_cases[0];
        assert_eq!(case.status, Some(Status::Pending));
        assert_eq!(case.start, 5);
        assert_eq!(case.stop, 5);
        assert_eq!(
            case.failure.as_ref().map(|f| f.message.as_str()),
            Some("Test ignored")
        );
    }

    #[test]
    fn test_with_suites_resumes_reporting() {
        let mut reporter = Reporter::with_suites([Suite::new("a", 0), Suite::new("b", 0)]);
        assert_eq!(reporter.current_suite().map(|s| s.name.as_str()), Some("a"));

        // both suites are empty, so closing them writes nothing
        reporter.end_suite(1).unwrap();
        assert_eq!(reporter.current_suite().map(|s| s.name.as_str()), Some("b"));
    }

    #[test]
    fn test_end_suite_survives_write_and_consumes_front() {
        let temp = tempdir().unwrap();
        let mut reporter = Reporter::with_results_dir(temp.path());

        reporter.start_suite("written", 1);
        reporter.start_suite("later", 2);
        reporter.start_case("case", 3).unwrap();
        reporter.end_case(Status::Passed, None, 4).unwrap();

        reporter.end_suite(5).unwrap();
        assert_eq!(
            reporter.current_suite().map(|s| s.name.as_str()),
            Some("later")
        );
    }

    #[test]
    fn test_buffer_info_placeholder() {
        assert_eq!(buffer_info(b"\x89PNG", "image/png"), ("text/plain", "txt"));
        assert_eq!(buffer_info(b"", ""), ("text/plain", "txt"));
    }
}
