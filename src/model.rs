//! Data model for Allure 1.x test suites, cases, steps, and attachments.
//!
//! A [`Suite`] owns its test cases and the runtime cursor state that tracks
//! which case and which steps are currently open. Cursors are plain stacks:
//! starting a case or step pushes, ending one pops. They never appear in the
//! serialized document.

use std::io;

use crate::enums::Status;
use crate::error::{Error, Result};

/// A suite of test cases, serialized to one `{uuid}-testsuite.xml` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suite {
    /// Suite name
    pub name: String,

    /// Suite start time (Unix timestamp in milliseconds)
    pub start: i64,

    /// Suite stop time (Unix timestamp in milliseconds)
    pub stop: i64,

    /// Test cases in start order
    pub test_cases: Vec<TestCase>,

    // Indices into test_cases of the open cases, innermost last.
    case_stack: Vec<usize>,

    // Open steps, innermost last. Steps move into the tree when ended.
    step_stack: Vec<Step>,
}

impl Suite {
    /// Creates a new suite with the given name and start time.
    pub fn new(name: impl Into<String>, start: i64) -> Self {
        Self {
            name: name.into(),
            start,
            stop: start,
            test_cases: Vec::new(),
            case_stack: Vec::new(),
            step_stack: Vec::new(),
        }
    }

    /// Returns true if at least one test case was started in this suite.
    ///
    /// Suites without cases are dropped instead of being written out.
    pub fn has_tests(&self) -> bool {
        !self.test_cases.is_empty()
    }

    /// Opens a new test case and makes it current.
    ///
    /// The case is appended to the suite's case list, so output order is
    /// start order. Any steps left open by a previous case are discarded.
    pub fn start_case(&mut self, name: impl Into<String>, start: i64) {
        self.test_cases.push(TestCase::new(name, start));
        self.case_stack.push(self.test_cases.len() - 1);
        self.step_stack.clear();
    }

    /// Closes the current case and restores the previously started case
    /// as current.
    ///
    /// Does nothing when no case is registered.
    pub fn end_case(&mut self, status: Status, failure: Option<Failure>, stop: i64) {
        if let Some(index) = self.case_stack.pop() {
            let case = &mut self.test_cases[index];
            case.status = Some(status);
            case.failure = failure;
            case.stop = stop;
        }
    }

    /// Returns the current test case, if any.
    pub fn current_case(&self) -> Option<&TestCase> {
        self.case_stack.last().map(|&index| &self.test_cases[index])
    }

    /// Returns the current test case mutably, if any.
    pub fn current_case_mut(&mut self) -> Option<&mut TestCase> {
        self.case_stack
            .last()
            .copied()
            .map(|index| &mut self.test_cases[index])
    }

    /// Opens a new step nested under the step opened before it.
    pub fn start_step(&mut self, name: impl Into<String>, start: i64) {
        self.step_stack.push(Step::new(name, start));
    }

    /// Closes the innermost open step and attaches it to its parent step,
    /// or to the current case when it has no parent.
    pub fn end_step(&mut self, status: Status, stop: i64) -> Result<()> {
        let mut step = self.step_stack.pop().ok_or(Error::NoActiveStep)?;
        step.status = Some(status);
        step.stop = stop;

        if let Some(parent) = self.step_stack.last_mut() {
            parent.steps.push(step);
            return Ok(());
        }
        let case = self.current_case_mut().ok_or(Error::NoActiveCase)?;
        case.steps.push(step);
        Ok(())
    }

    /// Serializes this suite as an Allure 1.x XML document to the writer.
    pub fn serialize(&self, writer: impl io::Write) -> Result<()> {
        Ok(crate::serialize::serialize_suite(self, writer)?)
    }

    /// Serializes this suite to an XML string.
    pub fn to_xml_string(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.serialize(&mut buf)?;
        let xml = String::from_utf8(buf)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(xml)
    }
}

/// A single test case within a suite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    /// Test name
    pub name: String,

    /// Optional test description
    pub description: Option<String>,

    /// Test start time (Unix timestamp in milliseconds)
    pub start: i64,

    /// Test stop time (Unix timestamp in milliseconds)
    pub stop: i64,

    /// Test outcome, unset until the case is ended
    pub status: Option<Status>,

    /// Failure details for failed, broken, or pending cases
    pub failure: Option<Failure>,

    /// Top-level steps in completion order
    pub steps: Vec<Step>,

    /// Labels in insertion order
    pub labels: Vec<Label>,

    /// Attachments in insertion order
    pub attachments: Vec<Attachment>,
}

impl TestCase {
    /// Creates a new test case with the given name and start time.
    pub fn new(name: impl Into<String>, start: i64) -> Self {
        Self {
            name: name.into(),
            description: None,
            start,
            stop: start,
            status: None,
            failure: None,
            steps: Vec::new(),
            labels: Vec::new(),
            attachments: Vec::new(),
        }
    }

    /// Adds a label to the test case.
    pub fn add_label(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.labels.push(Label::new(name, value));
    }

    /// Adds an attachment to the test case.
    pub fn add_attachment(&mut self, attachment: Attachment) {
        self.attachments.push(attachment);
    }

    /// Sets the test description.
    pub fn set_description(&mut self, text: impl Into<String>) {
        self.description = Some(text.into());
    }
}

/// Failure details attached to a test case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    /// Failure message
    pub message: String,

    /// Optional stack trace
    pub stack_trace: Option<String>,
}

impl Failure {
    /// Creates a failure with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            stack_trace: None,
        }
    }

    /// Sets the stack trace.
    pub fn with_stack_trace(mut self, trace: impl Into<String>) -> Self {
        self.stack_trace = Some(trace.into());
        self
    }
}

/// A step within a test case. Steps nest arbitrarily deep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Step name
    pub name: String,

    /// Step start time (Unix timestamp in milliseconds)
    pub start: i64,

    /// Step stop time (Unix timestamp in milliseconds)
    pub stop: i64,

    /// Step outcome, unset until the step is ended
    pub status: Option<Status>,

    /// Nested steps in completion order
    pub steps: Vec<Step>,
}

impl Step {
    /// Creates a new step with the given name and start time.
    pub fn new(name: impl Into<String>, start: i64) -> Self {
        Self {
            name: name.into(),
            start,
            stop: start,
            status: None,
            steps: Vec::new(),
        }
    }
}

/// Label for categorizing and filtering tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    /// Label name (a reserved name or custom)
    pub name: String,

    /// Label value
    pub value: String,
}

impl Label {
    /// Creates a new label.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Creates a severity label.
    pub fn severity(severity: crate::enums::Severity) -> Self {
        Self::new("severity", severity.as_str())
    }

    /// Creates a story label.
    pub fn story(value: impl Into<String>) -> Self {
        Self::new("story", value)
    }

    /// Creates a feature label.
    pub fn feature(value: impl Into<String>) -> Self {
        Self::new("feature", value)
    }

    /// Creates a host label.
    pub fn host(value: impl Into<String>) -> Self {
        Self::new("host", value)
    }

    /// Creates a thread label.
    pub fn thread(value: impl Into<String>) -> Self {
        Self::new("thread", value)
    }

    /// Creates an issue label.
    pub fn issue(value: impl Into<String>) -> Self {
        Self::new("issue", value)
    }

    /// Creates a test ID label.
    pub fn test_id(value: impl Into<String>) -> Self {
        Self::new("testId", value)
    }
}

/// Attachment file reference. The bytes live in the referenced file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Attachment display title
    pub title: String,

    /// Source file name (UUID-based) in the results directory
    pub source: String,

    /// MIME type of the attachment content
    pub mime_type: String,

    /// Content size in bytes
    pub size: usize,
}

impl Attachment {
    /// Creates a new attachment reference.
    pub fn new(
        title: impl Into<String>,
        source: impl Into<String>,
        mime_type: impl Into<String>,
        size: usize,
    ) -> Self {
        Self {
            title: title.into(),
            source: source.into(),
            mime_type: mime_type.into(),
            size,
        }
    }
}

/// Returns the current time in milliseconds since Unix epoch.
pub fn current_time_ms() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
