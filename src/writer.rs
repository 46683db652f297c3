//! File writer for suite reports, attachment blobs, and environment info.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::model::Suite;

/// Default directory for report output.
pub const DEFAULT_RESULTS_DIR: &str = "allure-results";

/// Writer for report files in a results directory.
///
/// The results directory is expected to exist before anything is written;
/// report writes never create it. [`ReportWriter::init`] is provided for
/// harness setup code that owns the directory lifecycle.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    results_dir: PathBuf,
}

impl ReportWriter {
    /// Creates a new writer with the default results directory.
    pub fn new() -> Self {
        Self::with_results_dir(DEFAULT_RESULTS_DIR)
    }

    /// Creates a new writer with a custom results directory.
    pub fn with_results_dir(path: impl AsRef<Path>) -> Self {
        Self {
            results_dir: path.as_ref().to_path_buf(),
        }
    }

    /// Returns the results directory path.
    pub fn results_dir(&self) -> &Path {
        &self.results_dir
    }

    /// Initializes the results directory, optionally cleaning it first.
    pub fn init(&self, clean: bool) -> io::Result<()> {
        if clean && self.results_dir.exists() {
            fs::remove_dir_all(&self.results_dir)?;
        }
        fs::create_dir_all(&self.results_dir)?;
        Ok(())
    }

    /// Writes a suite as a `{uuid}-testsuite.xml` file and returns its path.
    pub fn write_suite(&self, suite: &Suite) -> Result<PathBuf> {
        let uuid = uuid::Uuid::new_v4().to_string();
        let filename = format!("{}-testsuite.xml", uuid);
        let path = self.results_dir.join(&filename);
        let mut buf = Vec::new();
        suite.serialize(&mut buf)?;
        fs::write(&path, buf)?;
        Ok(path)
    }

    /// Writes attachment bytes as a `{uuid}-attachment.{ext}` file and
    /// returns the generated file name.
    pub fn write_attachment(&self, content: &[u8], extension: &str) -> Result<String> {
        let uuid = uuid::Uuid::new_v4().to_string();
        let filename = format!("{}-attachment.{}", uuid, extension);
        fs::write(self.results_dir.join(&filename), content)?;
        Ok(filename)
    }

    /// Writes the environment.properties file.
    ///
    /// Keys and values are escaped according to the Java properties file
    /// format.
    pub fn write_environment(&self, properties: &[(String, String)]) -> Result<PathBuf> {
        let path = self.results_dir.join("environment.properties");
        let mut file = File::create(&path)?;
        for (key, value) in properties {
            let escaped_key = escape_property_value(key);
            let escaped_value = escape_property_value(value);
            writeln!(file, "{}={}", escaped_key, escaped_value)?;
        }
        Ok(path)
    }
}

impl Default for ReportWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Escapes a string for use in a Java properties file.
///
/// Backslashes must be escaped before the other sequences.
fn escape_property_value(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('=', "\\=")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::Status;
    use crate::error::Error;
    use tempfile::tempdir;

    fn sample_suite() -> Suite {
        let mut suite = Suite::new("Sample", 1);
        suite.start_case("case", 2);
        suite.end_case(Status::Passed, None, 3);
        suite.stop = 4;
        suite
    }

    #[test]
    fn test_writer_init() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join("results");
        let writer = ReportWriter::with_results_dir(&dir);
        writer.init(true).unwrap();
        assert!(dir.exists());
    }

    #[test]
    fn test_init_clean_removes_stale_files() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join("results");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("stale.xml"), "old").unwrap();

        let writer = ReportWriter::with_results_dir(&dir);
        writer.init(true).unwrap();
        assert!(dir.exists());
        assert!(!dir.join("stale.xml").exists());
    }

    #[test]
    fn test_write_suite() {
        let temp = tempdir().unwrap();
        let writer = ReportWriter::with_results_dir(temp.path());

        let path = writer.write_suite(&sample_suite()).unwrap();
        assert!(path.exists());
        assert!(path.to_string_lossy().ends_with("-testsuite.xml"));

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("<ns2:test-suite"));
        assert!(content.contains("<name>case</name>"));
    }

    #[test]
    fn test_write_suite_generates_unique_names() {
        let temp = tempdir().unwrap();
        let writer = ReportWriter::with_results_dir(temp.path());

        let suite = sample_suite();
        let first = writer.write_suite(&suite).unwrap();
        let second = writer.write_suite(&suite).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_write_attachment_exact_bytes() {
        let temp = tempdir().unwrap();
        let writer = ReportWriter::with_results_dir(temp.path());

        let content = b"line one\nline two\x00\xff";
        let filename = writer.write_attachment(content, "txt").unwrap();
        assert!(filename.ends_with("-attachment.txt"));

        let written = fs::read(temp.path().join(&filename)).unwrap();
        assert_eq!(written, content);
    }

    #[test]
    fn test_write_fails_without_results_dir() {
        let temp = tempdir().unwrap();
        let writer = ReportWriter::with_results_dir(temp.path().join("missing"));

        let err = writer.write_suite(&sample_suite()).unwrap_err();
        assert!(matches!(err, Error::Io(_)));

        let err = writer.write_attachment(b"data", "txt").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_write_environment() {
        let temp = tempdir().unwrap();
        let writer = ReportWriter::with_results_dir(temp.path());

        let env = vec![
            ("os".to_string(), "linux".to_string()),
            ("flags".to_string(), "a=b\nc".to_string()),
        ];

        let path = writer.write_environment(&env).unwrap();
        assert!(path.ends_with("environment.properties"));

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("os=linux"));
        assert!(content.contains("flags=a\\=b\\nc"));
    }
}
