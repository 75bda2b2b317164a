//! Scanlink Log - Durable scan history
//!
//! Every accepted submission is appended to a CSV file before it is queued
//! for the consumer, so a scan survives even when the in-memory hand-off is
//! abandoned mid-shutdown.
//!
//! The file lives in ~/.local/share/scanlink/scans.csv by default and gets a
//! `timestamp,code,source` header row when first created.

use chrono::{DateTime, Utc};
use scanlink_core::ScanSource;
use std::borrow::Cow;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// CSV header written when the log file is created
const HEADER: &str = "timestamp,code,source\n";

/// Log errors
#[derive(Debug, Error)]
pub enum LogError {
    #[error("Data directory not found")]
    NoDataDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type LogResult<T> = Result<T, LogError>;

/// Append-only CSV log of accepted scans
#[derive(Debug)]
pub struct ScanLog {
    path: PathBuf,
}

impl ScanLog {
    /// Create a log at the default path (~/.local/share/scanlink/scans.csv)
    pub fn new() -> LogResult<Self> {
        let data_dir = dirs::data_dir().ok_or(LogError::NoDataDir)?;
        Ok(Self {
            path: data_dir.join("scanlink").join("scans.csv"),
        })
    }

    /// Create a log at a specific path
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Path of the underlying CSV file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one scan record, creating the file and header on first use
    pub fn append(
        &self,
        code: &str,
        source: ScanSource,
        timestamp: DateTime<Utc>,
    ) -> LogResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        if file.metadata()?.len() == 0 {
            file.write_all(HEADER.as_bytes())?;
        }

        let row = format!(
            "{},{},{}\n",
            timestamp.to_rfc3339(),
            csv_field(code),
            source
        );
        file.write_all(row.as_bytes())?;
        debug!("Logged scan to {:?}", self.path);
        Ok(())
    }
}

/// Quote a field when it contains a separator, quote, or newline
fn csv_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn read_log(log: &ScanLog) -> String {
        std::fs::read_to_string(log.path()).unwrap()
    }

    #[test]
    fn test_first_append_writes_header() {
        let dir = tempdir().unwrap();
        let log = ScanLog::with_path(dir.path().join("scans.csv"));

        log.append("ABC123", ScanSource::Mobile, Utc::now()).unwrap();

        let contents = read_log(&log);
        assert!(contents.starts_with("timestamp,code,source\n"));
        assert_eq!(contents.lines().count(), 2);
    }

    #[test]
    fn test_header_written_only_once() {
        let dir = tempdir().unwrap();
        let log = ScanLog::with_path(dir.path().join("scans.csv"));

        log.append("one", ScanSource::Mobile, Utc::now()).unwrap();
        log.append("two", ScanSource::Other, Utc::now()).unwrap();

        let contents = read_log(&log);
        assert_eq!(contents.matches("timestamp,code,source").count(), 1);
        assert_eq!(contents.lines().count(), 3);
    }

    #[test]
    fn test_row_contains_code_and_source() {
        let dir = tempdir().unwrap();
        let log = ScanLog::with_path(dir.path().join("scans.csv"));

        log.append("ABC123", ScanSource::Mobile, Utc::now()).unwrap();

        let contents = read_log(&log);
        let row = contents.lines().nth(1).unwrap();
        assert!(row.contains(",ABC123,mobile"));
    }

    #[test]
    fn test_fields_with_commas_are_quoted() {
        let dir = tempdir().unwrap();
        let log = ScanLog::with_path(dir.path().join("scans.csv"));

        log.append("a,b\"c", ScanSource::Mobile, Utc::now()).unwrap();

        let contents = read_log(&log);
        assert!(contents.contains("\"a,b\"\"c\""));
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let log = ScanLog::with_path(dir.path().join("nested").join("scans.csv"));
        log.append("X", ScanSource::Mobile, Utc::now()).unwrap();
        assert!(log.path().exists());
    }
}
