//! Append-only alert log.

use super::AlertSink;
use crate::detection::AlertRecord;
use crate::metrics::LOG_WRITE_FAILURES;
use chrono::{DateTime, Local};
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, error};

/// Header written once per process start.
pub fn header_line(started: DateTime<Local>) -> String {
    format!(
        "=== Deauth Simulator Log started at {} ===",
        started.format("%Y-%m-%dT%H:%M:%S%.6f")
    )
}

/// Appends one line per alert to a text file.
///
/// The file is opened for each write so it can be rotated or removed while
/// the detector runs.
#[derive(Debug)]
pub struct LogFileSink {
    path: PathBuf,
    failures: u64,
}

impl LogFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            failures: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of lines that could not be written.
    pub fn failures(&self) -> u64 {
        self.failures
    }

    /// Append the startup header, creating the file if needed.
    pub fn write_header(&mut self, started: DateTime<Local>) -> io::Result<()> {
        self.append(&header_line(started))
    }

    /// Append a single newline-terminated line.
    pub fn append(&mut self, line: &str) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", line)
    }
}

impl AlertSink for LogFileSink {
    fn on_alert(&mut self, alert: &AlertRecord) {
        match self.append(&alert.to_string()) {
            Ok(()) => debug!(path = %self.path.display(), "Alert appended to log"),
            Err(e) => {
                self.failures += 1;
                LOG_WRITE_FAILURES.inc();
                error!("Failed to append alert to {}: {}", self.path.display(), e);
            }
        }
    }
}
