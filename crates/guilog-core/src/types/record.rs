//! A single log record and its text form

use chrono::{Local, NaiveDateTime};

use super::severity::Severity;

/// Timestamp layout used in log lines (ISO-8601, second precision)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Label used for verbose lines, which have no severity of their own
pub const VERBOSE_LABEL: &str = "VERBOSE";

/// One log message, created per call and discarded after formatting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    /// Local time, truncated to whole seconds when formatted
    pub timestamp: NaiveDateTime,
    /// Resolved severity (after forced-debug demotion)
    pub severity: Severity,
    /// Message text
    pub message: String,
    /// "file:line" of the call site, if known
    pub source_location: Option<String>,
}

impl LogRecord {
    /// Create a record stamped with the current local time
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            timestamp: Local::now().naive_local(),
            severity,
            message: message.into(),
            source_location: None,
        }
    }

    /// Attach a source location; empty locations are dropped
    pub fn with_source_location(mut self, location: impl Into<String>) -> Self {
        let location = location.into();
        self.source_location = if location.is_empty() { None } else { Some(location) };
        self
    }

    /// Override the timestamp
    pub fn with_timestamp(mut self, timestamp: NaiveDateTime) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Render the record as it is written to the sink
    pub fn format(&self) -> String {
        format_line(
            &self.timestamp,
            self.severity.label(),
            &self.message,
            self.source_location.as_deref(),
        )
    }
}

/// Format `[<timestamp>] <LABEL>: <message>\n` plus an optional
/// `\t<location>\n` second line.
pub fn format_line(
    timestamp: &NaiveDateTime,
    label: &str,
    message: &str,
    source_location: Option<&str>,
) -> String {
    let mut line = format!("[{}] {}: {}\n", timestamp.format(TIMESTAMP_FORMAT), label, message);
    if let Some(location) = source_location.filter(|l| !l.is_empty()) {
        line.push('\t');
        line.push_str(location);
        line.push('\n');
    }
    line
}

/// Current local time, for callers formatting lines without a record
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Build a "file:line" location tag
pub fn file_line(file: Option<&str>, line: Option<u32>) -> String {
    match (file, line) {
        (Some(file), Some(line)) => format!("{}:{}", file, line),
        (Some(file), None) => file.to_string(),
        (None, _) => String::new(),
    }
}
