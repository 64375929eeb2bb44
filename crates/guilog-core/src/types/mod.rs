//! Core types for log routing

mod severity;
mod record;

pub use severity::{OutputStream, Severity, SeverityError};
pub use record::{file_line, format_line, now, LogRecord, TIMESTAMP_FORMAT, VERBOSE_LABEL};
