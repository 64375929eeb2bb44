//! Message severity

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Severity of a log message, ordered by escalating required response
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Critical,
    Fatal,
}

/// Output stream a formatted line is routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStream {
    /// Standard output
    Primary,
    /// Standard error
    Error,
}

impl Severity {
    /// Label written in the formatted line
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Critical => "CRITICAL",
            Severity::Fatal => "FATAL",
        }
    }

    /// Stream this severity is written to
    pub fn stream(&self) -> OutputStream {
        match self {
            Severity::Debug | Severity::Info => OutputStream::Primary,
            Severity::Warning | Severity::Critical | Severity::Fatal => OutputStream::Error,
        }
    }

    /// Whether messages of this severity surface an error dialog
    pub fn shows_dialog(&self) -> bool {
        matches!(self, Severity::Critical | Severity::Fatal)
    }

    /// Map a `log` facade level onto a severity.
    ///
    /// `log` has no fatal level; fatal records are recognised by target in
    /// the bridge instead.
    pub fn from_log_level(level: log::Level) -> Self {
        match level {
            log::Level::Error => Severity::Critical,
            log::Level::Warn => Severity::Warning,
            log::Level::Info => Severity::Info,
            log::Level::Debug | log::Level::Trace => Severity::Debug,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error for severities that arrive from outside the closed enum
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SeverityError {
    #[error("Unknown severity name: {0}")]
    UnknownName(String),

    #[error("Unknown severity value: {0}")]
    UnknownValue(u8),
}

impl FromStr for Severity {
    type Err = SeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "debug" => Ok(Severity::Debug),
            "info" => Ok(Severity::Info),
            "warning" | "warn" => Ok(Severity::Warning),
            "critical" => Ok(Severity::Critical),
            "fatal" => Ok(Severity::Fatal),
            _ => Err(SeverityError::UnknownName(s.to_string())),
        }
    }
}

impl TryFrom<u8> for Severity {
    type Error = SeverityError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Severity::Debug),
            1 => Ok(Severity::Info),
            2 => Ok(Severity::Warning),
            3 => Ok(Severity::Critical),
            4 => Ok(Severity::Fatal),
            other => Err(SeverityError::UnknownValue(other)),
        }
    }
}
