//! `log` facade integration
//!
//! Installs a `MessageHandler` as the global `log` logger so that
//! `log::warn!`, `log::error!` and friends from anywhere in the process are
//! routed through it. `log` has no fatal level; use [`fatal!`](crate::fatal)
//! which logs at error level with the [`FATAL_TARGET`] target.

use std::sync::Arc;

use log::{LevelFilter, Log, Metadata, Record};

use crate::handler::MessageHandler;
use crate::types::{file_line, Severity};

/// Target marking a `log` record as fatal
pub const FATAL_TARGET: &str = "fatal";

/// Errors installing the bridge
#[derive(Debug, thiserror::Error)]
pub enum InstallError {
    #[error("A global logger is already installed: {0}")]
    AlreadyInstalled(#[from] log::SetLoggerError),
}

/// Adapter from `log::Log` to a `MessageHandler`
#[derive(Debug, Clone)]
pub struct LogBridge {
    handler: Arc<MessageHandler>,
}

impl LogBridge {
    /// Create a bridge for `handler`
    pub fn new(handler: Arc<MessageHandler>) -> Self {
        Self { handler }
    }

    /// Severity of a record: error-level records on the fatal target are
    /// fatal, everything else maps by level
    pub fn severity_of(record: &Record<'_>) -> Severity {
        if record.target() == FATAL_TARGET && record.level() == log::Level::Error {
            Severity::Fatal
        } else {
            Severity::from_log_level(record.level())
        }
    }
}

impl Log for LogBridge {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::Level::Info || self.handler.logger().is_debug_enabled()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let location = file_line(record.file(), record.line());
        let message = record.args().to_string();
        self.handler
            .handle_message(Self::severity_of(record), &location, &message);
    }

    fn flush(&self) {}
}

/// Install `handler` as the process-wide `log` logger
pub fn install(handler: Arc<MessageHandler>) -> Result<(), InstallError> {
    log::set_boxed_logger(Box::new(LogBridge::new(handler)))?;
    log::set_max_level(LevelFilter::Trace);
    Ok(())
}

/// Log a fatal error through the `log` facade.
///
/// With the bridge installed this shows the fatal dialog and terminates the
/// process.
#[macro_export]
macro_rules! fatal {
    ($($arg:tt)+) => {
        $crate::__log::error!(target: $crate::FATAL_TARGET, $($arg)+)
    };
}

/// Log a critical error through the `log` facade
#[macro_export]
macro_rules! critical {
    ($($arg:tt)+) => {
        $crate::__log::error!($($arg)+)
    };
}
