//! Severity-routed line logger

use std::sync::atomic::{AtomicBool, Ordering};

use super::debug_output::platform_sink;
use super::forced_debug::resolve_severity;
use super::subscribers::{LineObserver, SubscriberList, SubscriptionId};
use super::traits::SharedSink;
use crate::config::LoggerConfig;
use crate::types::{format_line, now, LogRecord, OutputStream, Severity, VERBOSE_LABEL};

/// Formats log records and routes them to a sink and to subscribers
///
/// The debug and verbose flags are atomics, so the logger can be shared
/// between threads and toggled from a UI checkbox at any time.
pub struct LineLogger {
    sink: SharedSink,
    debug: AtomicBool,
    verbose: AtomicBool,
    subscribers: SubscriberList,
}

impl std::fmt::Debug for LineLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineLogger")
            .field("debug", &self.is_debug_enabled())
            .field("verbose", &self.is_verbose_enabled())
            .field("subscribers", &self.subscribers)
            .finish()
    }
}

impl Default for LineLogger {
    fn default() -> Self {
        Self::new(LoggerConfig::default())
    }
}

impl LineLogger {
    /// Create a logger writing to the platform sink
    pub fn new(config: LoggerConfig) -> Self {
        Self::with_sink(config, platform_sink())
    }

    /// Create a logger seeded from the default environment variables
    pub fn from_env() -> Self {
        Self::new(LoggerConfig::from_env())
    }

    /// Create a logger writing to a custom sink
    pub fn with_sink(config: LoggerConfig, sink: SharedSink) -> Self {
        Self {
            sink,
            debug: AtomicBool::new(config.debug),
            verbose: AtomicBool::new(config.verbose),
            subscribers: SubscriberList::new(),
        }
    }

    /// Whether DEBUG lines are emitted
    pub fn is_debug_enabled(&self) -> bool {
        self.debug.load(Ordering::Relaxed)
    }

    /// Enable or disable DEBUG lines
    pub fn set_debug_enabled(&self, enabled: bool) {
        self.debug.store(enabled, Ordering::Relaxed);
    }

    /// Whether VERBOSE lines are emitted
    pub fn is_verbose_enabled(&self) -> bool {
        self.verbose.load(Ordering::Relaxed)
    }

    /// Enable or disable VERBOSE lines
    pub fn set_verbose_enabled(&self, enabled: bool) {
        self.verbose.store(enabled, Ordering::Relaxed);
    }

    /// Current flags as a config value
    pub fn config(&self) -> LoggerConfig {
        LoggerConfig {
            debug: self.is_debug_enabled(),
            verbose: self.is_verbose_enabled(),
        }
    }

    /// Register an observer for every emitted line
    pub fn subscribe(&self, observer: LineObserver) -> SubscriptionId {
        self.subscribers.subscribe(observer)
    }

    /// Remove an observer
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    /// Emit a VERBOSE line if verbose output is enabled
    pub fn log_verbose(&self, message: &str) {
        if !self.is_verbose_enabled() {
            return;
        }
        let line = format_line(&now(), VERBOSE_LABEL, message, None);
        self.emit(OutputStream::Primary, &line);
    }

    /// Format and emit one message.
    ///
    /// Returns the formatted text, or `None` when the message was suppressed
    /// (debug output disabled).
    pub fn handle_message(
        &self,
        severity: Severity,
        source_location: &str,
        message: &str,
    ) -> Option<String> {
        let severity = resolve_severity(severity, message);
        if severity == Severity::Debug && !self.is_debug_enabled() {
            return None;
        }

        let line = LogRecord::new(severity, message)
            .with_source_location(source_location)
            .format();
        self.emit(severity.stream(), &line);
        Some(line)
    }

    fn emit(&self, stream: OutputStream, line: &str) {
        self.sink.write_line(stream, line);
        self.subscribers.notify(line);
    }
}
