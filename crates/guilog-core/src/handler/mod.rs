//! The message-handling entry point
//!
//! `MessageHandler` owns all process-wide logging state: the line logger
//! flags and subscribers, the ignored-message set and the live critical
//! dialog. Construct one at startup and share it as an `Arc`.

mod terminate;

pub use terminate::{AbortTerminator, Terminator};

use std::sync::Arc;

use crate::config::LoggerConfig;
use crate::dialogs::{
    DialogBranding, ErrorDialogPresenter, HeadlessDialogService, SharedDialogService,
};
use crate::logging::{LineLogger, SharedSink};
use crate::types::Severity;

/// Routes messages to the line logger, error dialogs and termination
pub struct MessageHandler {
    logger: Arc<LineLogger>,
    presenter: ErrorDialogPresenter,
    terminator: Arc<dyn Terminator>,
}

impl std::fmt::Debug for MessageHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageHandler")
            .field("logger", &self.logger)
            .field("presenter", &self.presenter)
            .finish()
    }
}

impl MessageHandler {
    /// Create a handler with default branding that aborts on fatal errors
    pub fn new(logger: Arc<LineLogger>, dialogs: SharedDialogService) -> Self {
        Self::with_branding(logger, dialogs, DialogBranding::default())
    }

    /// Create a handler with custom dialog branding
    pub fn with_branding(
        logger: Arc<LineLogger>,
        dialogs: SharedDialogService,
        branding: DialogBranding,
    ) -> Self {
        Self {
            presenter: ErrorDialogPresenter::new(dialogs, branding, Arc::clone(&logger)),
            logger,
            terminator: Arc::new(AbortTerminator),
        }
    }

    /// Handler for processes without a UI: platform sink, no dialogs
    pub fn headless(config: LoggerConfig) -> Self {
        Self::new(
            Arc::new(LineLogger::new(config)),
            Arc::new(HeadlessDialogService::new()),
        )
    }

    /// Handler writing to `sink`, seeded from the environment
    pub fn from_env(sink: SharedSink, dialogs: SharedDialogService) -> Self {
        Self::new(Arc::new(LineLogger::with_sink(LoggerConfig::from_env(), sink)), dialogs)
    }

    /// Replace what happens after a fatal dialog is dismissed
    pub fn with_terminator(mut self, terminator: Arc<dyn Terminator>) -> Self {
        self.terminator = terminator;
        self
    }

    /// The line logger
    pub fn logger(&self) -> &Arc<LineLogger> {
        &self.logger
    }

    /// The error dialog presenter
    pub fn presenter(&self) -> &ErrorDialogPresenter {
        &self.presenter
    }

    /// Handle one message from the host logging framework.
    ///
    /// Always logs. Critical and fatal messages also get a dialog; after a
    /// fatal dialog the process is terminated whatever the user chose, so
    /// this call never returns for `Severity::Fatal`.
    pub fn handle_message(&self, severity: Severity, source_location: &str, message: &str) {
        self.logger.handle_message(severity, source_location, message);

        if severity.shows_dialog() {
            if let Err(err) = self.presenter.show_error_dialog(message, source_location, severity) {
                self.logger.log_verbose(&err.to_string());
            }
        }

        if severity == Severity::Fatal {
            self.logger.log_verbose("terminating after fatal error");
            self.terminator.terminate();
        }
    }

    /// Emit a VERBOSE line if verbose output is enabled
    pub fn log_verbose(&self, message: &str) {
        self.logger.log_verbose(message);
    }

    /// Bring the live critical dialog to the foreground, if any
    pub fn raise_critical_dialog(&self) {
        self.presenter.raise_critical_dialog();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogs::{DialogChoice, MockDialogService};
    use crate::logging::{LogBuffer, MemorySink};
    use crate::types::OutputStream;

    struct PanicTerminator;

    impl Terminator for PanicTerminator {
        fn terminate(&self) -> ! {
            panic!("terminated");
        }
    }

    struct Fixture {
        handler: MessageHandler,
        dialogs: Arc<MockDialogService>,
        sink: Arc<MemorySink>,
        lines: LogBuffer,
    }

    fn setup(config: LoggerConfig) -> Fixture {
        let dialogs = Arc::new(MockDialogService::new());
        let sink = Arc::new(MemorySink::new());
        let logger = Arc::new(LineLogger::with_sink(config, sink.clone()));
        let lines = LogBuffer::new(32);
        logger.subscribe(lines.observer());

        let handler = MessageHandler::new(logger, dialogs.clone())
            .with_terminator(Arc::new(PanicTerminator));
        Fixture {
            handler,
            dialogs,
            sink,
            lines,
        }
    }

    #[test]
    fn test_info_and_warning_only_log() {
        let f = setup(LoggerConfig::default());
        f.handler.handle_message(Severity::Info, "", "hello");
        f.handler.handle_message(Severity::Warning, "", "careful");

        assert_eq!(f.lines.lines().len(), 2);
        assert_eq!(f.dialogs.opened_count(), 0);
        assert_eq!(f.dialogs.blocking_count(), 0);
    }

    #[test]
    fn test_critical_logs_and_opens_dialog() {
        let f = setup(LoggerConfig::default());
        f.handler.handle_message(Severity::Critical, "io.rs:5", "write failed");

        assert!(f.sink.text(OutputStream::Error).contains("CRITICAL: write failed\n\tio.rs:5\n"));
        assert_eq!(f.dialogs.opened_count(), 1);
        assert!(f.handler.presenter().has_live_dialog());
    }

    #[test]
    fn test_two_criticals_leave_one_dialog() {
        let f = setup(LoggerConfig::default());
        f.handler.handle_message(Severity::Critical, "", "first");
        f.handler.handle_message(Severity::Critical, "", "second");

        assert_eq!(f.dialogs.opened_count(), 2);
        assert_eq!(f.dialogs.live_count(), 1);
        assert!(f.dialogs.is_live(1));
    }

    #[test]
    fn test_ignored_message_still_logged() {
        let f = setup(LoggerConfig::default());
        f.handler.handle_message(Severity::Critical, "", "noisy");
        f.dialogs.dismiss(0, DialogChoice::Ignore);

        f.handler.handle_message(Severity::Critical, "", "noisy");
        assert_eq!(f.dialogs.opened_count(), 1);
        assert_eq!(f.lines.lines().len(), 2);
        assert!(f.lines.lines()[1].contains("CRITICAL: noisy"));
    }

    #[test]
    fn test_raise_critical_dialog() {
        let f = setup(LoggerConfig::default());
        f.handler.raise_critical_dialog();
        f.handler.handle_message(Severity::Critical, "", "x");
        f.handler.raise_critical_dialog();
        assert_eq!(f.dialogs.raise_count(), 1);
    }

    #[test]
    #[should_panic(expected = "terminated")]
    fn test_fatal_terminates() {
        let f = setup(LoggerConfig::default());
        f.handler.handle_message(Severity::Fatal, "a.cpp:10", "out of memory");
    }

    #[test]
    fn test_fatal_logs_and_blocks_before_terminating() {
        let f = setup(LoggerConfig::default());
        let handler = f.handler;
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            handler.handle_message(Severity::Fatal, "a.cpp:10", "out of memory");
        }));

        assert!(result.is_err());
        assert_eq!(f.dialogs.blocking_count(), 1);
        assert!(f.sink.text(OutputStream::Error).contains("FATAL: out of memory\n\ta.cpp:10\n"));
    }

    #[test]
    fn test_fatal_terminates_even_if_not_acknowledged() {
        let dialogs = Arc::new(MockDialogService::new().with_blocking_choice(DialogChoice::Closed));
        let logger = Arc::new(LineLogger::with_sink(
            LoggerConfig::default(),
            Arc::new(MemorySink::new()),
        ));
        let handler = MessageHandler::new(logger, dialogs.clone())
            .with_terminator(Arc::new(PanicTerminator));

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            handler.handle_message(Severity::Fatal, "", "broken");
        }));
        assert!(result.is_err());
        assert_eq!(dialogs.blocking_count(), 1);
    }

    #[test]
    fn test_forced_debug_line_is_demoted() {
        let f = setup(LoggerConfig::new().with_debug(true));
        f.handler
            .handle_message(Severity::Warning, "", "Retrying to obtain clipboard.");
        assert!(f.lines.lines()[0].contains("DEBUG: Retrying to obtain clipboard."));
        assert_eq!(f.dialogs.opened_count(), 0);
    }

    #[test]
    fn test_debug_hidden_by_default() {
        let f = setup(LoggerConfig::default());
        f.handler.handle_message(Severity::Debug, "", "details");
        f.handler.log_verbose("more details");
        assert!(f.sink.is_empty());
        assert!(f.lines.lines().is_empty());
    }

    #[test]
    fn test_headless_handler_never_keeps_dialogs() {
        let handler = MessageHandler::headless(LoggerConfig::default());
        handler.handle_message(Severity::Critical, "", "headless critical");
        assert!(!handler.presenter().has_live_dialog());
    }
}
