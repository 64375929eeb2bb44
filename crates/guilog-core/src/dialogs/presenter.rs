//! Critical and fatal error dialogs
//!
//! Fatal errors get a blocking dialog; the caller terminates the process
//! once it returns. Critical errors get a non-blocking dialog so the logging
//! path stays responsive, with two rules to stop dialogs piling up:
//!
//! - at most one critical dialog is live; a new one releases the old one
//!   before it is shown
//! - pressing Ignore suppresses dialogs (not log lines) for that exact
//!   message for the rest of the process

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use super::text::{DialogBranding, ErrorDialogText};
use super::traits::{DialogChoice, DialogHandle, SharedDialogService};
use crate::logging::LineLogger;
use crate::types::Severity;

/// Errors from the presenter
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PresenterError {
    #[error("No error dialog for {0} messages")]
    UnsupportedSeverity(Severity),
}

pub type PresenterResult<T> = Result<T, PresenterError>;

struct LiveDialog {
    generation: u64,
    handle: Box<dyn DialogHandle>,
}

/// State shared with dismissal callbacks
struct PresenterState {
    logger: Arc<LineLogger>,
    ignored: Mutex<HashSet<String>>,
    live: Mutex<Option<LiveDialog>>,
    /// Held from releasing the old dialog until the new one is stored in
    /// `live`. Never taken by `finish`.
    replacing: Mutex<()>,
    /// Generation of the dialog whose dismissal still counts; 0 = none
    current: AtomicU64,
    next: AtomicU64,
}

impl PresenterState {
    fn finish(&self, generation: u64, message: &str, choice: DialogChoice) {
        if self
            .current
            .compare_exchange(generation, 0, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            self.logger
                .log_verbose("ignoring dismissal of a replaced critical dialog");
            return;
        }

        if choice == DialogChoice::Ignore {
            self.ignored.lock().insert(message.to_string());
            self.logger
                .log_verbose(&format!("critical dialogs suppressed for: {}", message));
        }

        let finished = {
            let mut live = self.live.lock();
            match live.as_ref() {
                Some(dialog) if dialog.generation == generation => live.take(),
                _ => None,
            }
        };
        drop(finished);
    }
}

/// Presents critical and fatal error dialogs through a host dialog service
pub struct ErrorDialogPresenter {
    service: SharedDialogService,
    branding: DialogBranding,
    state: Arc<PresenterState>,
}

impl std::fmt::Debug for ErrorDialogPresenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErrorDialogPresenter")
            .field("branding", &self.branding)
            .field("has_live_dialog", &self.has_live_dialog())
            .field("ignored", &self.state.ignored.lock().len())
            .finish()
    }
}

impl ErrorDialogPresenter {
    /// Create a presenter. `logger` receives VERBOSE diagnostics.
    pub fn new(
        service: SharedDialogService,
        branding: DialogBranding,
        logger: Arc<LineLogger>,
    ) -> Self {
        Self {
            service,
            branding,
            state: Arc::new(PresenterState {
                logger,
                ignored: Mutex::new(HashSet::new()),
                live: Mutex::new(None),
                replacing: Mutex::new(()),
                current: AtomicU64::new(0),
                next: AtomicU64::new(0),
            }),
        }
    }

    /// Branding used for dialog text
    pub fn branding(&self) -> &DialogBranding {
        &self.branding
    }

    /// Show the dialog for a critical or fatal message.
    ///
    /// Fatal blocks until the dialog is dismissed and returns the choice;
    /// the caller must then terminate. Critical returns immediately with
    /// `None`. Other severities are rejected and nothing is shown.
    pub fn show_error_dialog(
        &self,
        message: &str,
        source_location: &str,
        severity: Severity,
    ) -> PresenterResult<Option<DialogChoice>> {
        match severity {
            Severity::Fatal => {
                let spec = ErrorDialogText::new(severity, message, source_location, &self.branding)
                    .into_fatal_spec();
                let choice = self.service.show_blocking(&spec);
                if choice != DialogChoice::Acknowledge {
                    self.state
                        .logger
                        .log_verbose(&format!("fatal dialog finished with {:?}", choice));
                }
                Ok(Some(choice))
            }
            Severity::Critical => {
                self.show_critical(message, source_location);
                Ok(None)
            }
            other => Err(PresenterError::UnsupportedSeverity(other)),
        }
    }

    fn show_critical(&self, message: &str, source_location: &str) {
        if self.is_ignored(message) {
            self.state
                .logger
                .log_verbose(&format!("critical dialog suppressed, ignored: {}", message));
            return;
        }

        let spec =
            ErrorDialogText::new(Severity::Critical, message, source_location, &self.branding)
                .into_critical_spec();

        // One producer at a time may replace the live dialog
        let _replacing = self.state.replacing.lock();

        let generation = self.state.next.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.current.store(generation, Ordering::SeqCst);

        // Release the previous dialog before the new one is shown
        let previous = self.state.live.lock().take();
        if previous.is_some() {
            self.state.logger.log_verbose("replacing live critical dialog");
        }
        drop(previous);

        let state = Arc::clone(&self.state);
        let owned_message = message.to_string();
        let handle = self.service.open(
            spec,
            Box::new(move |choice| state.finish(generation, &owned_message, choice)),
        );

        // Dismissed while opening
        let rejected = {
            let mut live = self.state.live.lock();
            if self.state.current.load(Ordering::SeqCst) == generation {
                *live = Some(LiveDialog { generation, handle });
                None
            } else {
                Some(handle)
            }
        };
        drop(rejected);
    }

    /// Bring the live critical dialog to the foreground, if there is one
    pub fn raise_critical_dialog(&self) {
        if let Some(dialog) = self.state.live.lock().as_ref() {
            dialog.handle.raise();
        }
    }

    /// Whether a critical dialog is currently live
    pub fn has_live_dialog(&self) -> bool {
        self.state.live.lock().is_some()
    }

    /// Whether dialogs for `message` have been ignored
    pub fn is_ignored(&self, message: &str) -> bool {
        self.state.ignored.lock().contains(message)
    }

    /// Messages the user chose to ignore, sorted
    pub fn ignored_messages(&self) -> Vec<String> {
        let mut messages: Vec<String> = self.state.ignored.lock().iter().cloned().collect();
        messages.sort();
        messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoggerConfig;
    use crate::dialogs::{DialogService, DialogSpec, DismissCallback, MockDialogService};
    use crate::logging::MemorySink;
    use crate::types::OutputStream;
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;

    /// Holds the first `open` until released, so a second producer can
    /// arrive while it is in progress
    struct SlowFirstOpen {
        inner: Arc<MockDialogService>,
        entered: Mutex<Option<mpsc::Sender<()>>>,
        release: Mutex<mpsc::Receiver<()>>,
    }

    impl DialogService for SlowFirstOpen {
        fn show_blocking(&self, spec: &DialogSpec) -> DialogChoice {
            self.inner.show_blocking(spec)
        }

        fn open(&self, spec: DialogSpec, on_finished: DismissCallback) -> Box<dyn DialogHandle> {
            let entered = self.entered.lock().take();
            if let Some(entered) = entered {
                entered.send(()).unwrap();
                let _ = self.release.lock().recv_timeout(Duration::from_secs(1));
            }
            self.inner.open(spec, on_finished)
        }
    }

    fn setup() -> (ErrorDialogPresenter, Arc<MockDialogService>, Arc<MemorySink>) {
        let service = Arc::new(MockDialogService::new());
        let sink = Arc::new(MemorySink::new());
        let logger = Arc::new(LineLogger::with_sink(
            LoggerConfig::new().with_verbose(true),
            sink.clone(),
        ));
        let presenter =
            ErrorDialogPresenter::new(service.clone(), DialogBranding::new("9.9.9"), logger);
        (presenter, service, sink)
    }

    #[test]
    fn test_critical_opens_non_blocking_dialog() {
        let (presenter, service, _) = setup();
        let result = presenter.show_error_dialog("link lost", "net.rs:3", Severity::Critical);

        assert_eq!(result, Ok(None));
        assert_eq!(service.opened_count(), 1);
        assert_eq!(service.blocking_count(), 0);
        assert!(presenter.has_live_dialog());

        let spec = service.opened_spec(0).unwrap();
        assert_eq!(spec.title, "Critical error");
        assert!(spec.html.contains("<pre>v9.9.9\nlink lost\nnet.rs:3</pre>"));
    }

    #[test]
    fn test_second_critical_replaces_first() {
        let (presenter, service, sink) = setup();
        presenter.show_error_dialog("first", "", Severity::Critical).unwrap();
        presenter.show_error_dialog("second", "", Severity::Critical).unwrap();

        assert_eq!(service.opened_count(), 2);
        assert_eq!(service.live_count(), 1);
        assert!(!service.is_live(0));
        assert!(service.is_live(1));
        // Released before the replacement was opened
        assert_eq!(service.live_when_opened(1), 0);
        assert!(sink.text(OutputStream::Primary).contains("replacing live critical dialog"));
    }

    #[test]
    fn test_ignore_suppresses_future_dialogs() {
        let (presenter, service, _) = setup();
        presenter.show_error_dialog("flaky", "", Severity::Critical).unwrap();
        assert!(service.dismiss(0, DialogChoice::Ignore));

        assert!(presenter.is_ignored("flaky"));
        assert!(!presenter.has_live_dialog());
        assert_eq!(presenter.ignored_messages(), vec!["flaky".to_string()]);

        presenter.show_error_dialog("flaky", "", Severity::Critical).unwrap();
        assert_eq!(service.opened_count(), 1);

        // Other messages still show
        presenter.show_error_dialog("different", "", Severity::Critical).unwrap();
        assert_eq!(service.opened_count(), 2);
    }

    #[test]
    fn test_acknowledge_does_not_ignore() {
        let (presenter, service, _) = setup();
        presenter.show_error_dialog("once", "", Severity::Critical).unwrap();
        assert!(service.dismiss(0, DialogChoice::Acknowledge));

        assert!(!presenter.is_ignored("once"));
        assert!(!presenter.has_live_dialog());

        presenter.show_error_dialog("once", "", Severity::Critical).unwrap();
        assert_eq!(service.opened_count(), 2);
    }

    #[test]
    fn test_concurrent_criticals_keep_one_dialog() {
        let mock = Arc::new(MockDialogService::new());
        let (entered_tx, entered_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel();
        let service = Arc::new(SlowFirstOpen {
            inner: mock.clone(),
            entered: Mutex::new(Some(entered_tx)),
            release: Mutex::new(release_rx),
        });
        let logger = Arc::new(LineLogger::with_sink(
            LoggerConfig::default(),
            Arc::new(MemorySink::new()),
        ));
        let presenter = Arc::new(ErrorDialogPresenter::new(
            service,
            DialogBranding::default(),
            logger,
        ));

        let first = {
            let presenter = Arc::clone(&presenter);
            thread::spawn(move || {
                presenter.show_error_dialog("a", "", Severity::Critical).unwrap();
            })
        };
        entered_rx.recv().unwrap();

        let second = {
            let presenter = Arc::clone(&presenter);
            thread::spawn(move || {
                presenter.show_error_dialog("b", "", Severity::Critical).unwrap();
            })
        };
        thread::sleep(Duration::from_millis(50));
        release_tx.send(()).unwrap();
        first.join().unwrap();
        second.join().unwrap();

        assert_eq!(mock.opened_count(), 2);
        assert_eq!(mock.live_when_opened(0), 0);
        assert_eq!(mock.live_when_opened(1), 0);
        assert_eq!(mock.live_count(), 1);
        assert!(mock.is_live(1));
        assert!(presenter.has_live_dialog());
    }

    #[test]
    fn test_replaced_dialog_dismissal_is_stale() {
        let (presenter, service, _) = setup();
        presenter.show_error_dialog("old", "", Severity::Critical).unwrap();
        presenter.show_error_dialog("new", "", Severity::Critical).unwrap();

        // The mock refuses to dismiss released dialogs, so fire the old
        // callback by hand
        assert!(!service.dismiss(0, DialogChoice::Ignore));
        assert!(service.fire_released(0, DialogChoice::Ignore));

        assert!(!presenter.is_ignored("old"));
        assert!(presenter.has_live_dialog());
    }

    #[test]
    fn test_dismissed_during_open() {
        let (presenter, service, _) = setup();
        service.set_immediate_choice(Some(DialogChoice::Ignore));
        presenter.show_error_dialog("instant", "", Severity::Critical).unwrap();

        assert!(presenter.is_ignored("instant"));
        assert!(!presenter.has_live_dialog());
        assert_eq!(service.live_count(), 0);
    }

    #[test]
    fn test_fatal_blocks_and_returns_choice() {
        let (presenter, service, _) = setup();
        let choice = presenter
            .show_error_dialog("out of memory", "a.cpp:10", Severity::Fatal)
            .unwrap();

        assert_eq!(choice, Some(DialogChoice::Acknowledge));
        assert_eq!(service.blocking_count(), 1);
        assert_eq!(service.opened_count(), 0);
        assert!(!presenter.has_live_dialog());

        let spec = service.blocking_spec(0).unwrap();
        assert_eq!(spec.title, "Fatal error");
        assert_eq!(spec.buttons.len(), 1);
    }

    #[test]
    fn test_fatal_not_subject_to_ignore() {
        let (presenter, service, _) = setup();
        presenter.show_error_dialog("boom", "", Severity::Critical).unwrap();
        service.dismiss(0, DialogChoice::Ignore);

        presenter.show_error_dialog("boom", "", Severity::Fatal).unwrap();
        assert_eq!(service.blocking_count(), 1);
    }

    #[test]
    fn test_other_severities_rejected() {
        let (presenter, service, _) = setup();
        for severity in [Severity::Debug, Severity::Info, Severity::Warning] {
            assert_eq!(
                presenter.show_error_dialog("m", "", severity),
                Err(PresenterError::UnsupportedSeverity(severity))
            );
        }
        assert_eq!(service.opened_count(), 0);
        assert_eq!(service.blocking_count(), 0);
    }

    #[test]
    fn test_raise_critical_dialog() {
        let (presenter, service, _) = setup();
        presenter.raise_critical_dialog();
        assert_eq!(service.raise_count(), 0);

        presenter.show_error_dialog("m", "", Severity::Critical).unwrap();
        presenter.raise_critical_dialog();
        presenter.raise_critical_dialog();
        assert_eq!(service.raise_count(), 2);
    }

    #[test]
    fn test_empty_message_permitted() {
        let (presenter, service, _) = setup();
        presenter.show_error_dialog("", "", Severity::Critical).unwrap();
        assert!(service.opened_spec(0).unwrap().html.ends_with("<pre>v9.9.9\n\n</pre>"));
    }
}
