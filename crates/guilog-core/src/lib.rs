//! guilog Core
//!
//! Log line routing and error dialog policy for desktop applications.
//! Hosts feed messages into a single entry point; every message becomes a
//! formatted log line, critical messages raise a non-blocking error dialog
//! and fatal messages raise a blocking one before the process is aborted.
//!
//! ## Wiring
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use guilog_core::{LineLogger, MessageHandler, QueuedDialogService};
//!
//! // On the UI thread
//! let (dialogs, mut dispatcher) = QueuedDialogService::new(toolkit_dialogs);
//! let logger = Arc::new(LineLogger::from_env());
//! let handler = Arc::new(MessageHandler::new(logger, Arc::new(dialogs)));
//! guilog_core::install(handler.clone())?;
//!
//! // Anywhere
//! log::warn!("clipboard unavailable");
//! guilog_core::critical!("lost connection to {}", peer);
//!
//! // Once per UI frame
//! dispatcher.pump();
//! ```

pub mod types;
pub mod config;
pub mod logging;
pub mod dialogs;
pub mod handler;
pub mod bridge;

#[doc(hidden)]
pub use log as __log;

// Re-export commonly used types
pub use types::{LogRecord, OutputStream, Severity, SeverityError};

pub use config::{is_truthy, EnvKeys, LoggerConfig, DEBUG_ENV_VAR, VERBOSE_ENV_VAR};

pub use logging::{
    platform_sink, ConsoleSink, DebugOutputSink, LineLogger, LineObserver, LineSink, LogBuffer,
    MemorySink, NullSink, SharedSink, SubscriptionId,
};

pub use dialogs::{
    DialogBranding, DialogButton, DialogChoice, DialogHandle, DialogService, DialogSpec,
    ErrorDialogPresenter, HeadlessDialogService, MockDialogService, PresenterError,
    QueuedDialogService, SharedDialogService, UiDispatcher,
};
#[cfg(feature = "native-dialogs")]
pub use dialogs::NativeDialogService;

pub use handler::{AbortTerminator, MessageHandler, Terminator};

pub use bridge::{install, InstallError, LogBridge, FATAL_TARGET};
