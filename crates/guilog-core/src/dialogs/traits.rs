//! Dialog service trait definition

use std::sync::Arc;

/// What the user did with a dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialogChoice {
    /// The acknowledgement button (OK / Abort)
    Acknowledge,
    /// The Ignore button on a critical dialog
    Ignore,
    /// Closed without pressing a button, or the toolkit reported something
    /// we don't recognise
    Closed,
}

/// A labelled action on a dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogButton {
    pub choice: DialogChoice,
    pub label: String,
}

impl DialogButton {
    /// Create a button
    pub fn new(choice: DialogChoice, label: impl Into<String>) -> Self {
        Self {
            choice,
            label: label.into(),
        }
    }
}

/// Everything a toolkit needs to show an error dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogSpec {
    /// Window title
    pub title: String,
    /// Rich text body, for toolkits that render HTML
    pub html: String,
    /// Plain text body, for native message boxes
    pub plain: String,
    /// Actions, in display order
    pub buttons: Vec<DialogButton>,
}

impl DialogSpec {
    /// Label of the button producing `choice`, if the dialog has one
    pub fn label_for(&self, choice: DialogChoice) -> Option<&str> {
        self.buttons
            .iter()
            .find(|b| b.choice == choice)
            .map(|b| b.label.as_str())
    }

    /// Choice of the button labelled `label`
    pub fn choice_for(&self, label: &str) -> Option<DialogChoice> {
        self.buttons
            .iter()
            .find(|b| b.label == label)
            .map(|b| b.choice)
    }
}

/// Called once when a non-blocking dialog is dismissed
pub type DismissCallback = Box<dyn FnOnce(DialogChoice) + Send>;

/// An open non-blocking dialog
///
/// Dropping the handle releases the dialog; a released dialog never calls
/// its dismissal callback afterwards.
pub trait DialogHandle: Send {
    /// Bring the dialog to the foreground
    fn raise(&self);
}

/// Dialog presentation service supplied by the host GUI toolkit
///
/// Implementations:
/// - `HeadlessDialogService`: no UI, blocking dialogs acknowledge at once
/// - `MockDialogService`: records and scripts dialogs for tests
/// - `NativeDialogService`: native message boxes (feature `native-dialogs`)
/// - `QueuedDialogService`: marshals calls onto the UI thread
pub trait DialogService: Send + Sync {
    /// Show a modal dialog and wait for the user's choice
    fn show_blocking(&self, spec: &DialogSpec) -> DialogChoice;

    /// Show a dialog without blocking; `on_finished` runs on dismissal
    fn open(&self, spec: DialogSpec, on_finished: DismissCallback) -> Box<dyn DialogHandle>;
}

/// Type alias for an Arc-wrapped dialog service
pub type SharedDialogService = Arc<dyn DialogService>;
