//! Dialog service for processes without a UI

use super::traits::{DialogChoice, DialogHandle, DialogService, DialogSpec, DismissCallback};

/// A dialog service that shows nothing
///
/// Blocking dialogs are acknowledged at once; non-blocking dialogs are
/// closed at once. The log line is the only trace of the error.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessDialogService;

impl HeadlessDialogService {
    /// Create a new headless service
    pub fn new() -> Self {
        Self
    }
}

struct ClosedHandle;

impl DialogHandle for ClosedHandle {
    fn raise(&self) {}
}

impl DialogService for HeadlessDialogService {
    fn show_blocking(&self, _spec: &DialogSpec) -> DialogChoice {
        DialogChoice::Acknowledge
    }

    fn open(&self, _spec: DialogSpec, on_finished: DismissCallback) -> Box<dyn DialogHandle> {
        on_finished(DialogChoice::Closed);
        Box::new(ClosedHandle)
    }
}
