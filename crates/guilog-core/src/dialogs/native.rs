//! Native message boxes via rfd
//!
//! rfd message boxes are modal to their own thread, so non-blocking dialogs
//! run on a short-lived thread each. Native boxes cannot be raised or closed
//! from outside; a released dialog stays on screen but its dismissal is
//! discarded.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use rfd::{MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};

use super::traits::{DialogChoice, DialogHandle, DialogService, DialogSpec, DismissCallback};

/// Dialog service backed by the platform's native message box
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeDialogService;

impl NativeDialogService {
    /// Create a new native dialog service
    pub fn new() -> Self {
        Self
    }
}

fn build(spec: &DialogSpec) -> MessageDialog {
    let buttons = match spec.buttons.as_slice() {
        [only] => MessageButtons::OkCustom(only.label.clone()),
        [first, second, ..] => {
            MessageButtons::OkCancelCustom(first.label.clone(), second.label.clone())
        }
        [] => MessageButtons::Ok,
    };

    MessageDialog::new()
        .set_level(MessageLevel::Error)
        .set_title(spec.title.as_str())
        .set_description(spec.plain.as_str())
        .set_buttons(buttons)
}

/// Map what rfd reports back onto the dialog's buttons
fn to_choice(spec: &DialogSpec, result: MessageDialogResult) -> DialogChoice {
    match result {
        MessageDialogResult::Ok | MessageDialogResult::Yes => DialogChoice::Acknowledge,
        MessageDialogResult::Custom(label) => {
            spec.choice_for(&label).unwrap_or(DialogChoice::Closed)
        }
        _ => DialogChoice::Closed,
    }
}

struct NativeHandle {
    released: Arc<AtomicBool>,
}

impl DialogHandle for NativeHandle {
    fn raise(&self) {}
}

impl Drop for NativeHandle {
    fn drop(&mut self) {
        self.released.store(true, Ordering::SeqCst);
    }
}

impl DialogService for NativeDialogService {
    fn show_blocking(&self, spec: &DialogSpec) -> DialogChoice {
        let result = build(spec).show();
        to_choice(spec, result)
    }

    fn open(&self, spec: DialogSpec, on_finished: DismissCallback) -> Box<dyn DialogHandle> {
        let released = Arc::new(AtomicBool::new(false));
        let watch = Arc::clone(&released);

        thread::spawn(move || {
            let result = build(&spec).show();
            if !watch.load(Ordering::SeqCst) {
                on_finished(to_choice(&spec, result));
            }
        });

        Box::new(NativeHandle { released })
    }
}
