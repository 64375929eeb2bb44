//! Mock dialog service for testing
//!
//! Records every dialog, tracks which ones are still live, and lets tests
//! dismiss them with a chosen button. No UI is involved.

use std::sync::Arc;

use parking_lot::Mutex;

use super::traits::{DialogChoice, DialogHandle, DialogService, DialogSpec, DismissCallback};

struct MockDialog {
    spec: DialogSpec,
    on_finished: Option<DismissCallback>,
    dismissed: bool,
    released: bool,
    live_when_opened: usize,
}

impl MockDialog {
    fn is_live(&self) -> bool {
        !self.dismissed && !self.released
    }
}

struct MockState {
    opened: Vec<MockDialog>,
    blocking: Vec<DialogSpec>,
    raises: usize,
    blocking_choice: DialogChoice,
    immediate_choice: Option<DialogChoice>,
}

/// Mock dialog service
#[derive(Clone)]
pub struct MockDialogService {
    state: Arc<Mutex<MockState>>,
}

impl Default for MockDialogService {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MockDialogService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockDialogService")
            .field("opened", &self.opened_count())
            .field("live", &self.live_count())
            .field("blocking", &self.blocking_count())
            .finish()
    }
}

impl MockDialogService {
    /// Create a mock whose blocking dialogs are acknowledged
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                opened: Vec::new(),
                blocking: Vec::new(),
                raises: 0,
                blocking_choice: DialogChoice::Acknowledge,
                immediate_choice: None,
            })),
        }
    }

    /// Choice returned by blocking dialogs
    pub fn with_blocking_choice(self, choice: DialogChoice) -> Self {
        self.state.lock().blocking_choice = choice;
        self
    }

    /// Dismiss every non-blocking dialog with `choice` while it is being
    /// opened, before `open` returns
    pub fn set_immediate_choice(&self, choice: Option<DialogChoice>) {
        self.state.lock().immediate_choice = choice;
    }

    /// Number of non-blocking dialogs opened
    pub fn opened_count(&self) -> usize {
        self.state.lock().opened.len()
    }

    /// Number of blocking dialogs shown
    pub fn blocking_count(&self) -> usize {
        self.state.lock().blocking.len()
    }

    /// Number of non-blocking dialogs neither dismissed nor released
    pub fn live_count(&self) -> usize {
        self.state.lock().opened.iter().filter(|d| d.is_live()).count()
    }

    /// Whether the `index`th opened dialog is still live
    pub fn is_live(&self, index: usize) -> bool {
        self.state.lock().opened.get(index).is_some_and(MockDialog::is_live)
    }

    /// How many dialogs were live when the `index`th one was opened
    pub fn live_when_opened(&self, index: usize) -> usize {
        self.state
            .lock()
            .opened
            .get(index)
            .map(|d| d.live_when_opened)
            .unwrap_or(0)
    }

    /// Spec of the `index`th non-blocking dialog
    pub fn opened_spec(&self, index: usize) -> Option<DialogSpec> {
        self.state.lock().opened.get(index).map(|d| d.spec.clone())
    }

    /// Spec of the `index`th blocking dialog
    pub fn blocking_spec(&self, index: usize) -> Option<DialogSpec> {
        self.state.lock().blocking.get(index).cloned()
    }

    /// Number of raise requests across all dialogs
    pub fn raise_count(&self) -> usize {
        self.state.lock().raises
    }

    /// Dismiss a live dialog as if the user pressed `choice`.
    ///
    /// Returns false if the dialog is unknown, already dismissed or released.
    pub fn dismiss(&self, index: usize, choice: DialogChoice) -> bool {
        let callback = {
            let mut state = self.state.lock();
            match state.opened.get_mut(index) {
                Some(dialog) if dialog.is_live() => {
                    dialog.dismissed = true;
                    dialog.on_finished.take()
                }
                _ => None,
            }
        };
        Self::run(callback, choice)
    }

    /// Run the callback of a released dialog anyway, simulating a toolkit
    /// that delivers a late dismissal
    pub fn fire_released(&self, index: usize, choice: DialogChoice) -> bool {
        let callback = {
            let mut state = self.state.lock();
            match state.opened.get_mut(index) {
                Some(dialog) if dialog.released => dialog.on_finished.take(),
                _ => None,
            }
        };
        Self::run(callback, choice)
    }

    // Callbacks run without the lock held; they may drop handles
    fn run(callback: Option<DismissCallback>, choice: DialogChoice) -> bool {
        match callback {
            Some(callback) => {
                callback(choice);
                true
            }
            None => false,
        }
    }
}

impl DialogService for MockDialogService {
    fn show_blocking(&self, spec: &DialogSpec) -> DialogChoice {
        let mut state = self.state.lock();
        state.blocking.push(spec.clone());
        state.blocking_choice
    }

    fn open(&self, spec: DialogSpec, on_finished: DismissCallback) -> Box<dyn DialogHandle> {
        let (index, immediate) = {
            let mut state = self.state.lock();
            let live_when_opened = state.opened.iter().filter(|d| d.is_live()).count();
            state.opened.push(MockDialog {
                spec,
                on_finished: Some(on_finished),
                dismissed: false,
                released: false,
                live_when_opened,
            });
            (state.opened.len() - 1, state.immediate_choice)
        };

        if let Some(choice) = immediate {
            self.dismiss(index, choice);
        }

        Box::new(MockHandle {
            index,
            state: Arc::clone(&self.state),
        })
    }
}

struct MockHandle {
    index: usize,
    state: Arc<Mutex<MockState>>,
}

impl DialogHandle for MockHandle {
    fn raise(&self) {
        self.state.lock().raises += 1;
    }
}

impl Drop for MockHandle {
    fn drop(&mut self) {
        if let Some(dialog) = self.state.lock().opened.get_mut(self.index) {
            dialog.released = true;
        }
    }
}
