//! Marshalling dialog calls onto the UI thread
//!
//! GUI toolkits only allow widget work on the thread that owns the UI, but
//! log messages arrive from any thread. `QueuedDialogService` forwards calls
//! made on the UI thread straight to the toolkit and queues the rest for the
//! `UiDispatcher`, which the UI thread drains once per frame (`pump`) or as
//! an async task (`run`).

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, ThreadId};

use tokio::sync::{mpsc, oneshot};

use super::traits::{
    DialogChoice, DialogHandle, DialogService, DialogSpec, DismissCallback, SharedDialogService,
};

enum UiCommand {
    Open {
        id: u64,
        spec: DialogSpec,
        on_finished: DismissCallback,
    },
    Raise(u64),
    Release(u64),
    Blocking {
        spec: DialogSpec,
        reply: oneshot::Sender<DialogChoice>,
    },
}

/// Dialog service usable from any thread
#[derive(Clone)]
pub struct QueuedDialogService {
    inner: SharedDialogService,
    ui_thread: ThreadId,
    tx: mpsc::UnboundedSender<UiCommand>,
    next_id: Arc<AtomicU64>,
}

impl std::fmt::Debug for QueuedDialogService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueuedDialogService")
            .field("ui_thread", &self.ui_thread)
            .finish()
    }
}

impl QueuedDialogService {
    /// Wrap a toolkit service. Must be called on the UI thread, which is
    /// also where the returned dispatcher has to be driven.
    pub fn new(inner: SharedDialogService) -> (Self, UiDispatcher) {
        let (tx, rx) = mpsc::unbounded_channel();
        let service = Self {
            inner: Arc::clone(&inner),
            ui_thread: thread::current().id(),
            tx,
            next_id: Arc::new(AtomicU64::new(1)),
        };
        let dispatcher = UiDispatcher {
            inner,
            rx,
            handles: HashMap::new(),
        };
        (service, dispatcher)
    }

    fn on_ui_thread(&self) -> bool {
        thread::current().id() == self.ui_thread
    }
}

impl DialogService for QueuedDialogService {
    /// Blocks the calling thread until the UI thread has shown the dialog.
    /// If the dispatcher is gone the dialog can't be shown and the result
    /// is `Closed`.
    ///
    /// # Panics
    ///
    /// Off the UI thread this must not be called from inside an async
    /// context; tokio panics rather than letting a single-threaded runtime
    /// that drives [`UiDispatcher::run`] hang.
    fn show_blocking(&self, spec: &DialogSpec) -> DialogChoice {
        if self.on_ui_thread() {
            return self.inner.show_blocking(spec);
        }

        let (reply, response) = oneshot::channel();
        let command = UiCommand::Blocking {
            spec: spec.clone(),
            reply,
        };
        if self.tx.send(command).is_err() {
            return DialogChoice::Closed;
        }
        response.blocking_recv().unwrap_or(DialogChoice::Closed)
    }

    fn open(&self, spec: DialogSpec, on_finished: DismissCallback) -> Box<dyn DialogHandle> {
        if self.on_ui_thread() {
            return self.inner.open(spec, on_finished);
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let command = UiCommand::Open {
            id,
            spec,
            on_finished,
        };
        // Nothing will ever show it, so it is closed at once
        if let Err(mpsc::error::SendError(command)) = self.tx.send(command) {
            if let UiCommand::Open { on_finished, .. } = command {
                on_finished(DialogChoice::Closed);
            }
            return Box::new(UnsentHandle);
        }
        Box::new(QueuedHandle {
            id,
            tx: self.tx.clone(),
        })
    }
}

struct UnsentHandle;

impl DialogHandle for UnsentHandle {
    fn raise(&self) {}
}

struct QueuedHandle {
    id: u64,
    tx: mpsc::UnboundedSender<UiCommand>,
}

impl DialogHandle for QueuedHandle {
    fn raise(&self) {
        let _ = self.tx.send(UiCommand::Raise(self.id));
    }
}

impl Drop for QueuedHandle {
    fn drop(&mut self) {
        let _ = self.tx.send(UiCommand::Release(self.id));
    }
}

/// UI-thread side of `QueuedDialogService`
pub struct UiDispatcher {
    inner: SharedDialogService,
    rx: mpsc::UnboundedReceiver<UiCommand>,
    handles: HashMap<u64, Box<dyn DialogHandle>>,
}

impl std::fmt::Debug for UiDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UiDispatcher")
            .field("open_dialogs", &self.handles.len())
            .finish()
    }
}

impl UiDispatcher {
    /// Handle every queued request without waiting. Returns how many were
    /// handled.
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(command) = self.rx.try_recv() {
            self.dispatch(command);
            handled += 1;
        }
        handled
    }

    /// Handle requests until every service clone and handle is dropped
    pub async fn run(mut self) {
        while let Some(command) = self.rx.recv().await {
            self.dispatch(command);
        }
    }

    /// Number of queued dialogs the dispatcher still holds
    pub fn open_dialogs(&self) -> usize {
        self.handles.len()
    }

    fn dispatch(&mut self, command: UiCommand) {
        match command {
            UiCommand::Open {
                id,
                spec,
                on_finished,
            } => {
                let handle = self.inner.open(spec, on_finished);
                self.handles.insert(id, handle);
            }
            UiCommand::Raise(id) => {
                if let Some(handle) = self.handles.get(&id) {
                    handle.raise();
                }
            }
            UiCommand::Release(id) => {
                self.handles.remove(&id);
            }
            UiCommand::Blocking { spec, reply } => {
                let choice = self.inner.show_blocking(&spec);
                let _ = reply.send(choice);
            }
        }
    }
}
