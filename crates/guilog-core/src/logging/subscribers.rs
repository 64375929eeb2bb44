//! Log line observers
//!
//! Observers receive the exact formatted text of every emitted line, e.g. to
//! feed an in-app log viewer.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

/// Callback invoked with each formatted line
pub type LineObserver = Arc<dyn Fn(&str) + Send + Sync>;

/// Handle returned by `subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Registered observers, notified in subscription order
#[derive(Default)]
pub struct SubscriberList {
    next_id: AtomicU64,
    observers: RwLock<Vec<(SubscriptionId, LineObserver)>>,
}

impl std::fmt::Debug for SubscriberList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriberList")
            .field("count", &self.len())
            .finish()
    }
}

impl SubscriberList {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an observer
    pub fn subscribe(&self, observer: LineObserver) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.observers.write().push((id, observer));
        id
    }

    /// Remove an observer; returns false if it was not registered
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut observers = self.observers.write();
        let before = observers.len();
        observers.retain(|(existing, _)| *existing != id);
        observers.len() != before
    }

    /// Number of registered observers
    pub fn len(&self) -> usize {
        self.observers.read().len()
    }

    /// Whether no observers are registered
    pub fn is_empty(&self) -> bool {
        self.observers.read().is_empty()
    }

    /// Deliver a line to every observer
    pub fn notify(&self, line: &str) {
        // Snapshot so an observer may (un)subscribe without deadlocking
        let observers: Vec<LineObserver> =
            self.observers.read().iter().map(|(_, o)| Arc::clone(o)).collect();
        for observer in observers {
            observer(line);
        }
    }
}

/// Bounded buffer of recent lines for an in-app log viewer
///
/// Oldest lines are evicted once `capacity` is reached.
#[derive(Debug, Clone)]
pub struct LogBuffer {
    lines: Arc<Mutex<VecDeque<String>>>,
    capacity: usize,
}

impl LogBuffer {
    /// Create a buffer holding at most `capacity` lines (minimum 1)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            lines: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    /// Append a line, evicting the oldest if full
    pub fn push(&self, line: &str) {
        let mut lines = self.lines.lock();
        if lines.len() == self.capacity {
            lines.pop_front();
        }
        lines.push_back(line.to_string());
    }

    /// Snapshot of buffered lines, oldest first
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().iter().cloned().collect()
    }

    /// Concatenated buffered text
    pub fn text(&self) -> String {
        self.lines.lock().iter().map(String::as_str).collect()
    }

    /// Drop all buffered lines
    pub fn clear(&self) {
        self.lines.lock().clear();
    }

    /// Maximum number of lines kept
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// An observer that feeds this buffer
    pub fn observer(&self) -> LineObserver {
        let buffer = self.clone();
        Arc::new(move |line: &str| buffer.push(line))
    }
}
