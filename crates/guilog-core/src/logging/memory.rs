//! In-memory sink

use parking_lot::Mutex;

use super::traits::LineSink;
use crate::types::OutputStream;

/// A sink that keeps every write in memory
///
/// Used by tests and by hosts that want to inspect output without a console.
#[derive(Debug, Default)]
pub struct MemorySink {
    writes: Mutex<Vec<(OutputStream, String)>>,
}

impl MemorySink {
    /// Create an empty memory sink
    pub fn new() -> Self {
        Self::default()
    }

    /// All writes in order, with the stream each went to
    pub fn writes(&self) -> Vec<(OutputStream, String)> {
        self.writes.lock().clone()
    }

    /// Text written to one stream, concatenated
    pub fn text(&self, stream: OutputStream) -> String {
        self.writes
            .lock()
            .iter()
            .filter(|(s, _)| *s == stream)
            .map(|(_, text)| text.as_str())
            .collect()
    }

    /// Number of writes so far
    pub fn len(&self) -> usize {
        self.writes.lock().len()
    }

    /// Whether nothing has been written
    pub fn is_empty(&self) -> bool {
        self.writes.lock().is_empty()
    }

    /// Forget all captured writes
    pub fn clear(&self) {
        self.writes.lock().clear();
    }
}

impl LineSink for MemorySink {
    fn write_line(&self, stream: OutputStream, text: &str) {
        self.writes.lock().push((stream, text.to_string()));
    }
}
