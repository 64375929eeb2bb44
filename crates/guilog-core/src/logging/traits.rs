//! Line sink trait definition

use std::sync::Arc;

use crate::types::OutputStream;

/// Destination for formatted log text
///
/// Implementations:
/// - `ConsoleSink`: stdout/stderr, flushed after every write
/// - `DebugOutputSink`: the Windows debug-output channel
/// - `MemorySink`: in-memory capture for tests and embedding
/// - `NullSink`: discards everything
///
/// Text is already formatted and newline-terminated. Writes never fail
/// from the caller's point of view.
pub trait LineSink: Send + Sync {
    /// Write one formatted log line (one or two physical lines)
    fn write_line(&self, stream: OutputStream, text: &str);
}

/// Type alias for an Arc-wrapped sink
pub type SharedSink = Arc<dyn LineSink>;
