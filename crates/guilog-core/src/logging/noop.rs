//! Null sink implementation

use super::traits::LineSink;
use crate::types::OutputStream;

/// A sink that discards everything
///
/// Useful when only subscribers should see log lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl NullSink {
    /// Create a new null sink
    pub fn new() -> Self {
        Self
    }
}

impl LineSink for NullSink {
    fn write_line(&self, _stream: OutputStream, _text: &str) {}
}
