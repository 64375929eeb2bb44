//! Console sink implementation

use std::io::{self, Write};

use super::traits::LineSink;
use crate::types::OutputStream;

/// A sink that writes to stdout/stderr
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    /// Create a new console sink
    pub fn new() -> Self {
        Self
    }
}

impl LineSink for ConsoleSink {
    fn write_line(&self, stream: OutputStream, text: &str) {
        // Locked handles keep a two-line record contiguous
        match stream {
            OutputStream::Primary => {
                let mut out = io::stdout().lock();
                let _ = out.write_all(text.as_bytes());
                let _ = out.flush();
            }
            OutputStream::Error => {
                let mut err = io::stderr().lock();
                let _ = err.write_all(text.as_bytes());
                let _ = err.flush();
            }
        }
    }
}
