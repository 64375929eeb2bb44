//! Platform debug-output sink
//!
//! GUI processes on Windows usually have no attached console, so stdout and
//! stderr go nowhere. Lines are sent to `OutputDebugStringW` instead, where
//! DebugView, Visual Studio or VS Code can pick them up (one at a time).

use std::sync::Arc;

use super::console::ConsoleSink;
use super::traits::{LineSink, SharedSink};
use crate::types::OutputStream;

/// A sink that writes to the platform debug-output channel
///
/// Both streams map to the same channel. On platforms without one the text
/// goes to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct DebugOutputSink;

impl DebugOutputSink {
    /// Create a new debug-output sink
    pub fn new() -> Self {
        Self
    }
}

#[cfg(windows)]
impl LineSink for DebugOutputSink {
    fn write_line(&self, _stream: OutputStream, text: &str) {
        use windows::core::PCWSTR;
        use windows::Win32::System::Diagnostics::Debug::OutputDebugStringW;

        // Interior NULs would truncate the line
        let wide: Vec<u16> = text
            .encode_utf16()
            .map(|c| if c == 0 { u16::from(b' ') } else { c })
            .chain(std::iter::once(0))
            .collect();

        // SAFETY: `wide` is a valid null-terminated UTF-16 string that stays
        // allocated for the duration of the call.
        unsafe {
            OutputDebugStringW(PCWSTR(wide.as_ptr()));
        }
    }
}

#[cfg(not(windows))]
impl LineSink for DebugOutputSink {
    fn write_line(&self, _stream: OutputStream, text: &str) {
        ConsoleSink.write_line(OutputStream::Error, text);
    }
}

/// The sink a GUI process should use on this platform
pub fn platform_sink() -> SharedSink {
    if cfg!(windows) {
        Arc::new(DebugOutputSink::new())
    } else {
        Arc::new(ConsoleSink::new())
    }
}
