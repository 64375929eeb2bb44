//! Line logging: formatting, sinks and subscribers

mod traits;
mod noop;
mod console;
mod memory;
mod debug_output;
mod forced_debug;
mod subscribers;
mod line_logger;

pub use traits::{LineSink, SharedSink};
pub use noop::NullSink;
pub use console::ConsoleSink;
pub use memory::MemorySink;
pub use debug_output::{platform_sink, DebugOutputSink};
pub use forced_debug::{forced_debug_messages, is_forced_debug, resolve_severity};
pub use subscribers::{LineObserver, LogBuffer, SubscriberList, SubscriptionId};
pub use line_logger::LineLogger;
