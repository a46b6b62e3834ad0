//! Output sinks.
//!
//! The tracker writes to two independent destinations:
//! - a [`Console`] receiving decorated, colored lines
//! - an optional [`LogSink`] receiving structured events
//!
//! Step spans are a third, optional capability behind [`SpanFactory`].

pub mod console;
pub mod log;
pub mod span;

pub use console::{BufferConsole, Console, ConsoleLine, TerminalConsole};
pub use log::{CapturedRecord, LogRecord, LogSink, MemorySink, RecordKind, TracingSink};
pub use span::{ActiveSpan, SpanFactory, TracingSpans};
