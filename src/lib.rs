//! Steplog: hierarchical step logging for console tools
//!
//! Steplog prints numbered, nested and timed "steps" with colored,
//! indented output, and can mirror them to a structured logging backend.
//! Leveled messages can be returned as-is, turned into failures, or turned
//! into validation outcomes.
//!
//! # Core Concepts
//!
//! - **Steps**: Scoped units of work numbered by their position in the
//!   hierarchy (`2.1.3`) and closed by a guard on every exit path
//! - **Sinks**: A console for decorated lines and an optional structured
//!   log sink (`tracing` by default)
//! - **Outcomes**: Two-state validation results from the `*_result` emitters
//!
//! # Example
//!
//! ```rust
//! use steplog::{BufferConsole, StepOptions, StepTracker};
//! use std::time::Duration;
//!
//! let console = BufferConsole::new();
//! let tracker = StepTracker::builder().console(console.clone()).build();
//!
//! {
//!     let _release = tracker.begin_step("Release");
//!     let _build = tracker.begin_step_with(
//!         "Build",
//!         StepOptions::new().threshold(Duration::from_secs(30)),
//!     );
//!     tracker.info("compiling");
//! }
//!
//! let outcome = tracker.error_result("tests failed");
//! assert!(!outcome.is_valid());
//! assert_eq!(outcome.message(), Some("tests failed"));
//! ```

pub mod clock;
pub mod config;
pub mod core;
pub mod global;
pub mod sink;
pub mod tracker;

// Re-export commonly used types
pub use config::TrackerConfig;
pub use crate::core::{Level, Outcome, Severity, DEFAULT_SUCCESS_MESSAGE};
pub use sink::{BufferConsole, MemorySink, TerminalConsole, TracingSink, TracingSpans};
pub use tracker::{
    Emit, Failure, StepGuard, StepOptions, StepReport, StepStatus, StepTracker, TrackerError,
};
