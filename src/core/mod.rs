//! Core step-tracking types.
//!
//! This module contains the parts of the tracker that perform no I/O:
//! - Hierarchical step numbering via `StepPath`
//! - The open-step stack and counters in `TrackerState`
//! - The emission level table (`Level`, `Severity`)
//! - The two-state `Outcome` returned by result-producing emitters

mod level;
mod outcome;
mod path;
mod state;

pub use level::{Level, Severity, DEFAULT_SUCCESS_MESSAGE};
pub use outcome::Outcome;
pub use path::StepPath;
pub use state::{OpenedStep, TrackerState};
