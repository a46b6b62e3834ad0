//! Tracker errors and the generic raised failure.

use thiserror::Error;

/// Errors reported by the tracker and the process-wide accessor.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TrackerError {
    #[error("Step tracker is not installed. Call steplog::global::install first")]
    NotInstalled,

    #[error("A step tracker is already installed")]
    AlreadyInstalled,

    #[error(
        "Step {step} closed out of order (opened at depth {expected_depth}, stack depth is {actual_depth})"
    )]
    OutOfOrderClose {
        step: String,
        expected_depth: usize,
        actual_depth: usize,
    },

    #[error("Invalid tracker configuration: {0}")]
    InvalidConfig(String),
}

/// Failure raised by a leveled emission when no factory is supplied.
///
/// Its `Display` output is exactly the emitted message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct Failure {
    message: String,
}

impl Failure {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_displays_message_verbatim() {
        let failure = Failure::new("Must stop here.");
        assert_eq!(failure.to_string(), "Must stop here.");
        assert_eq!(failure.message(), "Must stop here.");
    }

    #[test]
    fn out_of_order_message_names_step() {
        let error = TrackerError::OutOfOrderClose {
            step: "1.2".to_string(),
            expected_depth: 2,
            actual_depth: 3,
        };
        let text = error.to_string();
        assert!(text.contains("1.2"));
        assert!(text.contains("depth 2"));
    }
}
