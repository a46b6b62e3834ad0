//! Two-state validation outcome returned by the `*_result` emitters.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Immutable validation outcome: valid, or invalid with a message.
///
/// Outcomes can only be built through [`Outcome::valid`] and
/// [`Outcome::invalid`].
///
/// # Example
///
/// ```rust
/// use steplog::core::Outcome;
///
/// let ok = Outcome::valid();
/// assert!(ok.is_valid());
/// assert_eq!(ok.message(), None);
///
/// let failed = Outcome::invalid("disk full");
/// assert!(!failed.is_valid());
/// assert_eq!(failed.message(), Some("disk full"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    is_valid: bool,
    message: Option<String>,
}

impl Outcome {
    /// Successful outcome, carries no message.
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            message: None,
        }
    }

    /// Failed outcome carrying `message` as its description.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            message: Some(message.into()),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Convert into a `Result`, yielding the message on failure.
    pub fn into_result(self) -> Result<(), String> {
        match self.message {
            Some(message) if !self.is_valid => Err(message),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.message, self.is_valid) {
            (Some(message), false) => write!(f, "invalid: {message}"),
            _ => f.write_str("valid"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_has_no_message() {
        let outcome = Outcome::valid();
        assert!(outcome.is_valid());
        assert!(outcome.message().is_none());
        assert_eq!(outcome.to_string(), "valid");
    }

    #[test]
    fn invalid_keeps_message() {
        let outcome = Outcome::invalid("bad input");
        assert!(!outcome.is_valid());
        assert_eq!(outcome.message(), Some("bad input"));
        assert_eq!(outcome.to_string(), "invalid: bad input");
    }

    #[test]
    fn into_result_maps_variants() {
        assert_eq!(Outcome::valid().into_result(), Ok(()));
        assert_eq!(
            Outcome::invalid("nope").into_result(),
            Err("nope".to_string())
        );
    }

    #[test]
    fn outcome_is_comparable() {
        assert_eq!(Outcome::invalid("x"), Outcome::invalid("x"));
        assert_ne!(Outcome::invalid("x"), Outcome::valid());
    }
}
