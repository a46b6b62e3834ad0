//! Per-call options for leveled emissions and steps.

use super::error::Failure;
use std::fmt;
use std::time::Duration;

type FailureFactory<'f, E> = Box<dyn FnOnce(&str) -> E + 'f>;

/// Options for a single leveled emission.
///
/// By default the emission never fails and uses the level's default
/// logging behavior. Calling [`raise`](Emit::raise) or
/// [`raise_with`](Emit::raise_with) makes the emission return `Err` after
/// the message has been rendered and logged.
///
/// # Example
///
/// ```rust
/// use steplog::{BufferConsole, Emit, Failure, Level, StepTracker};
///
/// let tracker = StepTracker::builder().console(BufferConsole::new()).build();
///
/// let err = tracker
///     .emit(Level::Error, "config missing", Emit::new().raise())
///     .unwrap_err();
/// assert_eq!(err, Failure::new("config missing"));
///
/// let custom = tracker
///     .emit(Level::Error, "bad port", Emit::new().raise_with(|m| format!("E42: {m}")))
///     .unwrap_err();
/// assert_eq!(custom, "E42: bad port");
/// ```
pub struct Emit<'f, E = Failure> {
    pub(crate) log: Option<bool>,
    pub(crate) raise: Option<FailureFactory<'f, E>>,
}

impl Emit<'_, Failure> {
    pub fn new() -> Self {
        Self {
            log: None,
            raise: None,
        }
    }
}

impl Default for Emit<'_, Failure> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'f, E> Emit<'f, E> {
    /// Override whether the message is forwarded to the log sink.
    pub fn log(mut self, enabled: bool) -> Self {
        self.log = Some(enabled);
        self
    }

    /// Fail with a generic [`Failure`] carrying the message.
    pub fn raise(self) -> Emit<'f, Failure> {
        Emit {
            log: self.log,
            raise: Some(Box::new(Failure::new)),
        }
    }

    /// Fail with the value produced by `factory` from the message.
    pub fn raise_with<E2, F>(self, factory: F) -> Emit<'f, E2>
    where
        F: FnOnce(&str) -> E2 + 'f,
    {
        Emit {
            log: self.log,
            raise: Some(Box::new(factory)),
        }
    }

    pub fn raises(&self) -> bool {
        self.raise.is_some()
    }
}

impl<E> fmt::Debug for Emit<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emit")
            .field("log", &self.log)
            .field("raise", &self.raise.is_some())
            .finish()
    }
}

/// Options for opening a step.
///
/// # Example
///
/// ```rust
/// use steplog::StepOptions;
/// use std::time::Duration;
///
/// let options = StepOptions::new()
///     .threshold(Duration::from_secs(2))
///     .log(true);
/// assert_eq!(options.threshold, Some(Duration::from_secs(2)));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepOptions {
    /// Duration after which the step is reported as slow.
    pub threshold: Option<Duration>,
    /// Send lifecycle events to the log sink; `None` uses the tracker default.
    pub log: Option<bool>,
}

impl StepOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn threshold(mut self, threshold: Duration) -> Self {
        self.threshold = Some(threshold);
        self
    }

    pub fn log(mut self, enabled: bool) -> Self {
        self.log = Some(enabled);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_emit_does_not_raise() {
        let emit = Emit::new();
        assert!(!emit.raises());
        assert_eq!(emit.log, None);
    }

    #[test]
    fn raise_keeps_log_override() {
        let emit = Emit::new().log(false).raise();
        assert!(emit.raises());
        assert_eq!(emit.log, Some(false));
    }

    #[test]
    fn raise_with_uses_factory() {
        #[derive(Debug, PartialEq)]
        struct Custom(String);

        let emit = Emit::new().raise_with(|m| Custom(m.to_uppercase()));
        let factory = emit.raise.unwrap();
        assert_eq!(factory("oops"), Custom("OOPS".to_string()));
    }

    #[test]
    fn factory_may_borrow_locals() {
        let prefix = String::from("E1");
        let emit = Emit::new().raise_with(|m| format!("{prefix}: {m}"));
        assert_eq!((emit.raise.unwrap())("x"), "E1: x");
    }

    #[test]
    fn step_options_builder() {
        let options = StepOptions::new().log(false);
        assert_eq!(options.log, Some(false));
        assert_eq!(options.threshold, None);
    }
}
