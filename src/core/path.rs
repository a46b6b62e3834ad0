//! Hierarchical step numbering.
//!
//! A `StepPath` is the stack of counters for the steps that are currently
//! open, outermost first. Its dotted form (`2.1.3`) is the step number.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered stack of step counters, outermost step first.
///
/// # Example
///
/// ```rust
/// use steplog::core::StepPath;
///
/// let mut path = StepPath::new();
/// path.push(2);
/// path.push(5);
/// assert_eq!(path.dotted(), "2.5");
///
/// assert_eq!(path.pop(), Some(5));
/// assert_eq!(path.dotted(), "2");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepPath {
    segments: Vec<u64>,
}

impl StepPath {
    /// Create an empty path (no open steps).
    pub fn new() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Push a counter as the innermost segment.
    pub fn push(&mut self, counter: u64) {
        self.segments.push(counter);
    }

    /// Remove and return the innermost segment.
    pub fn pop(&mut self) -> Option<u64> {
        self.segments.pop()
    }

    /// Keep only the outermost `depth` segments.
    pub fn truncate(&mut self, depth: usize) {
        self.segments.truncate(depth);
    }

    /// Innermost segment, if any step is open.
    pub fn last(&self) -> Option<u64> {
        self.segments.last().copied()
    }

    /// Number of open steps.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Segments joined with `.` in root-to-leaf order.
    pub fn dotted(&self) -> String {
        self.to_string()
    }

    pub fn segments(&self) -> &[u64] {
        &self.segments
    }
}

impl fmt::Display for StepPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for segment in &self.segments {
            if !first {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_path_is_empty() {
        let path = StepPath::new();
        assert!(path.is_empty());
        assert_eq!(path.depth(), 0);
        assert_eq!(path.dotted(), "");
        assert_eq!(path.last(), None);
    }

    #[test]
    fn dotted_joins_root_to_leaf() {
        let mut path = StepPath::new();
        path.push(1);
        path.push(2);
        path.push(7);

        assert_eq!(path.dotted(), "1.2.7");
        assert_eq!(path.segments(), &[1, 2, 7]);
    }

    #[test]
    fn pop_removes_innermost() {
        let mut path = StepPath::new();
        path.push(3);
        path.push(4);

        assert_eq!(path.pop(), Some(4));
        assert_eq!(path.last(), Some(3));
        assert_eq!(path.pop(), Some(3));
        assert_eq!(path.pop(), None);
    }

    #[test]
    fn path_serializes_as_segments() {
        let mut path = StepPath::new();
        path.push(1);
        path.push(10);

        let json = serde_json::to_string(&path).unwrap();
        let deserialized: StepPath = serde_json::from_str(&json).unwrap();
        assert_eq!(path, deserialized);
    }
}
