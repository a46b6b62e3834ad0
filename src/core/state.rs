//! Mutable step-tracking state.
//!
//! `TrackerState` holds the open-step stack, the step counters and the
//! visual indent level. It performs no I/O; the tracker renders whatever
//! the state transitions report.

use super::path::StepPath;
use crate::tracker::TrackerError;

/// Result of opening a step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenedStep {
    /// Unique id of this step within the tracker (the running total).
    pub id: u64,
    /// Dotted step number computed from the stack after the push.
    pub number: String,
    /// Stack depth after the push.
    pub depth: usize,
    /// Indent level the BEGIN line is rendered at.
    pub indent: usize,
}

/// Step stack, counters and indent level owned by one tracker.
///
/// Each nesting level counts its own children, so a step's number is the
/// path of sibling positions from the outermost open step down to it.
/// The running total of opened steps is never reset or decremented, and
/// top-level steps keep counting up across the tracker's lifetime.
///
/// # Example
///
/// ```rust
/// use steplog::core::TrackerState;
///
/// let mut state = TrackerState::new();
/// let outer = state.open();
/// let inner = state.open();
/// assert_eq!(outer.number, "1");
/// assert_eq!(inner.number, "1.1");
///
/// state.close(inner.id, inner.depth).unwrap();
/// state.close(outer.id, outer.depth).unwrap();
/// assert_eq!(state.open().number, "2");
/// assert_eq!(state.steps_opened(), 3);
/// ```
#[derive(Clone, Debug)]
pub struct TrackerState {
    path: StepPath,
    // ids of the open steps, parallel to `path`
    open_ids: Vec<u64>,
    // children opened so far at each level; always depth + 1 entries
    siblings: Vec<u64>,
    counter: u64,
    indent: usize,
}

impl Default for TrackerState {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackerState {
    pub fn new() -> Self {
        Self {
            path: StepPath::new(),
            open_ids: Vec::new(),
            siblings: vec![0],
            counter: 0,
            indent: 0,
        }
    }

    /// Push a new step and return its identity.
    pub fn open(&mut self) -> OpenedStep {
        self.counter += 1;

        let position = match self.siblings.last_mut() {
            Some(count) => {
                *count += 1;
                *count
            }
            None => 1,
        };
        self.path.push(position);
        self.open_ids.push(self.counter);
        self.siblings.push(0);

        let opened = OpenedStep {
            id: self.counter,
            number: self.path.dotted(),
            depth: self.path.depth(),
            indent: self.indent,
        };
        self.indent += 1;
        opened
    }

    /// Pop the step identified by `id`, which must be the innermost open
    /// step at `depth`.
    ///
    /// Returns the indent level after the close. A mismatch leaves the
    /// state untouched.
    pub fn close(&mut self, id: u64, depth: usize) -> Result<usize, TrackerError> {
        if self.path.depth() != depth || self.open_ids.last() != Some(&id) {
            return Err(TrackerError::OutOfOrderClose {
                step: self.number_of(id).unwrap_or_else(|| id.to_string()),
                expected_depth: depth,
                actual_depth: self.path.depth(),
            });
        }
        self.path.pop();
        self.open_ids.pop();
        self.siblings.pop();
        self.indent = self.indent.saturating_sub(1);
        Ok(self.indent)
    }

    /// Discard the step identified by `id` together with every step opened
    /// after it, without reporting them.
    ///
    /// Used to restore a consistent stack after a close out of order.
    /// Returns the number of steps discarded, zero if `id` is not open.
    pub fn abandon(&mut self, id: u64) -> usize {
        let Some(index) = self.open_ids.iter().position(|open| *open == id) else {
            return 0;
        };
        let removed = self.open_ids.len() - index;
        self.open_ids.truncate(index);
        self.path.truncate(index);
        self.siblings.truncate(index + 1);
        self.indent = self.indent.saturating_sub(removed);
        removed
    }

    /// Current indent level.
    pub fn indent(&self) -> usize {
        self.indent
    }

    /// Number of steps currently open.
    pub fn depth(&self) -> usize {
        self.path.depth()
    }

    /// Total number of steps opened so far.
    pub fn steps_opened(&self) -> u64 {
        self.counter
    }

    /// Dotted number of the innermost open step.
    pub fn current(&self) -> Option<String> {
        if self.path.is_empty() {
            None
        } else {
            Some(self.path.dotted())
        }
    }

    pub fn path(&self) -> &StepPath {
        &self.path
    }

    fn number_of(&self, id: u64) -> Option<String> {
        let index = self.open_ids.iter().position(|open| *open == id)?;
        let segments: Vec<String> = self.path.segments()[..=index]
            .iter()
            .map(u64::to_string)
            .collect();
        Some(segments.join("."))
    }
}
