//! Process-wide tracker registration.
//!
//! Passing a [`StepTracker`] to the code that needs it is the normal path.
//! This module is an escape hatch for code that cannot be reached that
//! way: a tracker can be installed once and retrieved afterwards.
//! Retrieval before installation is an error, never a default tracker.

use crate::tracker::{StepTracker, TrackerError};
use once_cell::sync::OnceCell;

static GLOBAL: OnceCell<StepTracker> = OnceCell::new();

/// Install the process-wide tracker.
///
/// Fails with [`TrackerError::AlreadyInstalled`] if one is already set.
pub fn install(tracker: StepTracker) -> Result<&'static StepTracker, TrackerError> {
    GLOBAL
        .set(tracker)
        .map_err(|_| TrackerError::AlreadyInstalled)?;
    tracing::debug!("installed process-wide step tracker");
    global()
}

/// The installed tracker, or [`TrackerError::NotInstalled`].
pub fn global() -> Result<&'static StepTracker, TrackerError> {
    GLOBAL.get().ok_or(TrackerError::NotInstalled)
}

pub fn is_installed() -> bool {
    GLOBAL.get().is_some()
}
