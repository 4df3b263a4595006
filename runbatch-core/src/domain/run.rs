//! Run domain types

use serde::{Deserialize, Serialize};

/// Status value that ends polling successfully
pub const COMPLETED_STATUS: &str = "completed";

/// Statuses the platform uses for runs that ended without completing
const FAILURE_STATUSES: [&str; 6] = [
    "failed",
    "cancelled",
    "canceled",
    "timed_out",
    "timedout",
    "error",
];

/// Snapshot of a run as reported by the runs API
///
/// Returned when a run is created and again by every status request. The
/// `id` is fixed once assigned; [`RunHandle::refresh`] only takes the
/// mutable parts of a newer snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunHandle {
    id: String,
    name: String,
    status: String,
}

impl RunHandle {
    pub fn new(id: impl Into<String>, name: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            status: status.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Replace name and status with those of a newer snapshot
    ///
    /// Returns `false` if the snapshot reported a different id; the handle
    /// keeps its own id either way.
    pub fn refresh(&mut self, snapshot: RunHandle) -> bool {
        let same_run = snapshot.id == self.id;
        self.name = snapshot.name;
        self.status = snapshot.status;
        same_run
    }

    /// Whether the run has reached the `completed` status (case-insensitive)
    pub fn is_completed(&self) -> bool {
        self.status.eq_ignore_ascii_case(COMPLETED_STATUS)
    }

    /// Whether the run reports a status that will never become `completed`
    pub fn is_failure_terminal(&self) -> bool {
        FAILURE_STATUSES
            .iter()
            .any(|s| self.status.eq_ignore_ascii_case(s))
    }
}
