//! Job domain types

use serde::{Deserialize, Serialize};

/// Local description of a job to submit
///
/// Loaded once from the job list file and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobDescriptor {
    /// Human-readable description, also the source of the run name
    pub description: String,
    /// Location of the artifact to execute (e.g. an `s3://` URI)
    #[serde(rename = "s3Path")]
    pub artifact_location: String,
    /// Runtime/compute profile the run should be scheduled on
    #[serde(rename = "compute")]
    pub compute_profile: String,
}

impl JobDescriptor {
    pub fn new(
        description: impl Into<String>,
        artifact_location: impl Into<String>,
        compute_profile: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            artifact_location: artifact_location.into(),
            compute_profile: compute_profile.into(),
        }
    }
}

impl std::fmt::Display for JobDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({} on {})",
            self.description, self.artifact_location, self.compute_profile
        )
    }
}
