//! Run DTOs

use serde::{Deserialize, Serialize};

use crate::domain::job::JobDescriptor;

/// Prefix applied to every derived run name
pub const RUN_NAME_PREFIX: &str = "silver_";

/// Server-side timeout requested for each run, in seconds
pub const RUN_TIMEOUT_SECONDS: u64 = 3600;

/// Request body for creating a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRun {
    pub runtime: String,
    pub name: String,
    pub run_python: RunPython,
    pub timeout_seconds: u64,
}

/// Python entry point of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunPython {
    pub uri: String,
}

impl CreateRun {
    /// Builds the request for a job descriptor
    pub fn for_job(job: &JobDescriptor) -> Self {
        Self {
            runtime: job.compute_profile.clone(),
            name: run_name(&job.description),
            run_python: RunPython {
                uri: job.artifact_location.clone(),
            },
            timeout_seconds: RUN_TIMEOUT_SECONDS,
        }
    }
}

/// Derives a run name from a job description
///
/// `ingest-week-3` becomes `silver_ingest_week_3`.
pub fn run_name(description: &str) -> String {
    format!("{}{}", RUN_NAME_PREFIX, description.replace('-', "_"))
}
