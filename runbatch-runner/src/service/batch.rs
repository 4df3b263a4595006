//! Batch driver
//!
//! Runs a job list strictly in order. Job N+1 never starts before job N has
//! finished, and the first failure stops the batch.

use runbatch_core::domain::job::JobDescriptor;
use thiserror::Error;
use tracing::{error, info};

use super::job_runner::{JobError, JobRunner};

/// Outcome of a batch where every job completed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub completed: usize,
}

/// First job that failed; later jobs were not attempted
#[derive(Debug, Error)]
#[error("job at index {index} ({}) failed: {source}", .job.description)]
pub struct BatchFailure {
    /// Zero-based position of the job in the list
    pub index: usize,
    pub job: JobDescriptor,
    pub source: JobError,
}

/// Submits jobs one at a time through a [`JobRunner`]
pub struct BatchDriver {
    runner: JobRunner,
}

impl BatchDriver {
    pub fn new(runner: JobRunner) -> Self {
        Self { runner }
    }

    /// Runs every job in order, stopping at the first failure
    pub async fn run_batch(&self, jobs: &[JobDescriptor]) -> Result<BatchSummary, BatchFailure> {
        info!(jobs = jobs.len(), "Starting batch");

        for (index, job) in jobs.iter().enumerate() {
            if let Err(source) = self.runner.run_job(job).await {
                error!("Ending job! Failed processing {}.", job);
                return Err(BatchFailure {
                    index,
                    job: job.clone(),
                    source,
                });
            }
        }

        Ok(BatchSummary {
            completed: jobs.len(),
        })
    }
}
