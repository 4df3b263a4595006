//! Job runner
//!
//! Drives a single job through an explicit state machine:
//!
//! ```text
//! Building -> Submitting -> Polling -> Completed
//!     \___________\___________\______> Err(JobError)
//! ```
//!
//! Each transition is one call to [`JobRunner::advance`]. Network access goes
//! through a [`RunRepository`] and the pause between polls through a
//! [`Pacer`], so the transitions stay the same whether the pause is a
//! blocking timer or something event-driven.

use runbatch_client::ClientError;
use runbatch_core::domain::job::JobDescriptor;
use runbatch_core::domain::run::RunHandle;
use runbatch_core::dto::run::CreateRun;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::repository::RunRepository;
use crate::scheduler::{POLL_INTERVAL, Pacer};

/// Errors that end a single job
#[derive(Debug, Error)]
pub enum JobError {
    /// Request could not be built, sent, or its response understood
    #[error(transparent)]
    Api(#[from] ClientError),

    /// Run reported a failure status (only with `stop_on_failed_status`)
    #[error("run {id} ended with status '{status}'")]
    RunEnded { id: String, status: String },
}

/// Where a job currently is in its lifecycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunPhase {
    /// Nothing done yet
    Building,
    /// Request built, not yet accepted by the API
    Submitting(CreateRun),
    /// Run exists and has not completed
    Polling(RunHandle),
    /// Run reported `completed`
    Completed(RunHandle),
}

/// Runs one job at a time against the runs API
pub struct JobRunner {
    repository: Arc<dyn RunRepository>,
    pacer: Arc<dyn Pacer>,
    poll_interval: Duration,
    stop_on_failed_status: bool,
}

impl JobRunner {
    /// Creates a job runner polling at [`POLL_INTERVAL`]
    pub fn new(repository: Arc<dyn RunRepository>, pacer: Arc<dyn Pacer>) -> Self {
        Self {
            repository,
            pacer,
            poll_interval: POLL_INTERVAL,
            stop_on_failed_status: false,
        }
    }

    /// End the job with [`JobError::RunEnded`] when the run reports a
    /// failure status, instead of polling until `completed`
    pub fn with_stop_on_failed_status(mut self, enabled: bool) -> Self {
        self.stop_on_failed_status = enabled;
        self
    }

    /// Runs a job until its run completes or an error occurs
    ///
    /// Returns the final snapshot of the run. Errors are logged here, once,
    /// with the job description.
    pub async fn run_job(&self, job: &JobDescriptor) -> Result<RunHandle, JobError> {
        let mut phase = RunPhase::Building;

        loop {
            phase = match self.advance(job, phase).await {
                Ok(RunPhase::Completed(handle)) => return Ok(handle),
                Ok(next) => next,
                Err(e) => {
                    error!(job = %job.description, "Error running {}: {}", job.description, e);
                    return Err(e);
                }
            };
        }
    }

    /// Performs a single transition
    pub async fn advance(&self, job: &JobDescriptor, phase: RunPhase) -> Result<RunPhase, JobError> {
        match phase {
            RunPhase::Building => {
                let req = CreateRun::for_job(job);
                debug!(job = %job.description, name = %req.name, "Built run request");
                Ok(RunPhase::Submitting(req))
            }
            RunPhase::Submitting(req) => {
                info!("Starting {} job.", req.name);

                let handle = self.repository.create_run(&req).await?;
                info!(
                    job = %job.description,
                    run_id = %handle.id(),
                    "{} ({}) - {}",
                    job.description,
                    handle.id(),
                    handle.status()
                );

                self.settle(handle)
            }
            RunPhase::Polling(mut handle) => {
                let snapshot = self.repository.get_run(handle.id()).await?;
                if !handle.refresh(snapshot) {
                    warn!(
                        run_id = %handle.id(),
                        "Status response for {} reported a different run id",
                        job.description
                    );
                }

                info!(
                    job = %job.description,
                    status = %handle.status(),
                    "{} - {}",
                    job.description,
                    handle.status()
                );

                let next = self.settle(handle)?;
                self.pacer.pause(self.poll_interval).await;
                Ok(next)
            }
            RunPhase::Completed(handle) => Ok(RunPhase::Completed(handle)),
        }
    }

    /// Decides the phase that follows a fresh snapshot
    fn settle(&self, handle: RunHandle) -> Result<RunPhase, JobError> {
        if handle.is_completed() {
            return Ok(RunPhase::Completed(handle));
        }

        if handle.is_failure_terminal() {
            if self.stop_on_failed_status {
                return Err(JobError::RunEnded {
                    id: handle.id().to_string(),
                    status: handle.status().to_string(),
                });
            }
            warn!(
                run_id = %handle.id(),
                status = %handle.status(),
                "Run reports a non-completed final status; polling continues"
            );
        }

        Ok(RunPhase::Polling(handle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Call, RecordingPacer, ScriptedRepository, parse_error, run};

    fn job() -> JobDescriptor {
        JobDescriptor::new("ingest-week-3", "s3://bucket/ingest.py", "tiny")
    }

    fn runner(repo: &Arc<ScriptedRepository>, pacer: &Arc<RecordingPacer>) -> JobRunner {
        JobRunner::new(repo.clone(), pacer.clone())
    }

    #[tokio::test]
    async fn test_polls_until_completed() {
        let repo = Arc::new(
            ScriptedRepository::new()
                .on_create(run("r1", "PENDING"))
                .on_get(run("r1", "running"))
                .on_get(run("r1", "running"))
                .on_get(run("r1", "completed")),
        );
        let pacer = Arc::new(RecordingPacer::default());

        let handle = runner(&repo, &pacer).run_job(&job()).await.unwrap();

        assert_eq!(handle.id(), "r1");
        assert!(handle.is_completed());
        assert_eq!(
            repo.calls(),
            vec![
                Call::Create("silver_ingest_week_3".to_string()),
                Call::Get("r1".to_string()),
                Call::Get("r1".to_string()),
                Call::Get("r1".to_string()),
            ]
        );
        assert_eq!(pacer.pauses(), vec![Duration::from_secs(30); 3]);
    }

    #[tokio::test]
    async fn test_completed_status_ignores_case() {
        for status in ["COMPLETED", "Completed", "completed"] {
            let repo = Arc::new(
                ScriptedRepository::new()
                    .on_create(run("r1", "queued"))
                    .on_get(run("r1", status)),
            );
            let pacer = Arc::new(RecordingPacer::default());

            runner(&repo, &pacer).run_job(&job()).await.unwrap();
            assert_eq!(repo.get_count(), 1, "{status}");
        }
    }

    #[tokio::test]
    async fn test_completed_on_create_skips_polling() {
        let repo = Arc::new(ScriptedRepository::new().on_create(run("r1", "Completed")));
        let pacer = Arc::new(RecordingPacer::default());

        runner(&repo, &pacer).run_job(&job()).await.unwrap();

        assert_eq!(repo.get_count(), 0);
        assert!(pacer.pauses().is_empty());
    }

    #[tokio::test]
    async fn test_unexpected_status_on_create_never_polls() {
        let repo = Arc::new(
            ScriptedRepository::new().on_create(Err(ClientError::unexpected_status(500, "boom"))),
        );
        let pacer = Arc::new(RecordingPacer::default());

        let err = runner(&repo, &pacer).run_job(&job()).await.unwrap_err();

        assert!(matches!(
            err,
            JobError::Api(ClientError::UnexpectedStatus { status: 500, .. })
        ));
        assert_eq!(repo.get_count(), 0);
        assert!(pacer.pauses().is_empty());
    }

    #[tokio::test]
    async fn test_poll_parse_error_ends_job() {
        let repo = Arc::new(
            ScriptedRepository::new()
                .on_create(run("r1", "pending"))
                .on_get(run("r1", "running"))
                .on_get(parse_error()),
        );
        let pacer = Arc::new(RecordingPacer::default());

        let err = runner(&repo, &pacer).run_job(&job()).await.unwrap_err();

        assert!(matches!(err, JobError::Api(ClientError::ParseError(_))));
        assert_eq!(repo.get_count(), 2);
        assert_eq!(pacer.pauses().len(), 1);
    }

    #[tokio::test]
    async fn test_poll_unexpected_status_ends_job() {
        let repo = Arc::new(
            ScriptedRepository::new()
                .on_create(run("r1", "pending"))
                .on_get(Err(ClientError::unexpected_status(503, ""))),
        );
        let pacer = Arc::new(RecordingPacer::default());

        let err = runner(&repo, &pacer).run_job(&job()).await.unwrap_err();

        assert!(matches!(
            err,
            JobError::Api(ClientError::UnexpectedStatus { status: 503, .. })
        ));
        assert_eq!(repo.get_count(), 1);
        assert!(pacer.pauses().is_empty());
    }

    #[tokio::test]
    async fn test_failed_status_keeps_polling_by_default() {
        let repo = Arc::new(
            ScriptedRepository::new()
                .on_create(run("r1", "pending"))
                .on_get(run("r1", "FAILED"))
                .on_get(run("r1", "completed")),
        );
        let pacer = Arc::new(RecordingPacer::default());

        runner(&repo, &pacer).run_job(&job()).await.unwrap();
        assert_eq!(repo.get_count(), 2);
    }

    #[tokio::test]
    async fn test_failed_status_stops_when_enabled() {
        let repo = Arc::new(
            ScriptedRepository::new()
                .on_create(run("r1", "pending"))
                .on_get(run("r1", "running"))
                .on_get(run("r1", "Cancelled")),
        );
        let pacer = Arc::new(RecordingPacer::default());

        let err = runner(&repo, &pacer)
            .with_stop_on_failed_status(true)
            .run_job(&job())
            .await
            .unwrap_err();

        match err {
            JobError::RunEnded { id, status } => {
                assert_eq!(id, "r1");
                assert_eq!(status, "Cancelled");
            }
            other => panic!("expected RunEnded, got {:?}", other),
        }
        assert_eq!(pacer.pauses().len(), 1);
    }

    #[tokio::test]
    async fn test_poll_keeps_original_id() {
        let repo = Arc::new(
            ScriptedRepository::new()
                .on_create(run("r1", "pending"))
                .on_get(run("other", "running"))
                .on_get(run("r1", "completed")),
        );
        let pacer = Arc::new(RecordingPacer::default());

        let handle = runner(&repo, &pacer).run_job(&job()).await.unwrap();

        assert_eq!(handle.id(), "r1");
        assert_eq!(
            repo.calls()[1..],
            [Call::Get("r1".to_string()), Call::Get("r1".to_string())]
        );
    }

    #[tokio::test]
    async fn test_advance_transitions() {
        let repo = Arc::new(ScriptedRepository::new().on_create(run("r1", "pending")));
        let pacer = Arc::new(RecordingPacer::default());
        let runner = runner(&repo, &pacer);

        let phase = runner.advance(&job(), RunPhase::Building).await.unwrap();
        let RunPhase::Submitting(req) = &phase else {
            panic!("expected Submitting, got {:?}", phase);
        };
        assert_eq!(req.name, "silver_ingest_week_3");
        assert!(repo.calls().is_empty());

        let phase = runner.advance(&job(), phase).await.unwrap();
        assert!(matches!(phase, RunPhase::Polling(ref h) if h.id() == "r1"));

        let done = RunPhase::Completed(RunHandle::new("r1", "n", "completed"));
        assert_eq!(runner.advance(&job(), done.clone()).await.unwrap(), done);
    }
}
