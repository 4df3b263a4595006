//! Runs repository
//!
//! Handles communication with the runs API:
//! - Creating a run for a job
//! - Fetching the current state of a run

use async_trait::async_trait;
use runbatch_client::{Result, RunsClient};
use runbatch_core::domain::run::RunHandle;
use runbatch_core::dto::run::CreateRun;

/// Repository trait for run operations
#[async_trait]
pub trait RunRepository: Send + Sync {
    /// Creates a run and returns its initial snapshot
    async fn create_run(&self, req: &CreateRun) -> Result<RunHandle>;

    /// Fetches the latest snapshot of a run
    ///
    /// # Arguments
    /// * `run_id` - The id assigned on creation
    async fn get_run(&self, run_id: &str) -> Result<RunHandle>;
}

/// HTTP implementation of RunRepository
pub struct HttpRunRepository {
    client: RunsClient,
}

impl HttpRunRepository {
    /// Creates a new HTTP run repository
    pub fn new(client: RunsClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RunRepository for HttpRunRepository {
    async fn create_run(&self, req: &CreateRun) -> Result<RunHandle> {
        self.client.create_run(req).await
    }

    async fn get_run(&self, run_id: &str) -> Result<RunHandle> {
        self.client.get_run(run_id).await
    }
}
