//! Run-related API endpoints

use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Request, Url};
use runbatch_core::domain::run::RunHandle;
use runbatch_core::dto::run::CreateRun;
use tracing::debug;

use crate::RunsClient;
use crate::error::{ClientError, Result};

const API_KEY_HEADER: &str = "X-API-Key";
const JSON: &str = "application/json";

impl RunsClient {
    // =============================================================================
    // Run Lifecycle
    // =============================================================================

    /// Create a new run
    ///
    /// The request is bounded by a client-side timeout equal to the run's
    /// `timeout_seconds`. No retry is attempted on any failure.
    ///
    /// # Returns
    /// The initial snapshot of the created run
    pub async fn create_run(&self, req: &CreateRun) -> Result<RunHandle> {
        let request = self.build_create_request(req)?;
        let response = self.client.execute(request).await?;

        self.handle_response(response).await
    }

    /// Get the current state of a run
    ///
    /// # Arguments
    /// * `run_id` - Id returned by [`RunsClient::create_run`]
    pub async fn get_run(&self, run_id: &str) -> Result<RunHandle> {
        let request = self.build_get_request(run_id)?;
        let response = self.client.execute(request).await?;

        self.handle_response(response).await
    }

    // =============================================================================
    // Request Builders
    // =============================================================================

    /// Build the `POST /runs?region=...` request for a run
    pub fn build_create_request(&self, req: &CreateRun) -> Result<Request> {
        let body = serde_json::to_vec(req).map_err(ClientError::Serialization)?;
        debug!(body = %String::from_utf8_lossy(&body), "Serialized run request");

        let url = self.runs_url(&[])?;
        let request = self
            .client
            .post(url)
            .query(&[("region", self.region.as_str())])
            .header(ACCEPT, JSON)
            .header(API_KEY_HEADER, self.api_key.as_str())
            .header(CONTENT_TYPE, JSON)
            .timeout(Duration::from_secs(req.timeout_seconds))
            .body(body)
            .build()?;

        Ok(request)
    }

    /// Build the `GET /runs/{id}` request for a run
    pub fn build_get_request(&self, run_id: &str) -> Result<Request> {
        if run_id.is_empty() || run_id == "." || run_id == ".." {
            return Err(ClientError::InvalidRunId(run_id.to_string()));
        }

        let url = self.runs_url(&[run_id])?;
        let request = self
            .client
            .get(url)
            .header(ACCEPT, JSON)
            .header(API_KEY_HEADER, self.api_key.as_str())
            .build()?;

        Ok(request)
    }

    /// `{base}/runs` followed by `segments`, each percent-encoded as a
    /// single path segment
    fn runs_url(&self, segments: &[&str]) -> Result<Url> {
        let invalid = || ClientError::InvalidUrl(self.base_url.clone());

        let mut url = Url::parse(&self.base_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .push("runs")
            .extend(segments);

        Ok(url)
    }
}
