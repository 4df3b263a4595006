//! Runbatch HTTP Client
//!
//! A small, type-safe client for the remote runs API: create a run, then
//! fetch its status by id.
//!
//! # Example
//!
//! ```no_run
//! use runbatch_client::RunsClient;
//! use runbatch_core::domain::job::JobDescriptor;
//! use runbatch_core::dto::run::CreateRun;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), runbatch_client::ClientError> {
//!     let client = RunsClient::new("https://api.cloud.wherobots.com", "aws-us-east-1", "key");
//!
//!     let job = JobDescriptor::new("ingest-week-3", "s3://bucket/ingest.py", "tiny");
//!     let run = client.create_run(&CreateRun::for_job(&job)).await?;
//!
//!     println!("Created run: {}", run.id());
//!     Ok(())
//! }
//! ```

pub mod error;
mod runs;

pub use error::{ClientError, Result};

use reqwest::Client;
use serde::de::DeserializeOwned;

/// Default base URL of the runs API
pub const DEFAULT_API_URL: &str = "https://api.cloud.wherobots.com";

/// Default region runs are created in
pub const DEFAULT_REGION: &str = "aws-us-east-1";

/// HTTP client for the runs API
///
/// Holds the API key and region for the whole session; every request carries
/// the key in the `X-API-Key` header.
#[derive(Clone)]
pub struct RunsClient {
    /// Base URL of the API (e.g., "https://api.cloud.wherobots.com")
    base_url: String,
    /// Region passed on run creation
    region: String,
    /// Opaque API token
    api_key: String,
    /// HTTP client instance
    client: Client,
}

impl std::fmt::Debug for RunsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunsClient")
            .field("base_url", &self.base_url)
            .field("region", &self.region)
            .finish_non_exhaustive()
    }
}

impl RunsClient {
    /// Create a new runs client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the runs API
    /// * `region` - Region new runs are created in
    /// * `api_key` - Token sent as `X-API-Key`
    pub fn new(
        base_url: impl Into<String>,
        region: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self::with_client(base_url, region, api_key, Client::new())
    }

    /// Create a new runs client with a custom HTTP client
    ///
    /// This allows you to configure proxies, TLS settings, etc. The per-run
    /// timeout on creation is applied on top of whatever the client sets.
    pub fn with_client(
        base_url: impl Into<String>,
        region: impl Into<String>,
        api_key: impl Into<String>,
        client: Client,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            region: region.into(),
            api_key: api_key.into(),
            client,
        }
    }

    /// Get the base URL of the API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the region runs are created in
    pub fn region(&self) -> &str {
        &self.region
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// Non-2xx statuses become [`ClientError::UnexpectedStatus`]; a body that
    /// does not parse becomes [`ClientError::ParseError`].
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::unexpected_status(status.as_u16(), error_text));
        }

        let body = response.text().await?;

        serde_json::from_str(&body)
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}
