//! Runner configuration
//!
//! Connection settings for the runs API and the locations of the two local
//! inputs: the job list and the API key file.

use std::path::PathBuf;

use runbatch_client::{DEFAULT_API_URL, DEFAULT_REGION};

/// Default location of the job list
pub const DEFAULT_JOBS_FILE: &str = "./week-3.json";

/// Default location of the API key file
pub const DEFAULT_API_KEY_FILE: &str = "../gdea-cert.api";

/// Runner configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Runs API base URL (e.g., "https://api.cloud.wherobots.com")
    pub api_url: String,

    /// Region new runs are created in
    pub region: String,

    /// JSON file holding the ordered job list
    pub jobs_file: PathBuf,

    /// File holding the API key
    pub api_key_file: PathBuf,

    /// End a job as soon as its run reports a failed/cancelled status
    /// instead of polling until `completed`
    pub stop_on_failed_status: bool,
}

impl Config {
    /// Creates a new configuration with default input paths
    pub fn new(api_url: String, region: String) -> Self {
        Self {
            api_url,
            region,
            jobs_file: PathBuf::from(DEFAULT_JOBS_FILE),
            api_key_file: PathBuf::from(DEFAULT_API_KEY_FILE),
            stop_on_failed_status: false,
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_url.is_empty() {
            anyhow::bail!("api_url cannot be empty");
        }

        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            anyhow::bail!("api_url must start with http:// or https://");
        }

        if self.region.trim().is_empty() {
            anyhow::bail!("region cannot be empty");
        }

        if self.jobs_file.as_os_str().is_empty() {
            anyhow::bail!("jobs_file cannot be empty");
        }

        if self.api_key_file.as_os_str().is_empty() {
            anyhow::bail!("api_key_file cannot be empty");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL.to_string(), DEFAULT_REGION.to_string())
    }
}
