//! Local inputs
//!
//! Reads the job list and the API key before the batch starts. Any failure
//! here is fatal: no job is submitted.

use std::path::Path;

use anyhow::{Context, Result};
use runbatch_core::domain::job::JobDescriptor;

/// Loads the ordered job list from a JSON array of descriptors
pub fn load_jobs(path: &Path) -> Result<Vec<JobDescriptor>> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("Error reading {}", path.display()))?;

    serde_json::from_str(&data).with_context(|| format!("Error parsing {}", path.display()))
}

/// Loads the API key, dropping surrounding whitespace such as a trailing newline
pub fn load_api_key(path: &Path) -> Result<String> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("Error reading {}", path.display()))?;

    let key = data.trim();
    if key.is_empty() {
        anyhow::bail!("{} does not contain an API key", path.display());
    }

    Ok(key.to_string())
}
