//! Runbatch Runner
//!
//! Submits a list of jobs to the runs API one at a time, waiting for each run
//! to complete before starting the next.
//!
//! Architecture:
//! - Configuration: command-line flags with environment fallbacks
//! - Input: job list and API key read from local files
//! - Repository: HTTP communication with the runs API
//! - Scheduler: pacing between status polls
//! - Services: per-job state machine and the batch driver

mod config;
mod input;
mod repository;
mod scheduler;
mod service;
#[cfg(test)]
mod testing;

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, DEFAULT_API_KEY_FILE, DEFAULT_JOBS_FILE};
use crate::repository::HttpRunRepository;
use crate::scheduler::TokioPacer;
use crate::service::{BatchDriver, JobRunner};
use runbatch_client::{DEFAULT_API_URL, DEFAULT_REGION, RunsClient};

#[derive(Parser)]
#[command(name = "runbatch")]
#[command(about = "Submit a batch of runs, one at a time", long_about = None)]
struct Cli {
    /// Runs API base URL
    #[arg(long, env = "RUNBATCH_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Region new runs are created in
    #[arg(long, env = "RUNBATCH_REGION", default_value = DEFAULT_REGION)]
    region: String,

    /// JSON file listing the jobs to run, in order
    #[arg(long, env = "RUNBATCH_JOBS_FILE", default_value = DEFAULT_JOBS_FILE)]
    jobs_file: PathBuf,

    /// File containing the API key
    #[arg(long, env = "RUNBATCH_API_KEY_FILE", default_value = DEFAULT_API_KEY_FILE)]
    api_key_file: PathBuf,

    /// Fail a job when its run reports failed/cancelled instead of polling on
    #[arg(long, env = "RUNBATCH_STOP_ON_FAILED_STATUS")]
    stop_on_failed_status: bool,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Self {
            api_url: cli.api_url,
            region: cli.region,
            jobs_file: cli.jobs_file,
            api_key_file: cli.api_key_file,
            stop_on_failed_status: cli.stop_on_failed_status,
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "runbatch_runner=info,runbatch_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from(Cli::parse());
    config.validate().context("Invalid configuration")?;
    info!(
        "Loaded configuration: api_url={}, region={}",
        config.api_url, config.region
    );

    let api_key = input::load_api_key(&config.api_key_file)?;
    let jobs = input::load_jobs(&config.jobs_file)?;
    info!("Loaded {} job(s) from {}", jobs.len(), config.jobs_file.display());

    let client = RunsClient::new(config.api_url.clone(), config.region.clone(), api_key);
    let runner = JobRunner::new(
        Arc::new(HttpRunRepository::new(client)),
        Arc::new(TokioPacer),
    )
    .with_stop_on_failed_status(config.stop_on_failed_status);

    match BatchDriver::new(runner).run_batch(&jobs).await {
        Ok(summary) => {
            info!("Completed {} job(s)", summary.completed);
            println!("{}", "Multi-job process complete!".green().bold());
            Ok(ExitCode::SUCCESS)
        }
        // Already reported by the runner and the batch driver
        Err(_) => Ok(ExitCode::FAILURE),
    }
}
