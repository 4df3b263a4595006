//! Service layer
//!
//! - [`JobRunner`]: drives one job from request to a terminal run status
//! - [`BatchDriver`]: runs a job list in order, stopping at the first failure

mod batch;
mod job_runner;

pub use batch::BatchDriver;
pub use job_runner::JobRunner;
