//! Repository layer
//!
//! Repositories abstract communication with the runs API behind a trait so
//! the job state machine can be driven without a network.

mod runs;

pub use runs::{HttpRunRepository, RunRepository};
