//! Scheduler layer for the runner
//!
//! Owns the only delay in the system: the fixed pause between status polls.
//! The pause goes through [`Pacer`] so the job state machine does not care
//! whether it is backed by a real timer.

pub mod pacer;

pub use pacer::{POLL_INTERVAL, Pacer, TokioPacer};
