//! Core domain types
//!
//! A [`job::JobDescriptor`] is the local description of work to submit; a
//! [`run::RunHandle`] is the remote platform's view of one execution of it.

pub mod job;
pub mod run;
