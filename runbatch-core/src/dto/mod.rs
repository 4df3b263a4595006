//! Data Transfer Objects for the runs API
//!
//! Request bodies sent to the remote platform. Responses are parsed straight
//! into [`crate::domain::run::RunHandle`].

pub mod run;
