//! Runbatch Core
//!
//! Core types shared by the runbatch client and runner.
//!
//! This crate contains:
//! - Domain types: job descriptors and run handles
//! - DTOs: request bodies sent to the runs API

pub mod domain;
pub mod dto;
