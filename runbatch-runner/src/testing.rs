//! In-memory fakes for driving the services without a network or a timer

use async_trait::async_trait;
use runbatch_client::{ClientError, Result};
use runbatch_core::domain::run::RunHandle;
use runbatch_core::dto::run::CreateRun;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use crate::repository::RunRepository;
use crate::scheduler::Pacer;

/// A request the fake repository received
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Create(String),
    Get(String),
}

/// Repository answering from pre-recorded responses, in order
#[derive(Default)]
pub struct ScriptedRepository {
    creates: Mutex<VecDeque<Result<RunHandle>>>,
    gets: Mutex<VecDeque<Result<RunHandle>>>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_create(self, response: Result<RunHandle>) -> Self {
        self.creates.lock().unwrap().push_back(response);
        self
    }

    pub fn on_get(self, response: Result<RunHandle>) -> Self {
        self.gets.lock().unwrap().push_back(response);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn created_names(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Create(name) => Some(name),
                Call::Get(_) => None,
            })
            .collect()
    }

    pub fn get_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, Call::Get(_)))
            .count()
    }
}

#[async_trait]
impl RunRepository for ScriptedRepository {
    async fn create_run(&self, req: &CreateRun) -> Result<RunHandle> {
        self.calls.lock().unwrap().push(Call::Create(req.name.clone()));
        self.creates
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected create for {}", req.name))
    }

    async fn get_run(&self, run_id: &str) -> Result<RunHandle> {
        self.calls.lock().unwrap().push(Call::Get(run_id.to_string()));
        self.gets
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected poll of {}", run_id))
    }
}

/// Pacer that records requested pauses and returns immediately
#[derive(Default)]
pub struct RecordingPacer {
    pauses: Mutex<Vec<Duration>>,
}

impl RecordingPacer {
    pub fn pauses(&self) -> Vec<Duration> {
        self.pauses.lock().unwrap().clone()
    }
}

#[async_trait]
impl Pacer for RecordingPacer {
    async fn pause(&self, interval: Duration) {
        self.pauses.lock().unwrap().push(interval);
    }
}

pub fn run(id: &str, status: &str) -> Result<RunHandle> {
    Ok(RunHandle::new(id, format!("silver_{}", id), status))
}

pub fn parse_error() -> Result<RunHandle> {
    Err(ClientError::ParseError("unexpected end of input".to_string()))
}
