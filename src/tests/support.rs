//! Scripted collaborators shared by the async suites.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};
use tokio::time::{Instant, sleep};

use crate::api::{CallHandle, DirectoryApi, SheetSource};
use crate::error::{UpstreamError, UpstreamKind};

/// A `DirectoryApi` that records calls and replays scripted responses per path.
///
/// Paths without a script succeed with `{}`.
#[derive(Debug, Default)]
pub struct ScriptedApi {
    calls: Mutex<Vec<(Instant, CallHandle)>>,
    scripts: Mutex<HashMap<String, VecDeque<Result<Value, UpstreamError>>>>,
    latency: Duration,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Queue responses for calls whose path equals `path`.
    pub fn script(self, path: &str, responses: Vec<Result<Value, UpstreamError>>) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .extend(responses);
        self
    }

    pub fn calls(&self) -> Vec<CallHandle> {
        self.calls.lock().unwrap().iter().map(|(_, c)| c.clone()).collect()
    }

    pub fn call_times(&self) -> Vec<Instant> {
        self.calls.lock().unwrap().iter().map(|(t, _)| *t).collect()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

pub fn upstream(kind: UpstreamKind, status: u16) -> UpstreamError {
    UpstreamError::new(kind, format!("HTTP {status}")).with_status(status)
}

#[async_trait]
impl DirectoryApi for ScriptedApi {
    async fn execute(&self, call: &CallHandle) -> Result<Value, UpstreamError> {
        self.calls
            .lock()
            .unwrap()
            .push((Instant::now(), call.clone()));
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if !self.latency.is_zero() {
            sleep(self.latency).await;
        }
        let scripted = self
            .scripts
            .lock()
            .unwrap()
            .get_mut(&call.path())
            .and_then(VecDeque::pop_front);

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        scripted.unwrap_or_else(|| Ok(json!({})))
    }
}

/// A `SheetSource` serving one fixed range.
#[derive(Debug, Clone)]
pub struct StaticSheet {
    pub rows: Vec<Vec<String>>,
}

impl StaticSheet {
    pub fn new(rows: &[&[&str]]) -> Self {
        Self {
            rows: rows
                .iter()
                .map(|row| row.iter().map(|c| c.to_string()).collect())
                .collect(),
        }
    }
}

#[async_trait]
impl SheetSource for StaticSheet {
    async fn values(&self, _sheet_id: &str, _range: &str) -> Result<Vec<Vec<String>>, UpstreamError> {
        Ok(self.rows.clone())
    }
}
