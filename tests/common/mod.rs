//! Shared helpers for the integration suites.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use gmin::io::InMemorySource;
use gmin::{
    BatchContext, CallHandle, DirectoryApi, InMemorySink, Pacing, RetryPolicy, UpstreamError,
    UpstreamKind,
};
use serde_json::{Value, json};
use tokio::time::Instant;

/// Directory double that records every call and replays queued failures.
#[derive(Debug, Default)]
pub struct RecordingApi {
    calls: Mutex<Vec<(Instant, CallHandle)>>,
    failures: Mutex<HashMap<String, VecDeque<UpstreamError>>>,
}

impl RecordingApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Fail the next `times` calls to `path` with `kind`.
    pub fn fail(&self, path: &str, kind: UpstreamKind, status: u16, times: usize) {
        let mut failures = self.failures.lock().unwrap();
        let queue = failures.entry(path.to_string()).or_default();
        for _ in 0..times {
            queue.push_back(UpstreamError::new(kind, format!("HTTP {status}")).with_status(status));
        }
    }

    pub fn calls(&self) -> Vec<CallHandle> {
        self.calls.lock().unwrap().iter().map(|(_, c)| c.clone()).collect()
    }

    pub fn call_times(&self) -> Vec<Instant> {
        let mut times: Vec<_> = self.calls.lock().unwrap().iter().map(|(t, _)| *t).collect();
        times.sort();
        times
    }
}

#[async_trait]
impl DirectoryApi for RecordingApi {
    async fn execute(&self, call: &CallHandle) -> Result<Value, UpstreamError> {
        self.calls.lock().unwrap().push((Instant::now(), call.clone()));
        let failure = self
            .failures
            .lock()
            .unwrap()
            .get_mut(&call.path())
            .and_then(VecDeque::pop_front);
        match failure {
            Some(e) => Err(e),
            None => Ok(json!({})),
        }
    }
}

/// A context reading `stdin` and writing operator lines to `sink`.
pub fn context(api: &Arc<RecordingApi>, sink: &InMemorySink, stdin: &str) -> BatchContext {
    BatchContext::new(api.clone())
        .with_customer_id("C01abc")
        .with_retry_policy(RetryPolicy::default().without_jitter())
        .with_pacing(Pacing::default())
        .with_sink(Arc::new(sink.clone()))
        .with_stdin(Arc::new(InMemorySource::from_string("stdin", stdin)))
}
