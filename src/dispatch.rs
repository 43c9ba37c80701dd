//! Concurrent dispatch of built payloads.
//!
//! This module provides:
//! - `Pacing`: Fixed pre-submit delays per (object type, call type)
//! - `Dispatcher` / `DispatcherBuilder`: Submit payloads in source order to a
//!   bounded pool of workers, each running its call under the retry policy
//!
//! Submission is sequential: a record is paced, handed a worker slot and only
//! then is the next record considered. Completion order is unspecified; the
//! returned outcomes are sorted back into source order.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::api::{CallFactory, CallHandle, DirectoryApi};
use crate::error::{ErrorKind, UpstreamError, UpstreamKind};
use crate::model::{CallType, ObjectType, Payload};
use crate::report::{Outcome, OutcomeStatus, Reporter};
use crate::retry::RetryPolicy;

/// Default worker pool size.
pub const DEFAULT_CONCURRENCY: usize = 16;

/// The orgunit endpoints allow one write per second and reject a precise
/// 1 Hz schedule.
pub const ORG_UNIT_DELAY: Duration = Duration::from_secs(2);

/// Pre-submit delay table.
#[derive(Debug, Clone, PartialEq)]
pub struct Pacing {
    delays: HashMap<(ObjectType, CallType), Duration>,
}

impl Default for Pacing {
    fn default() -> Self {
        Self::none()
            .with_delay(ObjectType::OrgUnit, CallType::Create, ORG_UNIT_DELAY)
            .with_delay(ObjectType::OrgUnit, CallType::Update, ORG_UNIT_DELAY)
            .with_delay(ObjectType::OrgUnit, CallType::Delete, ORG_UNIT_DELAY)
    }
}

impl Pacing {
    /// A table with no delays at all.
    pub fn none() -> Self {
        Self {
            delays: HashMap::new(),
        }
    }

    pub fn with_delay(mut self, object: ObjectType, call: CallType, delay: Duration) -> Self {
        if delay.is_zero() {
            self.delays.remove(&(object, call));
        } else {
            self.delays.insert((object, call), delay);
        }
        self
    }

    pub fn pre_submit_delay(&self, object: ObjectType, call: CallType) -> Duration {
        self.delays
            .get(&(object, call))
            .copied()
            .unwrap_or(Duration::ZERO)
    }
}

/// A built payload with its source row.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub index: usize,
    pub payload: Payload,
}

impl Submission {
    pub fn new(index: usize, payload: Payload) -> Self {
        Self { index, payload }
    }
}

enum Job {
    /// Failed before any call was made
    Rejected(Outcome),
    Call {
        index: usize,
        object_id: String,
        context: Option<String>,
        handle: CallHandle,
    },
}

pub struct DispatcherBuilder {
    api: Arc<dyn DirectoryApi>,
    customer_id: String,
    retry: RetryPolicy,
    pacing: Pacing,
    concurrency: usize,
    reporter: Reporter,
}

impl DispatcherBuilder {
    pub fn new(api: Arc<dyn DirectoryApi>) -> Self {
        Self {
            api,
            customer_id: "my_customer".to_string(),
            retry: RetryPolicy::default(),
            pacing: Pacing::default(),
            concurrency: DEFAULT_CONCURRENCY,
            reporter: Reporter::default(),
        }
    }

    pub fn with_customer_id(mut self, customer_id: impl Into<String>) -> Self {
        self.customer_id = customer_id.into();
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    /// Worker pool size; values below 1 are raised to 1.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_reporter(mut self, reporter: Reporter) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn build(self) -> Dispatcher {
        Dispatcher {
            api: self.api,
            factory: CallFactory::new(self.customer_id),
            retry: self.retry,
            pacing: self.pacing,
            concurrency: self.concurrency,
            reporter: self.reporter,
        }
    }
}

/// Fans payloads out to workers and collects one outcome per payload.
pub struct Dispatcher {
    api: Arc<dyn DirectoryApi>,
    factory: CallFactory,
    retry: RetryPolicy,
    pacing: Pacing,
    concurrency: usize,
    reporter: Reporter,
}

impl Dispatcher {
    pub fn builder(api: Arc<dyn DirectoryApi>) -> DispatcherBuilder {
        DispatcherBuilder::new(api)
    }

    pub fn reporter(&self) -> &Reporter {
        &self.reporter
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    fn prepare(&self, object: ObjectType, call: CallType, submission: Submission) -> Job {
        let Submission { index, payload } = submission;
        let object_id = payload.natural_key().into_owned();
        let context = payload.context();

        let handle = if object_id.is_empty() {
            Err((ErrorKind::MissingKey, "record has no natural key".to_string()))
        } else if payload.object_type() != object || payload.call_type() != call {
            Err((
                ErrorKind::Malformed,
                format!(
                    "payload is a {} {}, not a {object} {call}",
                    payload.object_type(),
                    payload.call_type()
                ),
            ))
        } else {
            self.factory
                .handle(&payload)
                .map_err(|e| (e.kind(), e.to_string()))
        };

        match handle {
            Ok(handle) => Job::Call {
                index,
                object_id,
                context,
                handle,
            },
            Err((kind, message)) => Job::Rejected(Outcome {
                index,
                object,
                call,
                object_id,
                context,
                status: OutcomeStatus::Failed { kind, message },
                attempts: 0,
                elapsed: Duration::ZERO,
            }),
        }
    }

    /// Run every payload and return outcomes in source order.
    ///
    /// Each outcome is also reported as soon as its record finishes.
    pub async fn dispatch(
        &self,
        call: CallType,
        object: ObjectType,
        submissions: Vec<Submission>,
    ) -> Vec<Outcome> {
        let delay = self.pacing.pre_submit_delay(object, call);
        debug!(
            object = object.noun(),
            call = %call,
            records = submissions.len(),
            concurrency = self.concurrency,
            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            "dispatching batch"
        );

        let jobs = stream::iter(submissions).then(|submission| {
            let job = self.prepare(object, call, submission);
            async move {
                if matches!(job, Job::Call { .. }) && !delay.is_zero() {
                    sleep(delay).await;
                }
                job
            }
        });

        let mut outcomes: Vec<Outcome> = jobs
            .map(|job| self.run_job(object, call, job))
            .buffer_unordered(self.concurrency)
            .collect()
            .await;

        outcomes.sort_by_key(|o| o.index);
        outcomes
    }

    async fn run_job(&self, object: ObjectType, call: CallType, job: Job) -> Outcome {
        let outcome = match job {
            Job::Rejected(outcome) => outcome,
            Job::Call {
                index,
                object_id,
                context,
                handle,
            } => {
                let api = Arc::clone(&self.api);
                let retry = self.retry.clone();
                let id = object_id.clone();
                let worker =
                    tokio::spawn(async move { retry.run(&id, || api.execute(&handle)).await });

                let (status, attempts, elapsed) = match worker.await {
                    Ok(attempted) => {
                        let status = match attempted.result {
                            Ok(_) => OutcomeStatus::Ok,
                            Err(e) => failed(e),
                        };
                        (status, attempted.attempts, attempted.elapsed)
                    }
                    // The call may or may not have gone out before the task died.
                    Err(join_error) => {
                        warn!(object_id = %object_id, error = %join_error, "worker task failed");
                        let e = UpstreamError::new(UpstreamKind::Transport, join_error.to_string());
                        (failed(e), 0, Duration::ZERO)
                    }
                };

                Outcome {
                    index,
                    object,
                    call,
                    object_id,
                    context,
                    status,
                    attempts,
                    elapsed,
                }
            }
        };
        self.reporter.report(&outcome);
        outcome
    }
}

fn failed(e: UpstreamError) -> OutcomeStatus {
    OutcomeStatus::Failed {
        kind: ErrorKind::Upstream(e.kind),
        message: e.message,
    }
}
