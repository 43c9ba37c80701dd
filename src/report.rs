//! Per-record outcomes and how they are reported.
//!
//! Each outcome produces one line on the operator sink and one structured
//! log event: INFO for success, ERROR for failure. The sink can be swapped
//! for a `DiscardSink` in silent mode; the log event is always emitted.

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info};

use crate::error::{ErrorKind, RecordFailure};
use crate::io::{DiscardSink, OperatorSink, StdoutSink};
use crate::model::{CallType, ObjectType};

#[derive(Debug, Clone, PartialEq)]
pub enum OutcomeStatus {
    Ok,
    Failed { kind: ErrorKind, message: String },
}

/// Terminal result of one record.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    /// 1-based source row
    pub index: usize,
    pub object: ObjectType,
    pub call: CallType,
    /// Natural key; empty when the record never produced one
    pub object_id: String,
    /// Extra identifiers such as the owning group of a member
    pub context: Option<String>,
    pub status: OutcomeStatus,
    /// Upstream calls made; 0 for records rejected before dispatch or whose
    /// worker died before reporting a count
    pub attempts: u32,
    pub elapsed: Duration,
}

impl Outcome {
    pub fn is_ok(&self) -> bool {
        matches!(self.status, OutcomeStatus::Ok)
    }

    pub fn kind(&self) -> Option<ErrorKind> {
        match &self.status {
            OutcomeStatus::Ok => None,
            OutcomeStatus::Failed { kind, .. } => Some(*kind),
        }
    }

    /// Outcome of a record the builder or reader rejected.
    pub fn rejected(object: ObjectType, call: CallType, failure: &RecordFailure) -> Self {
        Self {
            index: failure.index,
            object,
            call,
            object_id: failure.key.clone().unwrap_or_default(),
            context: failure.error.field().map(|f| format!("field {f}")),
            status: OutcomeStatus::Failed {
                kind: failure.error.kind(),
                message: failure.error.to_string(),
            },
            attempts: 0,
            elapsed: Duration::ZERO,
        }
    }

    fn subject(&self) -> String {
        let id = if self.object_id.is_empty() {
            format!("at row {}", self.index)
        } else {
            self.object_id.clone()
        };
        match &self.context {
            Some(context) => format!("{} {id} {context}", self.object.noun()),
            None => format!("{} {id}", self.object.noun()),
        }
    }

    /// The operator line for this outcome.
    pub fn line(&self) -> String {
        match &self.status {
            OutcomeStatus::Ok => format!("gmin: {} {}", self.subject(), self.call.past_tense()),
            OutcomeStatus::Failed { kind, message } => format!(
                "gmin: error - failed to {} {}: {kind}: {message}",
                self.call,
                self.subject()
            ),
        }
    }
}

/// Writes outcomes to the operator sink and the structured log.
#[derive(Debug, Clone)]
pub struct Reporter {
    sink: Arc<dyn OperatorSink>,
}

impl Reporter {
    pub fn new(sink: Arc<dyn OperatorSink>) -> Self {
        Self { sink }
    }

    pub fn stdout() -> Self {
        Self::new(Arc::new(StdoutSink))
    }

    /// Reporter whose operator lines are dropped.
    pub fn silent() -> Self {
        Self::new(Arc::new(DiscardSink))
    }

    pub fn report(&self, outcome: &Outcome) {
        self.sink.write_line(&outcome.line());

        let elapsed_ms = u64::try_from(outcome.elapsed.as_millis()).unwrap_or(u64::MAX);
        match &outcome.status {
            OutcomeStatus::Ok => info!(
                index = outcome.index,
                object = outcome.object.noun(),
                call = %outcome.call,
                object_id = %outcome.object_id,
                context = outcome.context.as_deref(),
                attempts = outcome.attempts,
                elapsed_ms,
                "record succeeded"
            ),
            OutcomeStatus::Failed { kind, message } => error!(
                index = outcome.index,
                object = outcome.object.noun(),
                call = %outcome.call,
                object_id = %outcome.object_id,
                context = outcome.context.as_deref(),
                attempts = outcome.attempts,
                elapsed_ms,
                kind = %kind,
                error = %message,
                "record failed"
            ),
        }
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::stdout()
    }
}

/// Counts over a finished batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn from_outcomes(outcomes: &[Outcome]) -> Self {
        let succeeded = outcomes.iter().filter(|o| o.is_ok()).count();
        Self {
            total: outcomes.len(),
            succeeded,
            failed: outcomes.len() - succeeded,
        }
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    /// 0 when every record succeeded, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.is_success() { 0 } else { 1 }
    }
}
