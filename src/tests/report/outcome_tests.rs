//! Outcome lines, reporter output and summaries.

use std::sync::Arc;
use std::time::Duration;

use crate::error::{ErrorKind, RecordError, RecordFailure, UpstreamKind};
use crate::io::InMemorySink;
use crate::model::{CallType, ObjectType};
use crate::report::{BatchSummary, Outcome, OutcomeStatus, Reporter};

fn outcome(object_id: &str, status: OutcomeStatus) -> Outcome {
    Outcome {
        index: 3,
        object: ObjectType::Member,
        call: CallType::Create,
        object_id: object_id.to_string(),
        context: Some("in group sales@x.io".into()),
        status,
        attempts: 1,
        elapsed: Duration::from_millis(40),
    }
}

#[test]
fn success_line() {
    let line = outcome("m@x.io", OutcomeStatus::Ok).line();
    assert_eq!(line, "gmin: member m@x.io in group sales@x.io created");
}

#[test]
fn failure_line_names_kind_and_message() {
    let line = outcome(
        "m@x.io",
        OutcomeStatus::Failed {
            kind: ErrorKind::Upstream(UpstreamKind::AlreadyExists),
            message: "Member already exists.".into(),
        },
    )
    .line();
    assert_eq!(
        line,
        "gmin: error - failed to create member m@x.io in group sales@x.io: already_exists: Member already exists."
    );
}

#[test]
fn rejected_record_reports_the_field() {
    let failure = RecordFailure::new(
        2,
        RecordError::MissingRequiredField {
            field: "password".into(),
        },
    );
    let outcome = Outcome::rejected(ObjectType::User, CallType::Create, &failure);

    assert_eq!(outcome.index, 2);
    assert_eq!(outcome.attempts, 0);
    assert_eq!(outcome.kind(), Some(ErrorKind::MissingRequiredField));
    assert_eq!(
        outcome.line(),
        "gmin: error - failed to create user at row 2 field password: missing_required_field: missing required field 'password'"
    );
}

#[test]
fn reporter_writes_one_line_per_outcome() {
    let sink = InMemorySink::new();
    let reporter = Reporter::new(Arc::new(sink.clone()));
    reporter.report(&outcome("a@x.io", OutcomeStatus::Ok));
    reporter.report(&outcome("b@x.io", OutcomeStatus::Ok));

    assert_eq!(sink.lines().len(), 2);
    assert!(sink.contents_string().ends_with("created\n"));
}

#[test]
fn silent_reporter_writes_nothing_visible() {
    let reporter = Reporter::silent();
    reporter.report(&outcome("a@x.io", OutcomeStatus::Ok));
}

#[test]
fn summary_exit_codes() {
    let ok = outcome("a@x.io", OutcomeStatus::Ok);
    let failed = outcome(
        "b@x.io",
        OutcomeStatus::Failed {
            kind: ErrorKind::InvalidEmail,
            message: "bad".into(),
        },
    );

    let all_ok = BatchSummary::from_outcomes(&[ok.clone(), ok.clone()]);
    assert_eq!(all_ok.exit_code(), 0);
    assert!(all_ok.is_success());

    let partial = BatchSummary::from_outcomes(&[ok, failed]);
    assert_eq!(
        partial,
        BatchSummary {
            total: 2,
            succeeded: 1,
            failed: 1
        }
    );
    assert_eq!(partial.exit_code(), 1);

    assert_eq!(BatchSummary::from_outcomes(&[]).exit_code(), 0);
}
