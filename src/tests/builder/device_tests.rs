//! Chrome OS and mobile device builder tests.

use crate::builder::{BuildContext, build};
use crate::error::RecordError;
use crate::format::RawRecord;
use crate::model::{
    CallType, ChromeOsAction, ChromeOsOp, DeprovisionReason, MobileAction, MobileOp, ObjectType,
    Payload,
};

fn manage(record: &RawRecord) -> Result<Payload, crate::error::RecordFailure> {
    build(
        ObjectType::ChromeOsDevice,
        CallType::Manage,
        record,
        &BuildContext::new(),
    )
}

#[test]
fn deprovision_without_reason_is_rejected() {
    let record = RawRecord::new(1)
        .with_field("deviceId", "d1")
        .with_field("action", "deprovision");
    let failure = manage(&record).unwrap_err();
    assert_eq!(failure.key.as_deref(), Some("d1"));
    assert_eq!(
        failure.error,
        RecordError::MissingRequiredField {
            field: "deprovisionReason".into()
        }
    );
}

#[test]
fn deprovision_with_reason_builds() {
    let record = RawRecord::new(1)
        .with_field("deviceId", "d1")
        .with_field("action", "Deprovision")
        .with_field("deprovisionReason", "RETIRING_DEVICE");
    let payload = manage(&record).unwrap();
    assert_eq!(
        payload,
        Payload::ChromeOsDevice(ChromeOsOp::Manage {
            device_id: "d1".into(),
            action: ChromeOsAction::Deprovision,
            reason: Some(DeprovisionReason::RetiringDevice),
        })
    );
    assert_eq!(payload.context().as_deref(), Some("with action deprovision"));
}

#[test]
fn reason_is_ignored_for_other_actions() {
    let record = RawRecord::new(1)
        .with_field("deviceId", "d1")
        .with_field("action", "disable")
        .with_field("deprovisionReason", "retiring_device");
    let Payload::ChromeOsDevice(ChromeOsOp::Manage { reason, .. }) = manage(&record).unwrap() else {
        panic!("expected manage");
    };
    assert_eq!(reason, None);
}

#[test]
fn unknown_action_is_invalid_enum() {
    let record = RawRecord::new(1)
        .with_field("deviceId", "d1")
        .with_field("action", "explode");
    assert!(matches!(
        manage(&record).unwrap_err().error,
        RecordError::InvalidEnum { ref field, .. } if field == "action"
    ));
}

#[test]
fn move_requires_an_orgunit_path() {
    let record = RawRecord::new(1).with_field("deviceId", "d1");
    let failure = build(
        ObjectType::ChromeOsDevice,
        CallType::Move,
        &record,
        &BuildContext::new(),
    )
    .unwrap_err();
    assert_eq!(failure.error.field(), Some("orgUnitPath"));
}

#[test]
fn chromeos_update_keeps_empty_annotations() {
    let record = RawRecord::new(1)
        .with_field("deviceId", "d1")
        .with_field("notes", "");
    let payload = build(
        ObjectType::ChromeOsDevice,
        CallType::Update,
        &record,
        &BuildContext::new(),
    )
    .unwrap();
    let Payload::ChromeOsDevice(ChromeOsOp::Update { body, .. }) = payload else {
        panic!("expected update");
    };
    assert_eq!(body.notes.as_deref(), Some(""));
}

#[test]
fn mobile_manage_and_delete() {
    let record = RawRecord::new(1)
        .with_field("resourceId", "r1")
        .with_field("action", "APPROVE");
    let payload = build(
        ObjectType::MobileDevice,
        CallType::Manage,
        &record,
        &BuildContext::new(),
    )
    .unwrap();
    assert_eq!(
        payload,
        Payload::MobileDevice(MobileOp::Manage {
            resource_id: "r1".into(),
            action: MobileAction::Approve
        })
    );

    let delete = build(
        ObjectType::MobileDevice,
        CallType::Delete,
        &RawRecord::new(1).with_field("resourceId", "r1"),
        &BuildContext::new(),
    )
    .unwrap();
    assert_eq!(delete.natural_key(), "r1");
}
