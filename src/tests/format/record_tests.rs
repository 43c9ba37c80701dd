//! Raw record behaviour.

use crate::builder::{BuildContext, build_with};
use crate::catalog::AttributeCatalog;
use crate::format::{RawRecord, RecordLayout, read_csv};
use crate::model::{CallType, ObjectType};

#[test]
fn debug_output_redacts_the_password() {
    let record = RawRecord::new(2)
        .with_field("primaryEmail", "a@x.io")
        .with_field("password", "Tr0ub4dor&3");

    let debug = format!("{record:?}");
    assert!(!debug.contains("Tr0ub4dor&3"));
    assert!(debug.contains("<redacted>"));
    assert!(debug.contains("a@x.io"));
    assert!(debug.ends_with("@ row 2"));
}

#[test]
fn rejected_user_does_not_carry_the_password() {
    let data = "givenName,familyName,primaryEmail,password,suspended\nA,L,a@x.io,Tr0ub4dor&3,maybe\n";
    let catalog = AttributeCatalog::global();
    let layout = RecordLayout::new(ObjectType::User, CallType::Create, catalog);
    let out = read_csv(data.as_bytes(), "t", &layout).unwrap();
    let record = out[0].as_ref().unwrap();
    assert!(!format!("{record:?}").contains("Tr0ub4dor&3"));

    let failure = build_with(
        catalog,
        ObjectType::User,
        CallType::Create,
        record,
        &BuildContext::default(),
    )
    .unwrap_err();
    let rendered = format!("{failure} {failure:?}");
    assert!(rendered.contains("suspended"));
    assert!(!rendered.contains("Tr0ub4dor&3"));
}
