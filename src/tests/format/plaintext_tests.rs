use serde_json::json;

use crate::catalog::AttributeCatalog;
use crate::error::InputError;
use crate::format::{RecordLayout, read_plaintext};
use crate::model::{CallType, ObjectType};

#[test]
fn plaintext_emits_one_key_per_line() {
    let layout = RecordLayout::new(ObjectType::Group, CallType::Delete, AttributeCatalog::global());
    let data = "oldsales@x.io\n\n  obsolete@x.io  \n";
    let out = read_plaintext(data.as_bytes(), "stdin", &layout).unwrap();

    assert_eq!(out.len(), 2);
    let first = out[0].as_ref().unwrap();
    assert_eq!(first.index, 1);
    assert_eq!(first.get("groupKey"), Some(&json!("oldsales@x.io")));
    let second = out[1].as_ref().unwrap();
    assert_eq!(second.index, 3);
    assert_eq!(second.get("groupKey"), Some(&json!("obsolete@x.io")));
}

#[test]
fn plaintext_orgunit_keys_are_paths() {
    let layout = RecordLayout::new(ObjectType::OrgUnit, CallType::Delete, AttributeCatalog::global());
    let out = read_plaintext("/Sales/East\n".as_bytes(), "stdin", &layout).unwrap();
    assert_eq!(out[0].as_ref().unwrap().get("ouKey"), Some(&json!("/Sales/East")));
}

#[test]
fn plaintext_requires_a_keyed_layout() {
    let layout = RecordLayout::new(ObjectType::OrgUnit, CallType::Create, AttributeCatalog::global());
    let err = read_plaintext("x\n".as_bytes(), "stdin", &layout).unwrap_err();
    assert!(matches!(err, InputError::Parse { .. }));
}
