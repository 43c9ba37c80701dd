//! Alias resolution and enum validation.

use crate::catalog::AttributeCatalog;
use crate::error::RecordError;
use crate::model::{CallType, ObjectType};

#[test]
fn canonicalize_folds_case_and_aliases() {
    let catalog = AttributeCatalog::global();

    for spelling in ["primaryEmail", "PRIMARYEMAIL", "primaryemail", "primary_email"] {
        assert_eq!(
            catalog.canonicalize(ObjectType::User, spelling).unwrap(),
            "primaryEmail"
        );
    }
    assert_eq!(
        catalog.canonicalize(ObjectType::User, " FirstName ").unwrap(),
        "givenName"
    );
    assert_eq!(
        catalog.canonicalize(ObjectType::Member, "Delivery").unwrap(),
        "deliverySettings"
    );
}

#[test]
fn canonicalize_rejects_unknown_attributes() {
    let err = AttributeCatalog::global()
        .canonicalize(ObjectType::Group, "shoeSize")
        .unwrap_err();
    assert_eq!(
        err,
        RecordError::UnknownAttribute {
            attribute: "shoeSize".into()
        }
    );
}

#[test]
fn aliases_are_scoped_per_object_type() {
    let catalog = AttributeCatalog::global();
    assert_eq!(
        catalog.canonicalize(ObjectType::ChromeOsDevice, "user").unwrap(),
        "annotatedUser"
    );
    assert!(catalog.canonicalize(ObjectType::User, "user").is_err());
}

#[test]
fn validate_enum_returns_canonical_spelling() {
    let catalog = AttributeCatalog::global();
    assert_eq!(
        catalog
            .validate_enum(ObjectType::Member, "role", "owner")
            .unwrap(),
        "OWNER"
    );
    assert_eq!(
        catalog
            .validate_enum(ObjectType::ChromeOsDevice, "action", "DEPROVISION")
            .unwrap(),
        "deprovision"
    );
    assert_eq!(
        catalog
            .validate_enum(ObjectType::User, "suspended", "TRUE")
            .unwrap(),
        "true"
    );
}

#[test]
fn validate_enum_rejects_values_outside_the_set() {
    let err = AttributeCatalog::global()
        .validate_enum(ObjectType::Member, "role", "superuser")
        .unwrap_err();
    assert_eq!(
        err,
        RecordError::InvalidEnum {
            field: "role".into(),
            value: "superuser".into()
        }
    );
}

#[test]
fn validate_enum_passes_free_text_through() {
    let value = AttributeCatalog::global()
        .validate_enum(ObjectType::Group, "name", "Sales Team")
        .unwrap();
    assert_eq!(value, "Sales Team");
}

#[test]
fn required_sets_follow_call_type() {
    let catalog = AttributeCatalog::global();

    let create = catalog.required(ObjectType::User, CallType::Create);
    for field in ["primaryEmail", "givenName", "familyName", "password"] {
        assert!(create.contains(&field), "{field} should be required");
    }
    assert_eq!(
        catalog.required(ObjectType::User, CallType::Delete),
        vec!["userKey"]
    );
    assert_eq!(
        catalog.required(ObjectType::ChromeOsDevice, CallType::Manage),
        vec!["deviceId", "action"]
    );
    assert_eq!(
        catalog.required(ObjectType::ChromeOsDevice, CallType::Move),
        vec!["deviceId", "orgUnitPath"]
    );
}

#[test]
fn natural_keys_per_call() {
    let catalog = AttributeCatalog::global();
    assert_eq!(
        catalog.natural_key(ObjectType::User, CallType::Create),
        Some("primaryEmail")
    );
    assert_eq!(
        catalog.natural_key(ObjectType::User, CallType::Delete),
        Some("userKey")
    );
    assert_eq!(
        catalog.natural_key(ObjectType::Member, CallType::Delete),
        Some("memberKey")
    );
    assert_eq!(catalog.natural_key(ObjectType::OrgUnit, CallType::Create), None);
    assert_eq!(
        catalog.natural_key(ObjectType::MobileDevice, CallType::Delete),
        Some("resourceId")
    );
}

#[test]
fn attribute_flags() {
    let catalog = AttributeCatalog::global();
    assert!(catalog.is_composite(ObjectType::User, "addresses"));
    assert!(catalog.is_composite(ObjectType::User, "name"));
    assert!(!catalog.is_composite(ObjectType::User, "password"));
    assert!(catalog.allows_empty(ObjectType::ChromeOsDevice, "notes"));
    assert!(!catalog.allows_empty(ObjectType::ChromeOsDevice, "deviceId"));
    assert!(catalog.is_queryable(ObjectType::User, "orgUnitPath"));
}
