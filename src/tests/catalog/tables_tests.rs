//! Consistency checks over every static table.

use std::collections::HashSet;

use crate::catalog::AttributeCatalog;
use crate::model::{CallType, ObjectType};

const CALLS: [CallType; 6] = [
    CallType::Create,
    CallType::Update,
    CallType::Delete,
    CallType::Move,
    CallType::Manage,
    CallType::Undelete,
];

#[test]
fn every_spelling_resolves_to_its_own_descriptor() {
    let catalog = AttributeCatalog::new();
    for object in ObjectType::ALL {
        for descriptor in catalog.descriptors(object) {
            let spellings = std::iter::once(descriptor.name).chain(descriptor.aliases.iter().copied());
            for spelling in spellings {
                for variant in [
                    spelling.to_string(),
                    spelling.to_ascii_uppercase(),
                    spelling.to_ascii_lowercase(),
                ] {
                    assert_eq!(
                        catalog.canonicalize(object, &variant).ok(),
                        Some(descriptor.name),
                        "{object}: '{variant}' should resolve to {}",
                        descriptor.name
                    );
                }
            }
        }
    }
}

#[test]
fn canonical_names_are_unique_per_object() {
    let catalog = AttributeCatalog::new();
    for object in ObjectType::ALL {
        let mut seen = HashSet::new();
        for descriptor in catalog.descriptors(object) {
            assert!(
                seen.insert(descriptor.name.to_ascii_lowercase()),
                "{object}: duplicate attribute {}",
                descriptor.name
            );
        }
    }
}

#[test]
fn natural_keys_are_catalog_attributes() {
    let catalog = AttributeCatalog::new();
    for object in ObjectType::ALL {
        for call in CALLS {
            if let Some(key) = catalog.natural_key(object, call) {
                assert!(
                    catalog.descriptor(object, key).is_some(),
                    "{object}/{call}: key {key} missing from catalog"
                );
            }
        }
    }
}

#[test]
fn enumerated_values_validate_against_themselves() {
    let catalog = AttributeCatalog::new();
    for object in ObjectType::ALL {
        for descriptor in catalog.descriptors(object) {
            for value in descriptor.values.unwrap_or(&[]) {
                assert_eq!(
                    catalog
                        .validate_enum(object, descriptor.name, &value.to_ascii_lowercase())
                        .unwrap(),
                    *value
                );
            }
        }
    }
}

#[test]
fn group_settings_cover_the_acl_tokens() {
    let catalog = AttributeCatalog::global();
    for name in [
        "whoCanJoin",
        "whoCanViewMembership",
        "whoCanViewGroup",
        "whoCanPostMessage",
        "messageModerationLevel",
        "spamModerationLevel",
        "replyTo",
        "whoCanContactOwner",
        "whoCanLeaveGroup",
        "whoCanDiscoverGroup",
        "whoCanModerateMembers",
        "whoCanModerateContent",
        "whoCanAssistContent",
    ] {
        let descriptor = catalog
            .descriptor(ObjectType::GroupSettings, name)
            .unwrap_or_else(|| panic!("{name} missing"));
        assert!(descriptor.values.is_some(), "{name} should be enumerated");
    }
}
