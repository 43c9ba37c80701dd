//! Record builders: raw records to validated payloads.
//!
//! This module provides:
//! - `build`: Convert one `RawRecord` into a `Payload` for an (object, call) pair
//! - `BuildContext`: Per-batch values that do not come from the record
//! - Field checks (`validate`) and typed accessors (`RecordView`)
//!
//! A builder either returns a payload with a non-empty natural key or a
//! `RecordFailure` naming the row and the offending field. Passwords leave
//! the builder only as SHA-1 digests.

mod device;
mod group;
mod group_settings;
mod member;
mod orgunit;
mod user;
pub mod validate;
mod view;

pub use view::RecordView;

use serde_json::Value;

use crate::catalog::AttributeCatalog;
use crate::error::{RecordError, RecordFailure};
use crate::format::RawRecord;
use crate::model::{CallType, ObjectType, Payload};

/// Values shared by every record of a batch.
#[derive(Debug, Clone, Default)]
pub struct BuildContext {
    /// Group whose members a member batch operates on
    pub group_key: Option<String>,
}

impl BuildContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_group_key(mut self, group_key: impl Into<String>) -> Self {
        self.group_key = Some(group_key.into());
        self
    }
}

/// Build a payload using the process-wide catalog.
pub fn build(
    object: ObjectType,
    call: CallType,
    record: &RawRecord,
    ctx: &BuildContext,
) -> Result<Payload, RecordFailure> {
    build_with(AttributeCatalog::global(), object, call, record, ctx)
}

pub fn build_with(
    catalog: &AttributeCatalog,
    object: ObjectType,
    call: CallType,
    record: &RawRecord,
    ctx: &BuildContext,
) -> Result<Payload, RecordFailure> {
    let view = RecordView::new(record, object, call, catalog);
    let built = match object {
        ObjectType::User => user::build(&view),
        ObjectType::Group => group::build(&view),
        ObjectType::Member => member::build(&view, ctx),
        ObjectType::OrgUnit => orgunit::build(&view),
        ObjectType::ChromeOsDevice => device::build_chromeos(&view),
        ObjectType::MobileDevice => device::build_mobile(&view),
        ObjectType::GroupSettings => group_settings::build(&view),
        ObjectType::Schema => Err(unsupported(object, call)),
    };

    let key = key_of(catalog, object, call, record);
    let payload = built.map_err(|error| RecordFailure {
        index: record.index,
        key: key.clone(),
        error,
    })?;

    if payload.natural_key().is_empty() {
        let field = catalog.natural_key(object, call).unwrap_or("name");
        return Err(RecordFailure {
            index: record.index,
            key,
            error: RecordError::MissingRequiredField {
                field: field.to_string(),
            },
        });
    }
    Ok(payload)
}

pub(crate) fn unsupported(object: ObjectType, call: CallType) -> RecordError {
    RecordError::Malformed(format!("{call} is not supported for {object} records"))
}

/// Reject update records that carry nothing but their key.
pub(crate) fn ensure_changes(changed: bool) -> Result<(), RecordError> {
    if changed {
        Ok(())
    } else {
        Err(RecordError::Malformed("no attributes to update".to_string()))
    }
}

fn key_of(
    catalog: &AttributeCatalog,
    object: ObjectType,
    call: CallType,
    record: &RawRecord,
) -> Option<String> {
    let name = catalog.natural_key(object, call)?;
    match record.get(name)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}
