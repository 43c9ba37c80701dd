//! Typed accessors over a raw record.

use serde_json::{Map, Value};

use super::validate;
use crate::catalog::AttributeCatalog;
use crate::error::RecordError;
use crate::format::RawRecord;
use crate::model::{CallType, ObjectType};

/// A raw record read through the catalog of its object type.
#[derive(Debug, Clone, Copy)]
pub struct RecordView<'a> {
    pub record: &'a RawRecord,
    pub object: ObjectType,
    pub call: CallType,
    pub catalog: &'a AttributeCatalog,
}

impl<'a> RecordView<'a> {
    pub fn new(
        record: &'a RawRecord,
        object: ObjectType,
        call: CallType,
        catalog: &'a AttributeCatalog,
    ) -> Self {
        Self {
            record,
            object,
            call,
            catalog,
        }
    }

    /// Fail on the first required attribute that is absent or empty.
    pub fn check_required(&self) -> Result<(), RecordError> {
        for field in self.catalog.required(self.object, self.call) {
            self.required_str(field)?;
        }
        Ok(())
    }

    /// A scalar attribute as a string.
    ///
    /// JSON booleans and numbers are rendered the way they are spelled in
    /// CSV, so `true` and `"true"` read the same.
    pub fn str(&self, name: &str) -> Result<Option<String>, RecordError> {
        match self.record.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.trim().to_string())),
            Some(Value::Bool(b)) => Ok(Some(b.to_string())),
            Some(Value::Number(n)) => Ok(Some(n.to_string())),
            Some(Value::Array(_) | Value::Object(_)) => Err(RecordError::Malformed(format!(
                "'{name}' must be a single value"
            ))),
        }
    }

    pub fn required_str(&self, name: &str) -> Result<String, RecordError> {
        match self.str(name)? {
            Some(s) if !s.is_empty() => Ok(s),
            _ => Err(RecordError::MissingRequiredField {
                field: name.to_string(),
            }),
        }
    }

    /// An enumerated attribute in its canonical spelling.
    pub fn enumerated(&self, name: &str) -> Result<Option<String>, RecordError> {
        match self.str(name)? {
            Some(s) if !s.is_empty() => self.catalog.validate_enum(self.object, name, &s).map(Some),
            _ => Ok(None),
        }
    }

    pub fn bool(&self, name: &str) -> Result<Option<bool>, RecordError> {
        Ok(self.enumerated(name)?.map(|v| v == "true"))
    }

    pub fn email(&self, name: &str) -> Result<Option<String>, RecordError> {
        match self.str(name)? {
            Some(s) if !s.is_empty() => {
                if validate::is_email(&s) {
                    Ok(Some(s))
                } else {
                    Err(RecordError::InvalidEmail {
                        field: name.to_string(),
                        value: s,
                    })
                }
            }
            _ => Ok(None),
        }
    }

    pub fn required_email(&self, name: &str) -> Result<String, RecordError> {
        let value = self.required_str(name)?;
        if validate::is_email(&value) {
            Ok(value)
        } else {
            Err(RecordError::InvalidEmail {
                field: name.to_string(),
                value,
            })
        }
    }

    pub fn phone(&self, name: &str) -> Result<Option<String>, RecordError> {
        match self.str(name)? {
            Some(s) if !s.is_empty() => {
                if validate::is_phone(&s) {
                    Ok(Some(s))
                } else {
                    Err(RecordError::InvalidPhone {
                        field: name.to_string(),
                        value: s,
                    })
                }
            }
            _ => Ok(None),
        }
    }

    /// The SHA-1 hex digest of a password attribute.
    pub fn password_digest(&self, name: &str) -> Result<Option<String>, RecordError> {
        match self.record.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) if s.is_empty() => Err(RecordError::HashFailure {
                field: name.to_string(),
                reason: "password is empty".to_string(),
            }),
            Some(Value::String(s)) => Ok(Some(validate::sha1_hex(s))),
            Some(Value::Number(n)) => Ok(Some(validate::sha1_hex(&n.to_string()))),
            Some(_) => Err(RecordError::HashFailure {
                field: name.to_string(),
                reason: "password must be a string".to_string(),
            }),
        }
    }

    /// Composite attributes present in the record, passed through verbatim.
    pub fn composites(&self) -> Map<String, Value> {
        self.record
            .iter()
            .filter(|(name, _)| {
                self.catalog
                    .descriptor(self.object, name)
                    .is_some_and(|d| d.composite && !d.flattened)
            })
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect()
    }

    pub fn has(&self, name: &str) -> bool {
        self.record.contains(name)
    }
}
