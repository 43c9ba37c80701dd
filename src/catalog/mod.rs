//! Attribute catalog: canonical attribute names per object type.
//!
//! This module provides:
//! - `AttributeDescriptor`: Static description of one attribute
//! - `AttributeCatalog`: Case-insensitive lookup, enum validation and
//!   required-field sets, built once per process
//!
//! Every input reader resolves header cells and JSON keys through the
//! catalog before a record is built, so unknown attributes are rejected
//! before any network I/O.

mod tables;

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::error::RecordError;
use crate::model::{CallType, ObjectType};

/// Boolean attributes are enumerated over these tokens.
pub const BOOLEAN_VALUES: &[&str] = &["true", "false"];

/// Static description of one attribute of an object type.
#[derive(Debug, Clone, Copy)]
pub struct AttributeDescriptor {
    /// Canonical camelCase name used on the wire
    pub name: &'static str,
    /// Extra lowercase spellings accepted on input
    pub aliases: &'static [&'static str],
    /// Call types for which the attribute must be present
    pub required_for: &'static [CallType],
    pub queryable: bool,
    /// Value is itself a structured object and is passed through
    pub composite: bool,
    /// Members of this composite are catalog attributes in their own right
    /// and are lifted into the record (`User.name`)
    pub flattened: bool,
    /// An empty cell is a meaningful value rather than an absent one
    pub allows_empty: bool,
    /// Allowed values for enumerated attributes
    pub values: Option<&'static [&'static str]>,
}

impl AttributeDescriptor {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self {
            name,
            aliases: &[],
            required_for: &[],
            queryable: false,
            composite: false,
            flattened: false,
            allows_empty: false,
            values: None,
        }
    }

    pub(crate) const fn aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    pub(crate) const fn required(mut self, calls: &'static [CallType]) -> Self {
        self.required_for = calls;
        self
    }

    pub(crate) const fn queryable(mut self) -> Self {
        self.queryable = true;
        self
    }

    pub(crate) const fn composite(mut self) -> Self {
        self.composite = true;
        self
    }

    pub(crate) const fn flattened(mut self) -> Self {
        self.composite = true;
        self.flattened = true;
        self
    }

    pub(crate) const fn allow_empty(mut self) -> Self {
        self.allows_empty = true;
        self
    }

    pub(crate) const fn values(mut self, values: &'static [&'static str]) -> Self {
        self.values = Some(values);
        self
    }

    pub(crate) const fn boolean(self) -> Self {
        self.values(BOOLEAN_VALUES)
    }

    pub fn is_required_for(&self, call: CallType) -> bool {
        self.required_for.contains(&call)
    }
}

#[derive(Debug)]
struct ObjectTable {
    descriptors: &'static [AttributeDescriptor],
    by_alias: HashMap<String, usize>,
}

impl ObjectTable {
    fn new(descriptors: &'static [AttributeDescriptor]) -> Self {
        let mut by_alias = HashMap::new();
        for (i, d) in descriptors.iter().enumerate() {
            by_alias.insert(d.name.to_ascii_lowercase(), i);
            for alias in d.aliases {
                by_alias.insert(alias.to_ascii_lowercase(), i);
            }
        }
        Self {
            descriptors,
            by_alias,
        }
    }

    fn get(&self, name: &str) -> Option<&'static AttributeDescriptor> {
        let idx = self.by_alias.get(&name.trim().to_ascii_lowercase())?;
        self.descriptors.get(*idx)
    }
}

/// Read-only, process-wide attribute table.
#[derive(Debug)]
pub struct AttributeCatalog {
    tables: HashMap<ObjectType, ObjectTable>,
}

static GLOBAL: LazyLock<AttributeCatalog> = LazyLock::new(AttributeCatalog::new);

impl AttributeCatalog {
    /// Build the catalog from the static tables.
    pub fn new() -> Self {
        let tables = ObjectType::ALL
            .iter()
            .map(|&object| (object, ObjectTable::new(tables::descriptors(object))))
            .collect();
        Self { tables }
    }

    /// The shared instance used by readers and builders.
    pub fn global() -> &'static AttributeCatalog {
        &GLOBAL
    }

    /// All descriptors of an object type, in table order.
    pub fn descriptors(&self, object: ObjectType) -> &'static [AttributeDescriptor] {
        self.tables
            .get(&object)
            .map(|t| t.descriptors)
            .unwrap_or(&[])
    }

    pub fn descriptor(&self, object: ObjectType, name: &str) -> Option<&'static AttributeDescriptor> {
        self.tables.get(&object)?.get(name)
    }

    /// Resolve any accepted spelling of an attribute to its canonical name.
    pub fn canonicalize(&self, object: ObjectType, name: &str) -> Result<&'static str, RecordError> {
        self.descriptor(object, name)
            .map(|d| d.name)
            .ok_or_else(|| RecordError::UnknownAttribute {
                attribute: name.trim().to_string(),
            })
    }

    /// Check an enumerated value and return its canonical spelling.
    ///
    /// Attributes without a value set accept anything unchanged.
    pub fn validate_enum(
        &self,
        object: ObjectType,
        name: &str,
        value: &str,
    ) -> Result<String, RecordError> {
        let descriptor = self
            .descriptor(object, name)
            .ok_or_else(|| RecordError::UnknownAttribute {
                attribute: name.to_string(),
            })?;
        let Some(values) = descriptor.values else {
            return Ok(value.to_string());
        };
        let wanted = value.trim().to_ascii_lowercase();
        values
            .iter()
            .find(|v| v.to_ascii_lowercase() == wanted)
            .map(|v| v.to_string())
            .ok_or_else(|| RecordError::InvalidEnum {
                field: descriptor.name.to_string(),
                value: value.to_string(),
            })
    }

    /// Canonical names that must be present for a call.
    pub fn required(&self, object: ObjectType, call: CallType) -> Vec<&'static str> {
        self.descriptors(object)
            .iter()
            .filter(|d| d.is_required_for(call))
            .map(|d| d.name)
            .collect()
    }

    pub fn is_composite(&self, object: ObjectType, name: &str) -> bool {
        self.descriptor(object, name).is_some_and(|d| d.composite)
    }

    pub fn allows_empty(&self, object: ObjectType, name: &str) -> bool {
        self.descriptor(object, name).is_some_and(|d| d.allows_empty)
    }

    pub fn is_queryable(&self, object: ObjectType, name: &str) -> bool {
        self.descriptor(object, name).is_some_and(|d| d.queryable)
    }

    /// The attribute that identifies a record for a call, if records carry one.
    ///
    /// OrgUnit creates have no such attribute: their key is the path derived
    /// from `parentOrgUnitPath` and `name`.
    pub fn natural_key(&self, object: ObjectType, call: CallType) -> Option<&'static str> {
        tables::natural_key(object, call)
    }
}

impl Default for AttributeCatalog {
    fn default() -> Self {
        Self::new()
    }
}
