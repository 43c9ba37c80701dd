//! The raw record shared by every reader.

use std::fmt;

use serde_json::{Map, Value};

/// An ordered mapping from canonical attribute name to value, plus the
/// 1-based source row it came from.
///
/// Tabular readers store strings; the JSON reader keeps decoded values.
#[derive(Clone, Default, PartialEq)]
pub struct RawRecord {
    pub index: usize,
    fields: Map<String, Value>,
}

impl RawRecord {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            fields: Map::new(),
        }
    }

    /// Add a string field, builder style.
    pub fn with_field(mut self, name: &str, value: impl Into<String>) -> Self {
        self.insert(name, Value::String(value.into()));
        self
    }

    pub fn insert(&mut self, name: &str, value: Value) {
        self.fields.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl fmt::Debug for RawRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (k, v) in &self.fields {
            if k == "password" {
                map.entry(k, &"<redacted>");
            } else {
                map.entry(k, v);
            }
        }
        map.finish()?;
        write!(f, " @ row {}", self.index)
    }
}
