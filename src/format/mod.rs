//! Input formats and record readers.
//!
//! This module provides:
//! - `FormatKind`: The input formats a batch command accepts
//! - `RawRecord`: One canonicalized input record with its source row index
//! - `RecordLayout`: The (object type, call type) a reader canonicalizes against
//! - Readers for CSV, JSON lines, spreadsheet rows and plaintext keys
//!
//! Every reader returns a `ReadOutput`: records in source order, each either
//! a `RawRecord` or the `RecordFailure` that rejected it. Problems with the
//! input as a whole (unknown header, missing column) are `InputError`s and
//! abort the batch.

use std::fmt;
use std::io::Read;
use std::path::Path;

mod csv;
mod json;
mod plaintext;
mod record;
mod sheet;

pub use csv::read_csv;
pub use json::read_json_lines;
pub use plaintext::read_plaintext;
pub use record::RawRecord;
pub use sheet::{read_sheet_keys, read_sheet_rows};

use serde_json::Value;
use tracing::debug;

use crate::catalog::AttributeCatalog;
use crate::error::{InputError, RecordError, RecordFailure, Stage};
use crate::io::InputProvider;
use crate::model::{CallType, ObjectType};

/// Records in source order; rejected records keep their slot.
pub type ReadOutput = Vec<Result<RawRecord, RecordFailure>>;

/// Input format of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatKind {
    /// RFC 4180 CSV with a header row
    Csv,
    /// One JSON object per line
    Json,
    /// A spreadsheet range fetched from the Sheets API
    GSheet,
    /// One key per non-blank line
    Text,
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatKind::Csv => write!(f, "csv"),
            FormatKind::Json => write!(f, "json"),
            FormatKind::GSheet => write!(f, "gsheet"),
            FormatKind::Text => write!(f, "text"),
        }
    }
}

impl FormatKind {
    /// Parse a format kind from a flag value.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Some(FormatKind::Csv),
            "json" | "jsonl" | "ndjson" => Some(FormatKind::Json),
            "gsheet" | "sheet" => Some(FormatKind::GSheet),
            "text" | "txt" | "plaintext" => Some(FormatKind::Text),
            _ => None,
        }
    }

    /// Get file extensions for this format.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            FormatKind::Csv => &["csv"],
            FormatKind::Json => &["json", "jsonl", "ndjson"],
            FormatKind::GSheet => &[],
            FormatKind::Text => &["txt", "text"],
        }
    }

    /// Infer format from file extension.
    pub fn from_path(path: &str) -> Option<Self> {
        let ext = Path::new(path).extension().and_then(|e| e.to_str())?;
        let ext = ext.to_ascii_lowercase();
        [FormatKind::Csv, FormatKind::Json, FormatKind::Text]
            .into_iter()
            .find(|kind| kind.extensions().contains(&ext.as_str()))
    }
}

/// The shape records are canonicalized against.
#[derive(Debug, Clone, Copy)]
pub struct RecordLayout<'a> {
    pub object: ObjectType,
    pub call: CallType,
    pub catalog: &'a AttributeCatalog,
}

impl<'a> RecordLayout<'a> {
    pub fn new(object: ObjectType, call: CallType, catalog: &'a AttributeCatalog) -> Self {
        Self {
            object,
            call,
            catalog,
        }
    }

    /// Canonicalize a header cell; unknown headers abort the batch.
    pub(crate) fn header(&self, cell: &str) -> Result<&'static str, InputError> {
        self.catalog
            .canonicalize(self.object, cell)
            .map_err(|_| InputError::UnknownAttribute {
                attribute: cell.trim().to_string(),
                object: self.object,
            })
    }

    /// Check that every required attribute has a column.
    pub(crate) fn check_required_columns(&self, columns: &[&'static str]) -> Result<(), InputError> {
        for required in self.catalog.required(self.object, self.call) {
            if !columns.contains(&required) {
                return Err(InputError::MissingRequiredColumn {
                    column: required.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Store one value under its canonical name, lifting flattened composites.
    pub(crate) fn insert(
        &self,
        record: &mut RawRecord,
        name: &str,
        value: Value,
    ) -> Result<(), RecordError> {
        let canonical = self.catalog.canonicalize(self.object, name)?;
        let flattened = self.is_flattened(canonical);
        match value {
            Value::Null => {}
            Value::Object(members) if flattened => {
                for (member, v) in members {
                    let member_canonical = self.catalog.canonicalize(self.object, &member)?;
                    if member_canonical == canonical {
                        return Err(RecordError::Malformed(format!(
                            "'{canonical}' cannot contain itself"
                        )));
                    }
                    if !v.is_null() {
                        record.insert(member_canonical, v);
                    }
                }
            }
            _ if flattened => return Err(not_an_object(canonical)),
            v => record.insert(canonical, v),
        }
        Ok(())
    }

    fn is_flattened(&self, canonical: &str) -> bool {
        self.catalog
            .descriptor(self.object, canonical)
            .is_some_and(|d| d.flattened)
    }

    /// Store a tabular cell; empty cells are absent unless the attribute allows them.
    pub(crate) fn insert_cell(
        &self,
        record: &mut RawRecord,
        canonical: &'static str,
        cell: &str,
    ) -> Result<(), RecordError> {
        let cell = cell.trim();
        if cell.is_empty() {
            if self.catalog.allows_empty(self.object, canonical) {
                record.insert(canonical, Value::String(String::new()));
            }
            return Ok(());
        }
        if self.is_flattened(canonical) {
            return match serde_json::from_str::<Value>(cell) {
                Ok(parsed @ Value::Object(_)) => self.insert(record, canonical, parsed),
                _ => Err(not_an_object(canonical)),
            };
        }
        if self.catalog.is_composite(self.object, canonical)
            && let Ok(parsed @ (Value::Object(_) | Value::Array(_))) =
                serde_json::from_str::<Value>(cell)
        {
            return self.insert(record, canonical, parsed);
        }
        record.insert(canonical, Value::String(cell.to_string()));
        Ok(())
    }

    /// The natural key attribute records of this layout carry.
    pub fn natural_key(&self) -> Option<&'static str> {
        self.catalog.natural_key(self.object, self.call)
    }
}

fn not_an_object(canonical: &str) -> RecordError {
    RecordError::Malformed(format!("'{canonical}' must be an object"))
}

/// Read every record from an input stream in the given format.
///
/// Spreadsheet input is fetched by the command facade and handed to
/// `read_sheet_rows` / `read_sheet_keys` directly.
pub fn read_records(
    input: &dyn InputProvider,
    format: FormatKind,
    layout: &RecordLayout<'_>,
) -> Result<ReadOutput, InputError> {
    let reader: Box<dyn Read + Send> = input.open().map_err(|source| InputError::Io {
        stage: Stage::Open,
        target: input.id().to_string(),
        source,
    })?;

    let output = match format {
        FormatKind::Csv => read_csv(reader, input.id(), layout)?,
        FormatKind::Json => read_json_lines(reader, input.id(), layout)?,
        FormatKind::Text => read_plaintext(reader, input.id(), layout)?,
        FormatKind::GSheet => {
            return Err(InputError::Parse {
                stage: Stage::ResolveInput,
                target: input.id().to_string(),
                message: "spreadsheet input is fetched from the Sheets API, not a stream"
                    .to_string(),
            });
        }
    };

    debug!(
        input = input.id(),
        format = %format,
        records = output.len(),
        rejected = output.iter().filter(|r| r.is_err()).count(),
        "read input"
    );
    Ok(output)
}

/// Best-effort natural key of a partially read record, for diagnostics.
pub(crate) fn key_hint(record: &RawRecord, layout: &RecordLayout<'_>) -> Option<String> {
    let key = layout.natural_key()?;
    match record.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}
