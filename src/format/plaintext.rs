//! Plaintext key reader for key-only calls.

use std::io::{BufRead, BufReader, Read};

use serde_json::Value;

use super::{RawRecord, ReadOutput, RecordLayout};
use crate::error::{InputError, Stage};

/// Read one natural key per non-blank line.
///
/// Lines are trimmed; blank lines are skipped but still count towards the
/// row index of later lines.
pub fn read_plaintext(
    reader: impl Read,
    target: &str,
    layout: &RecordLayout<'_>,
) -> Result<ReadOutput, InputError> {
    let key = layout.natural_key().ok_or_else(|| InputError::Parse {
        stage: Stage::ResolveInput,
        target: target.to_string(),
        message: format!("{} {} records have no key attribute", layout.object, layout.call),
    })?;

    let mut output = ReadOutput::new();
    for (i, line) in BufReader::new(reader).lines().enumerate() {
        let line = line.map_err(|source| InputError::Io {
            stage: Stage::Parse,
            target: target.to_string(),
            source,
        })?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut record = RawRecord::new(i + 1);
        record.insert(key, Value::String(line.to_string()));
        output.push(Ok(record));
    }

    Ok(output)
}
