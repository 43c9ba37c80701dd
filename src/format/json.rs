//! JSON lines reader.

use std::io::{BufRead, BufReader, Read};

use serde_json::Value;

use super::{RawRecord, ReadOutput, RecordLayout, key_hint};
use crate::error::{InputError, RecordError, RecordFailure, Stage};

/// Read newline-delimited JSON objects.
///
/// Each line is decoded on its own: a malformed line, invalid UTF-8 or an
/// unknown field fails only that record. The row index is the 1-based line
/// number.
pub fn read_json_lines(
    reader: impl Read,
    target: &str,
    layout: &RecordLayout<'_>,
) -> Result<ReadOutput, InputError> {
    let mut output = ReadOutput::new();
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    let mut index = 0;

    loop {
        buf.clear();
        let read = reader.read_until(b'\n', &mut buf).map_err(|source| InputError::Io {
            stage: Stage::Parse,
            target: target.to_string(),
            source,
        })?;
        if read == 0 {
            break;
        }
        index += 1;

        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line.trim(),
            Err(e) => {
                output.push(Err(RecordFailure::new(
                    index,
                    RecordError::Malformed(format!("line is not valid UTF-8: {e}")),
                )));
                continue;
            }
        };
        if line.is_empty() {
            continue;
        }
        output.push(decode_line(index, line, layout));
    }

    Ok(output)
}

fn decode_line(index: usize, line: &str, layout: &RecordLayout<'_>) -> Result<RawRecord, RecordFailure> {
    let value: Value = serde_json::from_str(line)
        .map_err(|e| RecordFailure::new(index, RecordError::Malformed(e.to_string())))?;
    let Value::Object(object) = value else {
        return Err(RecordFailure::new(
            index,
            RecordError::Malformed("expected a JSON object".to_string()),
        ));
    };

    let mut record = RawRecord::new(index);
    let mut first_error = None;
    for (name, v) in object {
        if let Err(e) = layout.insert(&mut record, &name, v)
            && first_error.is_none()
        {
            first_error = Some(e);
        }
    }

    match first_error {
        None => Ok(record),
        Some(e) => Err(RecordFailure::new(index, e).with_key(key_hint(&record, layout))),
    }
}
