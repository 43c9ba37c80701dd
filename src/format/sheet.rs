//! Spreadsheet range readers.
//!
//! The Sheets API returns a range as rows of cells; trailing empty cells and
//! rows are already trimmed by the service but are tolerated here too.

use serde_json::Value;

use super::{RawRecord, ReadOutput, RecordLayout, key_hint};
use crate::error::{InputError, RecordFailure};

fn is_blank(row: &[String]) -> bool {
    row.iter().all(|cell| cell.trim().is_empty())
}

fn trim_trailing_blank_rows(rows: &[Vec<String>]) -> &[Vec<String>] {
    let end = rows
        .iter()
        .rposition(|row| !is_blank(row))
        .map_or(0, |i| i + 1);
    &rows[..end]
}

/// Read a range whose first row is the header; remaining rows map as in CSV.
///
/// Row indexes are 1-based within the range, so the first data row is 2.
pub fn read_sheet_rows(
    rows: &[Vec<String>],
    layout: &RecordLayout<'_>,
) -> Result<ReadOutput, InputError> {
    let rows = trim_trailing_blank_rows(rows);
    let Some((header, data)) = rows.split_first() else {
        return Ok(ReadOutput::new());
    };

    let columns = header
        .iter()
        .map(|cell| layout.header(cell))
        .collect::<Result<Vec<_>, _>>()?;
    layout.check_required_columns(&columns)?;

    let output: ReadOutput = data
        .iter()
        .enumerate()
        .map(|(i, row)| -> Result<RawRecord, RecordFailure> {
            let index = i + 2;
            let mut record = RawRecord::new(index);
            for (column, cell) in columns.iter().zip(row.iter()) {
                layout
                    .insert_cell(&mut record, *column, cell)
                    .map_err(|e| RecordFailure::new(index, e).with_key(key_hint(&record, layout)))?;
            }
            Ok(record)
        })
        .collect();

    Ok(output)
}

/// Read a range as a single key column with no header.
///
/// The first cell of each non-empty row is the key.
pub fn read_sheet_keys(
    rows: &[Vec<String>],
    layout: &RecordLayout<'_>,
) -> Result<ReadOutput, InputError> {
    let key = layout.natural_key().ok_or_else(|| InputError::MissingRequiredColumn {
        column: format!("{} key", layout.object),
    })?;

    let output = rows
        .iter()
        .enumerate()
        .filter_map(|(i, row)| {
            let cell = row.first()?.trim();
            if cell.is_empty() {
                return None;
            }
            let mut record = RawRecord::new(i + 1);
            record.insert(key, Value::String(cell.to_string()));
            Some(Ok(record))
        })
        .collect();

    Ok(output)
}
