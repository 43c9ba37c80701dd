//! CSV reader.

use std::io::Read;

use super::{RawRecord, ReadOutput, RecordLayout, key_hint};
use crate::error::{InputError, RecordError, RecordFailure, Stage};

/// Header row occupies line 1, so the first data row is line 2.
const FIRST_DATA_ROW: usize = 2;

/// Read a CSV stream whose first row is the header.
///
/// Header cells are canonicalized case-insensitively; an unknown header or a
/// missing required column fails the whole batch before any record is read.
pub fn read_csv(
    reader: impl Read,
    target: &str,
    layout: &RecordLayout<'_>,
) -> Result<ReadOutput, InputError> {
    let mut rdr = ::csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(::csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers().map_err(|e| InputError::Parse {
        stage: Stage::Parse,
        target: target.to_string(),
        message: e.to_string(),
    })?;
    if headers.is_empty() {
        return Ok(ReadOutput::new());
    }
    let columns = headers
        .iter()
        .map(|cell| layout.header(cell))
        .collect::<Result<Vec<_>, _>>()?;
    layout.check_required_columns(&columns)?;

    let mut output = ReadOutput::new();
    let mut next_index = FIRST_DATA_ROW;
    for row in rdr.records() {
        // Blank lines are skipped and quoted cells may span lines, so the
        // index is the line the record starts on.
        let position = match &row {
            Ok(row) => row.position(),
            Err(e) => e.position(),
        };
        let index = position
            .and_then(|p| usize::try_from(p.line()).ok())
            .unwrap_or(next_index);
        next_index = index + 1;
        output.push(read_row(row, index, &columns, layout));
    }

    Ok(output)
}

fn read_row(
    row: Result<::csv::StringRecord, ::csv::Error>,
    index: usize,
    columns: &[&'static str],
    layout: &RecordLayout<'_>,
) -> Result<RawRecord, RecordFailure> {
    let row = row.map_err(|e| RecordFailure::new(index, RecordError::Malformed(e.to_string())))?;
    let mut record = RawRecord::new(index);
    for (column, cell) in columns.iter().zip(row.iter()) {
        layout
            .insert_cell(&mut record, *column, cell)
            .map_err(|e| RecordFailure::new(index, e).with_key(key_hint(&record, layout)))?;
    }
    Ok(record)
}
