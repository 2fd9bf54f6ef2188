// Loading application records from the tracker's CSV export

use crate::error::{FlowError, Result};
use crate::model::{ApplicationRecord, REQUIRED_COLUMNS};
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;
use tracing::debug;

/// Read every record from the CSV file at `path`.
///
/// A missing file is reported as [`FlowError::InputNotFound`]; every other
/// failure (unreadable file, missing columns, malformed rows) propagates as is.
pub fn read_records(path: &Path) -> Result<Vec<ApplicationRecord>> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => FlowError::InputNotFound(path.to_path_buf()),
        _ => FlowError::Io(e),
    })?;

    let records = read_records_from_reader(file)?;
    debug!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Read records from any CSV source with a header row
pub fn read_records_from_reader<R: Read>(reader: R) -> Result<Vec<ApplicationRecord>> {
    // Exports drop trailing empty cells, so short rows are read as missing values
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    // Spreadsheet exports often lead with a byte order mark
    let headers: StringRecord = reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}'))
        .collect();

    check_columns(&headers)?;
    reader.set_headers(headers);

    let mut records = Vec::new();
    for row in reader.deserialize::<ApplicationRecord>() {
        records.push(row?.normalized());
    }

    Ok(records)
}

fn check_columns(headers: &StringRecord) -> Result<()> {
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(FlowError::MissingColumn(column.to_string()));
        }
    }
    Ok(())
}
