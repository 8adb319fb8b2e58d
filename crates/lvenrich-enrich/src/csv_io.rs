use lvenrich_model::{Record, Table};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CsvError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{}: line {line} has {found} fields but the header has {expected}", .path.display())]
    TooManyFields {
        path: PathBuf,
        line: u64,
        found: usize,
        expected: usize,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Read a CSV file with a header row into memory.
///
/// Rows shorter than the header are kept; their missing fields read as empty.
/// Rows longer than the header are rejected.
pub fn read_table(path: &Path) -> Result<Table, CsvError> {
    let read_err = |source: csv::Error| CsvError::Read {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(read_err)?;

    let fields: Vec<String> = reader
        .headers()
        .map_err(read_err)?
        .iter()
        .map(str::to_string)
        .collect();
    let mut table = Table::new(fields);

    for result in reader.records() {
        let row = result.map_err(read_err)?;

        if row.len() > table.fields.len() {
            return Err(CsvError::TooManyFields {
                path: path.to_path_buf(),
                line: row.position().map(|p| p.line()).unwrap_or_default(),
                found: row.len(),
                expected: table.fields.len(),
            });
        }

        let record: Record = table
            .fields
            .iter()
            .zip(row.iter())
            .map(|(field, value)| (field.as_str(), value))
            .collect();
        table.records.push(record);
    }

    tracing::debug!(
        path = %path.display(),
        fields = table.fields.len(),
        rows = table.records.len(),
        "Read CSV"
    );

    Ok(table)
}

/// Write `table` as CSV, replacing any existing file.
pub fn write_table(table: &Table, path: &Path) -> Result<(), CsvError> {
    let write_err = |source: csv::Error| CsvError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| write_err(e.into()))?;
    }

    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_path(path)
        .map_err(write_err)?;

    writer.write_record(&table.fields).map_err(write_err)?;
    for record in &table.records {
        writer
            .write_record(table.row_values(record))
            .map_err(write_err)?;
    }
    writer.flush().map_err(|e| write_err(e.into()))?;

    tracing::debug!(path = %path.display(), rows = table.records.len(), "Wrote CSV");

    Ok(())
}
