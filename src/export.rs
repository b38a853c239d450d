//! Tabular export
//!
//! Records carry heterogeneous shapes (error rows, full rows, variable image
//! counts), so the export writes the union of all field names seen across
//! the batch, one column each, in first-seen order. Rows leave columns they
//! do not have empty.

use crate::error::{Result, ScrapeError};
use crate::record::ProductRecord;
use indexmap::IndexSet;
use std::io::Write;
use std::path::Path;

/// Write `records` as CSV to `path`
pub fn export_to_path(records: &[ProductRecord], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = std::fs::File::create(path)
        .map_err(|e| ScrapeError::Export(format!("{}: {}", path.display(), e)))?;
    write_records(records, file)
}

/// Write `records` as CSV to `writer`
pub fn write_records<W: Write>(records: &[ProductRecord], writer: W) -> Result<()> {
    let rows: Vec<_> = records.iter().map(ProductRecord::to_fields).collect();
    if rows.is_empty() {
        return Ok(());
    }

    let mut columns: IndexSet<&String> = IndexSet::new();
    for row in &rows {
        for column in row.keys() {
            columns.insert(column);
        }
    }

    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record(columns.iter().map(|column| column.as_str()))
        .map_err(|e| ScrapeError::Export(e.to_string()))?;

    for row in &rows {
        csv_writer
            .write_record(
                columns
                    .iter()
                    .map(|column| row.get(*column).map(String::as_str).unwrap_or("")),
            )
            .map_err(|e| ScrapeError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| ScrapeError::Export(e.to_string()))?;

    Ok(())
}
