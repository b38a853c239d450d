//! Identifier list input
//!
//! The batch input is a CSV file with a column of product identifiers
//! (Flipkart FSNs). Order is preserved; duplicates are kept and produce
//! duplicate records downstream.

use crate::error::{Result, ScrapeError};
use std::io::Read;
use std::path::Path;

/// Default name of the identifier column
pub const DEFAULT_ID_COLUMN: &str = "FSN";

/// Read the ordered identifier list from a CSV file
pub fn read_identifiers_from_path(path: impl AsRef<Path>, column: &str) -> Result<Vec<String>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .map_err(|e| ScrapeError::InputList(format!("{}: {}", path.display(), e)))?;
    read_identifiers(file, column)
}

/// Read the ordered identifier list from CSV data
pub fn read_identifiers<R: Read>(reader: R, column: &str) -> Result<Vec<String>> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| ScrapeError::InputList(e.to_string()))?;
    let index = headers
        .iter()
        .position(|header| header.trim() == column)
        .ok_or_else(|| ScrapeError::InputList(format!("No '{}' column in input", column)))?;

    let mut identifiers = Vec::new();
    for row in csv_reader.records() {
        let row = row.map_err(|e| ScrapeError::InputList(e.to_string()))?;
        if let Some(value) = row.get(index) {
            let value = value.trim();
            if !value.is_empty() {
                identifiers.push(value.to_string());
            }
        }
    }

    Ok(identifiers)
}
