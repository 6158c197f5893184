//! Sales data reader.
//!
//! This module turns a delimited file with a header row into raw
//! [`Row`] mappings keyed by column name.

use crate::error::ReadError;
use crate::models::Row;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Options for parsing the input file.
#[derive(Debug, Clone)]
pub struct ReadOptions {
    /// Field delimiter byte.
    pub delimiter: u8,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl From<&crate::config::InputConfig> for ReadOptions {
    fn from(config: &crate::config::InputConfig) -> Self {
        Self {
            delimiter: config.delimiter as u8,
        }
    }
}

/// Read all rows from a delimited stream.
///
/// Records shorter than the header simply lack the trailing fields.
pub fn read_rows<R: Read>(reader: R, options: &ReadOptions) -> Result<Vec<Row>, ReadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(str::to_string)
        .collect();
    debug!("Available columns: {:?}", headers);

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let row: Row = headers
            .iter()
            .zip(record.iter())
            .map(|(name, value)| (name.clone(), value.to_string()))
            .collect();
        rows.push(row);
    }

    Ok(rows)
}

/// Read all rows from a file.
///
/// A file without any data rows is an error.
pub fn read_rows_from_path(path: &Path, options: &ReadOptions) -> Result<Vec<Row>, ReadError> {
    let file = File::open(path).map_err(|source| ReadError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let rows = read_rows(file, options)?;
    if rows.is_empty() {
        return Err(ReadError::Empty {
            path: path.to_path_buf(),
        });
    }

    debug!("Read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}
