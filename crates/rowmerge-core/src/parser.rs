//! CSV reader for flattened exports

use crate::error::{Error, Result};
use crate::options::CsvOptions;
use crate::table::{CellValue, Row, Table};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

/// Parse a CSV file into a Table
pub fn parse_csv<P: AsRef<Path>>(path: P, options: &CsvOptions) -> Result<Table> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_csv_reader(BufReader::new(file), path, options)
}

/// Parse CSV from a string (useful for testing)
pub fn parse_csv_str(content: &str, options: &CsvOptions) -> Result<Table> {
    parse_csv_reader(content.as_bytes(), Path::new("<string>"), options)
}

/// Parse CSV from any reader; `source` only labels errors and warnings
pub fn parse_csv_reader<R: Read>(reader: R, source: &Path, options: &CsvOptions) -> Result<Table> {
    let path: PathBuf = source.to_path_buf();
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(options.delimiter)
        .flexible(true) // Allow varying number of fields
        .from_reader(reader);

    let headers = csv_reader.headers().map_err(|e| Error::Csv {
        path: path.clone(),
        source: e,
    })?;

    let names: Vec<String> = headers.iter().map(str::to_string).collect();

    if names.is_empty() {
        return Err(Error::CsvParse {
            path,
            message: "no columns found in CSV".to_string(),
        });
    }

    let mut seen: HashSet<&str> = HashSet::new();
    for name in &names {
        if !seen.insert(name.as_str()) {
            return Err(Error::DuplicateColumn {
                name: name.clone(),
                path,
            });
        }
    }

    let width = names.len();
    let mut rows = Vec::new();
    for (row_idx, result) in csv_reader.records().enumerate() {
        let record = result.map_err(|e| Error::Csv {
            path: path.clone(),
            source: e,
        })?;

        let mut cells: Vec<CellValue> = record
            .iter()
            .map(|field| CellValue::parse(field, &options.missing_marker))
            .collect();

        if cells.len() > width {
            return Err(Error::CsvParse {
                path,
                message: format!(
                    "row {} has {} fields but the header has {}",
                    row_idx + 1,
                    cells.len(),
                    width
                ),
            });
        }
        if cells.len() < width {
            tracing::debug!(row = row_idx + 1, path = %path.display(), "padding short row");
            cells.resize(width, CellValue::Missing);
        }

        rows.push(Row::new(cells));
    }

    Ok(Table::from_parts(names, rows))
}
