//! CSV writer for merged tables

use crate::error::{Error, Result};
use crate::options::CsvOptions;
use crate::table::{CellValue, Table};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Write a table to a CSV file.
///
/// The document is rendered in memory first, so the file is only created
/// once serialization has succeeded.
pub fn write_csv<P: AsRef<Path>>(table: &Table, path: P, options: &CsvOptions) -> Result<()> {
    let path = path.as_ref();
    let mut buffer = Vec::new();
    write_csv_writer(table, &mut buffer, options)?;

    fs::write(path, buffer).map_err(|e| Error::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Render a table as a CSV string
pub fn write_csv_string(table: &Table, options: &CsvOptions) -> Result<String> {
    let mut buffer = Vec::new();
    write_csv_writer(table, &mut buffer, options)?;
    // csv only ever emits the UTF-8 text it was given
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Write a table as CSV to any writer
pub fn write_csv_writer<W: Write>(table: &Table, writer: W, options: &CsvOptions) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(options.delimiter)
        .from_writer(writer);

    let to_csv_err = |e: csv::Error| Error::Csv {
        path: "<output>".into(),
        source: e,
    };

    csv_writer
        .write_record(table.columns.iter().map(|c| c.name.as_str()))
        .map_err(to_csv_err)?;

    for row in &table.rows {
        let fields = row.cells.iter().map(|cell| match cell {
            CellValue::Missing => options.missing_marker.clone(),
            other => other.to_string_value(),
        });
        csv_writer.write_record(fields).map_err(to_csv_err)?;
    }

    csv_writer.flush()?;
    Ok(())
}
