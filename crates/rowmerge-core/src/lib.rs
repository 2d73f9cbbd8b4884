//! rowmerge-core: Core library for merging related rows of flattened CSV exports
//!
//! This library provides functionality to:
//! - Parse delimited exports whose columns are dotted entity paths
//! - Discover index/referencing column pairs from the header alone
//! - Outer-join related entity rows onto one row per root record,
//!   skipping any join that would overwrite data
//! - Write the merged table back out with the original column layout

pub mod error;
pub mod mapping;
pub mod merger;
pub mod observer;
pub mod options;
pub mod parser;
pub mod table;
pub mod writer;

pub use error::{Error, Result};
pub use mapping::{discover_mappings, is_index_column, Mapping};
pub use merger::{do_joins, merge_rows, transform_csv};
pub use observer::{MergeEvent, MergeObserver, TracingObserver};
pub use options::CsvOptions;
pub use parser::{parse_csv, parse_csv_reader, parse_csv_str};
pub use table::{CellValue, Column, Row, Table};
pub use writer::{write_csv, write_csv_string, write_csv_writer};
