//! Join engine that merges related entity rows onto one row per root record
//!
//! The input holds one entity per row. For every discovered mapping the rows
//! carrying the index column are split off and outer-joined back onto the
//! rows that reference them. A join is only applied when the two sides share
//! no populated column, so no value is ever overwritten.

use crate::error::Result;
use crate::mapping::{discover_mappings, Mapping};
use crate::observer::{MergeEvent, MergeObserver};
use crate::options::CsvOptions;
use crate::parser::parse_csv;
use crate::table::{CellValue, Row, Table};
use crate::writer::write_csv;
use std::collections::HashMap;
use std::path::Path;

/// Outcome of attempting a single mapping against the working table
#[derive(Debug)]
enum JoinAttempt {
    /// No row has a value in the index column
    NothingToJoin,
    /// Both sides populate these columns
    Conflict(Vec<String>),
    Joined(Table),
}

/// Merge related rows of a flattened export.
///
/// Fully empty rows are removed first. The result always has the input's
/// columns in the input's order, including columns left entirely missing.
pub fn merge_rows(input: Table, observer: &mut dyn MergeObserver) -> Table {
    let original: Vec<String> = input.columns.iter().map(|c| c.name.clone()).collect();

    let table = input.drop_empty_rows();
    if table.rows.is_empty() {
        return table;
    }

    let mappings = discover_mappings(&original);
    if mappings.is_empty() {
        observer.on_event(&MergeEvent::NoMappings);
        return table;
    }

    do_joins(table, &mappings, observer).conform_to(&original)
}

/// Apply each mapping in order, each one seeing the result of the last.
///
/// Columns that become entirely missing are dropped along the way; see
/// [`merge_rows`] for restoring the original layout.
pub fn do_joins(table: Table, mappings: &[Mapping], observer: &mut dyn MergeObserver) -> Table {
    let mut working = table;
    for mapping in mappings {
        match try_join(&working, mapping) {
            JoinAttempt::NothingToJoin => {}
            JoinAttempt::Conflict(overlap) => {
                observer.on_event(&MergeEvent::skipped(mapping, overlap));
            }
            JoinAttempt::Joined(joined) => {
                observer.on_event(&MergeEvent::joined(mapping, joined.row_count()));
                working = joined;
            }
        }
    }
    working
}

/// Read a CSV export, merge its rows and write the result
pub fn transform_csv<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    options: &CsvOptions,
    observer: &mut dyn MergeObserver,
) -> Result<Table> {
    let table = parse_csv(input, options)?;
    let merged = merge_rows(table, observer);
    write_csv(&merged, output, options)?;
    Ok(merged)
}

/// Work out one join from a snapshot; the snapshot itself is never modified
fn try_join(working: &Table, mapping: &Mapping) -> JoinAttempt {
    let (joinable, remainder) = working.partition(&mapping.index_column);
    if joinable.rows.is_empty() {
        return JoinAttempt::NothingToJoin;
    }

    let joinable = joinable.drop_empty_columns();
    let remainder = remainder.drop_empty_columns();

    let overlap: Vec<String> = remainder
        .columns
        .iter()
        .filter(|c| joinable.find_column(&c.name).is_some())
        .map(|c| c.name.clone())
        .collect();
    if !overlap.is_empty() {
        return JoinAttempt::Conflict(overlap);
    }

    JoinAttempt::Joined(outer_join(
        &remainder,
        &joinable,
        &mapping.ref_column,
        &mapping.index_column,
    ))
}

/// Full outer join of `left.left_on = right.right_on`.
///
/// Left rows come first in their original order, each repeated once per
/// matching right row; unmatched right rows follow. Missing keys never match.
fn outer_join(left: &Table, right: &Table, left_on: &str, right_on: &str) -> Table {
    let mut by_key: HashMap<String, Vec<usize>> = HashMap::new();
    if let Some(index) = right.column_index(right_on) {
        for (i, row) in right.rows.iter().enumerate() {
            if let Some(key) = row.get(index).and_then(CellValue::join_key) {
                by_key.entry(key).or_default().push(i);
            }
        }
    }

    let left_key = left.column_index(left_on);
    let left_blank = Row::missing(left.column_count());
    let right_blank = Row::missing(right.column_count());
    let mut matched = vec![false; right.row_count()];
    let mut rows = Vec::with_capacity(left.row_count() + right.row_count());

    for row in &left.rows {
        let hits = left_key
            .and_then(|i| row.get(i))
            .and_then(CellValue::join_key)
            .and_then(|key| by_key.get(&key));

        match hits {
            Some(hits) => {
                for &r in hits {
                    matched[r] = true;
                    rows.push(concat(row, &right.rows[r]));
                }
            }
            None => rows.push(concat(row, &right_blank)),
        }
    }

    for (r, row) in right.rows.iter().enumerate() {
        if !matched[r] {
            rows.push(concat(&left_blank, row));
        }
    }

    let names = left.columns.iter().chain(&right.columns).map(|c| c.name.clone());
    Table::from_parts(names, rows)
}

fn concat(left: &Row, right: &Row) -> Row {
    Row::new(left.cells.iter().chain(&right.cells).cloned().collect())
}
