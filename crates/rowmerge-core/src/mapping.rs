//! Discovery of join relationships from column names alone
//!
//! An *index column* such as `site.id` or `site.@id` names the identifier of
//! one entity type. A *referencing column* ends with an index column's full
//! name, e.g. `cycle.site.id`. Each index column is claimed by the first
//! referencing column found in header order; many-to-many links cannot be
//! merged onto single rows, so later candidates are ignored.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// `<label>.id` or `<label>.@id` with exactly one dot.
static INDEX_COLUMN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\w+\.@?id$").expect("Invalid index column regex"));

/// A discovered (referencing column, index column) pair
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Mapping {
    /// Column holding the foreign identifier, e.g. `cycle.site.@id`
    pub ref_column: String,
    /// Column holding the primary identifier, e.g. `site.@id`
    pub index_column: String,
}

impl Mapping {
    /// Create a new mapping
    pub fn new(ref_column: impl Into<String>, index_column: impl Into<String>) -> Self {
        Self {
            ref_column: ref_column.into(),
            index_column: index_column.into(),
        }
    }

    /// Entity type named by the index column (`site` for `site.@id`)
    pub fn entity(&self) -> &str {
        self.index_column
            .split_once('.')
            .map_or(self.index_column.as_str(), |(entity, _)| entity)
    }
}

/// Whether a column name denotes an entity's primary identifier
pub fn is_index_column(name: &str) -> bool {
    INDEX_COLUMN_REGEX.is_match(name.trim())
}

/// Everything after the second-to-last `.`, provided something precedes it
fn reference_suffix(name: &str) -> Option<&str> {
    let last = name.rfind('.')?;
    let offset = name[..last].rfind('.')?;
    (offset > 0).then(|| &name[offset + 1..])
}

/// Propose joins for a header, in the order referencing columns appear.
///
/// Never fails; a header without the expected structure yields no mappings.
pub fn discover_mappings<S: AsRef<str>>(columns: &[S]) -> Vec<Mapping> {
    let mut unclaimed: HashSet<&str> = columns
        .iter()
        .map(AsRef::as_ref)
        .filter(|name| is_index_column(name))
        .collect();

    let mut mappings = Vec::new();
    for column in columns.iter().map(AsRef::as_ref) {
        let Some(suffix) = reference_suffix(column) else {
            continue;
        };
        if unclaimed.remove(suffix) {
            mappings.push(Mapping::new(column, suffix));
        }
    }
    mappings
}
