//! Core table types for flattened, row-per-entity exports
//!
//! Every transforming operation here borrows or consumes a table and returns a
//! new one, so a caller holding a snapshot can always fall back to it.

/// An ordered set of named columns with row-major cell storage
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Column definitions, in display order
    pub columns: Vec<Column>,
    /// Row data; each row has exactly one cell per column
    pub rows: Vec<Row>,
}

impl Table {
    /// Build a table from column names and rows, assigning column indices
    pub fn from_parts<S: Into<String>>(names: impl IntoIterator<Item = S>, rows: Vec<Row>) -> Self {
        let columns = names
            .into_iter()
            .enumerate()
            .map(|(i, name)| Column::new(name.into(), i))
            .collect();
        Self { columns, rows }
    }

    /// Get the number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get the number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Find a column by name
    pub fn find_column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Position of a column by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.find_column(name).map(|c| c.index)
    }

    /// Column names in order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Cell at `row` in the named column
    pub fn cell(&self, row: usize, column: &str) -> Option<&CellValue> {
        let index = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(index))
    }

    /// Remove rows in which every cell is missing
    pub fn drop_empty_rows(self) -> Table {
        let rows = self.rows.into_iter().filter(|r| !r.is_empty()).collect();
        Table {
            columns: self.columns,
            rows,
        }
    }

    /// Remove columns in which every cell is missing.
    ///
    /// With no rows every column is vacuously empty, so all of them go.
    pub fn drop_empty_columns(self) -> Table {
        let keep: Vec<usize> = (0..self.column_count())
            .filter(|&i| self.rows.iter().any(|r| r.get(i).is_some_and(|c| !c.is_missing())))
            .collect();
        if keep.len() == self.column_count() {
            return self;
        }
        self.project(&keep)
    }

    /// Split rows into those with a value in `column` and all the others.
    ///
    /// Both halves keep the full column set. If the column does not exist,
    /// every row lands in the second half.
    pub fn partition(&self, column: &str) -> (Table, Table) {
        let index = self.column_index(column);
        let (present, absent): (Vec<Row>, Vec<Row>) = self.rows.iter().cloned().partition(|row| {
            index
                .and_then(|i| row.get(i))
                .is_some_and(|c| !c.is_missing())
        });
        (
            Table {
                columns: self.columns.clone(),
                rows: present,
            },
            Table {
                columns: self.columns.clone(),
                rows: absent,
            },
        )
    }

    /// Reorder columns to exactly `names`, inserting all-missing columns for
    /// any name the table lacks and discarding columns not named.
    pub fn conform_to<S: AsRef<str>>(&self, names: &[S]) -> Table {
        let sources: Vec<Option<usize>> = names
            .iter()
            .map(|n| self.column_index(n.as_ref()))
            .collect();

        let rows = self
            .rows
            .iter()
            .map(|row| {
                let cells = sources
                    .iter()
                    .map(|src| {
                        src.and_then(|i| row.get(i))
                            .cloned()
                            .unwrap_or(CellValue::Missing)
                    })
                    .collect();
                Row::new(cells)
            })
            .collect();

        Table::from_parts(names.iter().map(|n| n.as_ref().to_string()), rows)
    }

    /// Keep only the columns at `indices`, in that order
    fn project(&self, indices: &[usize]) -> Table {
        let names = indices.iter().map(|&i| self.columns[i].name.clone());
        let rows = self
            .rows
            .iter()
            .map(|row| {
                Row::new(
                    indices
                        .iter()
                        .map(|&i| row.get(i).cloned().unwrap_or(CellValue::Missing))
                        .collect(),
                )
            })
            .collect();
        Table::from_parts(names, rows)
    }
}

/// A column definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Column name, a dotted path such as `cycle.site.@id`
    pub name: String,
    /// Column index (0-based)
    pub index: usize,
}

impl Column {
    /// Create a new column
    pub fn new(name: String, index: usize) -> Self {
        Self { name, index }
    }
}

/// A row of data
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Cell values for each column
    pub cells: Vec<CellValue>,
}

impl Row {
    /// Create a new row
    pub fn new(cells: Vec<CellValue>) -> Self {
        Self { cells }
    }

    /// A row of `width` missing cells
    pub fn missing(width: usize) -> Self {
        Self::new(vec![CellValue::Missing; width])
    }

    /// Get a cell value by column index
    pub fn get(&self, index: usize) -> Option<&CellValue> {
        self.cells.get(index)
    }

    /// True when every cell is missing
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(CellValue::is_missing)
    }
}

/// A cell value with type detection.
///
/// Numeric variants are only produced for text that renders back to exactly
/// the same characters, so every present cell round-trips byte for byte.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Integer value
    Integer(i64),
    /// Floating-point value
    Float(f64),
    /// String value, kept verbatim
    String(String),
    /// No data
    Missing,
}

impl CellValue {
    /// Parse a raw field; only empty text and `missing_marker` are missing
    pub fn parse(s: &str, missing_marker: &str) -> Self {
        if s.is_empty() || s == missing_marker {
            return CellValue::Missing;
        }

        // Out-of-range integers, leading zeros and `+` signs stay text
        if let Ok(i) = s.parse::<i64>() {
            if i.to_string() == s {
                return CellValue::Integer(i);
            }
        }

        // "nan" and "inf" parse as floats but are labels here
        if let Ok(f) = s.parse::<f64>() {
            if f.is_finite() && f.to_string() == s {
                return CellValue::Float(f);
            }
        }

        CellValue::String(s.to_string())
    }

    /// Check if the cell is missing
    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }

    /// Text used to match this value against another column's values.
    ///
    /// This is the cell's original text, so `7` and `7.0` are different keys.
    pub fn join_key(&self) -> Option<String> {
        match self {
            CellValue::Missing => None,
            other => Some(other.to_string_value()),
        }
    }

    /// The cell's text as read; empty for missing cells
    pub fn to_string_value(&self) -> String {
        match self {
            CellValue::Integer(i) => i.to_string(),
            CellValue::Float(f) => f.to_string(),
            CellValue::String(s) => s.clone(),
            CellValue::Missing => String::new(),
        }
    }
}
