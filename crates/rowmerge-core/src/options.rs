//! CSV dialect settings shared by the reader and the writer

/// Sentinel written in place of a missing cell by the exporting platform.
pub const DEFAULT_MISSING_MARKER: &str = "-";

/// How a delimited file is read and written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvOptions {
    /// Field delimiter
    pub delimiter: u8,
    /// Literal cell text that denotes a missing value
    pub missing_marker: String,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            missing_marker: DEFAULT_MISSING_MARKER.to_string(),
        }
    }
}

impl CsvOptions {
    /// Use a different field delimiter
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Use a different missing-value sentinel
    #[must_use]
    pub fn with_missing_marker(mut self, marker: impl Into<String>) -> Self {
        self.missing_marker = marker.into();
        self
    }
}
