//! Error types for u-explore.
//!
//! The analysis core (schema inference, statistics, correlation, query)
//! never fails: degenerate input yields `NaN` or an empty page. Errors only
//! arise where data enters or leaves the engine.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ExploreError>;

/// All errors produced by u-explore operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExploreError {
    /// CSV input had no header row.
    #[error("CSV input is empty")]
    EmptyInput,

    /// CSV input had a header but no acceptable data rows.
    #[error("no valid data rows found ({skipped} rows skipped)")]
    NoRows { skipped: usize },

    /// The underlying CSV reader or writer failed.
    #[error("CSV error at line {line}: {message}")]
    Csv { line: u64, message: String },

    /// A row does not carry one cell per header column.
    #[error("row {row}: expected {expected} cells, got {actual}")]
    DimensionMismatch {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// The header names the same column twice.
    #[error("duplicate column name '{name}'")]
    DuplicateColumn { name: String },

    /// Column not found in the dataset header.
    #[error("column '{name}' not found")]
    ColumnNotFound { name: String },

    /// An operation required a loaded dataset.
    #[error("no dataset loaded")]
    NoDataset,

    /// I/O error during file reading.
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for ExploreError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl From<csv::Error> for ExploreError {
    fn from(e: csv::Error) -> Self {
        let line = e.position().map_or(0, |p| p.line());
        Self::Csv {
            line,
            message: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let e = ExploreError::DimensionMismatch {
            row: 4,
            expected: 3,
            actual: 2,
        };
        assert_eq!(e.to_string(), "row 4: expected 3 cells, got 2");
        assert_eq!(
            ExploreError::NoRows { skipped: 2 }.to_string(),
            "no valid data rows found (2 rows skipped)"
        );
        assert_eq!(ExploreError::NoDataset.to_string(), "no dataset loaded");
    }

    #[test]
    fn io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.csv");
        let e: ExploreError = io.into();
        assert!(matches!(e, ExploreError::Io(ref m) if m.contains("missing.csv")));
    }
}
