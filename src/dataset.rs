//! Row-major tabular dataset with tagged cell values.
//!
//! A [`Dataset`] is an ordered header of unique column names plus rows
//! that carry exactly one [`CellValue`] per column. The engine only ever
//! reads a dataset; every analysis is derived from it without mutation.
//!
//! # Example
//!
//! ```
//! use u_explore::dataset::{CellValue, Dataset};
//!
//! let ds = Dataset::from_records(
//!     vec!["city".into(), "temp".into()],
//!     vec![
//!         vec![CellValue::text("Oslo"), CellValue::number(4.5)],
//!         vec![CellValue::text("Lima"), CellValue::number(19.0)],
//!     ],
//! )
//! .unwrap();
//! assert_eq!(ds.row_count(), 2);
//! assert_eq!(ds.column_index("temp"), Some(1));
//! assert_eq!(ds.numeric_values(1), vec![4.5, 19.0]);
//! ```

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

use serde::{Deserialize, Serialize};

use crate::error::{ExploreError, Result};

// ── CellValue ─────────────────────────────────────────────────────────

/// A single typed cell.
///
/// Upstream parsing decides the tag; a `Text` cell may still hold a
/// numeric spelling (e.g. `" 42 "`) or be blank, and the schema
/// inferencer accounts for both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Numeric value.
    Number(f64),
    /// Textual value, stored verbatim.
    Text(String),
}

impl CellValue {
    /// Creates a numeric cell.
    pub fn number(value: f64) -> Self {
        Self::Number(value)
    }

    /// Creates a text cell.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Builds a cell from a raw field: trimmed, numeric if it parses.
    ///
    /// ```
    /// use u_explore::dataset::CellValue;
    ///
    /// assert_eq!(CellValue::from_raw(" 2.5 "), CellValue::Number(2.5));
    /// assert_eq!(CellValue::from_raw("abc"), CellValue::text("abc"));
    /// assert_eq!(CellValue::from_raw("inf"), CellValue::text("inf"));
    /// ```
    pub fn from_raw(raw: &str) -> Self {
        let trimmed = raw.trim();
        match parse_number(trimmed) {
            Some(v) => Self::Number(v),
            None => Self::Text(trimmed.to_string()),
        }
    }

    /// Returns `true` for a text cell that is empty after trimming.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Number(_) => false,
            Self::Text(s) => s.trim().is_empty(),
        }
    }

    /// Returns the numeric reading of this cell, if any.
    ///
    /// Only finite values count: `Number` cells holding `NaN` or an
    /// infinity yield `None`, the same as their text spellings.
    pub fn numeric_value(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v).filter(|v| v.is_finite()),
            Self::Text(s) => parse_number(s),
        }
    }

    /// Returns the text content, or `None` for numeric cells.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Number(_) => None,
        }
    }

    /// Generic ordering used by the sort stage.
    ///
    /// Numbers compare numerically (`NaN` last), text compares
    /// lexicographically, and a number always orders before text.
    pub fn sort_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a
                .partial_cmp(b)
                .unwrap_or_else(|| a.is_nan().cmp(&b.is_nan())),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Number(_), Self::Text(_)) => Ordering::Less,
            (Self::Text(_), Self::Number(_)) => Ordering::Greater,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(v) => write!(f, "{v}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// Parses a base-10 number, rejecting blanks and non-finite spellings.
pub(crate) fn parse_number(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

// ── Row ───────────────────────────────────────────────────────────────

/// One record, with cells aligned to the dataset header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    cells: Vec<CellValue>,
}

impl Row {
    /// Creates a row from its cells in header order.
    pub fn new(cells: Vec<CellValue>) -> Self {
        Self { cells }
    }

    /// Returns all cells in header order.
    pub fn cells(&self) -> &[CellValue] {
        &self.cells
    }

    /// Returns the cell at column index `idx`.
    pub fn get(&self, idx: usize) -> Option<&CellValue> {
        self.cells.get(idx)
    }

    /// Returns the number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if the row has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

// ── Dataset ───────────────────────────────────────────────────────────

static NEXT_DATASET_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a dataset, used as a memoization key.
///
/// Clones share the id of their source because they carry the same content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DatasetId(u64);

impl DatasetId {
    fn next() -> Self {
        Self(NEXT_DATASET_ID.fetch_add(1, AtomicOrdering::Relaxed))
    }

    /// Returns the raw identifier.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Ordered rows sharing one header.
#[derive(Debug, Clone)]
pub struct Dataset {
    id: DatasetId,
    header: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    /// Creates a dataset, checking header uniqueness and row widths.
    pub fn new(header: Vec<String>, rows: Vec<Row>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(header.len());
        for name in &header {
            if !seen.insert(name.as_str()) {
                return Err(ExploreError::DuplicateColumn { name: name.clone() });
            }
        }

        for (idx, row) in rows.iter().enumerate() {
            if row.len() != header.len() {
                return Err(ExploreError::DimensionMismatch {
                    row: idx,
                    expected: header.len(),
                    actual: row.len(),
                });
            }
        }

        Ok(Self {
            id: DatasetId::next(),
            header,
            rows,
        })
    }

    /// Creates a dataset from raw cell vectors.
    pub fn from_records(header: Vec<String>, records: Vec<Vec<CellValue>>) -> Result<Self> {
        Self::new(header, records.into_iter().map(Row::new).collect())
    }

    /// Returns this dataset's identity.
    #[inline]
    pub fn id(&self) -> DatasetId {
        self.id
    }

    /// Returns the header (column names in order).
    pub fn column_names(&self) -> &[String] {
        &self.header
    }

    /// Returns the index of the column with the given `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|n| n == name)
    }

    /// Returns the number of rows.
    #[inline]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns the number of columns.
    #[inline]
    pub fn column_count(&self) -> usize {
        self.header.len()
    }

    /// Returns `true` if the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns all rows in order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Returns the row at `idx`.
    pub fn row(&self, idx: usize) -> Option<&Row> {
        self.rows.get(idx)
    }

    /// Returns the cell at (`row`, column `name`).
    pub fn value(&self, row: usize, name: &str) -> Option<&CellValue> {
        let col = self.column_index(name)?;
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Iterates the cells of one column in row order.
    pub fn column_cells(&self, col: usize) -> impl Iterator<Item = &CellValue> + '_ {
        self.rows.iter().filter_map(move |r| r.get(col))
    }

    /// Returns the numeric readings of one column in row order, skipping
    /// cells without a numeric value.
    pub fn numeric_values(&self, col: usize) -> Vec<f64> {
        self.column_cells(col)
            .filter_map(CellValue::numeric_value)
            .collect()
    }

    /// Returns the numeric reading of every row for one column, keeping
    /// row alignment (`None` where the cell has no numeric value).
    pub fn aligned_numeric_values(&self, col: usize) -> Vec<Option<f64>> {
        self.rows
            .iter()
            .map(|r| r.get(col).and_then(CellValue::numeric_value))
            .collect()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────
