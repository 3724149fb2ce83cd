//! Dataset-wide column classification.
//!
//! A column is [`ColumnKind::Numeric`] when every cell is either blank or
//! has a numeric reading; a single non-blank, non-numeric cell makes the
//! whole column [`ColumnKind::Textual`]. The schema is inferred once per
//! dataset and shared by every other component.
//!
//! ```
//! use u_explore::dataset::{CellValue, Dataset};
//! use u_explore::schema::{infer_schema, ColumnKind};
//!
//! let ds = Dataset::from_records(
//!     vec!["id".into(), "name".into()],
//!     vec![
//!         vec![CellValue::number(1.0), CellValue::text("Ada")],
//!         vec![CellValue::text(""), CellValue::text("Grace")],
//!     ],
//! )
//! .unwrap();
//! let schema = infer_schema(&ds);
//! assert_eq!(schema.kind_of("id"), Some(ColumnKind::Numeric));
//! assert_eq!(schema.kind_of("name"), Some(ColumnKind::Textual));
//! assert_eq!(schema.numeric_columns(), vec!["id".to_string()]);
//! ```

use serde::{Deserialize, Serialize};

use crate::dataset::{CellValue, Dataset};

/// Classification of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnKind {
    /// Every non-blank cell reads as a number.
    Numeric,
    /// At least one non-blank cell is not a number.
    Textual,
}

impl std::fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Numeric => write!(f, "Numeric"),
            Self::Textual => write!(f, "Textual"),
        }
    }
}

/// Column classifications in header order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    columns: Vec<(String, ColumnKind)>,
}

impl Schema {
    /// Returns `(name, kind)` pairs in header order.
    pub fn columns(&self) -> &[(String, ColumnKind)] {
        &self.columns
    }

    /// Returns the kind of the named column.
    pub fn kind_of(&self, name: &str) -> Option<ColumnKind> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, kind)| *kind)
    }

    /// Returns the names of numeric columns in header order.
    pub fn numeric_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|(_, kind)| *kind == ColumnKind::Numeric)
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Returns the number of classified columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns `true` if the schema has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Classifies every column of `dataset`.
pub fn infer_schema(dataset: &Dataset) -> Schema {
    let columns = dataset
        .column_names()
        .iter()
        .enumerate()
        .map(|(idx, name)| (name.clone(), classify(dataset.column_cells(idx))))
        .collect();
    Schema { columns }
}

fn classify<'a>(mut cells: impl Iterator<Item = &'a CellValue>) -> ColumnKind {
    let all_numeric = cells.all(|cell| cell.is_blank() || cell.numeric_value().is_some());
    if all_numeric {
        ColumnKind::Numeric
    } else {
        ColumnKind::Textual
    }
}

// ── Tests ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(names: &[&str], rows: Vec<Vec<CellValue>>) -> Dataset {
        Dataset::from_records(names.iter().map(|s| (*s).to_string()).collect(), rows)
            .expect("valid dataset")
    }

    #[test]
    fn numeric_and_text_columns() {
        let ds = dataset(
            &["x", "label"],
            vec![
                vec![1.0.into(), "a".into()],
                vec![2.5.into(), "b".into()],
            ],
        );
        let schema = infer_schema(&ds);
        assert_eq!(
            schema.columns(),
            &[
                ("x".to_string(), ColumnKind::Numeric),
                ("label".to_string(), ColumnKind::Textual)
            ]
        );
    }

    #[test]
    fn numeric_text_spellings_count_as_numeric() {
        let ds = dataset(&["x"], vec![vec![" 42 ".into()], vec!["-1.5e2".into()]]);
        assert_eq!(infer_schema(&ds).kind_of("x"), Some(ColumnKind::Numeric));
    }

    #[test]
    fn blanks_do_not_disqualify() {
        let ds = dataset(
            &["x"],
            vec![vec![1.0.into()], vec!["".into()], vec!["  ".into()]],
        );
        assert_eq!(infer_schema(&ds).kind_of("x"), Some(ColumnKind::Numeric));
    }

    #[test]
    fn single_non_numeric_demotes_whole_column() {
        let ds = dataset(
            &["x"],
            vec![
                vec![1.0.into()],
                vec![2.0.into()],
                vec!["three".into()],
                vec![4.0.into()],
            ],
        );
        assert_eq!(infer_schema(&ds).kind_of("x"), Some(ColumnKind::Textual));
    }

    #[test]
    fn thousands_separator_is_text() {
        let ds = dataset(&["x"], vec![vec!["1,000".into()]]);
        assert_eq!(infer_schema(&ds).kind_of("x"), Some(ColumnKind::Textual));
    }

    #[test]
    fn infinite_number_cell_is_textual() {
        let ds = dataset(&["x"], vec![vec![1.0.into()], vec![f64::INFINITY.into()]]);
        assert_eq!(infer_schema(&ds).kind_of("x"), Some(ColumnKind::Textual));
    }

    #[test]
    fn all_blank_column_is_numeric() {
        let ds = dataset(&["x"], vec![vec!["".into()], vec!["".into()]]);
        assert_eq!(infer_schema(&ds).kind_of("x"), Some(ColumnKind::Numeric));
    }

    #[test]
    fn numeric_columns_keep_header_order() {
        let ds = dataset(
            &["b", "name", "a"],
            vec![vec![1.0.into(), "n".into(), 2.0.into()]],
        );
        let schema = infer_schema(&ds);
        assert_eq!(schema.numeric_columns(), vec!["b", "a"]);
        assert_eq!(schema.len(), 3);
        assert_eq!(schema.kind_of("zzz"), None);
    }
}
