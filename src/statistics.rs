//! Descriptive statistics for numeric columns.
//!
//! Order statistics use a *truncating index* into the ascending-sorted
//! values: `median = sorted[n / 2]`, `q1 = sorted[floor(n * 0.25)]`,
//! `q3 = sorted[floor(n * 0.75)]`. For even `n` this selects the upper
//! median rather than averaging the two middle values. The standard
//! deviation is the population form (divides by `n`).
//!
//! # Example
//!
//! ```
//! use u_explore::statistics::compute_column_statistics;
//!
//! let stats = compute_column_statistics(&[1.0, 3.0, 5.0]);
//! assert_eq!(stats.count, 3);
//! assert_eq!(stats.mean, 3.0);
//! assert_eq!(stats.median, 3.0);
//! assert!((stats.std_dev - (8.0_f64 / 3.0).sqrt()).abs() < 1e-12);
//! assert_eq!(stats.formatted().std_dev, "1.63");
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;

/// Summary statistics for one numeric column, at full precision.
///
/// All fields are `NaN` when `count == 0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnStatistics {
    /// Number of values with a numeric reading.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Upper median, `sorted[n / 2]`.
    pub median: f64,
    /// Smallest value.
    pub min: f64,
    /// Largest value.
    pub max: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    /// `sorted[floor(n * 0.25)]`.
    pub q1: f64,
    /// `sorted[floor(n * 0.75)]`.
    pub q3: f64,
}

/// Display strings for a [`ColumnStatistics`], two decimals each.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedStatistics {
    pub count: String,
    pub mean: String,
    pub median: String,
    pub min: String,
    pub max: String,
    pub std_dev: String,
    pub q1: String,
    pub q3: String,
}

impl ColumnStatistics {
    fn degenerate() -> Self {
        Self {
            count: 0,
            mean: f64::NAN,
            median: f64::NAN,
            min: f64::NAN,
            max: f64::NAN,
            std_dev: f64::NAN,
            q1: f64::NAN,
            q3: f64::NAN,
        }
    }

    /// Returns `true` if no values were collected.
    pub fn is_degenerate(&self) -> bool {
        self.count == 0
    }

    /// Renders every field for display. `NaN` renders as an empty string.
    pub fn formatted(&self) -> FormattedStatistics {
        FormattedStatistics {
            count: self.count.to_string(),
            mean: format_fixed(self.mean),
            median: format_fixed(self.median),
            min: format_fixed(self.min),
            max: format_fixed(self.max),
            std_dev: format_fixed(self.std_dev),
            q1: format_fixed(self.q1),
            q3: format_fixed(self.q3),
        }
    }
}

/// Formats a value with two decimals; `NaN` becomes an empty string.
pub fn format_fixed(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else {
        format!("{value:.2}")
    }
}

/// Computes statistics over `values`, taken in row order.
///
/// The input slice is left untouched; order statistics come from a
/// sorted copy.
pub fn compute_column_statistics(values: &[f64]) -> ColumnStatistics {
    let count = values.len();
    if count == 0 {
        return ColumnStatistics::degenerate();
    }

    let mean = u_numflow::stats::mean(values).unwrap_or(f64::NAN);
    let std_dev = u_numflow::stats::population_std_dev(values).unwrap_or(f64::NAN);

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    ColumnStatistics {
        count,
        mean,
        median: sorted[count / 2],
        min: sorted[0],
        max: sorted[count - 1],
        std_dev,
        q1: sorted[truncating_index(count, 0.25)],
        q3: sorted[truncating_index(count, 0.75)],
    }
}

fn truncating_index(count: usize, fraction: f64) -> usize {
    let idx = (count as f64 * fraction).floor() as usize;
    idx.min(count - 1)
}

/// Computes one [`ColumnStatistics`] per named numeric column.
///
/// The result keeps the order of `numeric_columns`. Names that are not in
/// the dataset header are skipped.
pub fn compute_statistics(
    dataset: &Dataset,
    numeric_columns: &[String],
) -> IndexMap<String, ColumnStatistics> {
    let mut result = IndexMap::with_capacity(numeric_columns.len());
    for name in numeric_columns {
        let Some(idx) = dataset.column_index(name) else {
            tracing::debug!(column = %name, "skipping statistics for unknown column");
            continue;
        };
        let values = dataset.numeric_values(idx);
        result.insert(name.clone(), compute_column_statistics(&values));
    }
    tracing::debug!(
        columns = result.len(),
        rows = dataset.row_count(),
        "computed column statistics"
    );
    result
}

// ── Tests ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::CellValue;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn three_value_fixture() {
        let s = compute_column_statistics(&[1.0, 3.0, 5.0]);
        assert_eq!(s.count, 3);
        assert_close(s.mean, 3.0);
        assert_eq!(s.median, 3.0);
        assert_eq!(s.min, 1.0);
        assert_eq!(s.max, 5.0);
        assert_close(s.std_dev, (8.0_f64 / 3.0).sqrt());
        // floor(0.75) = 0, floor(2.25) = 2
        assert_eq!(s.q1, 1.0);
        assert_eq!(s.q3, 5.0);
    }

    #[test]
    fn even_count_uses_upper_median() {
        let s = compute_column_statistics(&[4.0, 1.0, 3.0, 2.0]);
        assert_eq!(s.median, 3.0);
        assert_eq!(s.q1, 2.0);
        assert_eq!(s.q3, 4.0);
        assert_close(s.mean, 2.5);
    }

    #[test]
    fn truncating_quartiles_on_ten_values() {
        let values: Vec<f64> = (1..=10).map(f64::from).rev().collect();
        let s = compute_column_statistics(&values);
        // n = 10: q1 index 2, median index 5, q3 index 7
        assert_eq!(s.q1, 3.0);
        assert_eq!(s.median, 6.0);
        assert_eq!(s.q3, 8.0);
        assert!(s.min <= s.q1 && s.q1 <= s.median && s.median <= s.q3 && s.q3 <= s.max);
    }

    #[test]
    fn population_not_sample_std_dev() {
        let s = compute_column_statistics(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_close(s.std_dev, 2.0);
    }

    #[test]
    fn constant_column_has_zero_std_dev() {
        let s = compute_column_statistics(&[7.0, 7.0, 7.0]);
        assert_eq!(s.std_dev, 0.0);
        assert_eq!(s.min, s.max);
    }

    #[test]
    fn constant_inexact_decimals_have_zero_std_dev() {
        let s = compute_column_statistics(&[0.1, 0.1, 0.1]);
        assert_eq!(s.std_dev, 0.0);
        assert_eq!(s.formatted().std_dev, "0.00");
        assert_close(s.mean, 0.1);
    }

    #[test]
    fn single_value() {
        let s = compute_column_statistics(&[42.0]);
        assert_eq!(s.count, 1);
        assert_eq!(s.median, 42.0);
        assert_eq!(s.q1, 42.0);
        assert_eq!(s.q3, 42.0);
        assert_eq!(s.std_dev, 0.0);
    }

    #[test]
    fn empty_values_are_degenerate() {
        let s = compute_column_statistics(&[]);
        assert!(s.is_degenerate());
        assert!(s.mean.is_nan());
        assert!(s.median.is_nan());
        assert!(s.std_dev.is_nan());
        let f = s.formatted();
        assert_eq!(f.count, "0");
        assert_eq!(f.mean, "");
    }

    #[test]
    fn input_order_is_untouched() {
        let values = vec![5.0, 1.0, 3.0];
        let _ = compute_column_statistics(&values);
        assert_eq!(values, vec![5.0, 1.0, 3.0]);
    }

    #[test]
    fn formatting_two_decimals() {
        assert_eq!(format_fixed(1.0), "1.00");
        assert_eq!(format_fixed(2.0 / 3.0), "0.67");
        assert_eq!(format_fixed(-2.5), "-2.50");
        assert_eq!(format_fixed(f64::NAN), "");
    }

    // ── Dataset-level ────────────────────────────────────────────

    #[test]
    fn statistics_per_numeric_column() {
        let ds = Dataset::from_records(
            vec!["x".into(), "y".into(), "name".into()],
            vec![
                vec![1.0.into(), 2.0.into(), "a".into()],
                vec![3.0.into(), 4.0.into(), "b".into()],
                vec![5.0.into(), 6.0.into(), "c".into()],
            ],
        )
        .unwrap();
        let stats = compute_statistics(&ds, &["y".to_string(), "x".to_string()]);
        let names: Vec<&String> = stats.keys().collect();
        assert_eq!(names, vec!["y", "x"]);
        assert_eq!(stats["x"].formatted().mean, "3.00");
        assert_eq!(stats["x"].formatted().median, "3.00");
        assert_eq!(stats["y"].formatted().mean, "4.00");
    }

    #[test]
    fn blanks_are_excluded_from_count() {
        let ds = Dataset::from_records(
            vec!["x".into()],
            vec![
                vec![CellValue::number(2.0)],
                vec![CellValue::text("")],
                vec![CellValue::text("4")],
            ],
        )
        .unwrap();
        let stats = compute_statistics(&ds, &["x".to_string()]);
        assert_eq!(stats["x"].count, 2);
        assert_close(stats["x"].mean, 3.0);
    }

    #[test]
    fn unknown_columns_are_skipped() {
        let ds = Dataset::from_records(vec!["x".into()], vec![vec![1.0.into()]]).unwrap();
        let stats = compute_statistics(&ds, &["nope".to_string()]);
        assert!(stats.is_empty());
    }

    #[test]
    fn serializes_nan_as_null() {
        let json = serde_json::to_value(compute_column_statistics(&[])).unwrap();
        assert!(json["mean"].is_null());
        assert_eq!(json["count"], 0);
    }
}
