//! Pairwise Pearson correlation over numeric columns.
//!
//! Every ordered pair (including a column with itself) is computed from
//! row-aligned values using **pairwise-complete observations**: only rows
//! where both cells have a numeric reading take part. A pair with zero
//! variance on either side (a constant column, or fewer than two distinct
//! observations) yields `NaN` rather than a misleading `0` or `1`.
//!
//! ```
//! use u_explore::dataset::Dataset;
//! use u_explore::correlation::compute_correlations;
//!
//! let ds = Dataset::from_records(
//!     vec!["x".into(), "y".into()],
//!     vec![
//!         vec![1.0.into(), 2.0.into()],
//!         vec![3.0.into(), 4.0.into()],
//!         vec![5.0.into(), 6.0.into()],
//!     ],
//! )
//! .unwrap();
//! let corr = compute_correlations(&ds, &["x".into(), "y".into()]);
//! assert!((corr.get("x", "y").unwrap() - 1.0).abs() < 1e-12);
//! assert_eq!(corr.get("x", "y"), corr.get("y", "x"));
//! ```

use serde::Serialize;

use crate::dataset::Dataset;

/// Default `|r|` threshold for [`CorrelationMatrix::strong_pairs`].
pub const DEFAULT_STRONG_THRESHOLD: f64 = 0.7;

/// Square, symmetric correlation matrix indexed by column name.
#[derive(Debug, Clone, Serialize)]
pub struct CorrelationMatrix {
    names: Vec<String>,
    /// Row-major n×n coefficients.
    values: Vec<f64>,
    /// Row-major n×n count of complete observations per pair.
    observations: Vec<usize>,
}

/// A pair of distinct columns with its coefficient.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationPair {
    /// First column name.
    pub col_a: String,
    /// Second column name.
    pub col_b: String,
    /// Correlation coefficient.
    pub r: f64,
    /// Rows used for this pair.
    pub observations: usize,
}

impl CorrelationMatrix {
    /// Returns the column names labelling both axes.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Returns the matrix dimension.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` when no numeric columns were correlated.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Returns the coefficient at (`i`, `j`).
    ///
    /// # Panics
    /// Panics if either index is out of range.
    pub fn get_index(&self, i: usize, j: usize) -> f64 {
        let n = self.len();
        assert!(i < n && j < n, "index ({i}, {j}) out of range for {n}×{n}");
        self.values[i * n + j]
    }

    /// Returns the coefficient for the named pair.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.index_of(a)?;
        let j = self.index_of(b)?;
        Some(self.get_index(i, j))
    }

    /// Returns one matrix row.
    pub fn row(&self, i: usize) -> &[f64] {
        let n = self.len();
        &self.values[i * n..(i + 1) * n]
    }

    /// Returns the number of complete observations behind (`i`, `j`).
    pub fn observations(&self, i: usize, j: usize) -> usize {
        self.observations[i * self.len() + j]
    }

    /// Shading intensity for a cell: `|r|`, or `None` when undefined.
    pub fn intensity(&self, a: &str, b: &str) -> Option<f64> {
        self.get(a, b).filter(|r| !r.is_nan()).map(f64::abs)
    }

    /// Distinct pairs with `|r| > threshold`, strongest first.
    pub fn strong_pairs(&self, threshold: f64) -> Vec<CorrelationPair> {
        let n = self.len();
        let mut pairs = Vec::new();
        for i in 0..n {
            for j in (i + 1)..n {
                let r = self.get_index(i, j);
                if !r.is_nan() && r.abs() > threshold {
                    pairs.push(CorrelationPair {
                        col_a: self.names[i].clone(),
                        col_b: self.names[j].clone(),
                        r,
                        observations: self.observations(i, j),
                    });
                }
            }
        }
        pairs.sort_by(|a, b| b.r.abs().total_cmp(&a.r.abs()));
        pairs
    }
}

/// Renders a coefficient with two decimals; `NaN` renders as blank.
pub fn format_cell(r: f64) -> String {
    crate::statistics::format_fixed(r)
}

/// Pearson coefficient over rows where both sides are present.
///
/// Returns `(r, observations)`. `r` is `NaN` when either side is constant
/// over the complete rows.
pub fn pairwise_pearson(a: &[Option<f64>], b: &[Option<f64>]) -> (f64, usize) {
    let (xs, ys): (Vec<f64>, Vec<f64>) = a
        .iter()
        .zip(b.iter())
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .unzip();

    let n = xs.len();
    if n == 0 {
        return (f64::NAN, 0);
    }
    // Rounding in the mean leaves tiny residuals for constant decimals,
    // so constancy is decided on the values themselves.
    if is_constant(&xs) || is_constant(&ys) {
        return (f64::NAN, n);
    }

    (pearson(&xs, &ys).unwrap_or(f64::NAN), n)
}

fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] == w[1])
}

/// Population covariance over the product of population standard deviations.
fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    let mean_x = u_numflow::stats::mean(xs)?;
    let mean_y = u_numflow::stats::mean(ys)?;
    let sd_x = u_numflow::stats::population_std_dev(xs)?;
    let sd_y = u_numflow::stats::population_std_dev(ys)?;

    let products: Vec<f64> = xs
        .iter()
        .zip(ys)
        .map(|(x, y)| (x - mean_x) * (y - mean_y))
        .collect();
    let covariance = u_numflow::stats::kahan_sum(&products) / xs.len() as f64;

    let r = covariance / (sd_x * sd_y);
    r.is_finite().then(|| r.clamp(-1.0, 1.0))
}

/// Computes the full correlation matrix for the named numeric columns.
///
/// Axis order follows `numeric_columns`; names missing from the dataset
/// are skipped. Each unordered pair is computed once and mirrored, so the
/// result is exactly symmetric.
pub fn compute_correlations(dataset: &Dataset, numeric_columns: &[String]) -> CorrelationMatrix {
    let mut names = Vec::with_capacity(numeric_columns.len());
    let mut aligned = Vec::with_capacity(numeric_columns.len());
    for name in numeric_columns {
        match dataset.column_index(name) {
            Some(idx) => {
                names.push(name.clone());
                aligned.push(dataset.aligned_numeric_values(idx));
            }
            None => tracing::debug!(column = %name, "skipping correlation for unknown column"),
        }
    }

    let n = names.len();
    let mut values = vec![f64::NAN; n * n];
    let mut observations = vec![0usize; n * n];
    for i in 0..n {
        for j in i..n {
            let (r, obs) = pairwise_pearson(&aligned[i], &aligned[j]);
            values[i * n + j] = r;
            values[j * n + i] = r;
            observations[i * n + j] = obs;
            observations[j * n + i] = obs;
        }
    }

    tracing::debug!(
        columns = n,
        rows = dataset.row_count(),
        "computed correlation matrix"
    );

    CorrelationMatrix {
        names,
        values,
        observations,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────
