//! Explicit memoization around the pure analysis functions.
//!
//! Statistics and correlation are recomputed only when the dataset
//! identity (or the numeric column list) changes; the filtered/sorted row
//! order only when the dataset, search term, sort key, or visible columns
//! change. Page navigation never touches the caches. A cached result is
//! always identical to calling the underlying function directly.

use indexmap::IndexMap;

use crate::correlation::{compute_correlations, CorrelationMatrix};
use crate::dataset::{Dataset, DatasetId};
use crate::query::{filter_and_sort, QueryState, SortKey};
use crate::statistics::{compute_statistics, ColumnStatistics};

/// Single-slot memo: keeps the value for the most recent key.
#[derive(Debug, Clone)]
pub struct Memo<K, V> {
    slot: Option<(K, V)>,
}

impl<K: PartialEq, V> Memo<K, V> {
    pub fn new() -> Self {
        Self { slot: None }
    }

    /// Returns `true` if the stored value belongs to `key`.
    pub fn is_cached(&self, key: &K) -> bool {
        matches!(&self.slot, Some((k, _)) if k == key)
    }

    /// Returns the value for `key`, running `compute` only on a miss.
    pub fn get_or_compute(&mut self, key: K, compute: impl FnOnce() -> V) -> &V {
        let entry = match self.slot.take() {
            Some((k, v)) if k == key => {
                tracing::trace!("memo hit");
                (k, v)
            }
            _ => (key, compute()),
        };
        &self.slot.insert(entry).1
    }

    /// Drops the stored value.
    pub fn invalidate(&mut self) {
        self.slot = None;
    }
}

impl<K: PartialEq, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Inputs that determine the filter and sort stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryKey {
    pub search_term: String,
    pub sort: Option<SortKey>,
    pub visible_columns: Vec<String>,
}

impl QueryKey {
    /// Extracts the key from a state; the page number is not part of it.
    pub fn from_state(state: &QueryState) -> Self {
        Self {
            search_term: state.search_term().to_string(),
            sort: state.sort().cloned(),
            visible_columns: state.visible_columns().to_vec(),
        }
    }
}

type ColumnsKey = (DatasetId, Vec<String>);

/// Memoized statistics, correlation, and row order for one session.
#[derive(Debug, Default)]
pub struct AnalysisCache {
    statistics: Memo<ColumnsKey, IndexMap<String, ColumnStatistics>>,
    correlations: Memo<ColumnsKey, CorrelationMatrix>,
    ordered_rows: Memo<(DatasetId, QueryKey), Vec<usize>>,
}

impl AnalysisCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Memoized [`compute_statistics`].
    pub fn statistics(
        &mut self,
        dataset: &Dataset,
        numeric_columns: &[String],
    ) -> &IndexMap<String, ColumnStatistics> {
        self.statistics
            .get_or_compute((dataset.id(), numeric_columns.to_vec()), || {
                compute_statistics(dataset, numeric_columns)
            })
    }

    /// Memoized [`compute_correlations`].
    pub fn correlations(
        &mut self,
        dataset: &Dataset,
        numeric_columns: &[String],
    ) -> &CorrelationMatrix {
        self.correlations
            .get_or_compute((dataset.id(), numeric_columns.to_vec()), || {
                compute_correlations(dataset, numeric_columns)
            })
    }

    /// Memoized [`filter_and_sort`] for the state's search, sort, and
    /// visible columns.
    pub fn ordered_rows(&mut self, dataset: &Dataset, state: &QueryState) -> &[usize] {
        let key = QueryKey::from_state(state);
        self.ordered_rows.get_or_compute((dataset.id(), key), || {
            filter_and_sort(
                dataset,
                state.search_term(),
                state.sort(),
                state.visible_columns(),
            )
        })
    }

    /// Drops every cached value.
    pub fn clear(&mut self) {
        self.statistics.invalidate();
        self.correlations.invalidate();
        self.ordered_rows.invalidate();
    }
}

// ── Tests ─────────────────────────────────────────────────────────────
