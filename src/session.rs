//! Load/clear lifecycle for one interactive exploration session.
//!
//! [`Explorer`] owns the loaded dataset, its inferred schema, the current
//! [`QueryState`], and the memo caches. Loading a dataset infers the schema
//! once and starts from a default query state; clearing discards all of it.
//!
//! ```
//! use u_explore::session::Explorer;
//!
//! let mut explorer = Explorer::new();
//! explorer.load_csv("people.csv", "name,age\nAda,36\nAlan,41\nGrace,85\n").unwrap();
//!
//! let stats = explorer.statistics().unwrap();
//! assert_eq!(stats["age"].formatted().median, "41.00");
//!
//! explorer.set_search_term("a").unwrap();
//! explorer.toggle_sort("age").unwrap();
//! let page = explorer.page().unwrap();
//! assert_eq!(page.total_filtered_count, 3);
//! ```

use indexmap::IndexMap;

use crate::cache::AnalysisCache;
use crate::correlation::CorrelationMatrix;
use crate::csv_io::{export_file_name, CsvLoader};
use crate::dataset::Dataset;
use crate::error::{ExploreError, Result};
use crate::query::{paginate, total_pages, QueryPage, QueryState};
use crate::schema::{infer_schema, Schema};
use crate::statistics::ColumnStatistics;

#[derive(Debug)]
struct Loaded {
    source_name: String,
    dataset: Dataset,
    schema: Schema,
    numeric_columns: Vec<String>,
    query: QueryState,
}

/// An exploration session: at most one dataset at a time.
#[derive(Debug, Default)]
pub struct Explorer {
    loaded: Option<Loaded>,
    cache: AnalysisCache,
    loader: CsvLoader,
}

impl Explorer {
    /// Creates an empty session with default CSV settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty session using `loader` for import and export.
    pub fn with_loader(loader: CsvLoader) -> Self {
        Self {
            loaded: None,
            cache: AnalysisCache::new(),
            loader,
        }
    }

    /// Replaces the current dataset. The schema is inferred here, once, and
    /// the query state starts from its defaults.
    pub fn load(&mut self, source_name: impl Into<String>, dataset: Dataset) {
        let schema = infer_schema(&dataset);
        let numeric_columns = schema.numeric_columns();
        let query = QueryState::for_dataset(&dataset);
        tracing::debug!(
            rows = dataset.row_count(),
            columns = dataset.column_count(),
            numeric = numeric_columns.len(),
            "loaded dataset"
        );
        self.cache.clear();
        self.loaded = Some(Loaded {
            source_name: source_name.into(),
            dataset,
            schema,
            numeric_columns,
            query,
        });
    }

    /// Parses `csv` and loads it. On error the previous dataset is kept.
    pub fn load_csv(&mut self, source_name: impl Into<String>, csv: &str) -> Result<()> {
        let dataset = self.loader.parse_str(csv)?;
        self.load(source_name, dataset);
        Ok(())
    }

    /// Discards the dataset, its schema, and the query state.
    pub fn clear(&mut self) {
        self.loaded = None;
        self.cache.clear();
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    fn loaded(&self) -> Result<&Loaded> {
        self.loaded.as_ref().ok_or(ExploreError::NoDataset)
    }

    pub fn dataset(&self) -> Result<&Dataset> {
        self.loaded().map(|l| &l.dataset)
    }

    pub fn schema(&self) -> Result<&Schema> {
        self.loaded().map(|l| &l.schema)
    }

    pub fn query_state(&self) -> Result<&QueryState> {
        self.loaded().map(|l| &l.query)
    }

    /// Statistics for every numeric column, memoized per dataset.
    pub fn statistics(&mut self) -> Result<&IndexMap<String, ColumnStatistics>> {
        let loaded = self.loaded.as_ref().ok_or(ExploreError::NoDataset)?;
        Ok(self.cache.statistics(&loaded.dataset, &loaded.numeric_columns))
    }

    /// Correlation matrix over numeric columns, memoized per dataset.
    pub fn correlations(&mut self) -> Result<&CorrelationMatrix> {
        let loaded = self.loaded.as_ref().ok_or(ExploreError::NoDataset)?;
        Ok(self.cache.correlations(&loaded.dataset, &loaded.numeric_columns))
    }

    /// The current page under the current query state.
    pub fn page(&mut self) -> Result<QueryPage<'_>> {
        let loaded = self.loaded.as_ref().ok_or(ExploreError::NoDataset)?;
        let ordered = self.cache.ordered_rows(&loaded.dataset, &loaded.query);
        Ok(paginate(&loaded.dataset, ordered, loaded.query.page_number()))
    }

    fn with_query<F>(&mut self, action: F) -> Result<()>
    where
        F: FnOnce(&mut QueryState, usize),
    {
        let loaded = self.loaded.as_mut().ok_or(ExploreError::NoDataset)?;
        let pages = total_pages(self.cache.ordered_rows(&loaded.dataset, &loaded.query).len());
        action(&mut loaded.query, pages);
        Ok(())
    }

    pub fn set_search_term(&mut self, term: &str) -> Result<()> {
        self.with_query(|q, _| {
            q.set_search_term(term);
        })
    }

    pub fn toggle_sort(&mut self, column: &str) -> Result<()> {
        self.require_column(column)?;
        self.with_query(|q, _| q.toggle_sort(column))
    }

    pub fn toggle_column(&mut self, column: &str) -> Result<()> {
        self.require_column(column)?;
        self.with_query(|q, _| q.toggle_column(column))
    }

    pub fn toggle_all_columns(&mut self) -> Result<()> {
        let header = self.dataset()?.column_names().to_vec();
        self.with_query(|q, _| q.toggle_all_columns(&header))
    }

    pub fn next_page(&mut self) -> Result<()> {
        self.with_query(|q, pages| q.next_page(pages))
    }

    pub fn previous_page(&mut self) -> Result<()> {
        self.with_query(|q, _| q.previous_page())
    }

    pub fn go_to_page(&mut self, page: usize) -> Result<()> {
        self.with_query(|q, pages| q.go_to_page(page, pages))
    }

    fn require_column(&self, column: &str) -> Result<()> {
        match self.dataset()?.column_index(column) {
            Some(_) => Ok(()),
            None => Err(ExploreError::ColumnNotFound {
                name: column.to_string(),
            }),
        }
    }

    /// Exports the loaded dataset as `(file name, CSV text)`.
    pub fn export_csv(&self) -> Result<(String, String)> {
        let loaded = self.loaded()?;
        let content = self.loader.export_str(&loaded.dataset)?;
        Ok((export_file_name(&loaded.source_name), content))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────
