//! # u-explore
//!
//! Interactive tabular data exploration engine with C FFI bindings.
//!
//! u-explore turns a parsed table into the views an exploration UI needs:
//! a per-column schema, descriptive statistics for numeric columns, a
//! Pearson correlation matrix, and a filtered, sorted, paginated row view.
//! The analysis core is pure; [`cache`] memoizes it and [`session`] ties it
//! to a load/clear lifecycle.
//!
//! ## Modules
//!
//! - [`dataset`]: Row-major table model (Dataset, Row, CellValue)
//! - [`csv_io`]: CSV import/export via the `csv` crate
//! - [`schema`]: Numeric/textual column classification
//! - [`statistics`]: Count, mean, median, min, max, population std dev, quartiles
//! - [`correlation`]: Pairwise Pearson correlation matrix
//! - [`query`]: Search, sort, column visibility, pagination
//! - [`cache`]: Single-slot memoization keyed by dataset identity
//! - [`session`]: Load/clear lifecycle and UI actions
//! - [`ffi`]: C FFI bindings (auto-generated C header via cbindgen)
//! - [`error`]: Error types
//!
//! ## Quick Start
//!
//! ```
//! use u_explore::csv_io::CsvLoader;
//! use u_explore::schema::{infer_schema, ColumnKind};
//! use u_explore::statistics::compute_statistics;
//! use u_explore::query::{query_rows, QueryState, SortKey};
//!
//! let csv = "city,temp\nOslo,4\nRome,18\nLima,\nCairo,25\n";
//! let ds = CsvLoader::new().parse_str(csv).unwrap();
//!
//! let schema = infer_schema(&ds);
//! assert_eq!(schema.kind_of("temp"), Some(ColumnKind::Numeric));
//!
//! let stats = compute_statistics(&ds, &schema.numeric_columns());
//! assert_eq!(stats["temp"].count, 3);
//!
//! let mut state = QueryState::for_dataset(&ds);
//! state.set_sort(Some(SortKey::asc("temp")));
//! let page = query_rows(&ds, &state, state.visible_columns());
//! assert_eq!(page.rows[0].cells()[0].to_string(), "Oslo");
//! ```

pub mod cache;
pub mod correlation;
pub mod csv_io;
pub mod dataset;
pub mod error;
pub mod ffi;
pub mod query;
pub mod schema;
pub mod session;
pub mod statistics;
