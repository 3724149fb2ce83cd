//! CSV import and export around the analysis engine.
//!
//! Import turns delimited text into a [`Dataset`]: the first record is the
//! header, each data record must carry exactly one field per header column
//! and at least one non-blank field, otherwise it is skipped. Fields are
//! trimmed and become [`CellValue::Number`] when they read as a finite
//! number, [`CellValue::Text`] otherwise.
//!
//! # Example
//!
//! ```
//! use u_explore::csv_io::CsvLoader;
//! use u_explore::dataset::CellValue;
//!
//! let csv = "name,score\nAda, 9.5\nshort\nBob,7\n";
//! let ds = CsvLoader::new().parse_str(csv).unwrap();
//! assert_eq!(ds.row_count(), 2); // "short" has the wrong field count
//! assert_eq!(ds.value(0, "score"), Some(&CellValue::Number(9.5)));
//! ```

use std::path::Path;

use csv::{ReaderBuilder, Terminator, WriterBuilder};

use crate::dataset::{CellValue, Dataset, Row};
use crate::error::{ExploreError, Result};

/// CSV import/export settings.
#[derive(Debug, Clone)]
pub struct CsvLoader {
    delimiter: u8,
}

impl CsvLoader {
    /// Creates a loader with a comma delimiter.
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    /// Sets the field delimiter (default: comma).
    pub fn delimiter(mut self, delim: u8) -> Self {
        self.delimiter = delim;
        self
    }

    /// Parses CSV text into a dataset.
    pub fn parse_str(&self, input: &str) -> Result<Dataset> {
        let input = input.strip_prefix('\u{feff}').unwrap_or(input);

        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .flexible(true)
            .from_reader(input.as_bytes());
        let mut records = reader.records();

        let header: Vec<String> = match records.next() {
            Some(record) => record?.iter().map(|f| f.trim().to_string()).collect(),
            None => return Err(ExploreError::EmptyInput),
        };
        if header.iter().all(|h| h.is_empty()) {
            return Err(ExploreError::EmptyInput);
        }

        let mut rows = Vec::new();
        let mut skipped = 0usize;
        for record in records {
            let record = record?;
            let well_formed = record.len() == header.len();
            let has_content = record.iter().any(|f| !f.trim().is_empty());
            if !(well_formed && has_content) {
                skipped += 1;
                tracing::debug!(
                    line = record.position().map_or(0, |p| p.line()),
                    fields = record.len(),
                    expected = header.len(),
                    "skipping CSV record"
                );
                continue;
            }
            rows.push(Row::new(record.iter().map(CellValue::from_raw).collect()));
        }

        if rows.is_empty() {
            return Err(ExploreError::NoRows { skipped });
        }

        tracing::debug!(
            rows = rows.len(),
            columns = header.len(),
            skipped,
            "parsed CSV dataset"
        );
        Dataset::new(header, rows)
    }

    /// Reads and parses a CSV file from disk.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<Dataset> {
        let content = std::fs::read_to_string(path)?;
        self.parse_str(&content)
    }

    /// Writes `dataset` back out as CSV: header, then one line per row.
    ///
    /// ```
    /// use u_explore::csv_io::CsvLoader;
    ///
    /// let loader = CsvLoader::new();
    /// let ds = loader.parse_str("a,b\n1,x\n2.5,y\n").unwrap();
    /// assert_eq!(loader.export_str(&ds).unwrap(), "a,b\n1,x\n2.5,y\n");
    /// ```
    pub fn export_str(&self, dataset: &Dataset) -> Result<String> {
        let mut writer = WriterBuilder::new()
            .delimiter(self.delimiter)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(Vec::new());
        writer.write_record(dataset.column_names())?;
        for row in dataset.rows() {
            writer.write_record(row.cells().iter().map(|c| c.to_string()))?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| ExploreError::Io(e.error().to_string()))?;
        String::from_utf8(bytes).map_err(|e| ExploreError::Io(e.to_string()))
    }
}

impl Default for CsvLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Download name for an exported dataset: `processed_<stem>.csv`.
///
/// ```
/// use u_explore::csv_io::export_file_name;
///
/// assert_eq!(export_file_name("sales.csv"), "processed_sales.csv");
/// assert_eq!(export_file_name(""), "processed_data.csv");
/// ```
pub fn export_file_name(source: &str) -> String {
    let stem = source.strip_suffix(".csv").unwrap_or(source);
    let stem = if stem.is_empty() { "data" } else { stem };
    format!("processed_{stem}.csv")
}

// ── Tests ─────────────────────────────────────────────────────────────
