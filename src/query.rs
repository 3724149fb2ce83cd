//! Search → sort → paginate pipeline over dataset rows.
//!
//! The pipeline is a pure function of the dataset and an explicit
//! [`QueryState`]. The state itself is owned by the caller and changed only
//! through its action methods, which carry the one transition rule: a new
//! search term or a change to the visible-column set sends the view back to
//! page 1, while sort changes keep the current page.
//!
//! # Example
//!
//! ```
//! use u_explore::dataset::{CellValue, Dataset};
//! use u_explore::query::{query_rows, QueryState};
//!
//! let records = (1..=25)
//!     .map(|i| vec![CellValue::number(i as f64), CellValue::text(format!("item {i}"))])
//!     .collect();
//! let ds = Dataset::from_records(vec!["id".into(), "name".into()], records).unwrap();
//!
//! let mut state = QueryState::for_dataset(&ds);
//! let page = query_rows(&ds, &state, state.visible_columns());
//! assert_eq!(page.total_pages, 3);
//! assert_eq!(page.rows.len(), 10);
//!
//! state.go_to_page(99, page.total_pages);
//! assert_eq!(state.page_number(), 3);
//!
//! state.set_search_term("item 2");
//! assert_eq!(state.page_number(), 1);
//! let page = query_rows(&ds, &state, state.visible_columns());
//! assert_eq!(page.total_filtered_count, 7); // 2, 20..=25
//! ```

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::dataset::{CellValue, Dataset, Row};

/// Rows per page.
pub const PAGE_SIZE: usize = 10;

// ── State ─────────────────────────────────────────────────────────────

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending.
    #[default]
    Asc,
    /// Descending: the ascending comparator, reversed.
    Desc,
}

impl SortDirection {
    /// Applies this direction to an ascending ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

/// Column and direction to sort by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub column: String,
    pub direction: SortDirection,
}

impl SortKey {
    /// Ascending sort on `column`.
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: SortDirection::Asc,
        }
    }

    /// Descending sort on `column`.
    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// Interactive view state, owned and mutated by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryState {
    search_term: String,
    sort: Option<SortKey>,
    visible_columns: Vec<String>,
    page_number: usize,
}

impl QueryState {
    /// Default state: no search, no sort, the given columns visible, page 1.
    pub fn new(visible_columns: Vec<String>) -> Self {
        Self {
            search_term: String::new(),
            sort: None,
            visible_columns,
            page_number: 1,
        }
    }

    /// Default state with every column of `dataset` visible.
    pub fn for_dataset(dataset: &Dataset) -> Self {
        Self::new(dataset.column_names().to_vec())
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn sort(&self) -> Option<&SortKey> {
        self.sort.as_ref()
    }

    pub fn visible_columns(&self) -> &[String] {
        &self.visible_columns
    }

    /// Current 1-based page number.
    pub fn page_number(&self) -> usize {
        self.page_number
    }

    /// Rows per page (fixed).
    pub fn page_size(&self) -> usize {
        PAGE_SIZE
    }

    pub fn is_visible(&self, column: &str) -> bool {
        self.visible_columns.iter().any(|c| c == column)
    }

    /// Sets the search term. A changed term resets the page to 1.
    ///
    /// Returns `true` if the term changed.
    pub fn set_search_term(&mut self, term: impl Into<String>) -> bool {
        let term = term.into();
        if term == self.search_term {
            return false;
        }
        self.search_term = term;
        self.page_number = 1;
        true
    }

    /// Header-click sort: ascending on a new column, flips `Asc` → `Desc`
    /// on the current one, and `Desc` → `Asc` again after that.
    pub fn toggle_sort(&mut self, column: &str) {
        let direction = match &self.sort {
            Some(current) if current.column == column && current.direction == SortDirection::Asc => {
                SortDirection::Desc
            }
            _ => SortDirection::Asc,
        };
        self.sort = Some(SortKey {
            column: column.to_string(),
            direction,
        });
    }

    /// Replaces the sort key. Does not reset the page.
    pub fn set_sort(&mut self, sort: Option<SortKey>) {
        self.sort = sort;
    }

    /// Shows or hides one column and resets the page to 1.
    pub fn toggle_column(&mut self, column: &str) {
        if let Some(pos) = self.visible_columns.iter().position(|c| c == column) {
            self.visible_columns.remove(pos);
        } else {
            self.visible_columns.push(column.to_string());
        }
        self.page_number = 1;
    }

    /// Hides every column when all of `header` is visible, otherwise shows
    /// all of them. Resets the page to 1.
    pub fn toggle_all_columns(&mut self, header: &[String]) {
        let all_visible = header.iter().all(|c| self.is_visible(c));
        if all_visible {
            self.visible_columns.clear();
        } else {
            self.visible_columns = header.to_vec();
        }
        self.page_number = 1;
    }

    /// Replaces the visible-column set. A different set resets the page.
    pub fn set_visible_columns(&mut self, columns: Vec<String>) {
        if columns != self.visible_columns {
            self.visible_columns = columns;
            self.page_number = 1;
        }
    }

    /// Moves to `page`, clamped to `[1, total_pages]`.
    pub fn go_to_page(&mut self, page: usize, total_pages: usize) {
        self.page_number = clamp_page(page, total_pages);
    }

    /// Advances one page, stopping at the last.
    pub fn next_page(&mut self, total_pages: usize) {
        self.go_to_page(self.page_number.saturating_add(1), total_pages);
    }

    /// Goes back one page, stopping at page 1.
    pub fn previous_page(&mut self) {
        self.page_number = self.page_number.saturating_sub(1).max(1);
    }
}

// ── Pipeline ──────────────────────────────────────────────────────────

/// Number of pages for `filtered_count` rows; never less than 1.
pub fn total_pages(filtered_count: usize) -> usize {
    filtered_count.div_ceil(PAGE_SIZE).max(1)
}

/// Clamps a requested page into `[1, total_pages]`.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

fn column_indices(dataset: &Dataset, columns: &[String]) -> Vec<usize> {
    columns
        .iter()
        .filter_map(|c| dataset.column_index(c))
        .collect()
}

/// Filter and sort stages. Returns matching row indices in display order.
///
/// A row matches when the case-folded display text of any visible cell
/// contains the case-folded `search_term`; an empty term matches every row.
/// Sorting is stable, so rows with equal keys keep their filtered order.
pub fn filter_and_sort(
    dataset: &Dataset,
    search_term: &str,
    sort: Option<&SortKey>,
    visible_columns: &[String],
) -> Vec<usize> {
    let mut indices: Vec<usize> = if search_term.is_empty() {
        (0..dataset.row_count()).collect()
    } else {
        let needle = search_term.to_lowercase();
        let searched = column_indices(dataset, visible_columns);
        dataset
            .rows()
            .iter()
            .enumerate()
            .filter(|(_, row)| row_matches(row, &searched, &needle))
            .map(|(idx, _)| idx)
            .collect()
    };

    if let Some(key) = sort {
        match dataset.column_index(&key.column) {
            Some(col) => {
                let rows = dataset.rows();
                indices.sort_by(|&a, &b| {
                    key.direction
                        .apply(compare_cells(rows[a].get(col), rows[b].get(col)))
                });
            }
            None => tracing::debug!(column = %key.column, "sort key not in header, keeping order"),
        }
    }

    indices
}

fn row_matches(row: &Row, columns: &[usize], needle: &str) -> bool {
    columns.iter().any(|&col| {
        row.get(col)
            .is_some_and(|cell| cell.to_string().to_lowercase().contains(needle))
    })
}

fn compare_cells(a: Option<&CellValue>, b: Option<&CellValue>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.sort_cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// One page of query output plus pagination metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPage<'a> {
    /// Rows on this page, in display order.
    pub rows: Vec<&'a Row>,
    /// Dataset indices of `rows`.
    pub row_indices: Vec<usize>,
    /// Rows surviving the filter.
    pub total_filtered_count: usize,
    /// `max(1, ceil(total_filtered_count / PAGE_SIZE))`.
    pub total_pages: usize,
    /// Effective page after clamping.
    pub page_number: usize,
}

impl QueryPage<'_> {
    /// 1-based inclusive range of displayed rows within the filtered set,
    /// or `(0, 0)` when nothing matched.
    pub fn showing_range(&self) -> (usize, usize) {
        if self.rows.is_empty() {
            return (0, 0);
        }
        let from = (self.page_number - 1) * PAGE_SIZE + 1;
        (from, from + self.rows.len() - 1)
    }

    pub fn is_first_page(&self) -> bool {
        self.page_number == 1
    }

    pub fn is_last_page(&self) -> bool {
        self.page_number == self.total_pages
    }
}

/// Paginate stage over already filtered and sorted indices.
pub fn paginate<'a>(dataset: &'a Dataset, ordered: &[usize], page_number: usize) -> QueryPage<'a> {
    let total_filtered_count = ordered.len();
    let total_pages = total_pages(total_filtered_count);
    let page_number = clamp_page(page_number, total_pages);

    let start = ((page_number - 1) * PAGE_SIZE).min(total_filtered_count);
    let end = (start + PAGE_SIZE).min(total_filtered_count);
    let row_indices = ordered[start..end].to_vec();
    let rows = row_indices
        .iter()
        .filter_map(|&idx| dataset.row(idx))
        .collect();

    QueryPage {
        rows,
        row_indices,
        total_filtered_count,
        total_pages,
        page_number,
    }
}

/// Runs filter → sort → paginate for the current state.
pub fn query_rows<'a>(
    dataset: &'a Dataset,
    state: &QueryState,
    visible_columns: &[String],
) -> QueryPage<'a> {
    let ordered = filter_and_sort(dataset, state.search_term(), state.sort(), visible_columns);
    paginate(dataset, &ordered, state.page_number())
}

/// Projects `row` onto the visible columns, in header order.
pub fn visible_cells<'a>(dataset: &Dataset, row: &'a Row, visible_columns: &[String]) -> Vec<&'a CellValue> {
    dataset
        .column_names()
        .iter()
        .enumerate()
        .filter(|(_, name)| visible_columns.contains(name))
        .filter_map(|(idx, _)| row.get(idx))
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    fn numbered(n: usize) -> Dataset {
        let records = (1..=n)
            .map(|i| {
                vec![
                    CellValue::number(i as f64),
                    CellValue::text(format!("Row {i}")),
                    CellValue::text(if i % 2 == 0 { "even" } else { "odd" }),
                ]
            })
            .collect();
        Dataset::from_records(names(&["id", "name", "parity"]), records).unwrap()
    }

    fn people() -> Dataset {
        Dataset::from_records(
            names(&["name", "city", "age"]),
            vec![
                vec!["Alice".into(), "Paris".into(), 31.0.into()],
                vec!["bob".into(), "Berlin".into(), 25.0.into()],
                vec!["Carol".into(), "paris".into(), 25.0.into()],
                vec!["Dave".into(), "Rome".into(), 40.0.into()],
            ],
        )
        .unwrap()
    }

    fn ids(ds: &Dataset, ordered: &[usize]) -> Vec<String> {
        ordered
            .iter()
            .map(|&i| ds.rows()[i].get(0).unwrap().to_string())
            .collect()
    }

    // ── Filter ───────────────────────────────────────────────────

    #[test]
    fn empty_search_matches_all() {
        let ds = people();
        let all = filter_and_sort(&ds, "", None, &names(&["name"]));
        assert_eq!(all, vec![0, 1, 2, 3]);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let ds = people();
        let hits = filter_and_sort(&ds, "PAR", None, &names(&["name", "city", "age"]));
        assert_eq!(hits, vec![0, 2]);
    }

    #[test]
    fn search_uses_number_display_text() {
        let ds = people();
        let hits = filter_and_sort(&ds, "25", None, &names(&["age"]));
        assert_eq!(hits, vec![1, 2]);
    }

    #[test]
    fn hidden_columns_are_not_searched() {
        let ds = people();
        let hits = filter_and_sort(&ds, "paris", None, &names(&["name", "age"]));
        assert!(hits.is_empty());
    }

    #[test]
    fn no_visible_columns_with_term_matches_nothing() {
        let ds = people();
        assert!(filter_and_sort(&ds, "a", None, &[]).is_empty());
        assert_eq!(filter_and_sort(&ds, "", None, &[]).len(), 4);
    }

    #[test]
    fn narrowing_search_never_grows_result() {
        let ds = numbered(120);
        let visible = names(&["id", "name", "parity"]);
        let terms = ["", "r", "ro", "row", "row 1", "row 11", "row 111"];
        let counts: Vec<usize> = terms
            .iter()
            .map(|t| filter_and_sort(&ds, t, None, &visible).len())
            .collect();
        for pair in counts.windows(2) {
            assert!(pair[1] <= pair[0], "counts not monotonic: {counts:?}");
        }
        assert_eq!(counts[0], 120);
        assert_eq!(*counts.last().unwrap(), 1);
    }

    // ── Sort ─────────────────────────────────────────────────────

    #[test]
    fn sort_numeric_ascending_and_descending() {
        let ds = people();
        let visible = names(&["name", "city", "age"]);
        let asc = filter_and_sort(&ds, "", Some(&SortKey::asc("age")), &visible);
        assert_eq!(asc, vec![1, 2, 0, 3]);
        let desc = filter_and_sort(&ds, "", Some(&SortKey::desc("age")), &visible);
        // Ties (rows 1 and 2) keep filtered order under the reversed comparator.
        assert_eq!(desc, vec![3, 0, 1, 2]);
    }

    #[test]
    fn sort_text_is_lexicographic() {
        let ds = people();
        let asc = filter_and_sort(&ds, "", Some(&SortKey::asc("name")), &names(&["name"]));
        // Uppercase sorts before lowercase.
        assert_eq!(ids(&ds, &asc), vec!["Alice", "Carol", "Dave", "bob"]);
    }

    #[test]
    fn descending_reverses_ascending_without_duplicates() {
        let ds = numbered(37);
        let visible = names(&["id"]);
        let asc = filter_and_sort(&ds, "", Some(&SortKey::asc("id")), &visible);
        let mut desc = filter_and_sort(&ds, "", Some(&SortKey::desc("id")), &visible);
        desc.reverse();
        assert_eq!(asc, desc);
    }

    #[test]
    fn sort_is_stable_for_equal_keys() {
        let ds = numbered(12);
        let sorted = filter_and_sort(&ds, "", Some(&SortKey::asc("parity")), &names(&["parity"]));
        assert_eq!(sorted, vec![1, 3, 5, 7, 9, 11, 0, 2, 4, 6, 8, 10]);
    }

    #[test]
    fn mixed_types_order_numbers_first() {
        let ds = Dataset::from_records(
            names(&["v"]),
            vec![vec!["b".into()], vec![2.0.into()], vec!["a".into()], vec![1.0.into()]],
        )
        .unwrap();
        let sorted = filter_and_sort(&ds, "", Some(&SortKey::asc("v")), &names(&["v"]));
        assert_eq!(sorted, vec![3, 1, 2, 0]);
    }

    #[test]
    fn unknown_sort_key_keeps_order() {
        let ds = people();
        let out = filter_and_sort(&ds, "", Some(&SortKey::asc("nope")), &names(&["name"]));
        assert_eq!(out, vec![0, 1, 2, 3]);
    }

    // ── Paginate ─────────────────────────────────────────────────

    #[test]
    fn twenty_five_rows_three_pages() {
        let ds = numbered(25);
        let state = QueryState::for_dataset(&ds);
        let page = query_rows(&ds, &state, state.visible_columns());
        assert_eq!(page.total_filtered_count, 25);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.row_indices, (0..10).collect::<Vec<_>>());
        assert_eq!(page.showing_range(), (1, 10));
        assert!(page.is_first_page());
    }

    #[test]
    fn out_of_range_pages_clamp() {
        let ds = numbered(25);
        let ordered: Vec<usize> = (0..25).collect();
        let last = paginate(&ds, &ordered, 99);
        assert_eq!(last.page_number, 3);
        assert_eq!(last.row_indices, (20..25).collect::<Vec<_>>());
        assert_eq!(last.showing_range(), (21, 25));
        assert!(last.is_last_page());

        let first = paginate(&ds, &ordered, 0);
        assert_eq!(first.page_number, 1);
    }

    #[test]
    fn empty_result_has_one_page() {
        let ds = numbered(5);
        let page = paginate(&ds, &[], 4);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.page_number, 1);
        assert!(page.rows.is_empty());
        assert_eq!(page.showing_range(), (0, 0));
    }

    #[test]
    fn pages_cover_result_exactly_once() {
        let ds = numbered(47);
        let visible = names(&["id", "name", "parity"]);
        let ordered = filter_and_sort(&ds, "o", Some(&SortKey::desc("name")), &visible);
        let pages = total_pages(ordered.len());
        let mut joined = Vec::new();
        for p in 1..=pages {
            joined.extend(paginate(&ds, &ordered, p).row_indices);
        }
        assert_eq!(joined, ordered);
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0), 1);
        assert_eq!(total_pages(1), 1);
        assert_eq!(total_pages(10), 1);
        assert_eq!(total_pages(11), 2);
        assert_eq!(total_pages(25), 3);
    }

    // ── State transitions ────────────────────────────────────────

    #[test]
    fn search_change_resets_page() {
        let ds = numbered(40);
        let mut state = QueryState::for_dataset(&ds);
        state.go_to_page(4, 4);
        assert!(state.set_search_term("row"));
        assert_eq!(state.page_number(), 1);

        state.go_to_page(3, 4);
        assert!(!state.set_search_term("row"));
        assert_eq!(state.page_number(), 3);
    }

    #[test]
    fn sort_change_keeps_page() {
        let ds = numbered(40);
        let mut state = QueryState::for_dataset(&ds);
        state.go_to_page(3, 4);
        state.toggle_sort("id");
        assert_eq!(state.page_number(), 3);
        state.set_sort(Some(SortKey::desc("name")));
        assert_eq!(state.page_number(), 3);
    }

    #[test]
    fn visibility_change_resets_page() {
        let ds = numbered(40);
        let mut state = QueryState::for_dataset(&ds);
        state.go_to_page(2, 4);
        state.toggle_column("parity");
        assert_eq!(state.page_number(), 1);
        assert!(!state.is_visible("parity"));

        state.go_to_page(2, 4);
        state.toggle_column("parity");
        assert!(state.is_visible("parity"));
        assert_eq!(state.page_number(), 1);
    }

    #[test]
    fn toggle_sort_cycles_direction() {
        let mut state = QueryState::new(names(&["a", "b"]));
        state.toggle_sort("a");
        assert_eq!(state.sort(), Some(&SortKey::asc("a")));
        state.toggle_sort("a");
        assert_eq!(state.sort(), Some(&SortKey::desc("a")));
        state.toggle_sort("a");
        assert_eq!(state.sort(), Some(&SortKey::asc("a")));
        state.toggle_sort("b");
        assert_eq!(state.sort(), Some(&SortKey::asc("b")));
    }

    #[test]
    fn toggle_all_columns() {
        let header = names(&["a", "b", "c"]);
        let mut state = QueryState::new(header.clone());
        state.toggle_all_columns(&header);
        assert!(state.visible_columns().is_empty());
        state.toggle_column("b");
        state.toggle_all_columns(&header);
        assert_eq!(state.visible_columns(), header.as_slice());
    }

    #[test]
    fn next_and_previous_are_clamped() {
        let mut state = QueryState::new(vec![]);
        state.previous_page();
        assert_eq!(state.page_number(), 1);
        state.next_page(2);
        state.next_page(2);
        assert_eq!(state.page_number(), 2);
        state.previous_page();
        assert_eq!(state.page_number(), 1);
    }

    #[test]
    fn defaults() {
        let ds = people();
        let state = QueryState::for_dataset(&ds);
        assert_eq!(state.search_term(), "");
        assert_eq!(state.sort(), None);
        assert_eq!(state.visible_columns(), ds.column_names());
        assert_eq!(state.page_number(), 1);
        assert_eq!(state.page_size(), PAGE_SIZE);
    }

    #[test]
    fn projection_follows_header_order() {
        let ds = people();
        let row = ds.row(0).unwrap();
        let cells = visible_cells(&ds, row, &names(&["age", "name"]));
        assert_eq!(cells, vec![&CellValue::text("Alice"), &CellValue::number(31.0)]);
    }

    #[test]
    fn state_serializes_lowercase_direction() {
        let mut state = QueryState::new(names(&["a"]));
        state.toggle_sort("a");
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["sort"]["direction"], "asc");
        assert_eq!(json["page_number"], 1);
    }
}
