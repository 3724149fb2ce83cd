//! C FFI bindings for u-explore.
//!
//! Exposes the exploration session via a C-compatible interface.
//!
//! - **Opaque handle**: `*mut ExplorerContext`, created by `explore_new`
//! - **`#[repr(C)]`**: All data transfer structs
//! - **Integer error codes**: 0 = success, negative = error
//! - **Thread-local error message**: `explore_last_error()`
//! - **`catch_unwind`**: All FFI entry points wrapped to prevent panic propagation
//!
//! # Safety
//!
//! Null pointer arguments return error code -1. Arrays handed out by this
//! module must be released with the matching `explore_free_*` function.

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic;
use std::ptr;

use crate::dataset::Dataset;
use crate::error::ExploreError;
use crate::schema::ColumnKind;
use crate::session::Explorer;

// ── Error handling ────────────────────────────────────────────────────

/// Error codes returned by FFI functions.
pub const EXPLORE_OK: i32 = 0;
pub const EXPLORE_ERR_NULL_PTR: i32 = -1;
pub const EXPLORE_ERR_INVALID_INPUT: i32 = -2;
pub const EXPLORE_ERR_PARSE_FAILED: i32 = -3;
pub const EXPLORE_ERR_NO_DATASET: i32 = -4;
pub const EXPLORE_ERR_PANIC: i32 = -99;

thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

fn set_last_error(msg: &str) {
    LAST_ERROR.with(|cell| {
        *cell.borrow_mut() = CString::new(msg).ok();
    });
}

/// Records `err` as the last error and maps it to an FFI code.
fn fail(err: &ExploreError) -> i32 {
    set_last_error(&err.to_string());
    match err {
        ExploreError::NoDataset => EXPLORE_ERR_NO_DATASET,
        ExploreError::EmptyInput
        | ExploreError::NoRows { .. }
        | ExploreError::Csv { .. }
        | ExploreError::DuplicateColumn { .. }
        | ExploreError::DimensionMismatch { .. }
        | ExploreError::Io(_) => EXPLORE_ERR_PARSE_FAILED,
        ExploreError::ColumnNotFound { .. } => EXPLORE_ERR_INVALID_INPUT,
    }
}

/// Reads a required UTF-8 string argument.
///
/// # Safety
/// `ptr` must be null or a valid null-terminated string.
unsafe fn str_arg<'a>(ptr: *const c_char, what: &str) -> Result<&'a str, i32> {
    if ptr.is_null() {
        set_last_error(&format!("null {what} pointer"));
        return Err(EXPLORE_ERR_NULL_PTR);
    }
    unsafe { CStr::from_ptr(ptr) }.to_str().map_err(|e| {
        set_last_error(&format!("invalid UTF-8 in {what}: {e}"));
        EXPLORE_ERR_INVALID_INPUT
    })
}

/// Returns the last error message, or null if no error.
/// The returned string is valid until the next FFI call on this thread.
///
/// # Safety
/// The caller must not free the returned pointer.
#[no_mangle]
pub extern "C" fn explore_last_error() -> *const c_char {
    LAST_ERROR.with(|cell| {
        let borrow = cell.borrow();
        match borrow.as_ref() {
            Some(cstr) => cstr.as_ptr(),
            None => ptr::null(),
        }
    })
}

/// Clears the last error message.
#[no_mangle]
pub extern "C" fn explore_clear_error() {
    LAST_ERROR.with(|cell| {
        *cell.borrow_mut() = None;
    });
}

// ── Explorer Context (opaque handle) ─────────────────────────────────

/// Opaque handle for an exploration session.
pub struct ExplorerContext {
    explorer: Explorer,
}

/// C-compatible statistics for one numeric column.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct CColumnStats {
    /// Number of numeric values.
    pub count: u64,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    pub q1: f64,
    pub q3: f64,
}

/// C-compatible correlation matrix over the numeric columns.
#[repr(C)]
pub struct CCorrelationMatrix {
    /// Number of numeric columns (n).
    pub n_vars: u32,
    /// Flat n×n matrix (row-major). Caller must free with `explore_free_f64_array`.
    pub matrix: *mut f64,
}

/// C-compatible description of the current page.
#[repr(C)]
pub struct CPageInfo {
    /// 1-based page number after clamping.
    pub page_number: u32,
    pub total_pages: u32,
    /// Rows matching the search term.
    pub total_filtered: u64,
    /// 1-based first row shown, 0 when nothing matches.
    pub showing_from: u64,
    /// 1-based last row shown, 0 when nothing matches.
    pub showing_to: u64,
    /// Dataset row indices on this page, in display order.
    /// Caller must free with `explore_free_u64_array`.
    pub row_indices: *mut u64,
    pub n_rows: u32,
}

/// Creates an empty exploration session.
///
/// The returned handle must be freed with `explore_free`.
#[no_mangle]
pub extern "C" fn explore_new() -> *mut ExplorerContext {
    let result = panic::catch_unwind(|| {
        Box::into_raw(Box::new(ExplorerContext {
            explorer: Explorer::new(),
        }))
    });

    match result {
        Ok(ptr) => ptr,
        Err(_) => {
            set_last_error("panic in explore_new");
            ptr::null_mut()
        }
    }
}

/// Frees a session handle.
///
/// # Safety
/// `ctx` must be a valid pointer from `explore_new`, or null.
#[no_mangle]
pub unsafe extern "C" fn explore_free(ctx: *mut ExplorerContext) {
    if ctx.is_null() {
        return;
    }
    let result = panic::catch_unwind(|| {
        let _ = unsafe { Box::from_raw(ctx) };
    });
    if result.is_err() {
        set_last_error("panic in explore_free");
    }
}

/// Parses `csv_data` and loads it, replacing any current dataset.
///
/// `source_name` may be null; it is only used to name exports.
///
/// # Safety
/// - `ctx` must be a valid session handle.
/// - `csv_data` must be a valid null-terminated UTF-8 string.
/// - `source_name` must be null or a valid null-terminated UTF-8 string.
#[no_mangle]
pub unsafe extern "C" fn explore_load_csv(
    ctx: *mut ExplorerContext,
    csv_data: *const c_char,
    source_name: *const c_char,
) -> i32 {
    let result = panic::catch_unwind(|| {
        if ctx.is_null() {
            set_last_error("null context");
            return EXPLORE_ERR_NULL_PTR;
        }
        let csv = match unsafe { str_arg(csv_data, "csv_data") } {
            Ok(s) => s,
            Err(code) => return code,
        };
        let name = if source_name.is_null() {
            ""
        } else {
            match unsafe { str_arg(source_name, "source_name") } {
                Ok(s) => s,
                Err(code) => return code,
            }
        };

        let ctx = unsafe { &mut *ctx };
        match ctx.explorer.load_csv(name, csv) {
            Ok(()) => EXPLORE_OK,
            Err(e) => fail(&e),
        }
    });

    match result {
        Ok(code) => code,
        Err(_) => {
            set_last_error("panic in explore_load_csv");
            EXPLORE_ERR_PANIC
        }
    }
}

/// Discards the loaded dataset and its query state.
///
/// # Safety
/// `ctx` must be a valid session handle, or null.
#[no_mangle]
pub unsafe extern "C" fn explore_clear(ctx: *mut ExplorerContext) {
    if ctx.is_null() {
        return;
    }
    let result = panic::catch_unwind(|| {
        let ctx = unsafe { &mut *ctx };
        ctx.explorer.clear();
    });
    if result.is_err() {
        set_last_error("panic in explore_clear");
    }
}

/// Reads a size from the loaded dataset, mapping errors and panics to codes.
///
/// # Safety
/// `ctx` must be null or a valid session handle.
unsafe fn dataset_size<F>(ctx: *const ExplorerContext, name: &str, size: F) -> i64
where
    F: FnOnce(&Dataset) -> usize + panic::UnwindSafe,
{
    let result = panic::catch_unwind(|| {
        if ctx.is_null() {
            set_last_error("null context");
            return EXPLORE_ERR_NULL_PTR as i64;
        }
        let ctx = unsafe { &*ctx };
        match ctx.explorer.dataset() {
            Ok(ds) => size(ds) as i64,
            Err(e) => fail(&e) as i64,
        }
    });

    match result {
        Ok(n) => n,
        Err(_) => {
            set_last_error(&format!("panic in {name}"));
            EXPLORE_ERR_PANIC as i64
        }
    }
}

/// Returns the number of rows in the loaded dataset, or a negative code.
///
/// # Safety
/// `ctx` must be a valid session handle.
#[no_mangle]
pub unsafe extern "C" fn explore_row_count(ctx: *const ExplorerContext) -> i64 {
    unsafe { dataset_size(ctx, "explore_row_count", Dataset::row_count) }
}

/// Returns the number of columns in the loaded dataset, or a negative code.
///
/// # Safety
/// `ctx` must be a valid session handle.
#[no_mangle]
pub unsafe extern "C" fn explore_col_count(ctx: *const ExplorerContext) -> i64 {
    unsafe { dataset_size(ctx, "explore_col_count", Dataset::column_count) }
}

// ── Text accessors ───────────────────────────────────────────────────

/// Copies `text` into `buf` as a NUL-terminated string, truncated to
/// `buf_len - 1` bytes. Returns the full byte length of `text`, so a
/// caller can pass a null `buf` first to size its buffer.
///
/// # Safety
/// `buf` must be null or point to at least `buf_len` writable bytes.
unsafe fn write_text(text: &str, buf: *mut c_char, buf_len: u32) -> i64 {
    if !buf.is_null() && buf_len > 0 {
        let n = text.len().min(buf_len as usize - 1);
        unsafe {
            ptr::copy_nonoverlapping(text.as_ptr().cast::<c_char>(), buf, n);
            *buf.add(n) = 0;
        }
    }
    text.len() as i64
}

/// Runs `read` against the session and copies its text into `buf`.
///
/// # Safety
/// `ctx` must be null or a valid session handle; `buf` as for `write_text`.
unsafe fn text_out<F>(
    ctx: *mut ExplorerContext,
    buf: *mut c_char,
    buf_len: u32,
    name: &str,
    read: F,
) -> i64
where
    F: FnOnce(&mut Explorer) -> Result<String, i32> + panic::UnwindSafe,
{
    let result = panic::catch_unwind(|| {
        if ctx.is_null() {
            set_last_error("null context");
            return EXPLORE_ERR_NULL_PTR as i64;
        }
        let ctx = unsafe { &mut *ctx };
        match read(&mut ctx.explorer) {
            Ok(text) => unsafe { write_text(&text, buf, buf_len) },
            Err(code) => code as i64,
        }
    });

    match result {
        Ok(n) => n,
        Err(_) => {
            set_last_error(&format!("panic in {name}"));
            EXPLORE_ERR_PANIC as i64
        }
    }
}

fn out_of_range(what: &str) -> i32 {
    set_last_error(&format!("{what} index out of range"));
    EXPLORE_ERR_INVALID_INPUT
}

/// Writes the name of column `col_idx` into `buf`.
///
/// Returns the name's byte length, or a negative code.
///
/// # Safety
/// `ctx` must be valid. `buf` must be null or hold `buf_len` bytes.
#[no_mangle]
pub unsafe extern "C" fn explore_column_name(
    ctx: *mut ExplorerContext,
    col_idx: u32,
    buf: *mut c_char,
    buf_len: u32,
) -> i64 {
    unsafe {
        text_out(ctx, buf, buf_len, "explore_column_name", |ex| {
            let ds = ex.dataset().map_err(|e| fail(&e))?;
            ds.column_names()
                .get(col_idx as usize)
                .cloned()
                .ok_or_else(|| out_of_range("column"))
        })
    }
}

/// Writes the display text of the cell at (`row_idx`, `col_idx`) into
/// `buf`. Row indices are dataset indices, as returned by `explore_page`.
///
/// Returns the text's byte length, or a negative code.
///
/// # Safety
/// `ctx` must be valid. `buf` must be null or hold `buf_len` bytes.
#[no_mangle]
pub unsafe extern "C" fn explore_cell_text(
    ctx: *mut ExplorerContext,
    row_idx: u64,
    col_idx: u32,
    buf: *mut c_char,
    buf_len: u32,
) -> i64 {
    unsafe {
        text_out(ctx, buf, buf_len, "explore_cell_text", |ex| {
            let ds = ex.dataset().map_err(|e| fail(&e))?;
            let row = usize::try_from(row_idx)
                .ok()
                .and_then(|r| ds.row(r))
                .ok_or_else(|| out_of_range("row"))?;
            row.get(col_idx as usize)
                .map(|cell| cell.to_string())
                .ok_or_else(|| out_of_range("column"))
        })
    }
}

/// Writes the loaded dataset as CSV text into `buf`.
///
/// Returns the CSV's byte length, or a negative code.
///
/// # Safety
/// `ctx` must be valid. `buf` must be null or hold `buf_len` bytes.
#[no_mangle]
pub unsafe extern "C" fn explore_export_csv(
    ctx: *mut ExplorerContext,
    buf: *mut c_char,
    buf_len: u32,
) -> i64 {
    unsafe {
        text_out(ctx, buf, buf_len, "explore_export_csv", |ex| {
            ex.export_csv()
                .map(|(_, content)| content)
                .map_err(|e| fail(&e))
        })
    }
}

/// Writes the suggested export file name (`processed_<name>.csv`) into `buf`.
///
/// Returns the name's byte length, or a negative code.
///
/// # Safety
/// `ctx` must be valid. `buf` must be null or hold `buf_len` bytes.
#[no_mangle]
pub unsafe extern "C" fn explore_export_file_name(
    ctx: *mut ExplorerContext,
    buf: *mut c_char,
    buf_len: u32,
) -> i64 {
    unsafe {
        text_out(ctx, buf, buf_len, "explore_export_file_name", |ex| {
            ex.export_csv()
                .map(|(file_name, _)| file_name)
                .map_err(|e| fail(&e))
        })
    }
}

/// Returns the inferred kind of a column: 0 = numeric, 1 = textual.
/// Negative on error.
///
/// # Safety
/// `ctx` must be a valid session handle.
#[no_mangle]
pub unsafe extern "C" fn explore_column_kind(ctx: *const ExplorerContext, col_idx: u32) -> i32 {
    let result = panic::catch_unwind(|| {
        if ctx.is_null() {
            set_last_error("null context");
            return EXPLORE_ERR_NULL_PTR;
        }
        let ctx = unsafe { &*ctx };
        let schema = match ctx.explorer.schema() {
            Ok(s) => s,
            Err(e) => return fail(&e),
        };
        match schema.columns().get(col_idx as usize) {
            Some((_, ColumnKind::Numeric)) => 0,
            Some((_, ColumnKind::Textual)) => 1,
            None => {
                set_last_error("column index out of range");
                EXPLORE_ERR_INVALID_INPUT
            }
        }
    });

    match result {
        Ok(code) => code,
        Err(_) => {
            set_last_error("panic in explore_column_kind");
            EXPLORE_ERR_PANIC
        }
    }
}

/// Fills `out` with the statistics of a numeric column.
///
/// Returns -2 if the column is out of range or textual.
///
/// # Safety
/// `ctx` must be valid. `out` must point to a valid `CColumnStats`.
#[no_mangle]
pub unsafe extern "C" fn explore_column_stats(
    ctx: *mut ExplorerContext,
    col_idx: u32,
    out: *mut CColumnStats,
) -> i32 {
    let result = panic::catch_unwind(|| {
        if ctx.is_null() || out.is_null() {
            set_last_error("null pointer");
            return EXPLORE_ERR_NULL_PTR;
        }
        let ctx = unsafe { &mut *ctx };
        let name = match ctx.explorer.dataset() {
            Ok(ds) => match ds.column_names().get(col_idx as usize) {
                Some(name) => name.clone(),
                None => {
                    set_last_error("column index out of range");
                    return EXPLORE_ERR_INVALID_INPUT;
                }
            },
            Err(e) => return fail(&e),
        };

        let stats = match ctx.explorer.statistics() {
            Ok(all) => match all.get(&name) {
                Some(s) => s.clone(),
                None => {
                    set_last_error(&format!("column '{name}' is not numeric"));
                    return EXPLORE_ERR_INVALID_INPUT;
                }
            },
            Err(e) => return fail(&e),
        };

        unsafe {
            (*out) = CColumnStats {
                count: stats.count as u64,
                mean: stats.mean,
                median: stats.median,
                min: stats.min,
                max: stats.max,
                std_dev: stats.std_dev,
                q1: stats.q1,
                q3: stats.q3,
            };
        }

        EXPLORE_OK
    });

    match result {
        Ok(code) => code,
        Err(_) => {
            set_last_error("panic in explore_column_stats");
            EXPLORE_ERR_PANIC
        }
    }
}

/// Computes the correlation matrix over the numeric columns, in header
/// order. Undefined coefficients are NaN.
///
/// # Safety
/// `ctx` must be valid. `out` must point to a valid `CCorrelationMatrix`.
/// Caller must free `out.matrix` with `explore_free_f64_array`.
#[no_mangle]
pub unsafe extern "C" fn explore_correlation(
    ctx: *mut ExplorerContext,
    out: *mut CCorrelationMatrix,
) -> i32 {
    let result = panic::catch_unwind(|| {
        if ctx.is_null() || out.is_null() {
            set_last_error("null pointer");
            return EXPLORE_ERR_NULL_PTR;
        }
        let ctx = unsafe { &mut *ctx };
        let matrix = match ctx.explorer.correlations() {
            Ok(m) => m,
            Err(e) => return fail(&e),
        };

        let n = matrix.len();
        let mut flat = Vec::with_capacity(n * n);
        for r in 0..n {
            for c in 0..n {
                flat.push(matrix.get_index(r, c));
            }
        }
        let mut boxed = flat.into_boxed_slice();
        let out_ref = unsafe { &mut *out };
        out_ref.n_vars = n as u32;
        out_ref.matrix = boxed.as_mut_ptr();
        std::mem::forget(boxed);

        EXPLORE_OK
    });

    match result {
        Ok(code) => code,
        Err(_) => {
            set_last_error("panic in explore_correlation");
            EXPLORE_ERR_PANIC
        }
    }
}

// ── Query actions ────────────────────────────────────────────────────

/// Runs `action` against the session behind `ctx`, mapping errors to codes.
///
/// # Safety
/// `ctx` must be null or a valid session handle.
unsafe fn with_explorer<F>(ctx: *mut ExplorerContext, action: F) -> i32
where
    F: FnOnce(&mut Explorer) -> crate::error::Result<()>,
{
    if ctx.is_null() {
        set_last_error("null context");
        return EXPLORE_ERR_NULL_PTR;
    }
    let ctx = unsafe { &mut *ctx };
    match action(&mut ctx.explorer) {
        Ok(()) => EXPLORE_OK,
        Err(e) => fail(&e),
    }
}

/// Sets the search term. A changed term returns to page 1.
///
/// # Safety
/// `ctx` must be valid. `term` must be a valid null-terminated UTF-8 string.
#[no_mangle]
pub unsafe extern "C" fn explore_set_search(ctx: *mut ExplorerContext, term: *const c_char) -> i32 {
    let result = panic::catch_unwind(|| {
        let term = match unsafe { str_arg(term, "term") } {
            Ok(s) => s,
            Err(code) => return code,
        };
        unsafe { with_explorer(ctx, |ex| ex.set_search_term(term)) }
    });

    match result {
        Ok(code) => code,
        Err(_) => {
            set_last_error("panic in explore_set_search");
            EXPLORE_ERR_PANIC
        }
    }
}

/// Header click: sorts ascending by `column`, or flips the direction if it
/// is already the sort column.
///
/// # Safety
/// `ctx` must be valid. `column` must be a valid null-terminated UTF-8 string.
#[no_mangle]
pub unsafe extern "C" fn explore_toggle_sort(
    ctx: *mut ExplorerContext,
    column: *const c_char,
) -> i32 {
    let result = panic::catch_unwind(|| {
        let column = match unsafe { str_arg(column, "column") } {
            Ok(s) => s,
            Err(code) => return code,
        };
        unsafe { with_explorer(ctx, |ex| ex.toggle_sort(column)) }
    });

    match result {
        Ok(code) => code,
        Err(_) => {
            set_last_error("panic in explore_toggle_sort");
            EXPLORE_ERR_PANIC
        }
    }
}

/// Shows or hides `column`. Returns to page 1.
///
/// # Safety
/// `ctx` must be valid. `column` must be a valid null-terminated UTF-8 string.
#[no_mangle]
pub unsafe extern "C" fn explore_toggle_column(
    ctx: *mut ExplorerContext,
    column: *const c_char,
) -> i32 {
    let result = panic::catch_unwind(|| {
        let column = match unsafe { str_arg(column, "column") } {
            Ok(s) => s,
            Err(code) => return code,
        };
        unsafe { with_explorer(ctx, |ex| ex.toggle_column(column)) }
    });

    match result {
        Ok(code) => code,
        Err(_) => {
            set_last_error("panic in explore_toggle_column");
            EXPLORE_ERR_PANIC
        }
    }
}

/// Jumps to `page` (1-based), clamped to the available pages.
///
/// # Safety
/// `ctx` must be a valid session handle.
#[no_mangle]
pub unsafe extern "C" fn explore_go_to_page(ctx: *mut ExplorerContext, page: u32) -> i32 {
    let result = panic::catch_unwind(|| unsafe {
        with_explorer(ctx, |ex| ex.go_to_page(page as usize))
    });

    match result {
        Ok(code) => code,
        Err(_) => {
            set_last_error("panic in explore_go_to_page");
            EXPLORE_ERR_PANIC
        }
    }
}

/// Shows every column, or hides all of them when all are visible.
/// Returns to page 1.
///
/// # Safety
/// `ctx` must be a valid session handle.
#[no_mangle]
pub unsafe extern "C" fn explore_toggle_all_columns(ctx: *mut ExplorerContext) -> i32 {
    let result =
        panic::catch_unwind(|| unsafe { with_explorer(ctx, |ex| ex.toggle_all_columns()) });

    match result {
        Ok(code) => code,
        Err(_) => {
            set_last_error("panic in explore_toggle_all_columns");
            EXPLORE_ERR_PANIC
        }
    }
}

/// Advances one page, staying on the last page.
///
/// # Safety
/// `ctx` must be a valid session handle.
#[no_mangle]
pub unsafe extern "C" fn explore_next_page(ctx: *mut ExplorerContext) -> i32 {
    let result = panic::catch_unwind(|| unsafe { with_explorer(ctx, |ex| ex.next_page()) });

    match result {
        Ok(code) => code,
        Err(_) => {
            set_last_error("panic in explore_next_page");
            EXPLORE_ERR_PANIC
        }
    }
}

/// Goes back one page, staying on page 1.
///
/// # Safety
/// `ctx` must be a valid session handle.
#[no_mangle]
pub unsafe extern "C" fn explore_previous_page(ctx: *mut ExplorerContext) -> i32 {
    let result = panic::catch_unwind(|| unsafe { with_explorer(ctx, |ex| ex.previous_page()) });

    match result {
        Ok(code) => code,
        Err(_) => {
            set_last_error("panic in explore_previous_page");
            EXPLORE_ERR_PANIC
        }
    }
}

/// Describes the current page.
///
/// # Safety
/// `ctx` must be valid. `out` must point to a valid `CPageInfo`.
/// Caller must free `out.row_indices` with `explore_free_u64_array`.
#[no_mangle]
pub unsafe extern "C" fn explore_page(ctx: *mut ExplorerContext, out: *mut CPageInfo) -> i32 {
    let result = panic::catch_unwind(|| {
        if ctx.is_null() || out.is_null() {
            set_last_error("null pointer");
            return EXPLORE_ERR_NULL_PTR;
        }
        let ctx = unsafe { &mut *ctx };
        let page = match ctx.explorer.page() {
            Ok(p) => p,
            Err(e) => return fail(&e),
        };

        let (from, to) = page.showing_range();
        let indices: Vec<u64> = page.row_indices.iter().map(|&i| i as u64).collect();
        let n_rows = indices.len() as u32;
        let mut boxed = indices.into_boxed_slice();
        let indices_ptr = boxed.as_mut_ptr();
        std::mem::forget(boxed);

        unsafe {
            (*out) = CPageInfo {
                page_number: page.page_number as u32,
                total_pages: page.total_pages as u32,
                total_filtered: page.total_filtered_count as u64,
                showing_from: from as u64,
                showing_to: to as u64,
                row_indices: indices_ptr,
                n_rows,
            };
        }

        EXPLORE_OK
    });

    match result {
        Ok(code) => code,
        Err(_) => {
            set_last_error("panic in explore_page");
            EXPLORE_ERR_PANIC
        }
    }
}

// ── Memory ───────────────────────────────────────────────────────────

/// Frees an f64 array allocated by an explore FFI function.
///
/// # Safety
/// `ptr` must have been allocated by an explore FFI function, or be null.
#[no_mangle]
pub unsafe extern "C" fn explore_free_f64_array(ptr: *mut f64, count: u32) {
    if !ptr.is_null() {
        let _ = unsafe { Vec::from_raw_parts(ptr, count as usize, count as usize) };
    }
}

/// Frees a u64 array allocated by an explore FFI function.
///
/// # Safety
/// `ptr` must have been allocated by an explore FFI function, or be null.
#[no_mangle]
pub unsafe extern "C" fn explore_free_u64_array(ptr: *mut u64, count: u32) {
    if !ptr.is_null() {
        let _ = unsafe { Vec::from_raw_parts(ptr, count as usize, count as usize) };
    }
}

// ── Version ──────────────────────────────────────────────────────────

/// Returns the version string of u-explore.
///
/// # Safety
/// The returned string is a static string literal. Do not free it.
#[no_mangle]
pub extern "C" fn explore_version() -> *const c_char {
    c"0.1.0".as_ptr()
}

// ── Tests ─────────────────────────────────────────────────────────────
