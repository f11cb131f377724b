//! Fixed-size page windowing.

use crate::error::{ViewError, ViewResult};
use crate::types::DataSet;

/// Rows per page when the caller does not configure one.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Number of pages needed for `row_count` rows (`0` when there are no rows).
pub fn total_pages(row_count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    row_count.div_ceil(page_size)
}

/// Return the rows of 0-based `page`.
///
/// A page past the end yields an empty dataset rather than an error.
pub fn paginate(dataset: &DataSet, page: usize, page_size: usize) -> ViewResult<DataSet> {
    if page_size == 0 {
        return Err(ViewError::InvalidOption {
            message: "page_size must be > 0".to_string(),
        });
    }
    let len = dataset.row_count();
    let start = page.saturating_mul(page_size).min(len);
    let end = start.saturating_add(page_size).min(len);
    Ok(dataset.with_rows(dataset.rows[start..end].to_vec()))
}
