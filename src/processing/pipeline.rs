//! The full table pipeline: search → column filter → sort → paginate.

use crate::error::ViewResult;
use crate::types::DataSet;

use super::filter::{filter_equals, FilterValue};
use super::paginate::{paginate, total_pages, DEFAULT_PAGE_SIZE};
use super::search::search;
use super::sort::{sort, SortSpec};

/// Every input of one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct TableQuery {
    pub search_query: String,
    pub search_fields: Vec<String>,
    /// Field the column filter applies to; `None` disables the filter.
    pub filter_field: Option<String>,
    pub filter_value: FilterValue,
    /// `None` keeps the incoming order.
    pub sort: Option<SortSpec>,
    /// 0-based page index.
    pub page: usize,
    pub page_size: usize,
}

impl Default for TableQuery {
    fn default() -> Self {
        Self {
            search_query: String::new(),
            search_fields: Vec::new(),
            filter_field: None,
            filter_value: FilterValue::All,
            sort: None,
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Output of a pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    /// Rows of the requested page.
    pub rows: DataSet,
    /// Rows left after search and filter, before paging.
    pub total_count: usize,
    pub total_pages: usize,
    pub page: usize,
}

/// Run search, filter and sort, without paging.
pub fn filter_and_sort(dataset: &DataSet, query: &TableQuery) -> ViewResult<DataSet> {
    let mut out = search(dataset, &query.search_fields, &query.search_query)?;
    if let Some(field) = &query.filter_field {
        out = filter_equals(&out, field, &query.filter_value)?;
    }
    if let Some(spec) = &query.sort {
        out = sort(&out, spec)?;
    }
    Ok(out)
}

/// Run the full pipeline and return the requested page plus totals.
pub fn filter_sort_paginate(dataset: &DataSet, query: &TableQuery) -> ViewResult<TableView> {
    let processed = filter_and_sort(dataset, query)?;
    let rows = paginate(&processed, query.page, query.page_size)?;
    Ok(TableView {
        rows,
        total_count: processed.row_count(),
        total_pages: total_pages(processed.row_count(), query.page_size),
        page: query.page,
    })
}
