//! Tables whose rows are shown in collapsible groups (e.g. expenses per category).

use crate::error::ViewResult;
use crate::processing::{filter_and_sort, total_pages, FilterValue};
use crate::types::{DataSet, Value};

use super::column::TableOptions;
use super::data_table::DataTable;

/// Rows sharing one group key.
#[derive(Debug, Clone, PartialEq)]
pub struct RowGroup {
    /// Stringified group field value (`""` for null).
    pub key: String,
    pub rows: DataSet,
}

impl RowGroup {
    pub fn row_count(&self) -> usize {
        self.rows.row_count()
    }
}

/// Group rows by the stringified value of `field`.
///
/// Groups appear in order of first occurrence and each keeps its rows' relative order, so
/// grouping a sorted dataset yields sorted groups.
pub fn group_rows(dataset: &DataSet, field: &str) -> ViewResult<Vec<RowGroup>> {
    let idx = dataset.schema.require(field)?;
    let mut keys: Vec<String> = Vec::new();
    let mut buckets: Vec<Vec<Vec<Value>>> = Vec::new();

    for row in &dataset.rows {
        let key = row.get(idx).map(ToString::to_string).unwrap_or_default();
        match keys.iter().position(|k| *k == key) {
            Some(i) => buckets[i].push(row.clone()),
            None => {
                keys.push(key);
                buckets.push(vec![row.clone()]);
            }
        }
    }

    Ok(keys
        .into_iter()
        .zip(buckets)
        .map(|(key, rows)| RowGroup {
            key,
            rows: dataset.with_rows(rows),
        })
        .collect())
}

/// One page of groups.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedView {
    pub groups: Vec<RowGroup>,
    /// Rows left after search and filter.
    pub total_count: usize,
    pub total_groups: usize,
    pub total_pages: usize,
    pub page: usize,
}

/// A [`DataTable`] that pages over groups instead of rows.
///
/// Search, filter and sort apply to the rows first; grouping happens afterwards and the
/// configured page size counts groups.
pub struct GroupedTable {
    table: DataTable,
    group_field: String,
}

impl GroupedTable {
    pub fn new(data: DataSet, options: TableOptions, group_field: impl Into<String>) -> ViewResult<Self> {
        let group_field = group_field.into();
        data.schema.require(&group_field)?;
        Ok(Self {
            table: DataTable::new(data, options)?,
            group_field,
        })
    }

    pub fn group_field(&self) -> &str {
        &self.group_field
    }

    pub fn table(&self) -> &DataTable {
        &self.table
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.table.set_search(search);
    }

    pub fn set_filter(&mut self, value: FilterValue) -> ViewResult<()> {
        self.table.set_filter(value)
    }

    pub fn click_header(&mut self, field: &str) -> ViewResult<bool> {
        self.table.click_header(field)
    }

    pub fn view(&self) -> ViewResult<GroupedView> {
        let query = self.table.query();
        let processed = filter_and_sort(self.table.data(), &query)?;
        let groups = group_rows(&processed, &self.group_field)?;
        let total_groups = groups.len();
        let start = query.page.saturating_mul(query.page_size).min(total_groups);
        let page_groups = groups
            .into_iter()
            .skip(start)
            .take(query.page_size)
            .collect();
        Ok(GroupedView {
            groups: page_groups,
            total_count: processed.row_count(),
            total_groups,
            total_pages: total_pages(total_groups, query.page_size),
            page: query.page,
        })
    }

    pub fn next_page(&mut self) -> ViewResult<bool> {
        let total = self.view()?.total_pages;
        Ok(self.table.state.next_page(total))
    }

    pub fn prev_page(&mut self) -> bool {
        self.table.state.prev_page()
    }
}
