//! Stateful, memoized data table.

use std::sync::Arc;
use std::time::Instant;

use crate::error::{ViewError, ViewResult};
use crate::observability::{emit, ViewEvent, ViewObserver};
use crate::processing::{
    filter_and_sort, filter_sort_paginate, reduce, FilterValue, ReduceOp, SortDirection, SortSpec,
    SortType, TableQuery, TableView,
};
use crate::types::{DataSet, Value};

use super::column::{RowRef, TableOptions};
use super::state::TableState;

/// A table over one [`DataSet`]: search box, filter dropdown, sortable headers and pager.
///
/// The derived page is cached and only recomputed when the state or the data changes.
pub struct DataTable {
    data: DataSet,
    options: TableOptions,
    pub(crate) state: TableState,
    cache: Option<(TableQuery, TableView)>,
    observer: Option<Arc<dyn ViewObserver>>,
}

impl DataTable {
    /// Create a table, validating `options` against the data's schema.
    pub fn new(data: DataSet, options: TableOptions) -> ViewResult<Self> {
        options.validate(&data.schema)?;
        Ok(Self {
            data,
            options,
            state: TableState::default(),
            cache: None,
            observer: None,
        })
    }

    /// Attach an observer for view events.
    pub fn with_observer(mut self, observer: Arc<dyn ViewObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn data(&self) -> &DataSet {
        &self.data
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    pub fn state(&self) -> &TableState {
        &self.state
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.state.set_search(search);
    }

    /// Select a filter value. Anything other than `All` must be one of the configured options.
    pub fn set_filter(&mut self, value: FilterValue) -> ViewResult<()> {
        if let FilterValue::Equals(v) = &value {
            let filter = self.options.filter.as_ref().ok_or_else(|| ViewError::InvalidOption {
                message: "table has no filter configured".to_string(),
            })?;
            if !filter.allows(v) {
                return Err(ViewError::InvalidOption {
                    message: format!("{v:?} is not a filter option of '{}'", filter.field),
                });
            }
        }
        self.state.set_filter(value);
        Ok(())
    }

    /// Header click. Returns `false` for a column that is not sortable.
    pub fn click_header(&mut self, field: &str) -> ViewResult<bool> {
        let column = self
            .options
            .column(field)
            .ok_or_else(|| ViewError::UnknownField {
                field: field.to_string(),
            })?;
        if !column.sortable {
            emit(
                self.observer.as_ref(),
                ViewEvent::HeaderIgnored {
                    field: field.to_string(),
                },
            );
            return Ok(false);
        }
        let sort = self.state.toggle_sort(field).clone();
        emit(
            self.observer.as_ref(),
            ViewEvent::SortChanged {
                field: sort.field,
                descending: sort.direction == SortDirection::Desc,
            },
        );
        Ok(true)
    }

    /// Advance one page. Returns `false` (and does nothing) on the last page.
    pub fn next_page(&mut self) -> ViewResult<bool> {
        let total_pages = self.view()?.total_pages;
        let moved = self.state.next_page(total_pages);
        if moved {
            self.emit_page(total_pages);
        }
        Ok(moved)
    }

    /// Go back one page. Returns `false` (and does nothing) on the first page.
    pub fn prev_page(&mut self) -> ViewResult<bool> {
        let total_pages = self.view()?.total_pages;
        let moved = self.state.prev_page();
        if moved {
            self.emit_page(total_pages);
        }
        Ok(moved)
    }

    fn emit_page(&self, total_pages: usize) {
        emit(
            self.observer.as_ref(),
            ViewEvent::PageChanged {
                page: self.state.page(),
                total_pages,
            },
        );
    }

    /// The pipeline inputs implied by the current state.
    pub fn query(&self) -> TableQuery {
        let sort = self.state.sort().map(|s| {
            let sort_type = self
                .options
                .column(&s.field)
                .map_or(SortType::String, |c| c.sort_type);
            SortSpec::new(s.field.clone(), s.direction, sort_type)
        });
        TableQuery {
            search_query: self.state.search().to_string(),
            search_fields: self.options.search_fields.clone(),
            filter_field: self.options.filter.as_ref().map(|f| f.field.clone()),
            filter_value: self.state.filter_value().clone(),
            sort,
            page: self.state.page(),
            page_size: self.options.page_size,
        }
    }

    /// The current page, recomputed only if the inputs changed since the last call.
    pub fn view(&mut self) -> ViewResult<&TableView> {
        let query = self.query();
        let entry = match self.cache.take() {
            Some((cached, view)) if cached == query => {
                emit(self.observer.as_ref(), ViewEvent::CacheHit);
                (cached, view)
            }
            _ => {
                let start = Instant::now();
                let view = filter_sort_paginate(&self.data, &query)?;
                emit(
                    self.observer.as_ref(),
                    ViewEvent::ViewComputed {
                        total_count: view.total_count,
                        visible_rows: view.rows.row_count(),
                        elapsed: start.elapsed(),
                    },
                );
                (query, view)
            }
        };
        let (_, view) = self.cache.insert(entry);
        Ok(view)
    }

    /// Cells of the current page, rendered through the column definitions.
    pub fn rendered_rows(&mut self) -> ViewResult<Vec<Vec<String>>> {
        self.view()?;
        Ok(match &self.cache {
            Some((_, view)) => self.render(&view.rows),
            None => Vec::new(),
        })
    }

    /// Cells of every row matching the current search and filter, in sort order.
    pub fn rendered_rows_all_pages(&self) -> ViewResult<Vec<Vec<String>>> {
        let processed = filter_and_sort(&self.data, &self.query())?;
        Ok(self.render(&processed))
    }

    fn render(&self, ds: &DataSet) -> Vec<Vec<String>> {
        ds.rows
            .iter()
            .map(|values| {
                let row = RowRef {
                    schema: &ds.schema,
                    values,
                };
                self.options
                    .columns
                    .iter()
                    .map(|c| c.render_cell(row))
                    .collect()
            })
            .collect()
    }

    pub fn header_labels(&self) -> Vec<String> {
        self.options.columns.iter().map(|c| c.label.clone()).collect()
    }

    /// Pager text, e.g. `"Page 2 of 3"`. An empty table reads `"Page 1 of 1"`.
    pub fn page_label(&mut self) -> ViewResult<String> {
        let view = self.view()?;
        Ok(format!("Page {} of {}", view.page + 1, view.total_pages.max(1)))
    }

    /// Whether the "next" button is enabled.
    pub fn has_next(&mut self) -> ViewResult<bool> {
        let view = self.view()?;
        Ok(view.page + 1 < view.total_pages)
    }

    /// Whether the "previous" button is enabled.
    pub fn has_prev(&mut self) -> ViewResult<bool> {
        Ok(self.view()?.page > 0)
    }

    /// Reduce `column` over every row matching the current search and filter (all pages).
    pub fn summary(&self, column: &str, op: ReduceOp) -> ViewResult<Option<Value>> {
        let processed = filter_and_sort(&self.data, &self.query())?;
        Ok(reduce(&processed, column, op))
    }

    /// Swap in freshly fetched rows. The schema must not change; state is kept and the page is
    /// clamped to the new last page.
    pub fn replace_data(&mut self, data: DataSet) -> ViewResult<()> {
        if data.schema != self.data.schema {
            return Err(ViewError::SchemaMismatch {
                message: "replacement data has a different schema".to_string(),
            });
        }
        self.data = data;
        self.cache = None;
        let total_pages = self.view()?.total_pages;
        self.state.clamp_page(total_pages);
        Ok(())
    }
}
