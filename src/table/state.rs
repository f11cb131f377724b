//! Per-table UI state: search text, filter selection, sort column and current page.

use crate::processing::{FilterValue, SortDirection};

/// The column currently sorted and in which direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    pub field: String,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    /// Header-click policy: the sorted column flips direction, any other column starts `Asc`.
    pub fn toggle(current: Option<&SortState>, field: &str) -> SortState {
        match current {
            Some(s) if s.field == field => SortState::new(field, s.direction.flipped()),
            _ => SortState::new(field, SortDirection::Asc),
        }
    }
}

/// Mutable state of one table.
///
/// The page is reset to `0` whenever the search text or filter selection changes. Sorting
/// never touches the page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableState {
    search: String,
    filter_value: FilterValue,
    sort: Option<SortState>,
    page: usize,
}

impl TableState {
    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn filter_value(&self) -> &FilterValue {
        &self.filter_value
    }

    pub fn sort(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Returns `true` if the search text changed.
    pub fn set_search(&mut self, search: impl Into<String>) -> bool {
        let search = search.into();
        if search == self.search {
            return false;
        }
        self.search = search;
        self.page = 0;
        true
    }

    /// Returns `true` if the filter selection changed.
    pub fn set_filter(&mut self, value: FilterValue) -> bool {
        if value == self.filter_value {
            return false;
        }
        self.filter_value = value;
        self.page = 0;
        true
    }

    /// Apply a header click on `field`.
    pub fn toggle_sort(&mut self, field: &str) -> &SortState {
        self.sort.insert(SortState::toggle(self.sort.as_ref(), field))
    }

    pub fn clear_sort(&mut self) {
        self.sort = None;
    }

    /// Advance one page; a no-op on the last page.
    pub fn next_page(&mut self, total_pages: usize) -> bool {
        if self.page + 1 >= total_pages {
            return false;
        }
        self.page += 1;
        true
    }

    /// Go back one page; a no-op on the first page.
    pub fn prev_page(&mut self) -> bool {
        if self.page == 0 {
            return false;
        }
        self.page -= 1;
        true
    }

    /// Pull the page back inside `0..total_pages` after the data shrank.
    pub fn clamp_page(&mut self, total_pages: usize) {
        self.page = self.page.min(total_pages.saturating_sub(1));
    }
}
