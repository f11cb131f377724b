//! Table components built on the [`crate::processing`] pipeline.
//!
//! - [`DataTable`]: search box, filter dropdown, sortable headers and pager over one dataset
//! - [`GroupedTable`]: the same, with rows grouped by a field and pages counting groups
//! - [`TableState`]: the per-table UI state and its page-reset rules

pub mod column;
pub mod data_table;
pub mod grouped;
pub mod state;

pub use column::{
    Align, CellRenderer, ColumnDef, FilterConfig, FilterOption, RowRef, TableOptions, EMPTY_CELL,
};
pub use data_table::DataTable;
pub use grouped::{group_rows, GroupedTable, GroupedView, RowGroup};
pub use state::{SortState, TableState};
