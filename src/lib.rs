//! `expense-view` is the list-screen core of an expense tracking front-end: schema-first
//! tables with search, dropdown filter, typed sorting and pagination, a two-list section
//! manager for the dashboard layout, a small reducer store, and thin boundaries to the REST
//! backend and media CDN.
//!
//! Everything is in-memory and synchronous. The pure stages live in [`processing`]; the
//! stateful components that own UI state (page, sort, search, selection) live in [`table`]
//! and [`sections`].
//!
//! ## Tables
//!
//! A [`table::DataTable`] owns a [`types::DataSet`] plus its column definitions and derives
//! the visible page from search → filter → sort → paginate. The derived page is memoized and
//! only recomputed when the data or the UI state changes.
//!
//! ```rust
//! use expense_view::table::{ColumnDef, DataTable, FilterConfig, FilterOption, TableOptions};
//! use expense_view::processing::{FilterValue, SortType};
//! use expense_view::types::{DataSet, DataType, Field, Schema, Value};
//!
//! # fn main() -> Result<(), expense_view::ViewError> {
//! let schema = Schema::new(vec![
//!     Field::new("id", DataType::Int64),
//!     Field::new("title", DataType::Utf8),
//!     Field::new("status", DataType::Utf8),
//!     Field::new("amount", DataType::Float64),
//! ]);
//! let ds = DataSet::new(
//!     schema,
//!     vec![
//!         vec![Value::Int64(1), Value::from("Rent"), Value::from("paid"), Value::Float64(900.0)],
//!         vec![Value::Int64(2), Value::from("Coffee"), Value::from("due"), Value::Float64(4.5)],
//!         vec![Value::Int64(3), Value::from("Train"), Value::from("paid"), Value::Float64(30.0)],
//!     ],
//! );
//! let options = TableOptions {
//!     columns: vec![
//!         ColumnDef::new("title", "Title"),
//!         ColumnDef::new("amount", "Amount").sort_type(SortType::Number),
//!     ],
//!     search_fields: vec!["title".to_string()],
//!     filter: Some(FilterConfig::new(
//!         "status",
//!         vec![FilterOption::new("Paid", "paid"), FilterOption::new("Due", "due")],
//!     )),
//!     ..Default::default()
//! };
//!
//! let mut table = DataTable::new(ds, options)?;
//! table.set_filter(FilterValue::Equals(Value::from("paid")))?;
//! table.click_header("amount")?;
//! assert_eq!(table.rendered_rows()?, vec![vec!["Train", "30"], vec!["Rent", "900"]]);
//! assert_eq!(table.page_label()?, "Page 1 of 1");
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`types`]: schema + in-memory dataset types
//! - [`processing`]: search/filter/sort/paginate/reduce stages
//! - [`table`]: `DataTable`, `GroupedTable` and their UI state
//! - [`sections`]: active/available section partitions and the dual-list manager
//! - [`store`]: reducer store with theme and category slices
//! - [`validation`]: form checks (required fields, date ranges)
//! - [`backend`]: REST backend / CDN traits, HTTP clients and in-memory doubles
//! - [`ingestion`] / [`export`]: CSV and JSON in, CSV out
//! - [`observability`]: observer hooks for view and request events
//! - [`error`]: error types

pub mod backend;
pub mod error;
pub mod export;
pub mod ingestion;
pub mod observability;
pub mod processing;
pub mod sections;
pub mod store;
pub mod table;
pub mod types;
pub mod validation;

pub use error::{ErrorMessage, ValidationError, ViewError, ViewResult};
