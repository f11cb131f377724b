//! In-memory table transformations.
//!
//! Each stage is a pure function of a [`crate::types::DataSet`] and returns a new one:
//!
//! - [`search()`]: case-insensitive substring search across fields
//! - [`filter_equals()`]: dropdown-style equality filter on one field
//! - [`sort()`]: stable typed sort on one field
//! - [`paginate()`]: fixed-size page window
//! - [`filter_sort_paginate()`]: all of the above, in that order
//! - [`reduce()`]: column totals (count/sum/min/max)
//!
//! ## Example
//!
//! ```rust
//! use expense_view::processing::{
//!     filter_sort_paginate, FilterValue, SortDirection, SortSpec, SortType, TableQuery,
//! };
//! use expense_view::types::{DataSet, DataType, Field, Schema, Value};
//!
//! let schema = Schema::new(vec![
//!     Field::new("id", DataType::Int64),
//!     Field::new("name", DataType::Utf8),
//!     Field::new("amt", DataType::Int64),
//! ]);
//! let ds = DataSet::new(
//!     schema,
//!     vec![
//!         vec![Value::Int64(1), Value::from("Bob"), Value::Int64(50)],
//!         vec![Value::Int64(2), Value::from("al"), Value::Int64(5)],
//!     ],
//! );
//!
//! let view = filter_sort_paginate(
//!     &ds,
//!     &TableQuery {
//!         search_query: "al".to_string(),
//!         search_fields: vec!["name".to_string()],
//!         sort: Some(SortSpec::new("amt", SortDirection::Desc, SortType::Number)),
//!         ..Default::default()
//!     },
//! )
//! .unwrap();
//! assert_eq!(view.total_count, 1);
//! assert_eq!(view.rows.rows[0][0], Value::Int64(2));
//! ```

pub mod filter;
pub mod paginate;
pub mod pipeline;
pub mod reduce;
pub mod search;
pub mod sort;

pub use filter::{filter, filter_equals, FilterValue};
pub use paginate::{paginate, total_pages, DEFAULT_PAGE_SIZE};
pub use pipeline::{filter_and_sort, filter_sort_paginate, TableQuery, TableView};
pub use reduce::{reduce, ReduceOp};
pub use search::search;
pub use sort::{compare_values, sort, SortDirection, SortSpec, SortType};
