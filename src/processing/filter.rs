//! Row filtering for [`crate::types::DataSet`].
//!
//! Two flavours: an arbitrary predicate ([`filter`]) and the dropdown-style equality
//! filter against one field ([`filter_equals`]).

use crate::error::ViewResult;
use crate::types::{DataSet, Value};

/// Returns a new [`DataSet`] containing only rows for which `predicate` returns `true`.
///
/// This is a convenience wrapper around [`DataSet::filter_rows`].
pub fn filter<F>(dataset: &DataSet, predicate: F) -> DataSet
where
    F: FnMut(&[Value]) -> bool,
{
    dataset.filter_rows(predicate)
}

/// Selected value of a column filter dropdown.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FilterValue {
    /// No filtering.
    #[default]
    All,
    /// Keep rows whose field strictly equals this value.
    Equals(Value),
}

impl From<Value> for FilterValue {
    fn from(v: Value) -> Self {
        FilterValue::Equals(v)
    }
}

/// Keep rows where `field` strictly equals the filter value.
///
/// Equality is type-sensitive (see [`Value::strict_eq`]): a numeric field filtered against a
/// string value matches nothing. [`FilterValue::All`] passes every row through.
pub fn filter_equals(dataset: &DataSet, field: &str, value: &FilterValue) -> ViewResult<DataSet> {
    let idx = dataset.schema.require(field)?;
    let target = match value {
        FilterValue::All => return Ok(dataset.clone()),
        FilterValue::Equals(v) => v,
    };
    Ok(dataset.filter_rows(|row| row.get(idx).is_some_and(|cell| cell.strict_eq(target))))
}
