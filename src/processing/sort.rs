//! Stable single-column sorting.

use std::cmp::Ordering;

use crate::error::ViewResult;
use crate::types::{DataSet, Value};

/// How a column's values are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortType {
    /// Case-insensitive lexicographic comparison of the stringified value.
    #[default]
    String,
    /// Numeric comparison; non-numeric values count as `0`.
    Number,
    /// Date comparison; invalid dates count as the Unix epoch.
    Date,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// A fully specified sort: which field, which way, compared how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
    pub sort_type: SortType,
}

impl SortSpec {
    pub fn new(field: impl Into<String>, direction: SortDirection, sort_type: SortType) -> Self {
        Self {
            field: field.into(),
            direction,
            sort_type,
        }
    }
}

/// Compare two cells under `sort_type` (ascending order).
pub fn compare_values(a: &Value, b: &Value, sort_type: SortType) -> Ordering {
    match sort_type {
        SortType::Number => a
            .to_number_lossy()
            .partial_cmp(&b.to_number_lossy())
            .unwrap_or(Ordering::Equal),
        SortType::Date => a.to_epoch_millis_lossy().cmp(&b.to_epoch_millis_lossy()),
        SortType::String => a
            .to_string()
            .to_lowercase()
            .cmp(&b.to_string().to_lowercase()),
    }
}

/// Return a copy of `dataset` sorted by `spec`.
///
/// The sort is stable in both directions: rows with equal keys keep their prior relative
/// order, so `Desc` is not simply the reverse of `Asc` when keys repeat.
pub fn sort(dataset: &DataSet, spec: &SortSpec) -> ViewResult<DataSet> {
    let idx = dataset.schema.require(&spec.field)?;
    let mut rows = dataset.rows.clone();
    rows.sort_by(|a, b| {
        let ord = match (a.get(idx), b.get(idx)) {
            (Some(x), Some(y)) => compare_values(x, y, spec.sort_type),
            _ => Ordering::Equal,
        };
        match spec.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
    Ok(dataset.with_rows(rows))
}
