//! Core data model types for table processing.
//!
//! Rows live in an in-memory [`DataSet`] whose shape is declared up front by a [`Schema`]
//! (a list of typed [`Field`]s). Cells are typed [`Value`]s.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::error::{ViewError, ViewResult};

/// Field name used as the row identity when present.
pub const ID_FIELD: &str = "id";

/// Logical data type for a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    /// 64-bit signed integer.
    Int64,
    /// 64-bit floating point number.
    Float64,
    /// Boolean.
    Bool,
    /// UTF-8 string. Dates are carried as ISO-8601 strings.
    Utf8,
}

impl DataType {
    /// Whether `value` may be stored in a field of this type (`Null` fits everywhere).
    pub fn accepts(self, value: &Value) -> bool {
        matches!(
            (self, value),
            (_, Value::Null)
                | (DataType::Int64, Value::Int64(_))
                | (DataType::Float64, Value::Float64(_) | Value::Int64(_))
                | (DataType::Bool, Value::Bool(_))
                | (DataType::Utf8, Value::Utf8(_))
        )
    }
}

/// A single named, typed field in a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Field/column name.
    pub name: String,
    /// Field data type.
    pub data_type: DataType,
}

impl Field {
    /// Create a new field.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// A list of fields describing the shape of every row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    /// Ordered list of fields.
    pub fields: Vec<Field>,
}

impl Schema {
    /// Create a new schema from fields.
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Iterate field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Returns the index of a field by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Like [`Self::index_of`], but reports an unknown field as an error.
    pub fn require(&self, name: &str) -> ViewResult<usize> {
        self.index_of(name).ok_or_else(|| ViewError::UnknownField {
            field: name.to_string(),
        })
    }

    /// Returns the field declaration by name, if present.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// A single typed value in a [`DataSet`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing/empty value.
    Null,
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float.
    Float64(f64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 string.
    Utf8(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Numeric coercion used by number sorting.
    ///
    /// Strings are trimmed and parsed (empty string is `0`); anything that does not yield a
    /// finite-or-infinite number (including `NaN`) becomes `0`.
    pub fn to_number_lossy(&self) -> f64 {
        let n = match self {
            Value::Null => 0.0,
            Value::Int64(v) => *v as f64,
            Value::Float64(v) => *v,
            Value::Bool(b) => f64::from(u8::from(*b)),
            Value::Utf8(s) => parse_number_text(s.trim()),
        };
        if n.is_nan() { 0.0 } else { n }
    }

    /// Date coercion used by date sorting, in epoch milliseconds.
    ///
    /// Accepts RFC 3339 timestamps, naive `YYYY-MM-DDTHH:MM:SS[.fff]` (read as UTC) and plain
    /// `YYYY-MM-DD` dates; numbers are taken as epoch milliseconds. Anything unparsable,
    /// including `Null`, maps to the epoch (`0`), so invalid dates sort first ascending.
    pub fn to_epoch_millis_lossy(&self) -> i64 {
        match self {
            Value::Int64(v) => *v,
            Value::Float64(v) if v.is_finite() => *v as i64,
            Value::Utf8(s) => parse_date_millis(s.trim()).unwrap_or(0),
            _ => 0,
        }
    }

    /// Type-sensitive equality: strings never equal numbers, numbers compare numerically.
    pub fn strict_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Int64(a), Value::Float64(b)) | (Value::Float64(b), Value::Int64(a)) => {
                (*a as f64) == *b
            }
            _ => self == other,
        }
    }
}

/// Browser-style number parsing: only decimal/exponent text and the literal `Infinity`.
/// Rust float words such as `inf` or `NaN` are not numbers here and yield `0`.
fn parse_number_text(t: &str) -> f64 {
    match t {
        "" => 0.0,
        "Infinity" | "+Infinity" => f64::INFINITY,
        "-Infinity" => f64::NEG_INFINITY,
        _ if t
            .chars()
            .any(|c| c.is_ascii_alphabetic() && !matches!(c, 'e' | 'E')) =>
        {
            0.0
        }
        _ => t.parse::<f64>().unwrap_or(0.0),
    }
}

fn parse_date_millis(s: &str) -> Option<i64> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.and_utc().timestamp_millis());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
}

/// Stringification used by search and default rendering. `Null` is the empty string.
///
/// Floats use Rust's shortest round-trip form, which never switches to exponent notation:
/// `1e21` prints as `1000000000000000000000` and `1e-7` as `0.0000001`, where a browser
/// would print `1e+21` and `1e-7`. Searching for exponent text therefore does not match.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Int64(v) => write!(f, "{v}"),
            Value::Float64(v) => write!(f, "{v}"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Utf8(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Utf8(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Utf8(s)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float64(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

/// Stable identity of a row: its `id` cell when present, otherwise its position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RowKey {
    Id(String),
    Index(usize),
}

/// In-memory tabular dataset.
///
/// Rows are stored as `Vec<Vec<Value>>` in the same order as the [`Schema`] fields.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSet {
    /// Schema describing row shape.
    pub schema: Schema,
    /// Row-major value storage.
    pub rows: Vec<Vec<Value>>,
}

impl DataSet {
    /// Create a dataset from schema and rows without checking them.
    pub fn new(schema: Schema, rows: Vec<Vec<Value>>) -> Self {
        Self { schema, rows }
    }

    /// Create a dataset, checking every row's arity and cell types against the schema.
    pub fn try_new(schema: Schema, rows: Vec<Vec<Value>>) -> ViewResult<Self> {
        let width = schema.fields.len();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(ViewError::SchemaMismatch {
                    message: format!(
                        "row {} has {} values, schema has {} fields",
                        i + 1,
                        row.len(),
                        width
                    ),
                });
            }
            for (field, value) in schema.fields.iter().zip(row) {
                if !field.data_type.accepts(value) {
                    return Err(ViewError::SchemaMismatch {
                        message: format!(
                            "row {} field '{}' expects {:?}, got {:?}",
                            i + 1,
                            field.name,
                            field.data_type,
                            value
                        ),
                    });
                }
            }
        }
        Ok(Self { schema, rows })
    }

    /// Number of rows in the dataset.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Cell lookup by row position and field name.
    pub fn value(&self, row: usize, field: &str) -> Option<&Value> {
        let idx = self.schema.index_of(field)?;
        self.rows.get(row)?.get(idx)
    }

    /// Identity of the row at `row`: the non-null `id` cell, else the position.
    pub fn row_key(&self, row: usize) -> RowKey {
        match self.value(row, ID_FIELD) {
            Some(v) if !v.is_null() => RowKey::Id(v.to_string()),
            _ => RowKey::Index(row),
        }
    }

    /// A dataset with the same schema and different rows.
    pub fn with_rows(&self, rows: Vec<Vec<Value>>) -> Self {
        Self {
            schema: self.schema.clone(),
            rows,
        }
    }

    /// Create a new dataset containing only rows that match `predicate`.
    ///
    /// The returned dataset preserves the original schema.
    pub fn filter_rows<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&[Value]) -> bool,
    {
        let rows = self
            .rows
            .iter()
            .filter(|row| predicate(row.as_slice()))
            .cloned()
            .collect();
        self.with_rows(rows)
    }

    /// Reduce (fold) all rows into an accumulator value.
    ///
    /// This is similar to `Iterator::fold`, but provides each row as `&[Value]`.
    pub fn reduce_rows<A, F>(&self, init: A, mut reducer: F) -> A
    where
        F: FnMut(A, &[Value]) -> A,
    {
        self.rows
            .iter()
            .fold(init, |acc, row| reducer(acc, row.as_slice()))
    }
}
