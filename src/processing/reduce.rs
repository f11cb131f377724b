//! Column summaries (totals) for [`crate::types::DataSet`].

use crate::types::{DataSet, DataType, Value};

/// Built-in reduction operations over a single column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReduceOp {
    /// Count all rows (including nulls).
    Count,
    /// Sum numeric values, ignoring nulls.
    Sum,
    /// Minimum numeric value, ignoring nulls.
    Min,
    /// Maximum numeric value, ignoring nulls.
    Max,
}

/// Reduce a column using a built-in [`ReduceOp`].
///
/// - Returns `None` if `column` does not exist in the schema.
/// - For `Sum`/`Min`/`Max`, returns `Some(Value::Null)` if there are no non-null values, or if
///   the column is not numeric.
/// - For `Count`, always returns `Some(Value::Int64(row_count))`.
pub fn reduce(dataset: &DataSet, column: &str, op: ReduceOp) -> Option<Value> {
    let idx = dataset.schema.index_of(column)?;
    let data_type = dataset.schema.fields[idx].data_type;

    if op == ReduceOp::Count {
        return Some(Value::Int64(dataset.row_count() as i64));
    }

    let out = match data_type {
        DataType::Int64 => dataset
            .reduce_rows(None, |acc: Option<i64>, row| match row.get(idx) {
                Some(Value::Int64(v)) => Some(acc.map_or(*v, |a| combine_i64(op, a, *v))),
                _ => acc,
            })
            .map(Value::Int64),
        DataType::Float64 => dataset
            .reduce_rows(None, |acc: Option<f64>, row| {
                let v = match row.get(idx) {
                    Some(Value::Float64(v)) => *v,
                    Some(Value::Int64(v)) => *v as f64,
                    _ => return acc,
                };
                Some(acc.map_or(v, |a| combine_f64(op, a, v)))
            })
            .map(Value::Float64),
        DataType::Bool | DataType::Utf8 => None,
    };
    Some(out.unwrap_or(Value::Null))
}

fn combine_i64(op: ReduceOp, a: i64, v: i64) -> i64 {
    match op {
        ReduceOp::Sum => a.saturating_add(v),
        ReduceOp::Min => a.min(v),
        ReduceOp::Max => a.max(v),
        ReduceOp::Count => a,
    }
}

fn combine_f64(op: ReduceOp, a: f64, v: f64) -> f64 {
    match op {
        ReduceOp::Sum => a + v,
        ReduceOp::Min => a.min(v),
        ReduceOp::Max => a.max(v),
        ReduceOp::Count => a,
    }
}

#[cfg(test)]
mod tests {
    use super::{reduce, ReduceOp};
    use crate::types::{DataSet, DataType, Field, Schema, Value};

    fn expenses_with_nulls() -> DataSet {
        let schema = Schema::new(vec![
            Field::new("id", DataType::Int64),
            Field::new("amount", DataType::Float64),
            Field::new("title", DataType::Utf8),
        ]);

        let rows = vec![
            vec![Value::Int64(1), Value::Float64(10.0), Value::from("lunch")],
            vec![Value::Int64(2), Value::Null, Value::from("taxi")],
            vec![Value::Int64(3), Value::Int64(5), Value::from("coffee")],
        ];

        DataSet::new(schema, rows)
    }

    #[test]
    fn count_counts_rows() {
        let ds = expenses_with_nulls();
        assert_eq!(reduce(&ds, "amount", ReduceOp::Count), Some(Value::Int64(3)));
    }

    #[test]
    fn sum_ignores_nulls_and_widens_ints_in_float_columns() {
        let ds = expenses_with_nulls();
        assert_eq!(reduce(&ds, "amount", ReduceOp::Sum), Some(Value::Float64(15.0)));
        assert_eq!(reduce(&ds, "id", ReduceOp::Sum), Some(Value::Int64(6)));
    }

    #[test]
    fn min_max_ignore_nulls() {
        let ds = expenses_with_nulls();
        assert_eq!(reduce(&ds, "amount", ReduceOp::Min), Some(Value::Float64(5.0)));
        assert_eq!(reduce(&ds, "amount", ReduceOp::Max), Some(Value::Float64(10.0)));
        assert_eq!(reduce(&ds, "id", ReduceOp::Max), Some(Value::Int64(3)));
    }

    #[test]
    fn missing_column_is_none_and_text_column_is_null() {
        let ds = expenses_with_nulls();
        assert_eq!(reduce(&ds, "missing", ReduceOp::Sum), None);
        assert_eq!(reduce(&ds, "title", ReduceOp::Sum), Some(Value::Null));
    }

    #[test]
    fn all_null_column_reduces_to_null() {
        let schema = Schema::new(vec![Field::new("amount", DataType::Float64)]);
        let ds = DataSet::new(schema, vec![vec![Value::Null], vec![Value::Null]]);
        assert_eq!(reduce(&ds, "amount", ReduceOp::Sum), Some(Value::Null));
        assert_eq!(reduce(&ds, "amount", ReduceOp::Max), Some(Value::Null));
    }
}
