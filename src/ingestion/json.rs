//! JSON ingestion.
//!
//! Accepts what list endpoints return: a JSON array of objects, a single object, or
//! newline-delimited JSON. Schema field names may be dot paths into nested objects
//! (e.g. `category.name`). A missing key or an explicit `null` becomes [`Value::Null`].

use std::fs;
use std::path::Path;

use serde_json::{Map, Value as JsonValue};

use crate::error::{ViewError, ViewResult};
use crate::types::{DataSet, DataType, Schema, Value};

/// Read and ingest a JSON file.
pub fn ingest_json_from_path(path: impl AsRef<Path>, schema: &Schema) -> ViewResult<DataSet> {
    let text = fs::read_to_string(path)?;
    ingest_json_from_str(&text, schema)
}

/// Ingest JSON text into a [`DataSet`].
pub fn ingest_json_from_str(input: &str, schema: &Schema) -> ViewResult<DataSet> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(DataSet::new(schema.clone(), Vec::new()));
    }

    match serde_json::from_str::<JsonValue>(trimmed) {
        Ok(JsonValue::Array(items)) => ingest_json_values(&items, schema),
        Ok(object @ JsonValue::Object(_)) => ingest_json_values(std::slice::from_ref(&object), schema),
        Ok(_) => Err(ViewError::SchemaMismatch {
            message: "json must be an object, an array of objects, or NDJSON".to_string(),
        }),
        Err(_) => {
            let mut values = Vec::new();
            for line in trimmed.lines().map(str::trim).filter(|l| !l.is_empty()) {
                values.push(serde_json::from_str::<JsonValue>(line)?);
            }
            ingest_json_values(&values, schema)
        }
    }
}

/// Convert already-decoded JSON objects (e.g. a backend page) into a [`DataSet`].
///
/// Row numbers in errors are 1-based.
pub fn ingest_json_values(values: &[JsonValue], schema: &Schema) -> ViewResult<DataSet> {
    let mut rows: Vec<Vec<Value>> = Vec::with_capacity(values.len());

    for (idx0, v) in values.iter().enumerate() {
        let row_num = idx0 + 1;
        let obj = v.as_object().ok_or_else(|| ViewError::SchemaMismatch {
            message: format!("row {row_num} is not a json object"),
        })?;

        let mut row: Vec<Value> = Vec::with_capacity(schema.fields.len());
        for field in &schema.fields {
            let value = match get_by_dot_path(obj, &field.name) {
                Some(jv) => convert_json_value(row_num, &field.name, field.data_type, jv)?,
                None => Value::Null,
            };
            row.push(value);
        }
        rows.push(row);
    }

    Ok(DataSet::new(schema.clone(), rows))
}

fn get_by_dot_path<'a>(root: &'a Map<String, JsonValue>, path: &str) -> Option<&'a JsonValue> {
    if let Some(v) = root.get(path) {
        return Some(v);
    }
    let mut segments = path.split('.');
    let mut current = root.get(segments.next()?)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

fn convert_json_value(
    row: usize,
    column: &str,
    data_type: DataType,
    v: &JsonValue,
) -> ViewResult<Value> {
    let mismatch = |expected: &str| ViewError::ParseError {
        row,
        column: column.to_string(),
        raw: v.to_string(),
        message: format!("expected {expected}"),
    };

    match (data_type, v) {
        (_, JsonValue::Null) => Ok(Value::Null),
        (DataType::Utf8, JsonValue::String(s)) => Ok(Value::Utf8(s.clone())),
        // Ids and codes sometimes arrive as numbers.
        (DataType::Utf8, JsonValue::Number(n)) => Ok(Value::Utf8(n.to_string())),
        (DataType::Utf8, _) => Err(mismatch("string")),
        (DataType::Bool, JsonValue::Bool(b)) => Ok(Value::Bool(*b)),
        (DataType::Bool, _) => Err(mismatch("bool")),
        (DataType::Int64, JsonValue::Number(n)) => {
            n.as_i64().map(Value::Int64).ok_or_else(|| mismatch("integer"))
        }
        (DataType::Int64, _) => Err(mismatch("integer")),
        (DataType::Float64, JsonValue::Number(n)) => {
            n.as_f64().map(Value::Float64).ok_or_else(|| mismatch("number"))
        }
        (DataType::Float64, _) => Err(mismatch("number")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Field;

    fn schema() -> Schema {
        Schema::new(vec![
            Field::new("id", DataType::Utf8),
            Field::new("amount", DataType::Float64),
            Field::new("category.name", DataType::Utf8),
            Field::new("recurring", DataType::Bool),
        ])
    }

    #[test]
    fn ingests_array_with_nested_paths_and_missing_keys() {
        let json = r#"[
            {"id": "e1", "amount": 12.5, "category": {"name": "Food"}, "recurring": false},
            {"id": 2, "amount": 40, "recurring": null}
        ]"#;
        let ds = ingest_json_from_str(json, &schema()).unwrap();
        assert_eq!(ds.row_count(), 2);
        assert_eq!(ds.rows[0][2], Value::from("Food"));
        assert_eq!(
            ds.rows[1],
            vec![Value::from("2"), Value::Float64(40.0), Value::Null, Value::Null]
        );
    }

    #[test]
    fn ingests_ndjson_and_single_objects() {
        let ndjson = "{\"id\":\"a\",\"amount\":1}\n\n{\"id\":\"b\",\"amount\":2}\n";
        assert_eq!(ingest_json_from_str(ndjson, &schema()).unwrap().row_count(), 2);

        let single = r#"{"id":"a","amount":1}"#;
        assert_eq!(ingest_json_from_str(single, &schema()).unwrap().row_count(), 1);
        assert_eq!(ingest_json_from_str("  ", &schema()).unwrap().row_count(), 0);
    }

    #[test]
    fn type_mismatch_reports_row_and_column() {
        let json = r#"[{"id":"a","amount":1},{"id":"b","amount":"lots"}]"#;
        match ingest_json_from_str(json, &schema()).unwrap_err() {
            ViewError::ParseError { row, column, .. } => {
                assert_eq!(row, 2);
                assert_eq!(column, "amount");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_object_rows_are_rejected() {
        let err = ingest_json_from_str("[1, 2]", &schema()).unwrap_err();
        assert!(matches!(err, ViewError::SchemaMismatch { .. }));
    }
}
