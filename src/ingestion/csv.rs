//! CSV ingestion for bank/expense statement exports.

use std::io;
use std::path::Path;

use crate::error::{ViewError, ViewResult};
use crate::types::{DataSet, DataType, Schema, Value};

/// Ingest a CSV file into an in-memory [`DataSet`].
///
/// Rules:
///
/// - the file must have a header row;
/// - headers must contain every schema field (order can differ, extra columns are ignored);
/// - empty cells become [`Value::Null`];
/// - `Float64` cells may carry a currency symbol and thousands separators (`$1,250.00`).
pub fn ingest_csv_from_path(path: impl AsRef<Path>, schema: &Schema) -> ViewResult<DataSet> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_path(path)?;
    ingest_csv_from_reader(&mut rdr, schema)
}

/// Ingest CSV data from an existing reader.
pub fn ingest_csv_from_reader<R: io::Read>(
    rdr: &mut csv::Reader<R>,
    schema: &Schema,
) -> ViewResult<DataSet> {
    let headers = rdr.headers()?.clone();

    let mut col_idxs = Vec::with_capacity(schema.fields.len());
    for field in &schema.fields {
        let idx = headers
            .iter()
            .position(|h| h == field.name)
            .ok_or_else(|| ViewError::SchemaMismatch {
                message: format!(
                    "missing required column '{}'. headers={:?}",
                    field.name,
                    headers.iter().collect::<Vec<_>>()
                ),
            })?;
        col_idxs.push(idx);
    }

    let mut rows: Vec<Vec<Value>> = Vec::new();
    for (row_idx0, result) in rdr.records().enumerate() {
        // 1-based, and the header is row 1.
        let user_row = row_idx0 + 2;
        let record = result?;

        let mut row: Vec<Value> = Vec::with_capacity(schema.fields.len());
        for (field, &csv_idx) in schema.fields.iter().zip(col_idxs.iter()) {
            let raw = record.get(csv_idx).unwrap_or("");
            row.push(parse_typed_value(user_row, &field.name, field.data_type, raw)?);
        }
        rows.push(row);
    }

    Ok(DataSet::new(schema.clone(), rows))
}

fn parse_typed_value(row: usize, column: &str, data_type: DataType, raw: &str) -> ViewResult<Value> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Value::Null);
    }

    let parse_error = |message: String| ViewError::ParseError {
        row,
        column: column.to_owned(),
        raw: raw.to_owned(),
        message,
    };

    match data_type {
        DataType::Utf8 => Ok(Value::Utf8(trimmed.to_owned())),
        DataType::Int64 => trimmed
            .parse::<i64>()
            .map(Value::Int64)
            .map_err(|e| parse_error(e.to_string())),
        DataType::Float64 => parse_amount(trimmed)
            .map(Value::Float64)
            .map_err(|e| parse_error(e.to_string())),
        DataType::Bool => parse_bool(trimmed).map(Value::Bool).map_err(parse_error),
    }
}

/// `-$1,250.50`, `(12.00)` and `€3` all parse; the parenthesised form is negative.
fn parse_amount(s: &str) -> Result<f64, std::num::ParseFloatError> {
    let (negative, body) = match s.strip_prefix('(').and_then(|b| b.strip_suffix(')')) {
        Some(inner) => (true, inner),
        None => (false, s),
    };
    let cleaned: String = body
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
        .collect();
    let n = cleaned.parse::<f64>()?;
    Ok(if negative { -n } else { n })
}

fn parse_bool(s: &str) -> Result<bool, String> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "t" | "1" | "yes" | "y" => Ok(true),
        "false" | "f" | "0" | "no" | "n" => Ok(false),
        _ => Err("expected bool (true/false/1/0/yes/no)".to_string()),
    }
}
