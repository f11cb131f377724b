//! Case-insensitive substring search across a set of fields.

use crate::error::ViewResult;
use crate::types::DataSet;

/// Keep rows where at least one of `fields` contains `query`, ignoring case.
///
/// Each cell is stringified (`Null` becomes the empty string) and lowercased before the
/// substring test. An empty or whitespace-only query, or an empty field list, returns every
/// row. No Unicode normalization is applied, so `"cafe"` does not match `"café"`.
pub fn search<S: AsRef<str>>(dataset: &DataSet, fields: &[S], query: &str) -> ViewResult<DataSet> {
    if query.trim().is_empty() || fields.is_empty() {
        return Ok(dataset.clone());
    }

    let idxs = fields
        .iter()
        .map(|f| dataset.schema.require(f.as_ref()))
        .collect::<ViewResult<Vec<_>>>()?;
    let needle = query.to_lowercase();

    Ok(dataset.filter_rows(|row| {
        idxs.iter().any(|&i| {
            row.get(i)
                .is_some_and(|v| v.to_string().to_lowercase().contains(&needle))
        })
    }))
}

#[cfg(test)]
mod tests {
    use super::search;
    use crate::types::{DataSet, DataType, Field, Schema, Value};

    fn people() -> DataSet {
        let schema = Schema::new(vec![
            Field::new("id", DataType::Int64),
            Field::new("name", DataType::Utf8),
            Field::new("amt", DataType::Int64),
        ]);
        DataSet::new(
            schema,
            vec![
                vec![Value::Int64(1), Value::from("Bob"), Value::Int64(50)],
                vec![Value::Int64(2), Value::from("al"), Value::Int64(5)],
            ],
        )
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let out = search(&people(), &["name"], "AL").unwrap();
        assert_eq!(out.row_count(), 1);
        assert_eq!(out.rows[0][0], Value::Int64(2));
    }

    #[test]
    fn empty_or_blank_query_is_identity() {
        let ds = people();
        assert_eq!(search(&ds, &["name"], "").unwrap(), ds);
        assert_eq!(search(&ds, &["name"], "   ").unwrap(), ds);
    }

    #[test]
    fn empty_field_list_is_identity() {
        let ds = people();
        let none: [&str; 0] = [];
        assert_eq!(search(&ds, &none, "bob").unwrap(), ds);
    }

    #[test]
    fn numbers_are_searched_as_text() {
        let out = search(&people(), &["name", "amt"], "5").unwrap();
        assert_eq!(out.row_count(), 2);
    }

    #[test]
    fn null_cells_never_match() {
        let schema = Schema::new(vec![Field::new("note", DataType::Utf8)]);
        let ds = DataSet::new(schema, vec![vec![Value::Null], vec![Value::from("null")]]);
        let out = search(&ds, &["note"], "null").unwrap();
        assert_eq!(out.rows, vec![vec![Value::from("null")]]);
    }

    #[test]
    fn no_unicode_folding() {
        let schema = Schema::new(vec![Field::new("name", DataType::Utf8)]);
        let ds = DataSet::new(schema, vec![vec![Value::from("Café")]]);
        assert_eq!(search(&ds, &["name"], "cafe").unwrap().row_count(), 0);
        assert_eq!(search(&ds, &["name"], "CAFÉ").unwrap().row_count(), 1);
    }

    #[test]
    fn unknown_field_is_an_error() {
        assert!(search(&people(), &["nope"], "x").is_err());
    }
}
