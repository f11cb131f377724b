use expense_view::processing::{
    filter_and_sort, filter_sort_paginate, paginate, search, sort, total_pages, FilterValue,
    SortDirection, SortSpec, SortType, TableQuery,
};
use expense_view::types::{DataSet, DataType, Field, Schema, Value};

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

/// 23 rows with unique amounts and a repeating category.
fn ledger() -> DataSet {
    let schema = Schema::new(vec![
        Field::new("id", DataType::Int64),
        Field::new("category", DataType::Utf8),
        Field::new("amount", DataType::Float64),
        Field::new("date", DataType::Utf8),
    ]);
    let categories = ["food", "travel", "rent"];
    let rows = (0..23)
        .map(|i: i64| {
            vec![
                Value::Int64(i),
                Value::from(categories[(i % 3) as usize]),
                Value::Float64(((i * 37) % 101) as f64 + 0.25),
                Value::Utf8(format!("2024-{:02}-{:02}", (i % 12) + 1, (i % 27) + 1)),
            ]
        })
        .collect();
    DataSet::new(schema, rows)
}

fn column(ds: &DataSet, field: &str) -> Vec<Value> {
    let idx = ds.schema.index_of(field).unwrap();
    ds.rows.iter().map(|r| r[idx].clone()).collect()
}

#[test]
fn empty_search_is_identity() {
    let ds = ledger();
    let view = filter_sort_paginate(
        &ds,
        &TableQuery {
            search_fields: vec!["category".to_string()],
            page_size: ds.row_count(),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(view.rows, ds);
    assert_eq!(search(&ds, &["category"], "   ").unwrap(), ds);
}

#[test]
fn search_scenario_is_case_insensitive_substring() {
    let out = search(&people(), &["name"], "al").unwrap();
    assert_eq!(column(&out, "id"), vec![Value::Int64(2)]);
    let out = search(&people(), &["name"], "BO").unwrap();
    assert_eq!(column(&out, "id"), vec![Value::Int64(1)]);
}

#[test]
fn desc_sort_mirrors_asc_for_unique_keys() {
    let ds = ledger();
    for (field, sort_type) in [
        ("amount", SortType::Number),
        ("id", SortType::Number),
        ("id", SortType::String),
    ] {
        let asc = sort(&ds, &SortSpec::new(field, SortDirection::Asc, sort_type)).unwrap();
        let desc = sort(&ds, &SortSpec::new(field, SortDirection::Desc, sort_type)).unwrap();
        let mut reversed = asc.rows.clone();
        reversed.reverse();
        assert_eq!(reversed, desc.rows, "{field} {sort_type:?}");
    }
}

#[test]
fn ties_keep_original_order_in_both_directions() {
    let ds = ledger();
    for direction in [SortDirection::Asc, SortDirection::Desc] {
        let out = sort(&ds, &SortSpec::new("category", direction, SortType::String)).unwrap();
        let food_ids: Vec<Value> = out
            .rows
            .iter()
            .filter(|r| r[1] == Value::from("food"))
            .map(|r| r[0].clone())
            .collect();
        let mut expected = food_ids.clone();
        expected.sort_by_key(|v| match v {
            Value::Int64(i) => *i,
            _ => i64::MAX,
        });
        assert_eq!(food_ids, expected);
    }
}

#[test]
fn concatenated_pages_rebuild_the_processed_rows() {
    let ds = ledger();
    let query = TableQuery {
        filter_field: Some("category".to_string()),
        filter_value: FilterValue::All,
        sort: Some(SortSpec::new("date", SortDirection::Desc, SortType::Date)),
        ..Default::default()
    };
    let full = filter_and_sort(&ds, &query).unwrap();

    for page_size in [1, 4, 5, 7, 23, 50] {
        let pages = total_pages(full.row_count(), page_size);
        let mut rebuilt = Vec::new();
        for page in 0..pages {
            let chunk = paginate(&full, page, page_size).unwrap();
            assert!(chunk.row_count() <= page_size);
            rebuilt.extend(chunk.rows);
        }
        assert_eq!(rebuilt, full.rows, "page_size {page_size}");
        assert!(paginate(&full, pages, page_size).unwrap().rows.is_empty());
    }
}

#[test]
fn numeric_strings_sort_as_numbers() {
    let schema = Schema::new(vec![Field::new("n", DataType::Utf8)]);
    let ds = DataSet::new(
        schema,
        vec![vec![Value::from("10")], vec![Value::from("2")], vec![Value::from("1")]],
    );
    let numeric = sort(&ds, &SortSpec::new("n", SortDirection::Asc, SortType::Number)).unwrap();
    assert_eq!(
        column(&numeric, "n"),
        vec![Value::from("1"), Value::from("2"), Value::from("10")]
    );
    let lexical = sort(&ds, &SortSpec::new("n", SortDirection::Asc, SortType::String)).unwrap();
    assert_eq!(
        column(&lexical, "n"),
        vec![Value::from("1"), Value::from("10"), Value::from("2")]
    );
}

#[test]
fn filter_then_page_reports_filtered_totals() {
    let view = filter_sort_paginate(
        &ledger(),
        &TableQuery {
            filter_field: Some("category".to_string()),
            filter_value: FilterValue::Equals(Value::from("travel")),
            page: 1,
            ..Default::default()
        },
    )
    .unwrap();
    // ids 1, 4, ..., 22
    assert_eq!(view.total_count, 8);
    assert_eq!(view.total_pages, 2);
    assert_eq!(column(&view.rows, "id"), vec![Value::Int64(16), Value::Int64(19), Value::Int64(22)]);
}

#[test]
fn unknown_fields_are_errors() {
    let err = filter_sort_paginate(
        &people(),
        &TableQuery {
            sort: Some(SortSpec::new("nope", SortDirection::Asc, SortType::String)),
            ..Default::default()
        },
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "unknown field 'nope'");
}
