//! Loading table data from CSV statements and backend JSON.
//!
//! Both formats produce a schema-checked [`crate::types::DataSet`]; cells are parsed
//! according to the declared [`crate::types::DataType`] and empty/missing cells become
//! [`crate::types::Value::Null`].

pub mod csv;
pub mod json;

pub use self::csv::{ingest_csv_from_path, ingest_csv_from_reader};
pub use self::json::{ingest_json_from_path, ingest_json_from_str, ingest_json_values};
