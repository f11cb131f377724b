use thiserror::Error;

/// Convenience result type for table, section and ingestion operations.
pub type ViewResult<T> = Result<T, ViewError>;

/// Error type returned by the view layer.
///
/// A single error enum shared by table construction, the processing pipeline, section
/// reordering and CSV/JSON ingestion.
#[derive(Debug, Error)]
pub enum ViewError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV read/write error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON decode error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// A column, search, filter or group field is not declared in the schema.
    #[error("unknown field '{field}'")]
    UnknownField { field: String },

    /// The data does not conform to the declared schema (wrong option types, missing columns, etc.).
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },

    /// A value could not be parsed into the required [`crate::types::DataType`].
    #[error("failed to parse value at row {row} column '{column}': {message} (raw='{raw}')")]
    ParseError {
        row: usize,
        column: String,
        raw: String,
        message: String,
    },

    /// A drag source index does not exist in its partition.
    #[error("index {index} out of range for {what} of length {len}")]
    IndexOutOfRange {
        what: &'static str,
        index: usize,
        len: usize,
    },

    /// An option value is outside its allowed range (e.g. a zero page size).
    #[error("invalid option: {message}")]
    InvalidOption { message: String },
}

/// Form validation failures, surfaced inline before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field was left empty.
    #[error("{field} is required")]
    Required { field: String },

    /// The start of a date range is later than its end.
    #[error("'from' date {from} is after 'to' date {to}")]
    FromAfterTo { from: String, to: String },

    /// A date field could not be parsed.
    #[error("{field}: invalid date '{raw}' (expected YYYY-MM-DD)")]
    InvalidDate { field: String, raw: String },
}

/// Human-readable failure from the backend or CDN, shown to the user as-is.
///
/// Every collaborator call returns `Result<T, ErrorMessage>`; nothing retries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ErrorMessage {
    pub message: String,
}

impl ErrorMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<ViewError> for ErrorMessage {
    fn from(err: ViewError) -> Self {
        Self::new(err.to_string())
    }
}

impl From<serde_json::Error> for ErrorMessage {
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("unexpected response body: {err}"))
    }
}
