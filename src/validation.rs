//! Synchronous form checks, run before any request is sent.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::ValidationError;

/// An inclusive date range with `from <= to`, serialized as `{"from":"YYYY-MM-DD","to":...}`
/// for report requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    from: NaiveDate,
    to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, ValidationError> {
        if from > to {
            return Err(ValidationError::FromAfterTo {
                from: from.to_string(),
                to: to.to_string(),
            });
        }
        Ok(Self { from, to })
    }

    pub fn from(&self) -> NaiveDate {
        self.from
    }

    pub fn to(&self) -> NaiveDate {
        self.to
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }
}

/// Parse a `YYYY-MM-DD` form field.
pub fn parse_date(field: &str, raw: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = require_non_empty(field, raw)?;
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| ValidationError::InvalidDate {
        field: field.to_string(),
        raw: raw.to_string(),
    })
}

/// Parse and check a "from"/"to" pair of form fields.
pub fn parse_date_range(from: &str, to: &str) -> Result<DateRange, ValidationError> {
    DateRange::new(parse_date("from", from)?, parse_date("to", to)?)
}

/// Fail on empty or whitespace-only input; returns the trimmed value otherwise.
pub fn require_non_empty<'a>(field: &str, value: &'a str) -> Result<&'a str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(trimmed)
}
