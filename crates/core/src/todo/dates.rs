//! Due-date parsing and normalization.
//!
//! Clients submit due dates in whatever format their date picker or
//! script produced. The store normalizes everything to an ISO
//! `YYYY-MM-DD` calendar date at write time; anything unparseable is
//! rejected rather than stored verbatim.

use chrono::{DateTime, NaiveDate};
use thiserror::Error;

/// Errors that can occur when parsing a due date.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DateParseError {
    #[error("Unrecognized date: {0}")]
    Unrecognized(String),
}

/// Date formats accepted on input, tried in order.
const ACCEPTED_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d-%m-%Y", "%m/%d/%Y"];

/// Parses a due date from any accepted representation.
///
/// Accepts ISO `YYYY-MM-DD` and a handful of common calendar formats,
/// plus RFC 3339 timestamps (the time-of-day is discarded).
pub fn parse_due_date(input: &str) -> Result<NaiveDate, DateParseError> {
    let trimmed = input.trim();

    for format in ACCEPTED_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Ok(date);
        }
    }

    if let Ok(datetime) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(datetime.date_naive());
    }

    Err(DateParseError::Unrecognized(trimmed.to_string()))
}
