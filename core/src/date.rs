//! Strict `YYYY-MM-DD` calendar dates.

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("'{input}' is not a valid YYYY-MM-DD date")]
pub struct DateParseError {
    pub input: String,
}

/// Parse a date in exactly `YYYY-MM-DD` form.
///
/// chrono alone accepts unpadded fields (`2020-1-5`); those are rejected
/// here so every accepted string has one spelling.
pub fn parse_date(input: &str) -> Result<NaiveDate, DateParseError> {
    let bytes = input.as_bytes();
    let shaped = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());

    if !shaped {
        return Err(DateParseError { input: input.to_string() });
    }
    NaiveDate::parse_from_str(input, DATE_FORMAT)
        .map_err(|_| DateParseError { input: input.to_string() })
}

/// Completed years between `born` and `as_of`. Negative when `born` is in the future.
pub fn age_in_years(born: NaiveDate, as_of: NaiveDate) -> i32 {
    let mut years = as_of.year() - born.year();
    if (as_of.month(), as_of.day()) < (born.month(), born.day()) {
        years -= 1;
    }
    years
}
