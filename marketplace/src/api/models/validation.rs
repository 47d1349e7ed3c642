//! Field checks shared by create payloads.

use crate::errors::{Error, Result};

/// A required string: must be non-empty once surrounding whitespace is removed. Returns the
/// trimmed value.
pub(crate) fn required(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::validation(field, "must not be empty"));
    }
    Ok(trimmed.to_string())
}

/// A required value that may be missing from the body.
pub(crate) fn present<T>(field: &str, value: Option<T>) -> Result<T> {
    value.ok_or_else(|| Error::validation(field, "is required"))
}

/// An optional string. Blank values are treated as absent.
pub(crate) fn optional(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// A list of labels with blanks dropped.
pub(crate) fn labels(values: Option<Vec<String>>) -> Vec<String> {
    values
        .unwrap_or_default()
        .into_iter()
        .filter_map(|v| optional(Some(v)))
        .collect()
}

pub(crate) fn non_negative(field: &str, value: i64) -> Result<i64> {
    if value < 0 {
        return Err(Error::validation(field, "must not be negative"));
    }
    Ok(value)
}
