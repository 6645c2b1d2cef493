//! Shared DTO types and request-parsing helpers.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::records::parse_timestamp;
use crate::error::ApiError;

/// JSON body of every successful request.
///
/// `count` is set on list responses and `message` on deletions.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiEnvelope<T> {
    /// Always `true`.
    pub success: bool,
    /// Number of items in `data` for list responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    /// Payload.
    pub data: T,
    /// Human-readable note.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Wraps a single record.
    #[must_use]
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            count: None,
            data,
            message: None,
        }
    }

    /// Wraps a deleted record with `"<entity> deleted successfully"`.
    #[must_use]
    pub fn deleted(data: T, entity: &str) -> Self {
        Self {
            success: true,
            count: None,
            data,
            message: Some(format!("{entity} deleted successfully")),
        }
    }
}

impl<T> ApiEnvelope<Vec<T>> {
    /// Wraps a list and records its length in `count`.
    #[must_use]
    pub fn list(data: Vec<T>) -> Self {
        Self {
            success: true,
            count: Some(data.len()),
            data,
            message: None,
        }
    }
}

/// Drops blank strings so they count as missing.
pub(crate) fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Parses an optional timestamp field, rejecting unreadable values.
pub(crate) fn timestamp_field(
    value: Option<&str>,
    field: &str,
) -> Result<Option<DateTime<Utc>>, ApiError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(raw) => parse_timestamp(raw)
            .map(Some)
            .ok_or_else(|| ApiError::Validation(format!("Invalid {field}: '{raw}'"))),
    }
}

/// Parses an optional calendar date field. Full timestamps are accepted
/// and truncated to their UTC date.
pub(crate) fn date_field(value: Option<&str>, field: &str) -> Result<Option<NaiveDate>, ApiError> {
    Ok(timestamp_field(value, field)?.map(|ts| ts.date_naive()))
}

/// Rejects negative amounts.
pub(crate) fn non_negative(amount: Option<Decimal>) -> Result<Option<Decimal>, ApiError> {
    match amount {
        Some(value) if value.is_sign_negative() && !value.is_zero() => Err(ApiError::Validation(
            "Amount must be non-negative".to_string(),
        )),
        other => Ok(other),
    }
}

/// Reads a `true`/`false` query flag; anything other than `"true"` is false.
pub(crate) fn flag(value: Option<&str>) -> Option<bool> {
    value.map(|v| v.eq_ignore_ascii_case("true"))
}
