//! Transaction request bodies and list filters.

use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use super::common_dto::{non_negative, present, timestamp_field};
use crate::domain::{BookingId, TransactionStatus, TransactionType};
use crate::error::ApiError;
use crate::persistence::TransactionFilter;
use crate::persistence::models::{NewTransaction, TransactionChanges};

/// Request body for `POST /api/transactions` and
/// `PUT /api/transactions/{id}`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct TransactionRequest {
    /// Booking paid for, if any.
    #[serde(default)]
    pub booking_id: Option<BookingId>,
    /// `Booking`, `Coaching`, or `Refund`; required on create.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    /// Amount moved; required on create.
    #[serde(default)]
    pub amount: Option<Decimal>,
    /// Settlement state; required on create.
    #[serde(default)]
    pub status: Option<String>,
    /// When the payment was recorded; required on create.
    #[serde(default)]
    pub transaction_date: Option<String>,
}

impl TransactionRequest {
    /// Validates a create request.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if a required field is missing or a
    /// value is out of range.
    pub fn into_new(self) -> Result<NewTransaction, ApiError> {
        let (Some(kind), Some(amount), Some(status), Some(transaction_date)) = (
            present(self.kind),
            self.amount,
            present(self.status),
            present(self.transaction_date),
        ) else {
            return Err(ApiError::Validation(
                "type, amount, status, and transaction_date are required".to_string(),
            ));
        };
        let kind: TransactionType = kind.parse()?;
        let status: TransactionStatus = status.parse()?;
        let amount = non_negative(Some(amount))?.unwrap_or_default();
        let transaction_date = timestamp_field(Some(&transaction_date), "transaction_date")?
            .ok_or_else(|| ApiError::Validation("transaction_date is required".to_string()))?;

        Ok(NewTransaction {
            booking_id: self.booking_id,
            kind,
            amount,
            status,
            transaction_date,
        })
    }

    /// Validates an update request.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if a present value is invalid.
    pub fn into_changes(self) -> Result<TransactionChanges, ApiError> {
        Ok(TransactionChanges {
            booking_id: self.booking_id,
            kind: present(self.kind)
                .map(|k| k.parse::<TransactionType>())
                .transpose()?,
            amount: non_negative(self.amount)?,
            status: present(self.status)
                .map(|s| s.parse::<TransactionStatus>())
                .transpose()?,
            transaction_date: timestamp_field(
                self.transaction_date.as_deref(),
                "transaction_date",
            )?,
        })
    }
}

/// Query parameters for `GET /api/transactions`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TransactionListParams {
    /// Linked booking id.
    #[param(value_type = Option<i32>)]
    pub booking_id: Option<BookingId>,
    /// Exact type match.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Exact status match.
    pub status: Option<String>,
    /// Inclusive lower bound on `transaction_date`.
    pub start_date: Option<String>,
    /// Inclusive upper bound on `transaction_date`.
    pub end_date: Option<String>,
}

impl TransactionListParams {
    /// Converts to a repository filter.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if a date bound cannot be parsed.
    pub fn into_filter(self) -> Result<TransactionFilter, ApiError> {
        Ok(TransactionFilter {
            booking_id: self.booking_id,
            kind: present(self.kind),
            status: present(self.status),
            start_date: timestamp_field(self.start_date.as_deref(), "start_date")?,
            end_date: timestamp_field(self.end_date.as_deref(), "end_date")?,
        })
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn parse(json: &str) -> TransactionRequest {
        let Ok(request) = serde_json::from_str(json) else {
            panic!("unparseable request: {json}");
        };
        request
    }

    #[test]
    fn create_reads_type_key() {
        let request = parse(
            r#"{"type": "Coaching", "amount": 500, "status": "Success",
                "transaction_date": "2024-03-05T10:00:00Z"}"#,
        );
        let Ok(tx) = request.into_new() else {
            panic!("expected transaction");
        };
        assert_eq!(tx.kind, TransactionType::Coaching);
        assert_eq!(tx.amount, dec!(500));
        assert_eq!(tx.booking_id, None);
    }

    #[test]
    fn create_rejects_unknown_type() {
        let request = parse(
            r#"{"type": "Tip", "amount": 50, "status": "Success",
                "transaction_date": "2024-03-05"}"#,
        );
        let Err(ApiError::Validation(msg)) = request.into_new() else {
            panic!("expected validation error");
        };
        assert_eq!(msg, "Type must be one of: Booking, Coaching, Refund");
    }

    #[test]
    fn create_requires_status() {
        let request = parse(r#"{"type": "Booking", "amount": 50, "transaction_date": "2024-03-05"}"#);
        let Err(ApiError::Validation(msg)) = request.into_new() else {
            panic!("expected validation error");
        };
        assert_eq!(msg, "type, amount, status, and transaction_date are required");
    }

    #[test]
    fn update_validates_present_status() {
        let request = parse(r#"{"status": "Settled"}"#);
        assert!(request.into_changes().is_err());

        let Ok(changes) = parse(r#"{"status": "Refunded"}"#).into_changes() else {
            panic!("expected changes");
        };
        assert_eq!(changes.status, Some(TransactionStatus::Refunded));
        assert_eq!(changes.kind, None);
    }
}
