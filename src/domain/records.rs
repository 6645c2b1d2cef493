//! Read-only record views consumed by the metrics aggregator.
//!
//! These carry only the fields the dashboard needs. They can be built from
//! database rows (see `persistence::models`), which is how the server
//! builds them, or deserialized from exported JSON. The `Deserialize` impls
//! exist for that second path only. Deserialization is forgiving: a missing
//! or unreadable field degrades to "absent" or zero instead of rejecting the
//! record.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use super::amount::deserialize_amount;
use super::ids::{BookingId, MemberId, TransactionId, VenueId};
use super::status::{BookingStatus, MemberStatus, TransactionStatus, TransactionType};

/// Membership facts used for the member and trial figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Member key.
    #[serde(rename = "member_id", default)]
    pub id: Option<MemberId>,
    /// Active or Inactive. `None` when unreadable; counts as neither.
    #[serde(default, deserialize_with = "lenient_enum")]
    pub status: Option<MemberStatus>,
    /// Whether the member joined on a trial.
    #[serde(default)]
    pub is_trial_user: bool,
    /// Whether the member converted from a trial. Independent of
    /// `is_trial_user`.
    #[serde(default)]
    pub converted_from_trial: bool,
}

/// Booking facts used for the booking-derived figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    /// Booking key.
    #[serde(rename = "booking_id", default)]
    pub id: Option<BookingId>,
    /// Venue the court belongs to.
    #[serde(default)]
    pub venue_id: Option<VenueId>,
    /// Member who booked.
    #[serde(default)]
    pub member_id: Option<MemberId>,
    /// Price of the booking.
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub amount: Decimal,
    /// Coupon applied, if any.
    #[serde(default)]
    pub coupon_code: Option<String>,
    /// Booking lifecycle state.
    #[serde(default, deserialize_with = "lenient_enum")]
    pub status: Option<BookingStatus>,
    /// When the court is booked for.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub booking_date: Option<DateTime<Utc>>,
}

impl Booking {
    /// Whether a non-empty coupon code was applied.
    #[must_use]
    pub fn has_coupon(&self) -> bool {
        self.coupon_code
            .as_deref()
            .is_some_and(|code| !code.is_empty())
    }
}

/// Payment facts used for revenue, refunds, and the revenue series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction key.
    #[serde(rename = "transaction_id", default)]
    pub id: Option<TransactionId>,
    /// Booking paid for, absent for standalone payments.
    #[serde(default)]
    pub booking_id: Option<BookingId>,
    /// Booking, Coaching, or Refund.
    #[serde(rename = "type", default, deserialize_with = "lenient_enum")]
    pub kind: Option<TransactionType>,
    /// Amount moved.
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub amount: Decimal,
    /// Settlement state.
    #[serde(default, deserialize_with = "lenient_enum")]
    pub status: Option<TransactionStatus>,
    /// When the payment was recorded.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub transaction_date: Option<DateTime<Utc>>,
}

impl Transaction {
    /// Whether the payment settled.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == Some(TransactionStatus::Success)
    }
}

/// Parses the timestamp spellings the API accepts.
///
/// RFC 3339 with an offset is converted to UTC. A naive date-time
/// (`2024-03-05T18:30:00` or `2024-03-05 18:30:00`) and a bare date
/// (`2024-03-05`, read as midnight) are taken to be UTC already.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn lenient_enum<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: std::str::FromStr,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .and_then(|s| s.parse().ok()))
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .and_then(parse_timestamp))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use chrono::{Datelike, Timelike};
    use rust_decimal_macros::dec;
    use serde_json::json;

    use super::*;

    #[test]
    fn parse_timestamp_accepts_api_spellings() {
        let Some(ts) = parse_timestamp("2024-03-05T23:30:00+05:30") else {
            panic!("rfc3339 rejected");
        };
        assert_eq!((ts.day(), ts.hour()), (5, 18));

        let Some(ts) = parse_timestamp("2024-03-05 18:30:00") else {
            panic!("naive rejected");
        };
        assert_eq!(ts.hour(), 18);

        let Some(ts) = parse_timestamp("2024-03-05") else {
            panic!("date rejected");
        };
        assert_eq!((ts.day(), ts.hour()), (5, 0));

        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn transaction_from_api_json() {
        let Ok(tx) = serde_json::from_value::<Transaction>(json!({
            "transaction_id": 3,
            "booking_id": null,
            "type": "Coaching",
            "amount": "500.00",
            "status": "Success",
            "transaction_date": "2024-03-05T10:00:00.000Z",
            "venue_name": "ignored"
        })) else {
            panic!("transaction rejected");
        };
        assert_eq!(tx.kind, Some(TransactionType::Coaching));
        assert_eq!(tx.amount, dec!(500.00));
        assert!(tx.is_success());
        assert!(tx.booking_id.is_none());
    }

    #[test]
    fn malformed_fields_degrade_instead_of_failing() {
        let Ok(tx) = serde_json::from_value::<Transaction>(json!({
            "type": "Tip",
            "amount": "lots",
            "status": 4,
            "transaction_date": "soon"
        })) else {
            panic!("transaction rejected");
        };
        assert_eq!(tx.kind, None);
        assert_eq!(tx.amount, Decimal::ZERO);
        assert_eq!(tx.status, None);
        assert_eq!(tx.transaction_date, None);

        let Ok(member) = serde_json::from_value::<Member>(json!({})) else {
            panic!("member rejected");
        };
        assert_eq!(member.status, None);
        assert!(!member.is_trial_user);
    }

    #[test]
    fn empty_coupon_is_no_coupon() {
        let mut booking = Booking {
            id: None,
            venue_id: None,
            member_id: None,
            amount: Decimal::ZERO,
            coupon_code: Some(String::new()),
            status: None,
            booking_date: None,
        };
        assert!(!booking.has_coupon());
        booking.coupon_code = None;
        assert!(!booking.has_coupon());
        booking.coupon_code = Some("SUMMER10".to_string());
        assert!(booking.has_coupon());
    }
}
