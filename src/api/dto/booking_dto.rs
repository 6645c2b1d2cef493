//! Booking request bodies and list filters.

use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use super::common_dto::{non_negative, present, timestamp_field};
use crate::domain::{BookingStatus, MemberId, SportId, VenueId};
use crate::error::ApiError;
use crate::persistence::BookingFilter;
use crate::persistence::models::{BookingChanges, NewBooking};

/// Request body for `POST /api/bookings` and `PUT /api/bookings/{id}`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct BookingRequest {
    /// Venue booked; required on create.
    #[serde(default)]
    pub venue_id: Option<VenueId>,
    /// Sport played; required on create.
    #[serde(default)]
    pub sport_id: Option<SportId>,
    /// Member who booked; required on create.
    #[serde(default)]
    pub member_id: Option<MemberId>,
    /// Slot start; required on create.
    #[serde(default)]
    pub booking_date: Option<String>,
    /// Price, as a number or numeric string; required on create.
    #[serde(default)]
    pub amount: Option<Decimal>,
    /// Coupon applied. Empty means none.
    #[serde(default)]
    pub coupon_code: Option<String>,
    /// Defaults to `Pending` on create.
    #[serde(default)]
    pub status: Option<String>,
}

impl BookingRequest {
    /// Validates a create request.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if a required field is missing or a
    /// value is out of range.
    pub fn into_new(self) -> Result<NewBooking, ApiError> {
        let (Some(venue_id), Some(sport_id), Some(member_id), Some(booking_date), Some(amount)) = (
            self.venue_id,
            self.sport_id,
            self.member_id,
            present(self.booking_date),
            self.amount,
        ) else {
            return Err(ApiError::Validation(
                "venue_id, sport_id, member_id, booking_date, and amount are required".to_string(),
            ));
        };
        let booking_date = timestamp_field(Some(&booking_date), "booking_date")?
            .ok_or_else(|| ApiError::Validation("booking_date is required".to_string()))?;
        let amount = non_negative(Some(amount))?.unwrap_or_default();
        let status = present(self.status)
            .map(|s| s.parse::<BookingStatus>())
            .transpose()?
            .unwrap_or_default();

        Ok(NewBooking {
            venue_id,
            sport_id,
            member_id,
            booking_date,
            amount,
            coupon_code: present(self.coupon_code),
            status,
        })
    }

    /// Validates an update request.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if a present value is invalid.
    pub fn into_changes(self) -> Result<BookingChanges, ApiError> {
        Ok(BookingChanges {
            venue_id: self.venue_id,
            sport_id: self.sport_id,
            member_id: self.member_id,
            booking_date: timestamp_field(self.booking_date.as_deref(), "booking_date")?,
            amount: non_negative(self.amount)?,
            coupon_code: present(self.coupon_code),
            status: present(self.status)
                .map(|s| s.parse::<BookingStatus>())
                .transpose()?,
        })
    }
}

/// Query parameters for `GET /api/bookings`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookingListParams {
    /// Venue id.
    #[param(value_type = Option<i32>)]
    pub venue_id: Option<VenueId>,
    /// Member id.
    #[param(value_type = Option<i32>)]
    pub member_id: Option<MemberId>,
    /// Exact status match.
    pub status: Option<String>,
    /// Inclusive lower bound on `booking_date`.
    pub start_date: Option<String>,
    /// Inclusive upper bound on `booking_date`.
    pub end_date: Option<String>,
}

impl BookingListParams {
    /// Converts to a repository filter.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if a date bound cannot be parsed.
    pub fn into_filter(self) -> Result<BookingFilter, ApiError> {
        Ok(BookingFilter {
            venue_id: self.venue_id,
            member_id: self.member_id,
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

    fn complete() -> BookingRequest {
        BookingRequest {
            venue_id: Some(VenueId::new(1)),
            sport_id: Some(SportId::new(2)),
            member_id: Some(MemberId::new(3)),
            booking_date: Some("2024-03-05T18:00:00Z".to_string()),
            amount: Some(dec!(600.00)),
            ..BookingRequest::default()
        }
    }

    #[test]
    fn create_defaults_status_to_pending() {
        let Ok(booking) = complete().into_new() else {
            panic!("expected booking");
        };
        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.coupon_code, None);
    }

    #[test]
    fn create_requires_amount() {
        let request = BookingRequest {
            amount: None,
            ..complete()
        };
        let Err(ApiError::Validation(msg)) = request.into_new() else {
            panic!("expected validation error");
        };
        assert_eq!(
            msg,
            "venue_id, sport_id, member_id, booking_date, and amount are required"
        );
    }

    #[test]
    fn zero_amount_is_allowed_negative_is_not() {
        let free = BookingRequest {
            amount: Some(Decimal::ZERO),
            ..complete()
        };
        assert!(free.into_new().is_ok());

        let negative = BookingRequest {
            amount: Some(dec!(-5)),
            ..complete()
        };
        assert!(negative.into_new().is_err());
    }

    #[test]
    fn create_rejects_unknown_status() {
        let request = BookingRequest {
            status: Some("Booked".to_string()),
            ..complete()
        };
        let Err(ApiError::Validation(msg)) = request.into_new() else {
            panic!("expected validation error");
        };
        assert!(msg.starts_with("Status must be one of: "));
    }

    #[test]
    fn amount_accepts_numeric_strings() {
        let Ok(request) = serde_json::from_str::<BookingRequest>(r#"{"amount": "450.50"}"#) else {
            panic!("expected request");
        };
        assert_eq!(request.amount, Some(dec!(450.50)));
    }

    #[test]
    fn list_filter_parses_date_bounds() {
        let Ok(filter) = BookingListParams {
            venue_id: Some(VenueId::new(1)),
            start_date: Some("2024-03-01".to_string()),
            end_date: Some("2024-03-31 23:59:59".to_string()),
            ..BookingListParams::default()
        }
        .into_filter() else {
            panic!("expected filter");
        };
        assert!(filter.start_date < filter.end_date);

        let bad = BookingListParams {
            start_date: Some("soon".to_string()),
            ..BookingListParams::default()
        };
        assert!(bad.into_filter().is_err());
    }
}
