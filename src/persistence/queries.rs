//! Filtered list queries.
//!
//! Each builder starts from a fixed `SELECT ... WHERE 1=1` and appends one
//! `AND` clause per present filter, always through a bound parameter.

use chrono::{DateTime, Utc};
use sqlx::{Postgres, QueryBuilder};

use crate::domain::{BookingId, MemberId, VenueId};

/// Bookings joined with venue, sport, and member names.
pub(crate) const BOOKING_DETAIL_SELECT: &str = "SELECT b.booking_id, b.venue_id, b.sport_id, \
     b.member_id, b.booking_date, b.amount, b.coupon_code, b.status, \
     v.name AS venue_name, v.location AS venue_location, s.name AS sport_name, \
     m.name AS member_name \
     FROM bookings b \
     JOIN venues v ON b.venue_id = v.venue_id \
     JOIN sports s ON b.sport_id = s.sport_id \
     JOIN members m ON b.member_id = m.member_id";

/// Transactions left-joined with their booking, venue, and member.
pub(crate) const TRANSACTION_DETAIL_SELECT: &str = "SELECT t.transaction_id, t.booking_id, \
     t.type, t.amount, t.status, t.transaction_date, \
     b.booking_date, b.amount AS booking_amount, b.status AS booking_status, \
     v.name AS venue_name, m.name AS member_name \
     FROM transactions t \
     LEFT JOIN bookings b ON t.booking_id = b.booking_id \
     LEFT JOIN venues v ON b.venue_id = v.venue_id \
     LEFT JOIN members m ON b.member_id = m.member_id";

/// Optional equality filters for the member list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberFilter {
    /// Exact status text.
    pub status: Option<String>,
    /// Trial flag.
    pub is_trial_user: Option<bool>,
    /// Conversion flag.
    pub converted_from_trial: Option<bool>,
}

/// Optional filters for the booking list. Date bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingFilter {
    /// Venue.
    pub venue_id: Option<VenueId>,
    /// Member.
    pub member_id: Option<MemberId>,
    /// Exact status text.
    pub status: Option<String>,
    /// Earliest `booking_date`.
    pub start_date: Option<DateTime<Utc>>,
    /// Latest `booking_date`.
    pub end_date: Option<DateTime<Utc>>,
}

/// Optional filters for the transaction list. Date bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    /// Linked booking.
    pub booking_id: Option<BookingId>,
    /// Exact type text.
    pub kind: Option<String>,
    /// Exact status text.
    pub status: Option<String>,
    /// Earliest `transaction_date`.
    pub start_date: Option<DateTime<Utc>>,
    /// Latest `transaction_date`.
    pub end_date: Option<DateTime<Utc>>,
}

/// Builds the member list query, ordered by id.
pub fn members_query(filter: &MemberFilter) -> QueryBuilder<'_, Postgres> {
    let mut qb = QueryBuilder::new("SELECT * FROM members WHERE 1=1");
    if let Some(status) = &filter.status {
        qb.push(" AND status = ").push_bind(status.as_str());
    }
    if let Some(trial) = filter.is_trial_user {
        qb.push(" AND is_trial_user = ").push_bind(trial);
    }
    if let Some(converted) = filter.converted_from_trial {
        qb.push(" AND converted_from_trial = ").push_bind(converted);
    }
    qb.push(" ORDER BY member_id");
    qb
}

/// Builds the booking list query, newest first.
pub fn bookings_query(filter: &BookingFilter) -> QueryBuilder<'_, Postgres> {
    let mut qb = QueryBuilder::new(BOOKING_DETAIL_SELECT);
    qb.push(" WHERE 1=1");
    if let Some(venue_id) = filter.venue_id {
        qb.push(" AND b.venue_id = ").push_bind(venue_id);
    }
    if let Some(member_id) = filter.member_id {
        qb.push(" AND b.member_id = ").push_bind(member_id);
    }
    if let Some(status) = &filter.status {
        qb.push(" AND b.status = ").push_bind(status.as_str());
    }
    if let Some(start) = filter.start_date {
        qb.push(" AND b.booking_date >= ").push_bind(start);
    }
    if let Some(end) = filter.end_date {
        qb.push(" AND b.booking_date <= ").push_bind(end);
    }
    qb.push(" ORDER BY b.booking_date DESC");
    qb
}

/// Builds the transaction list query, newest first with id as tie-break.
pub fn transactions_query(filter: &TransactionFilter) -> QueryBuilder<'_, Postgres> {
    let mut qb = QueryBuilder::new(TRANSACTION_DETAIL_SELECT);
    qb.push(" WHERE 1=1");
    if let Some(booking_id) = filter.booking_id {
        qb.push(" AND t.booking_id = ").push_bind(booking_id);
    }
    if let Some(kind) = &filter.kind {
        qb.push(" AND t.type = ").push_bind(kind.as_str());
    }
    if let Some(status) = &filter.status {
        qb.push(" AND t.status = ").push_bind(status.as_str());
    }
    if let Some(start) = filter.start_date {
        qb.push(" AND t.transaction_date >= ").push_bind(start);
    }
    if let Some(end) = filter.end_date {
        qb.push(" AND t.transaction_date <= ").push_bind(end);
    }
    qb.push(" ORDER BY t.transaction_date DESC, t.transaction_id DESC");
    qb
}
