//! Database row types and write models.
//!
//! Row types map `SELECT` results one-to-one and double as API response
//! bodies. Enum-valued columns stay as text here; the typed view lives in
//! [`crate::domain`].

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    self, BookingId, BookingStatus, MemberId, MemberStatus, SportId, TransactionId,
    TransactionStatus, TransactionType, VenueId,
};

/// A row of the `venues` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct VenueRow {
    /// Primary key.
    pub venue_id: VenueId,
    /// Display name.
    pub name: String,
    /// Address or area.
    pub location: String,
}

/// A row of the `sports` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct SportRow {
    /// Primary key.
    pub sport_id: SportId,
    /// Sport name.
    pub name: String,
}

/// A row of the `members` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct MemberRow {
    /// Primary key.
    pub member_id: MemberId,
    /// Full name.
    pub name: String,
    /// `Active` or `Inactive`.
    pub status: String,
    /// Joined on a trial.
    pub is_trial_user: bool,
    /// Converted from a trial to a paid membership.
    pub converted_from_trial: bool,
    /// Date the member joined.
    pub join_date: NaiveDate,
}

/// A row of the `bookings` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct BookingRow {
    /// Primary key.
    pub booking_id: BookingId,
    /// Venue booked.
    pub venue_id: VenueId,
    /// Sport played.
    pub sport_id: SportId,
    /// Member who booked.
    pub member_id: MemberId,
    /// Slot start.
    pub booking_date: DateTime<Utc>,
    /// Price charged.
    pub amount: Decimal,
    /// Coupon applied, if any.
    pub coupon_code: Option<String>,
    /// Lifecycle state.
    pub status: String,
}

/// A booking joined with its venue, sport, and member names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct BookingDetailRow {
    /// The booking itself.
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub booking: BookingRow,
    /// Venue name.
    pub venue_name: String,
    /// Venue location.
    pub venue_location: String,
    /// Sport name.
    pub sport_name: String,
    /// Member name.
    pub member_name: String,
    /// Member status; only selected by the single-booking lookup.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[sqlx(default)]
    pub member_status: Option<String>,
}

/// A row of the `transactions` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct TransactionRow {
    /// Primary key.
    pub transaction_id: TransactionId,
    /// Booking paid for, if any.
    pub booking_id: Option<BookingId>,
    /// `Booking`, `Coaching`, or `Refund`.
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
    /// Amount moved.
    pub amount: Decimal,
    /// Settlement state.
    pub status: String,
    /// When the payment was recorded.
    pub transaction_date: DateTime<Utc>,
}

/// A transaction left-joined with its booking, venue, and member.
///
/// The joined columns are `None` for standalone transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct TransactionDetailRow {
    /// The transaction itself.
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub transaction: TransactionRow,
    /// Slot start of the linked booking.
    pub booking_date: Option<DateTime<Utc>>,
    /// Price of the linked booking.
    pub booking_amount: Option<Decimal>,
    /// Status of the linked booking.
    pub booking_status: Option<String>,
    /// Venue of the linked booking.
    pub venue_name: Option<String>,
    /// Member of the linked booking.
    pub member_name: Option<String>,
}

/// A member with their bookings and the transactions on those bookings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MemberDetail {
    /// The member row.
    #[serde(flatten)]
    pub member: MemberRow,
    /// Bookings, newest first.
    pub bookings: Vec<BookingDetailRow>,
    /// Transactions linked through those bookings, newest first.
    pub transactions: Vec<TransactionRow>,
}

// ── Write models ────────────────────────────────────────────────────────

/// Validated input for a new venue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVenue {
    /// Display name.
    pub name: String,
    /// Address or area.
    pub location: String,
}

/// Partial venue update; `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VenueChanges {
    /// New name.
    pub name: Option<String>,
    /// New location.
    pub location: Option<String>,
}

/// Validated input for a new member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMember {
    /// Full name.
    pub name: String,
    /// Membership state.
    pub status: MemberStatus,
    /// Joined on a trial.
    pub is_trial_user: bool,
    /// Converted from a trial.
    pub converted_from_trial: bool,
    /// Join date.
    pub join_date: NaiveDate,
}

/// Partial member update; `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberChanges {
    /// New name.
    pub name: Option<String>,
    /// New status.
    pub status: Option<MemberStatus>,
    /// New trial flag.
    pub is_trial_user: Option<bool>,
    /// New conversion flag.
    pub converted_from_trial: Option<bool>,
    /// New join date.
    pub join_date: Option<NaiveDate>,
}

/// Validated input for a new booking.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    /// Venue booked.
    pub venue_id: VenueId,
    /// Sport played.
    pub sport_id: SportId,
    /// Member who booked.
    pub member_id: MemberId,
    /// Slot start.
    pub booking_date: DateTime<Utc>,
    /// Price charged.
    pub amount: Decimal,
    /// Coupon applied; empty codes are stored as `NULL`.
    pub coupon_code: Option<String>,
    /// Lifecycle state.
    pub status: BookingStatus,
}

/// Partial booking update; `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingChanges {
    /// New venue.
    pub venue_id: Option<VenueId>,
    /// New sport.
    pub sport_id: Option<SportId>,
    /// New member.
    pub member_id: Option<MemberId>,
    /// New slot start.
    pub booking_date: Option<DateTime<Utc>>,
    /// New price.
    pub amount: Option<Decimal>,
    /// New coupon code.
    pub coupon_code: Option<String>,
    /// New status.
    pub status: Option<BookingStatus>,
}

/// Validated input for a new transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// Booking paid for, if any.
    pub booking_id: Option<BookingId>,
    /// What the payment was for.
    pub kind: TransactionType,
    /// Amount moved.
    pub amount: Decimal,
    /// Settlement state.
    pub status: TransactionStatus,
    /// When the payment was recorded.
    pub transaction_date: DateTime<Utc>,
}

/// Partial transaction update; `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionChanges {
    /// New booking link.
    pub booking_id: Option<BookingId>,
    /// New type.
    pub kind: Option<TransactionType>,
    /// New amount.
    pub amount: Option<Decimal>,
    /// New status.
    pub status: Option<TransactionStatus>,
    /// New timestamp.
    pub transaction_date: Option<DateTime<Utc>>,
}

// ── Aggregator views ────────────────────────────────────────────────────

impl From<&MemberRow> for domain::Member {
    fn from(row: &MemberRow) -> Self {
        Self {
            id: Some(row.member_id),
            status: row.status.parse().ok(),
            is_trial_user: row.is_trial_user,
            converted_from_trial: row.converted_from_trial,
        }
    }
}

impl From<&BookingRow> for domain::Booking {
    fn from(row: &BookingRow) -> Self {
        Self {
            id: Some(row.booking_id),
            venue_id: Some(row.venue_id),
            member_id: Some(row.member_id),
            amount: row.amount,
            coupon_code: row.coupon_code.clone(),
            status: row.status.parse().ok(),
            booking_date: Some(row.booking_date),
        }
    }
}

impl From<&TransactionRow> for domain::Transaction {
    fn from(row: &TransactionRow) -> Self {
        Self {
            id: Some(row.transaction_id),
            booking_id: row.booking_id,
            kind: row.kind.parse().ok(),
            amount: row.amount,
            status: row.status.parse().ok(),
            transaction_date: Some(row.transaction_date),
        }
    }
}
