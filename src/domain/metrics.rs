//! Dashboard metrics aggregation.
//!
//! [`aggregate`] is a pure function of the member, booking, and transaction
//! collections plus a [`DashboardFilter`]. It keeps no state between calls;
//! every dashboard request recomputes from a fresh snapshot.
//!
//! The venue filter narrows **bookings only**. Member, revenue, and refund
//! figures, as well as the revenue series, always use the full collections.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use super::ids::VenueId;
use super::month::YearMonth;
use super::records::{Booking, Member, Transaction};
use super::status::{MemberStatus, TransactionType};

/// Slots assumed per booking by the utilization figure.
///
/// Utilization is `bookings / (bookings * SLOTS_PER_BOOKING) * 100`, which
/// is always 12.5% for a non-empty booking set. Real slot capacity is not
/// modelled anywhere, so the formula is kept as-is for compatibility.
pub const SLOTS_PER_BOOKING: usize = 8;

/// Which bookings the booking-derived figures look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VenueFilter {
    /// Every venue.
    #[default]
    All,
    /// A single venue.
    Venue(VenueId),
}

impl VenueFilter {
    /// Whether a booking at `venue_id` passes the filter.
    #[must_use]
    pub fn matches(self, venue_id: Option<VenueId>) -> bool {
        match self {
            Self::All => true,
            Self::Venue(wanted) => venue_id == Some(wanted),
        }
    }
}

impl fmt::Display for VenueFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Venue(id) => write!(f, "{id}"),
        }
    }
}

/// Rejection for a venue filter that is neither `all` nor a venue id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("venue must be 'all' or a numeric venue id, got '{0}'")]
pub struct InvalidVenueFilter(pub String);

impl FromStr for VenueFilter {
    type Err = InvalidVenueFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse::<VenueId>()
            .map(Self::Venue)
            .map_err(|_| InvalidVenueFilter(s.to_string()))
    }
}

/// Selection applied to a dashboard computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardFilter {
    /// Venue narrowing for booking-derived figures.
    pub venue: VenueFilter,
    /// Month covered by the revenue series.
    pub month: YearMonth,
}

/// Headline figures shown on the dashboard cards.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Summary {
    /// Members with status Active.
    pub active_members: usize,
    /// Members with status Inactive.
    pub inactive_members: usize,
    /// Converted members as a percentage of trial members.
    pub trial_conversion_rate: f64,
    /// Successful coaching payments.
    pub coaching_revenue: Decimal,
    /// Successful booking payments.
    pub booking_revenue: Decimal,
    /// `coaching_revenue + booking_revenue`.
    pub total_revenue: Decimal,
    /// Bookings passing the venue filter.
    pub bookings_count: usize,
    /// See [`SLOTS_PER_BOOKING`].
    pub slots_utilization: f64,
    /// Filtered bookings with a coupon applied.
    pub coupon_redemption: usize,
    /// Members with more than one filtered booking, as a percentage of the
    /// filtered booking count.
    pub repeat_booking_rate: f64,
    /// Transactions that were refunded or disputed.
    pub refunds_disputes: usize,
}

/// Revenue settled on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct RevenuePoint {
    /// Calendar day (UTC).
    pub date: NaiveDate,
    /// Sum of successful transaction amounts on that day.
    pub revenue: Decimal,
}

/// Output of one dashboard computation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    /// The filter the report was computed with.
    #[serde(skip)]
    pub filter: DashboardFilter,
    /// Headline figures.
    pub summary: Summary,
    /// One point per day of the filter month, ascending.
    pub revenue_series: Vec<RevenuePoint>,
}

/// Computes the summary and revenue series for `filter`.
#[must_use]
pub fn aggregate(
    members: &[Member],
    bookings: &[Booking],
    transactions: &[Transaction],
    filter: &DashboardFilter,
) -> DashboardReport {
    DashboardReport {
        filter: *filter,
        summary: summarize(members, bookings, transactions, filter.venue),
        revenue_series: revenue_series(transactions, filter.month),
    }
}

/// Computes the headline figures.
///
/// Revenue sums saturate at [`Decimal::MAX`].
#[must_use]
pub fn summarize(
    members: &[Member],
    bookings: &[Booking],
    transactions: &[Transaction],
    venue: VenueFilter,
) -> Summary {
    let active_members = count_status(members, MemberStatus::Active);
    let inactive_members = count_status(members, MemberStatus::Inactive);

    let trial_users = members.iter().filter(|m| m.is_trial_user).count();
    let converted = members.iter().filter(|m| m.converted_from_trial).count();

    let coaching_revenue = realized_revenue(transactions, TransactionType::Coaching);
    let booking_revenue = realized_revenue(transactions, TransactionType::Booking);

    let refunds_disputes = transactions
        .iter()
        .filter(|t| t.status.is_some_and(|s| s.is_refund_or_dispute()))
        .count();

    let filtered = filter_bookings(bookings, venue);
    let bookings_count = filtered.len();
    let coupon_redemption = filtered.iter().filter(|b| b.has_coupon()).count();

    Summary {
        active_members,
        inactive_members,
        trial_conversion_rate: percentage(converted, trial_users),
        coaching_revenue,
        booking_revenue,
        total_revenue: coaching_revenue.saturating_add(booking_revenue),
        bookings_count,
        slots_utilization: percentage(bookings_count, bookings_count * SLOTS_PER_BOOKING),
        coupon_redemption,
        repeat_booking_rate: percentage(repeat_members(&filtered), bookings_count),
        refunds_disputes,
    }
}

/// Bookings that pass the venue filter, in input order.
#[must_use]
pub fn filter_bookings(bookings: &[Booking], venue: VenueFilter) -> Vec<&Booking> {
    bookings
        .iter()
        .filter(|b| venue.matches(b.venue_id))
        .collect()
}

/// Daily revenue for every day of `month`.
///
/// Every successful transaction dated inside the month contributes,
/// regardless of type or venue. Refund-type payments with a Success status
/// are charted even though the summary revenue leaves them out. Days without revenue are zero, so the
/// series always has one point per calendar day.
#[must_use]
pub fn revenue_series(transactions: &[Transaction], month: YearMonth) -> Vec<RevenuePoint> {
    let mut by_day: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for tx in transactions.iter().filter(|t| t.is_success()) {
        let Some(day) = tx.transaction_date.map(|ts| ts.date_naive()) else {
            continue;
        };
        if month.contains(day) {
            let bucket = by_day.entry(day).or_default();
            *bucket = bucket.saturating_add(tx.amount);
        }
    }

    month
        .days()
        .map(|date| RevenuePoint {
            date,
            revenue: by_day.get(&date).copied().unwrap_or_default(),
        })
        .collect()
}

fn count_status(members: &[Member], status: MemberStatus) -> usize {
    members.iter().filter(|m| m.status == Some(status)).count()
}

fn realized_revenue(transactions: &[Transaction], kind: TransactionType) -> Decimal {
    transactions
        .iter()
        .filter(|t| t.kind == Some(kind) && t.is_success())
        .fold(Decimal::ZERO, |total, t| total.saturating_add(t.amount))
}

/// Members appearing on more than one booking. Bookings without a member
/// id are grouped together.
fn repeat_members(bookings: &[&Booking]) -> usize {
    let mut per_member: HashMap<_, usize> = HashMap::new();
    for booking in bookings {
        *per_member.entry(booking.member_id).or_default() += 1;
    }
    per_member.values().filter(|&&count| count > 1).count()
}

/// `100 * part / whole`, or `0` when `whole` is zero.
#[allow(clippy::cast_precision_loss)]
fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::indexing_slicing)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};
    use rust_decimal_macros::dec;

    use super::*;
    use crate::domain::ids::MemberId;
    use crate::domain::status::TransactionStatus;

    fn member(status: MemberStatus, trial: bool, converted: bool) -> Member {
        Member {
            id: None,
            status: Some(status),
            is_trial_user: trial,
            converted_from_trial: converted,
        }
    }

    fn booking(venue: i32, member: i32, coupon: Option<&str>) -> Booking {
        Booking {
            id: None,
            venue_id: Some(VenueId::new(venue)),
            member_id: Some(MemberId::new(member)),
            amount: dec!(800),
            coupon_code: coupon.map(str::to_string),
            status: None,
            booking_date: None,
        }
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> Option<DateTime<Utc>> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).single()
    }

    fn tx(
        kind: TransactionType,
        status: TransactionStatus,
        amount: Decimal,
        date: Option<DateTime<Utc>>,
    ) -> Transaction {
        Transaction {
            id: None,
            booking_id: None,
            kind: Some(kind),
            amount,
            status: Some(status),
            transaction_date: date,
        }
    }

    fn month(s: &str) -> YearMonth {
        let Ok(m) = s.parse() else {
            panic!("invalid month {s}");
        };
        m
    }

    #[test]
    fn counts_members_by_status() {
        let members = vec![
            member(MemberStatus::Active, false, false),
            member(MemberStatus::Active, false, false),
            member(MemberStatus::Active, false, false),
            member(MemberStatus::Inactive, false, false),
            member(MemberStatus::Inactive, false, false),
        ];
        let s = summarize(&members, &[], &[], VenueFilter::All);
        assert_eq!((s.active_members, s.inactive_members), (3, 2));
    }

    #[test]
    fn members_with_unreadable_status_count_as_neither() {
        let mut unknown = member(MemberStatus::Active, false, false);
        unknown.status = None;
        let s = summarize(&[unknown], &[], &[], VenueFilter::All);
        assert_eq!((s.active_members, s.inactive_members), (0, 0));
    }

    #[test]
    fn trial_conversion_rate() {
        let members = vec![
            member(MemberStatus::Active, true, true),
            member(MemberStatus::Active, true, false),
            member(MemberStatus::Inactive, true, false),
            member(MemberStatus::Active, true, true),
            member(MemberStatus::Active, false, false),
        ];
        let s = summarize(&members, &[], &[], VenueFilter::All);
        assert!((s.trial_conversion_rate - 50.0).abs() < 1e-9);
    }

    #[test]
    fn trial_conversion_rate_is_zero_without_trials() {
        let members = vec![member(MemberStatus::Active, false, true)];
        let s = summarize(&members, &[], &[], VenueFilter::All);
        assert_eq!(s.trial_conversion_rate, 0.0);
    }

    #[test]
    fn revenue_counts_only_successful_payments() {
        let transactions = vec![
            tx(TransactionType::Coaching, TransactionStatus::Success, dec!(500), None),
            tx(TransactionType::Coaching, TransactionStatus::Failed, dec!(300), None),
            tx(TransactionType::Booking, TransactionStatus::Success, dec!(1200.50), None),
            tx(TransactionType::Booking, TransactionStatus::Pending, dec!(99), None),
            tx(TransactionType::Refund, TransactionStatus::Success, dec!(400), None),
        ];
        let s = summarize(&[], &[], &transactions, VenueFilter::All);
        assert_eq!(s.coaching_revenue, dec!(500));
        assert_eq!(s.booking_revenue, dec!(1200.50));
        assert_eq!(s.total_revenue, s.coaching_revenue + s.booking_revenue);
    }

    #[test]
    fn refunds_and_disputes_are_counted_across_types() {
        let transactions = vec![
            tx(TransactionType::Booking, TransactionStatus::Refunded, dec!(10), None),
            tx(TransactionType::Refund, TransactionStatus::Refunded, dec!(10), None),
            tx(TransactionType::Coaching, TransactionStatus::Dispute, dec!(10), None),
            tx(TransactionType::Booking, TransactionStatus::Success, dec!(10), None),
        ];
        let s = summarize(&[], &[], &transactions, VenueFilter::All);
        assert_eq!(s.refunds_disputes, 3);
    }

    #[test]
    fn repeat_booking_rate_uses_booking_count_as_denominator() {
        let bookings = vec![booking(1, 1, None), booking(1, 1, None), booking(1, 2, None)];
        let s = summarize(&[], &bookings, &[], VenueFilter::All);
        assert!((s.repeat_booking_rate - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn repeat_booking_rate_single_repeat_member() {
        let bookings = vec![booking(1, 4, None), booking(2, 4, None)];
        let s = summarize(&[], &bookings, &[], VenueFilter::All);
        assert!((s.repeat_booking_rate - 50.0).abs() < 1e-9);

        let only = vec![booking(1, 4, None), booking(2, 4, None)];
        let s = summarize(&[], &only[..1], &[], VenueFilter::All);
        assert_eq!(s.repeat_booking_rate, 0.0);
    }

    #[test]
    fn empty_bookings_give_zero_rates() {
        let s = summarize(&[], &[], &[], VenueFilter::All);
        assert_eq!(s.bookings_count, 0);
        assert_eq!(s.repeat_booking_rate, 0.0);
        assert_eq!(s.slots_utilization, 0.0);
        assert!(!s.repeat_booking_rate.is_nan());
    }

    #[test]
    fn slots_utilization_is_constant_for_any_bookings() {
        for n in [1_usize, 3, 40] {
            let bookings: Vec<Booking> = (0..n)
                .map(|i| booking(1, i32::try_from(i).unwrap_or(0), None))
                .collect();
            let s = summarize(&[], &bookings, &[], VenueFilter::All);
            assert!((s.slots_utilization - 12.5).abs() < 1e-9);
        }
    }

    #[test]
    fn venue_filter_narrows_bookings_only() {
        let bookings = vec![
            booking(1, 1, Some("SUMMER10")),
            booking(1, 1, Some("")),
            booking(2, 2, Some("WELCOME")),
            booking(2, 3, None),
        ];
        let transactions = vec![
            tx(TransactionType::Booking, TransactionStatus::Success, dec!(700), None),
            tx(TransactionType::Booking, TransactionStatus::Dispute, dec!(700), None),
        ];
        let members = vec![member(MemberStatus::Active, false, false)];

        let all = summarize(&members, &bookings, &transactions, VenueFilter::All);
        let one = summarize(
            &members,
            &bookings,
            &transactions,
            VenueFilter::Venue(VenueId::new(1)),
        );

        assert_eq!((all.bookings_count, one.bookings_count), (4, 2));
        assert_eq!((all.coupon_redemption, one.coupon_redemption), (2, 1));
        assert!((one.repeat_booking_rate - 50.0).abs() < 1e-9);
        assert!((all.repeat_booking_rate - 25.0).abs() < 1e-9);

        assert_eq!(all.booking_revenue, one.booking_revenue);
        assert_eq!(all.refunds_disputes, one.refunds_disputes);
        assert_eq!(all.active_members, one.active_members);
    }

    #[test]
    fn venue_filter_without_matches_is_empty() {
        let bookings = vec![booking(1, 1, Some("X"))];
        let s = summarize(&[], &bookings, &[], VenueFilter::Venue(VenueId::new(9)));
        assert_eq!(s.bookings_count, 0);
        assert_eq!(s.coupon_redemption, 0);
        assert_eq!(s.repeat_booking_rate, 0.0);
    }

    #[test]
    fn venue_filter_parses_all_or_id() {
        assert_eq!("all".parse::<VenueFilter>(), Ok(VenueFilter::All));
        assert_eq!("".parse::<VenueFilter>(), Ok(VenueFilter::All));
        assert_eq!(
            "3".parse::<VenueFilter>(),
            Ok(VenueFilter::Venue(VenueId::new(3)))
        );
        assert!("court-a".parse::<VenueFilter>().is_err());
    }

    #[test]
    fn revenue_series_has_one_point_per_day() {
        for (m, days) in [("2024-02", 29), ("2023-02", 28), ("2024-04", 30), ("2024-12", 31)] {
            let series = revenue_series(&[], month(m));
            assert_eq!(series.len(), days);
            assert!(series.iter().all(|p| p.revenue == Decimal::ZERO));
        }
    }

    #[test]
    fn revenue_series_buckets_successful_payments_by_day() {
        let transactions = vec![
            tx(TransactionType::Booking, TransactionStatus::Success, dec!(800), at(2024, 3, 5, 9)),
            tx(TransactionType::Coaching, TransactionStatus::Success, dec!(500), at(2024, 3, 5, 18)),
            tx(TransactionType::Booking, TransactionStatus::Failed, dec!(900), at(2024, 3, 5, 10)),
            tx(TransactionType::Booking, TransactionStatus::Success, dec!(650), at(2024, 3, 31, 23)),
            tx(TransactionType::Booking, TransactionStatus::Success, dec!(999), at(2024, 4, 1, 0)),
            tx(TransactionType::Booking, TransactionStatus::Success, dec!(111), at(2023, 3, 5, 9)),
            tx(TransactionType::Booking, TransactionStatus::Success, dec!(222), None),
        ];
        let series = revenue_series(&transactions, month("2024-03"));

        assert_eq!(series.len(), 31);
        assert_eq!(series[4].date, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap_or_default());
        assert_eq!(series[4].revenue, dec!(1300));
        assert_eq!(series[30].revenue, dec!(650));
        assert_eq!(series[0].revenue, Decimal::ZERO);

        let total: Decimal = series.iter().map(|p| p.revenue).sum();
        assert_eq!(total, dec!(1950));
    }

    #[test]
    fn revenue_series_reconciles_with_summary_revenue() {
        let transactions = vec![
            tx(TransactionType::Booking, TransactionStatus::Success, dec!(800), at(2024, 6, 1, 9)),
            tx(TransactionType::Coaching, TransactionStatus::Success, dec!(1500), at(2024, 6, 14, 9)),
            tx(TransactionType::Coaching, TransactionStatus::Refunded, dec!(1500), at(2024, 6, 15, 9)),
        ];
        let filter = DashboardFilter {
            venue: VenueFilter::All,
            month: month("2024-06"),
        };
        let report = aggregate(&[], &[], &transactions, &filter);
        let charted: Decimal = report.revenue_series.iter().map(|p| p.revenue).sum();
        assert_eq!(charted, report.summary.total_revenue);
    }

    #[test]
    fn revenue_series_ignores_venue_filter() {
        let transactions = vec![tx(
            TransactionType::Booking,
            TransactionStatus::Success,
            dec!(800),
            at(2024, 6, 1, 9),
        )];
        let all = aggregate(
            &[],
            &[],
            &transactions,
            &DashboardFilter {
                venue: VenueFilter::All,
                month: month("2024-06"),
            },
        );
        let narrowed = aggregate(
            &[],
            &[],
            &transactions,
            &DashboardFilter {
                venue: VenueFilter::Venue(VenueId::new(2)),
                month: month("2024-06"),
            },
        );
        assert_eq!(all.revenue_series, narrowed.revenue_series);
    }

    #[test]
    fn revenue_series_charts_successful_refund_payments() {
        let transactions = vec![tx(
            TransactionType::Refund,
            TransactionStatus::Success,
            dec!(400),
            at(2024, 3, 5, 11),
        )];
        let filter = DashboardFilter {
            venue: VenueFilter::All,
            month: month("2024-03"),
        };
        let report = aggregate(&[], &[], &transactions, &filter);
        assert_eq!(report.revenue_series[4].revenue, dec!(400));
        let charted: Decimal = report.revenue_series.iter().map(|p| p.revenue).sum();
        assert_eq!(charted, dec!(400));
        assert_eq!(report.summary.total_revenue, Decimal::ZERO);
    }

    #[test]
    fn revenue_sums_saturate_instead_of_overflowing() {
        let Ok(transactions) = serde_json::from_str::<Vec<Transaction>>(
            r#"[
                {"type": "Booking", "status": "Success", "amount": "79228162514264337593543950335",
                 "transaction_date": "2024-03-05T09:00:00Z"},
                {"type": "Booking", "status": "Success", "amount": "1",
                 "transaction_date": "2024-03-05T10:00:00Z"},
                {"type": "Coaching", "status": "Success", "amount": "79228162514264337593543950335"}
            ]"#,
        ) else {
            panic!("transactions must deserialize");
        };
        let filter = DashboardFilter {
            venue: VenueFilter::All,
            month: month("2024-03"),
        };
        let report = aggregate(&[], &[], &transactions, &filter);
        assert_eq!(report.summary.booking_revenue, Decimal::MAX);
        assert_eq!(report.summary.coaching_revenue, Decimal::MAX);
        assert_eq!(report.summary.total_revenue, Decimal::MAX);
        assert_eq!(report.revenue_series[4].revenue, Decimal::MAX);
    }
}
