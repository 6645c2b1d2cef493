//! Dashboard service: loads every record set and runs the metrics
//! aggregator over it.

use std::time::Instant;

use crate::domain::{self, DashboardFilter, DashboardReport, TransactionType, metrics};
use crate::error::ApiError;
use crate::persistence::models::{BookingDetailRow, MemberRow, TransactionDetailRow, VenueRow};
use crate::persistence::{BookingFilter, MemberFilter, PostgresRepository, TransactionFilter};

/// A computed report plus the venue list the dashboard filter offers.
#[derive(Debug, Clone)]
pub struct Dashboard {
    /// Summary and revenue series.
    pub report: DashboardReport,
    /// All venues, for the venue selector.
    pub venues: Vec<VenueRow>,
}

/// Read-only service behind the dashboard endpoints.
#[derive(Debug, Clone)]
pub struct DashboardService {
    repository: PostgresRepository,
}

impl DashboardService {
    /// Creates a new `DashboardService`.
    #[must_use]
    pub fn new(repository: PostgresRepository) -> Self {
        Self { repository }
    }

    /// Fetches members, bookings, transactions, and venues concurrently and
    /// aggregates them under `filter`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] if any of the four loads fails.
    pub async fn dashboard(&self, filter: &DashboardFilter) -> Result<Dashboard, ApiError> {
        let started = Instant::now();
        let member_filter = MemberFilter::default();
        let booking_filter = BookingFilter::default();
        let transaction_filter = TransactionFilter::default();

        let (members, bookings, transactions, venues) = tokio::try_join!(
            self.repository.list_members(&member_filter),
            self.repository.list_bookings(&booking_filter),
            self.repository.list_transactions(&transaction_filter),
            self.repository.list_venues(),
        )?;

        let report = build_report(&members, &bookings, &transactions, filter);
        tracing::debug!(
            venue = %filter.venue,
            month = %filter.month,
            members = members.len(),
            bookings = bookings.len(),
            transactions = transactions.len(),
            elapsed_ms = started.elapsed().as_millis(),
            "dashboard computed"
        );

        Ok(Dashboard { report, venues })
    }

    /// All coaching transactions, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on query failure.
    pub async fn coaching_transactions(&self) -> Result<Vec<TransactionDetailRow>, ApiError> {
        let filter = TransactionFilter {
            kind: Some(TransactionType::Coaching.as_str().to_string()),
            ..TransactionFilter::default()
        };
        self.repository.list_transactions(&filter).await
    }
}

/// Converts loaded rows into aggregator views and computes the report.
#[must_use]
pub fn build_report(
    members: &[MemberRow],
    bookings: &[BookingDetailRow],
    transactions: &[TransactionDetailRow],
    filter: &DashboardFilter,
) -> DashboardReport {
    let members: Vec<domain::Member> = members.iter().map(Into::into).collect();
    let bookings: Vec<domain::Booking> = bookings.iter().map(|b| (&b.booking).into()).collect();
    let transactions: Vec<domain::Transaction> = transactions
        .iter()
        .map(|t| (&t.transaction).into())
        .collect();
    metrics::aggregate(&members, &bookings, &transactions, filter)
}
