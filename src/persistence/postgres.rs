//! PostgreSQL repository for venues, sports, members, bookings, and
//! transactions.

use sqlx::PgPool;

use super::models::{
    BookingChanges, BookingDetailRow, BookingRow, MemberChanges, MemberDetail, MemberRow,
    NewBooking, NewMember, NewTransaction, NewVenue, SportRow, TransactionChanges,
    TransactionDetailRow, TransactionRow, VenueChanges, VenueRow,
};
use super::queries::{
    BOOKING_DETAIL_SELECT, BookingFilter, MemberFilter, TRANSACTION_DETAIL_SELECT,
    TransactionFilter, bookings_query, members_query, transactions_query,
};
use crate::domain::{BookingId, MemberId, SportId, TransactionId, VenueId};
use crate::error::ApiError;

/// PostgreSQL-backed repository using `sqlx::PgPool`.
///
/// Cloning is cheap: the pool is reference counted internally.
#[derive(Debug, Clone)]
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    /// Creates a repository over the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns the underlying pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs a trivial query to check connectivity.
    pub async fn ping(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }

    // ── Venues ──────────────────────────────────────────────────────────

    /// Lists all venues ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on query failure.
    pub async fn list_venues(&self) -> Result<Vec<VenueRow>, ApiError> {
        sqlx::query_as::<_, VenueRow>("SELECT * FROM venues ORDER BY venue_id")
            .fetch_all(&self.pool)
            .await
            .map_err(ApiError::database("Failed to fetch venues"))
    }

    /// Looks up a venue by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on query failure.
    pub async fn find_venue(&self, id: VenueId) -> Result<Option<VenueRow>, ApiError> {
        sqlx::query_as::<_, VenueRow>("SELECT * FROM venues WHERE venue_id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(ApiError::database("Failed to fetch venue"))
    }

    /// Inserts a venue.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on query failure.
    pub async fn insert_venue(&self, venue: &NewVenue) -> Result<VenueRow, ApiError> {
        sqlx::query_as::<_, VenueRow>(
            "INSERT INTO venues (name, location) VALUES ($1, $2) RETURNING *",
        )
        .bind(&venue.name)
        .bind(&venue.location)
        .fetch_one(&self.pool)
        .await
        .map_err(ApiError::database("Failed to create venue"))
    }

    /// Applies a partial update. Returns `None` if the venue does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on query failure.
    pub async fn update_venue(
        &self,
        id: VenueId,
        changes: &VenueChanges,
    ) -> Result<Option<VenueRow>, ApiError> {
        sqlx::query_as::<_, VenueRow>(
            "UPDATE venues SET name = COALESCE($1, name), location = COALESCE($2, location) \
             WHERE venue_id = $3 RETURNING *",
        )
        .bind(changes.name.as_deref())
        .bind(changes.location.as_deref())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(ApiError::database("Failed to update venue"))
    }

    /// Deletes a venue, returning the removed row.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on query failure.
    pub async fn delete_venue(&self, id: VenueId) -> Result<Option<VenueRow>, ApiError> {
        sqlx::query_as::<_, VenueRow>("DELETE FROM venues WHERE venue_id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(ApiError::database("Failed to delete venue"))
    }

    // ── Sports ──────────────────────────────────────────────────────────

    /// Lists all sports ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on query failure.
    pub async fn list_sports(&self) -> Result<Vec<SportRow>, ApiError> {
        sqlx::query_as::<_, SportRow>("SELECT * FROM sports ORDER BY sport_id")
            .fetch_all(&self.pool)
            .await
            .map_err(ApiError::database("Failed to fetch sports"))
    }

    /// Looks up a sport by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on query failure.
    pub async fn find_sport(&self, id: SportId) -> Result<Option<SportRow>, ApiError> {
        sqlx::query_as::<_, SportRow>("SELECT * FROM sports WHERE sport_id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(ApiError::database("Failed to fetch sport"))
    }

    // ── Members ─────────────────────────────────────────────────────────

    /// Lists members matching `filter`, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on query failure.
    pub async fn list_members(&self, filter: &MemberFilter) -> Result<Vec<MemberRow>, ApiError> {
        members_query(filter)
            .build_query_as::<MemberRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(ApiError::database("Failed to fetch members"))
    }

    /// Looks up a member by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on query failure.
    pub async fn find_member(&self, id: MemberId) -> Result<Option<MemberRow>, ApiError> {
        sqlx::query_as::<_, MemberRow>("SELECT * FROM members WHERE member_id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(ApiError::database("Failed to fetch member"))
    }

    /// Loads a member with their bookings and the transactions on them.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on query failure.
    pub async fn member_detail(&self, id: MemberId) -> Result<Option<MemberDetail>, ApiError> {
        let Some(member) = self.find_member(id).await? else {
            return Ok(None);
        };

        let bookings = self
            .list_bookings(&BookingFilter {
                member_id: Some(id),
                ..BookingFilter::default()
            })
            .await?;

        let transactions = sqlx::query_as::<_, TransactionRow>(
            "SELECT t.* FROM transactions t \
             JOIN bookings b ON t.booking_id = b.booking_id \
             WHERE b.member_id = $1 ORDER BY t.transaction_date DESC",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(ApiError::database("Failed to fetch member"))?;

        Ok(Some(MemberDetail {
            member,
            bookings,
            transactions,
        }))
    }

    /// Inserts a member.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on query failure.
    pub async fn insert_member(&self, member: &NewMember) -> Result<MemberRow, ApiError> {
        sqlx::query_as::<_, MemberRow>(
            "INSERT INTO members (name, status, is_trial_user, converted_from_trial, join_date) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(&member.name)
        .bind(member.status.as_str())
        .bind(member.is_trial_user)
        .bind(member.converted_from_trial)
        .bind(member.join_date)
        .fetch_one(&self.pool)
        .await
        .map_err(ApiError::database("Failed to create member"))
    }

    /// Applies a partial update. Returns `None` if the member does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on query failure.
    pub async fn update_member(
        &self,
        id: MemberId,
        changes: &MemberChanges,
    ) -> Result<Option<MemberRow>, ApiError> {
        sqlx::query_as::<_, MemberRow>(
            "UPDATE members SET name = COALESCE($1, name), status = COALESCE($2, status), \
             is_trial_user = COALESCE($3, is_trial_user), \
             converted_from_trial = COALESCE($4, converted_from_trial), \
             join_date = COALESCE($5, join_date) \
             WHERE member_id = $6 RETURNING *",
        )
        .bind(changes.name.as_deref())
        .bind(changes.status.map(|s| s.as_str()))
        .bind(changes.is_trial_user)
        .bind(changes.converted_from_trial)
        .bind(changes.join_date)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(ApiError::database("Failed to update member"))
    }

    /// Deletes a member, returning the removed row.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on query failure.
    pub async fn delete_member(&self, id: MemberId) -> Result<Option<MemberRow>, ApiError> {
        sqlx::query_as::<_, MemberRow>("DELETE FROM members WHERE member_id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(ApiError::database("Failed to delete member"))
    }

    // ── Bookings ────────────────────────────────────────────────────────

    /// Lists bookings matching `filter`, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on query failure.
    pub async fn list_bookings(
        &self,
        filter: &BookingFilter,
    ) -> Result<Vec<BookingDetailRow>, ApiError> {
        bookings_query(filter)
            .build_query_as::<BookingDetailRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(ApiError::database("Failed to fetch bookings"))
    }

    /// Looks up a booking with its joined names and the member's status.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on query failure.
    pub async fn find_booking(&self, id: BookingId) -> Result<Option<BookingDetailRow>, ApiError> {
        let sql = format!(
            "{} WHERE b.booking_id = $1",
            BOOKING_DETAIL_SELECT.replacen(
                " FROM bookings b",
                ", m.status AS member_status FROM bookings b",
                1
            )
        );
        sqlx::query_as::<_, BookingDetailRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(ApiError::database("Failed to fetch booking"))
    }

    /// Whether a booking with this id exists.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on query failure.
    pub async fn booking_exists(&self, id: BookingId) -> Result<bool, ApiError> {
        self.exists("bookings", "booking_id", id.get(), "Failed to fetch booking")
            .await
    }

    /// Whether a venue with this id exists.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on query failure.
    pub async fn venue_exists(&self, id: VenueId) -> Result<bool, ApiError> {
        self.exists("venues", "venue_id", id.get(), "Failed to fetch venue")
            .await
    }

    /// Whether a sport with this id exists.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on query failure.
    pub async fn sport_exists(&self, id: SportId) -> Result<bool, ApiError> {
        self.exists("sports", "sport_id", id.get(), "Failed to fetch sport")
            .await
    }

    /// Whether a member with this id exists.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on query failure.
    pub async fn member_exists(&self, id: MemberId) -> Result<bool, ApiError> {
        self.exists("members", "member_id", id.get(), "Failed to fetch member")
            .await
    }

    async fn exists(
        &self,
        table: &'static str,
        key: &'static str,
        id: i32,
        action: &'static str,
    ) -> Result<bool, ApiError> {
        let sql = format!("SELECT EXISTS (SELECT 1 FROM {table} WHERE {key} = $1)");
        sqlx::query_scalar::<_, bool>(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(ApiError::database(action))
    }

    /// Inserts a booking.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on query failure.
    pub async fn insert_booking(&self, booking: &NewBooking) -> Result<BookingRow, ApiError> {
        sqlx::query_as::<_, BookingRow>(
            "INSERT INTO bookings \
             (venue_id, sport_id, member_id, booking_date, amount, coupon_code, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(booking.venue_id)
        .bind(booking.sport_id)
        .bind(booking.member_id)
        .bind(booking.booking_date)
        .bind(booking.amount)
        .bind(booking.coupon_code.as_deref())
        .bind(booking.status.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(ApiError::database("Failed to create booking"))
    }

    /// Applies a partial update. Returns `None` if the booking does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on query failure.
    pub async fn update_booking(
        &self,
        id: BookingId,
        changes: &BookingChanges,
    ) -> Result<Option<BookingRow>, ApiError> {
        sqlx::query_as::<_, BookingRow>(
            "UPDATE bookings SET venue_id = COALESCE($1, venue_id), \
             sport_id = COALESCE($2, sport_id), member_id = COALESCE($3, member_id), \
             booking_date = COALESCE($4, booking_date), amount = COALESCE($5, amount), \
             coupon_code = COALESCE($6, coupon_code), status = COALESCE($7, status) \
             WHERE booking_id = $8 RETURNING *",
        )
        .bind(changes.venue_id)
        .bind(changes.sport_id)
        .bind(changes.member_id)
        .bind(changes.booking_date)
        .bind(changes.amount)
        .bind(changes.coupon_code.as_deref())
        .bind(changes.status.map(|s| s.as_str()))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(ApiError::database("Failed to update booking"))
    }

    /// Deletes a booking, returning the removed row.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on query failure.
    pub async fn delete_booking(&self, id: BookingId) -> Result<Option<BookingRow>, ApiError> {
        sqlx::query_as::<_, BookingRow>("DELETE FROM bookings WHERE booking_id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(ApiError::database("Failed to delete booking"))
    }

    // ── Transactions ────────────────────────────────────────────────────

    /// Lists transactions matching `filter`, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on query failure.
    pub async fn list_transactions(
        &self,
        filter: &TransactionFilter,
    ) -> Result<Vec<TransactionDetailRow>, ApiError> {
        transactions_query(filter)
            .build_query_as::<TransactionDetailRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(ApiError::database("Failed to fetch transactions"))
    }

    /// Looks up a transaction with its joined booking data.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on query failure.
    pub async fn find_transaction(
        &self,
        id: TransactionId,
    ) -> Result<Option<TransactionDetailRow>, ApiError> {
        let sql = format!("{TRANSACTION_DETAIL_SELECT} WHERE t.transaction_id = $1");
        sqlx::query_as::<_, TransactionDetailRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(ApiError::database("Failed to fetch transaction"))
    }

    /// Inserts a transaction.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on query failure.
    pub async fn insert_transaction(
        &self,
        tx: &NewTransaction,
    ) -> Result<TransactionRow, ApiError> {
        sqlx::query_as::<_, TransactionRow>(
            "INSERT INTO transactions (booking_id, type, amount, status, transaction_date) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(tx.booking_id)
        .bind(tx.kind.as_str())
        .bind(tx.amount)
        .bind(tx.status.as_str())
        .bind(tx.transaction_date)
        .fetch_one(&self.pool)
        .await
        .map_err(ApiError::database("Failed to create transaction"))
    }

    /// Applies a partial update. Returns `None` if the transaction does not
    /// exist.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on query failure.
    pub async fn update_transaction(
        &self,
        id: TransactionId,
        changes: &TransactionChanges,
    ) -> Result<Option<TransactionRow>, ApiError> {
        sqlx::query_as::<_, TransactionRow>(
            "UPDATE transactions SET booking_id = COALESCE($1, booking_id), \
             type = COALESCE($2, type), amount = COALESCE($3, amount), \
             status = COALESCE($4, status), \
             transaction_date = COALESCE($5, transaction_date) \
             WHERE transaction_id = $6 RETURNING *",
        )
        .bind(changes.booking_id)
        .bind(changes.kind.map(|k| k.as_str()))
        .bind(changes.amount)
        .bind(changes.status.map(|s| s.as_str()))
        .bind(changes.transaction_date)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(ApiError::database("Failed to update transaction"))
    }

    /// Deletes a transaction, returning the removed row.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on query failure.
    pub async fn delete_transaction(
        &self,
        id: TransactionId,
    ) -> Result<Option<TransactionRow>, ApiError> {
        sqlx::query_as::<_, TransactionRow>(
            "DELETE FROM transactions WHERE transaction_id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(ApiError::database("Failed to delete transaction"))
    }
}
