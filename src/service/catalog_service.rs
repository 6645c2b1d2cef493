//! Catalog service: CRUD over venues, sports, members, bookings, and
//! transactions.

use crate::domain::{BookingId, MemberId, SportId, TransactionId, VenueId};
use crate::error::ApiError;
use crate::persistence::models::{
    BookingChanges, BookingDetailRow, BookingRow, MemberChanges, MemberDetail, MemberRow,
    NewBooking, NewMember, NewTransaction, NewVenue, SportRow, TransactionChanges,
    TransactionDetailRow, TransactionRow, VenueChanges, VenueRow,
};
use crate::persistence::{BookingFilter, MemberFilter, PostgresRepository, TransactionFilter};

/// Orchestration layer for record CRUD.
///
/// Inputs arrive already shape-validated (see the request DTOs); this
/// layer resolves references, turns missing rows into
/// [`ApiError::NotFound`], and logs every mutation.
#[derive(Debug, Clone)]
pub struct CatalogService {
    repository: PostgresRepository,
}

impl CatalogService {
    /// Creates a new `CatalogService`.
    #[must_use]
    pub fn new(repository: PostgresRepository) -> Self {
        Self { repository }
    }

    /// Returns the underlying repository.
    #[must_use]
    pub fn repository(&self) -> &PostgresRepository {
        &self.repository
    }

    // ── Venues ──────────────────────────────────────────────────────────

    /// Lists all venues.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on query failure.
    pub async fn list_venues(&self) -> Result<Vec<VenueRow>, ApiError> {
        self.repository.list_venues().await
    }

    /// Fetches one venue.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if no such venue exists.
    pub async fn get_venue(&self, id: VenueId) -> Result<VenueRow, ApiError> {
        self.repository
            .find_venue(id)
            .await?
            .ok_or(ApiError::NotFound("Venue"))
    }

    /// Creates a venue.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on query failure.
    pub async fn create_venue(&self, venue: NewVenue) -> Result<VenueRow, ApiError> {
        let row = self.repository.insert_venue(&venue).await?;
        tracing::info!(venue_id = %row.venue_id, name = %row.name, "venue created");
        Ok(row)
    }

    /// Applies a partial update to a venue.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if no such venue exists.
    pub async fn update_venue(
        &self,
        id: VenueId,
        changes: VenueChanges,
    ) -> Result<VenueRow, ApiError> {
        let row = self
            .repository
            .update_venue(id, &changes)
            .await?
            .ok_or(ApiError::NotFound("Venue"))?;
        tracing::info!(venue_id = %id, "venue updated");
        Ok(row)
    }

    /// Deletes a venue.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if no such venue exists.
    pub async fn delete_venue(&self, id: VenueId) -> Result<VenueRow, ApiError> {
        let row = self
            .repository
            .delete_venue(id)
            .await?
            .ok_or(ApiError::NotFound("Venue"))?;
        tracing::info!(venue_id = %id, "venue deleted");
        Ok(row)
    }

    // ── Sports ──────────────────────────────────────────────────────────

    /// Lists all sports.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on query failure.
    pub async fn list_sports(&self) -> Result<Vec<SportRow>, ApiError> {
        self.repository.list_sports().await
    }

    /// Fetches one sport.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if no such sport exists.
    pub async fn get_sport(&self, id: SportId) -> Result<SportRow, ApiError> {
        self.repository
            .find_sport(id)
            .await?
            .ok_or(ApiError::NotFound("Sport"))
    }

    // ── Members ─────────────────────────────────────────────────────────

    /// Lists members matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on query failure.
    pub async fn list_members(&self, filter: &MemberFilter) -> Result<Vec<MemberRow>, ApiError> {
        self.repository.list_members(filter).await
    }

    /// Fetches a member with their bookings and transactions.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if no such member exists.
    pub async fn member_detail(&self, id: MemberId) -> Result<MemberDetail, ApiError> {
        self.repository
            .member_detail(id)
            .await?
            .ok_or(ApiError::NotFound("Member"))
    }

    /// Creates a member.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on query failure.
    pub async fn create_member(&self, member: NewMember) -> Result<MemberRow, ApiError> {
        let row = self.repository.insert_member(&member).await?;
        tracing::info!(
            member_id = %row.member_id,
            status = %row.status,
            trial = row.is_trial_user,
            "member created"
        );
        Ok(row)
    }

    /// Applies a partial update to a member.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if no such member exists.
    pub async fn update_member(
        &self,
        id: MemberId,
        changes: MemberChanges,
    ) -> Result<MemberRow, ApiError> {
        let row = self
            .repository
            .update_member(id, &changes)
            .await?
            .ok_or(ApiError::NotFound("Member"))?;
        tracing::info!(member_id = %id, "member updated");
        Ok(row)
    }

    /// Deletes a member.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if no such member exists.
    pub async fn delete_member(&self, id: MemberId) -> Result<MemberRow, ApiError> {
        let row = self
            .repository
            .delete_member(id)
            .await?
            .ok_or(ApiError::NotFound("Member"))?;
        tracing::info!(member_id = %id, "member deleted");
        Ok(row)
    }

    // ── Bookings ────────────────────────────────────────────────────────

    /// Lists bookings matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on query failure.
    pub async fn list_bookings(
        &self,
        filter: &BookingFilter,
    ) -> Result<Vec<BookingDetailRow>, ApiError> {
        self.repository.list_bookings(filter).await
    }

    /// Fetches one booking.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if no such booking exists.
    pub async fn get_booking(&self, id: BookingId) -> Result<BookingDetailRow, ApiError> {
        self.repository
            .find_booking(id)
            .await?
            .ok_or(ApiError::NotFound("Booking"))
    }

    /// Creates a booking after checking that its venue, sport, and member
    /// exist.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] naming the first missing reference.
    pub async fn create_booking(&self, booking: NewBooking) -> Result<BookingRow, ApiError> {
        self.check_booking_refs(
            Some(booking.venue_id),
            Some(booking.sport_id),
            Some(booking.member_id),
        )
        .await?;
        let row = self.repository.insert_booking(&booking).await?;
        tracing::info!(
            booking_id = %row.booking_id,
            venue_id = %row.venue_id,
            member_id = %row.member_id,
            amount = %row.amount,
            "booking created"
        );
        Ok(row)
    }

    /// Applies a partial update to a booking. Changed references must exist.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if the booking or a changed reference
    /// does not exist.
    pub async fn update_booking(
        &self,
        id: BookingId,
        changes: BookingChanges,
    ) -> Result<BookingRow, ApiError> {
        self.check_booking_refs(changes.venue_id, changes.sport_id, changes.member_id)
            .await?;
        let row = self
            .repository
            .update_booking(id, &changes)
            .await?
            .ok_or(ApiError::NotFound("Booking"))?;
        tracing::info!(booking_id = %id, status = %row.status, "booking updated");
        Ok(row)
    }

    /// Deletes a booking. Linked transactions keep their rows with the
    /// booking link cleared.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if no such booking exists.
    pub async fn delete_booking(&self, id: BookingId) -> Result<BookingRow, ApiError> {
        let row = self
            .repository
            .delete_booking(id)
            .await?
            .ok_or(ApiError::NotFound("Booking"))?;
        tracing::info!(booking_id = %id, "booking deleted");
        Ok(row)
    }

    async fn check_booking_refs(
        &self,
        venue_id: Option<VenueId>,
        sport_id: Option<SportId>,
        member_id: Option<MemberId>,
    ) -> Result<(), ApiError> {
        if let Some(id) = venue_id
            && !self.repository.venue_exists(id).await?
        {
            return Err(ApiError::NotFound("Venue"));
        }
        if let Some(id) = sport_id
            && !self.repository.sport_exists(id).await?
        {
            return Err(ApiError::NotFound("Sport"));
        }
        if let Some(id) = member_id
            && !self.repository.member_exists(id).await?
        {
            return Err(ApiError::NotFound("Member"));
        }
        Ok(())
    }

    // ── Transactions ────────────────────────────────────────────────────

    /// Lists transactions matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on query failure.
    pub async fn list_transactions(
        &self,
        filter: &TransactionFilter,
    ) -> Result<Vec<TransactionDetailRow>, ApiError> {
        self.repository.list_transactions(filter).await
    }

    /// Fetches one transaction.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if no such transaction exists.
    pub async fn get_transaction(
        &self,
        id: TransactionId,
    ) -> Result<TransactionDetailRow, ApiError> {
        self.repository
            .find_transaction(id)
            .await?
            .ok_or(ApiError::NotFound("Transaction"))
    }

    /// Creates a transaction. A linked booking must exist.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if the linked booking does not exist.
    pub async fn create_transaction(
        &self,
        tx: NewTransaction,
    ) -> Result<TransactionRow, ApiError> {
        self.check_booking_link(tx.booking_id).await?;
        let row = self.repository.insert_transaction(&tx).await?;
        tracing::info!(
            transaction_id = %row.transaction_id,
            kind = %row.kind,
            status = %row.status,
            amount = %row.amount,
            "transaction created"
        );
        Ok(row)
    }

    /// Applies a partial update to a transaction.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if the transaction or a newly linked
    /// booking does not exist.
    pub async fn update_transaction(
        &self,
        id: TransactionId,
        changes: TransactionChanges,
    ) -> Result<TransactionRow, ApiError> {
        self.check_booking_link(changes.booking_id).await?;
        let row = self
            .repository
            .update_transaction(id, &changes)
            .await?
            .ok_or(ApiError::NotFound("Transaction"))?;
        tracing::info!(transaction_id = %id, status = %row.status, "transaction updated");
        Ok(row)
    }

    /// Deletes a transaction.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if no such transaction exists.
    pub async fn delete_transaction(&self, id: TransactionId) -> Result<TransactionRow, ApiError> {
        let row = self
            .repository
            .delete_transaction(id)
            .await?
            .ok_or(ApiError::NotFound("Transaction"))?;
        tracing::info!(transaction_id = %id, "transaction deleted");
        Ok(row)
    }

    async fn check_booking_link(&self, booking_id: Option<BookingId>) -> Result<(), ApiError> {
        if let Some(id) = booking_id
            && !self.repository.booking_exists(id).await?
        {
            return Err(ApiError::NotFound("Booking"));
        }
        Ok(())
    }
}
