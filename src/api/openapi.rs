//! OpenAPI document for every REST endpoint.

use utoipa::OpenApi;

use super::dto::{
    BookingRequest, DashboardResponse, MemberRequest, RevenuePointDto, TransactionRequest,
    VenueRequest,
};
use super::handlers::{booking, dashboard, member, sport, system, transaction, venue};
use crate::domain::{BookingStatus, MemberStatus, Summary, TransactionStatus, TransactionType};
use crate::error::ErrorResponse;
use crate::persistence::models::{
    BookingDetailRow, BookingRow, MemberDetail, MemberRow, SportRow, TransactionDetailRow,
    TransactionRow, VenueRow,
};

/// Generated OpenAPI document, served at `/api-docs/openapi.json`.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "playdesk",
        description = "Sports-venue booking administration: venues, members, bookings, transactions, and dashboard metrics."
    ),
    paths(
        system::root_handler,
        system::health_handler,
        venue::list_venues,
        venue::get_venue,
        venue::create_venue,
        venue::update_venue,
        venue::delete_venue,
        sport::list_sports,
        sport::get_sport,
        member::list_members,
        member::get_member,
        member::create_member,
        member::update_member,
        member::delete_member,
        booking::list_bookings,
        booking::get_booking,
        booking::create_booking,
        booking::update_booking,
        booking::delete_booking,
        transaction::list_transactions,
        transaction::get_transaction,
        transaction::create_transaction,
        transaction::update_transaction,
        transaction::delete_transaction,
        dashboard::get_dashboard,
        dashboard::list_coaching,
    ),
    components(schemas(
        ErrorResponse,
        VenueRow,
        SportRow,
        MemberRow,
        MemberDetail,
        BookingRow,
        BookingDetailRow,
        TransactionRow,
        TransactionDetailRow,
        VenueRequest,
        MemberRequest,
        BookingRequest,
        TransactionRequest,
        DashboardResponse,
        RevenuePointDto,
        Summary,
        MemberStatus,
        BookingStatus,
        TransactionType,
        TransactionStatus,
    )),
    tags(
        (name = "System", description = "Banner and health"),
        (name = "Venues", description = "Venue CRUD"),
        (name = "Sports", description = "Sport catalogue (read only)"),
        (name = "Members", description = "Member CRUD and detail"),
        (name = "Bookings", description = "Booking CRUD"),
        (name = "Transactions", description = "Payment records"),
        (name = "Dashboard", description = "Aggregated metrics"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_resource() {
        let doc = ApiDoc::openapi();
        for path in [
            "/",
            "/health",
            "/api/venues/{id}",
            "/api/sports",
            "/api/members/{id}",
            "/api/bookings",
            "/api/transactions/{id}",
            "/api/dashboard",
            "/api/dashboard/coaching",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
