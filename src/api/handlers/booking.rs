//! Booking handlers: filtered list, get, create, update, delete.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{ApiEnvelope, BookingListParams, BookingRequest};
use crate::app_state::AppState;
use crate::domain::BookingId;
use crate::error::{ApiError, ErrorResponse};
use crate::persistence::models::{BookingDetailRow, BookingRow};

/// `GET /api/bookings` — List bookings, newest first.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] for an unreadable date bound.
#[utoipa::path(
    get,
    path = "/api/bookings",
    tag = "Bookings",
    summary = "List bookings",
    description = "Bookings joined with venue, sport, and member names. `start_date` and `end_date` bound `booking_date` inclusively.",
    params(BookingListParams),
    responses(
        (status = 200, description = "Matching bookings", body = ApiEnvelope<Vec<BookingDetailRow>>),
        (status = 400, description = "Invalid filter", body = ErrorResponse),
    )
)]
pub async fn list_bookings(
    State(state): State<AppState>,
    params: Result<Query<BookingListParams>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(params) = params?;
    let bookings = state.catalog.list_bookings(&params.into_filter()?).await?;
    Ok(Json(ApiEnvelope::list(bookings)))
}

/// `GET /api/bookings/{id}` — Get one booking.
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] if the booking does not exist.
#[utoipa::path(
    get,
    path = "/api/bookings/{id}",
    tag = "Bookings",
    summary = "Get a booking",
    params(("id" = i32, Path, description = "Booking id")),
    responses(
        (status = 200, description = "Booking with joined names and member status", body = ApiEnvelope<BookingDetailRow>),
        (status = 404, description = "Booking not found", body = ErrorResponse),
    )
)]
pub async fn get_booking(
    State(state): State<AppState>,
    id: Result<Path<BookingId>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = id?;
    let booking = state.catalog.get_booking(id).await?;
    Ok(Json(ApiEnvelope::ok(booking)))
}

/// `POST /api/bookings` — Create a booking.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] for missing or invalid fields and
/// [`ApiError::NotFound`] for an unknown venue, sport, or member.
#[utoipa::path(
    post,
    path = "/api/bookings",
    tag = "Bookings",
    summary = "Create a booking",
    request_body = BookingRequest,
    responses(
        (status = 201, description = "Booking created", body = ApiEnvelope<BookingRow>),
        (status = 400, description = "Missing or invalid field", body = ErrorResponse),
        (status = 404, description = "Venue, sport, or member not found", body = ErrorResponse),
    )
)]
pub async fn create_booking(
    State(state): State<AppState>,
    body: Result<Json<BookingRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = body?;
    let booking = state.catalog.create_booking(req.into_new()?).await?;
    Ok((StatusCode::CREATED, Json(ApiEnvelope::ok(booking))))
}

/// `PUT /api/bookings/{id}` — Partially update a booking.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] for invalid fields and
/// [`ApiError::NotFound`] if the booking or a new reference does not exist.
#[utoipa::path(
    put,
    path = "/api/bookings/{id}",
    tag = "Bookings",
    summary = "Update a booking",
    params(("id" = i32, Path, description = "Booking id")),
    request_body = BookingRequest,
    responses(
        (status = 200, description = "Updated booking", body = ApiEnvelope<BookingRow>),
        (status = 400, description = "Invalid field", body = ErrorResponse),
        (status = 404, description = "Booking not found", body = ErrorResponse),
    )
)]
pub async fn update_booking(
    State(state): State<AppState>,
    id: Result<Path<BookingId>, PathRejection>,
    body: Result<Json<BookingRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = id?;
    let Json(req) = body?;
    let booking = state.catalog.update_booking(id, req.into_changes()?).await?;
    Ok(Json(ApiEnvelope::ok(booking)))
}

/// `DELETE /api/bookings/{id}` — Delete a booking.
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] if the booking does not exist.
#[utoipa::path(
    delete,
    path = "/api/bookings/{id}",
    tag = "Bookings",
    summary = "Delete a booking",
    params(("id" = i32, Path, description = "Booking id")),
    responses(
        (status = 200, description = "Deleted booking", body = ApiEnvelope<BookingRow>),
        (status = 404, description = "Booking not found", body = ErrorResponse),
    )
)]
pub async fn delete_booking(
    State(state): State<AppState>,
    id: Result<Path<BookingId>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = id?;
    let booking = state.catalog.delete_booking(id).await?;
    Ok(Json(ApiEnvelope::deleted(booking, "Booking")))
}

/// Booking routes, relative to `/api`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/bookings", get(list_bookings).post(create_booking))
        .route(
            "/bookings/{id}",
            get(get_booking).put(update_booking).delete(delete_booking),
        )
}
