//! Venue CRUD handlers: list, get, create, update, delete.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{ApiEnvelope, VenueRequest};
use crate::app_state::AppState;
use crate::domain::VenueId;
use crate::error::{ApiError, ErrorResponse};
use crate::persistence::models::VenueRow;

/// `GET /api/venues` — List all venues.
///
/// # Errors
///
/// Returns [`ApiError::Database`] on query failure.
#[utoipa::path(
    get,
    path = "/api/venues",
    tag = "Venues",
    summary = "List venues",
    responses(
        (status = 200, description = "All venues ordered by id", body = ApiEnvelope<Vec<VenueRow>>),
        (status = 500, description = "Database failure", body = ErrorResponse),
    )
)]
pub async fn list_venues(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let venues = state.catalog.list_venues().await?;
    Ok(Json(ApiEnvelope::list(venues)))
}

/// `GET /api/venues/{id}` — Get one venue.
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] if the venue does not exist.
#[utoipa::path(
    get,
    path = "/api/venues/{id}",
    tag = "Venues",
    summary = "Get a venue",
    params(("id" = i32, Path, description = "Venue id")),
    responses(
        (status = 200, description = "Venue", body = ApiEnvelope<VenueRow>),
        (status = 404, description = "Venue not found", body = ErrorResponse),
    )
)]
pub async fn get_venue(
    State(state): State<AppState>,
    id: Result<Path<VenueId>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = id?;
    let venue = state.catalog.get_venue(id).await?;
    Ok(Json(ApiEnvelope::ok(venue)))
}

/// `POST /api/venues` — Create a venue.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] if name or location is missing.
#[utoipa::path(
    post,
    path = "/api/venues",
    tag = "Venues",
    summary = "Create a venue",
    request_body = VenueRequest,
    responses(
        (status = 201, description = "Venue created", body = ApiEnvelope<VenueRow>),
        (status = 400, description = "Name and location are required", body = ErrorResponse),
    )
)]
pub async fn create_venue(
    State(state): State<AppState>,
    body: Result<Json<VenueRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = body?;
    let venue = state.catalog.create_venue(req.into_new()?).await?;
    Ok((StatusCode::CREATED, Json(ApiEnvelope::ok(venue))))
}

/// `PUT /api/venues/{id}` — Partially update a venue.
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] if the venue does not exist.
#[utoipa::path(
    put,
    path = "/api/venues/{id}",
    tag = "Venues",
    summary = "Update a venue",
    description = "Fields left out of the body keep their stored values.",
    params(("id" = i32, Path, description = "Venue id")),
    request_body = VenueRequest,
    responses(
        (status = 200, description = "Updated venue", body = ApiEnvelope<VenueRow>),
        (status = 404, description = "Venue not found", body = ErrorResponse),
    )
)]
pub async fn update_venue(
    State(state): State<AppState>,
    id: Result<Path<VenueId>, PathRejection>,
    body: Result<Json<VenueRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = id?;
    let Json(req) = body?;
    let venue = state.catalog.update_venue(id, req.into_changes()).await?;
    Ok(Json(ApiEnvelope::ok(venue)))
}

/// `DELETE /api/venues/{id}` — Delete a venue.
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] if the venue does not exist.
#[utoipa::path(
    delete,
    path = "/api/venues/{id}",
    tag = "Venues",
    summary = "Delete a venue",
    params(("id" = i32, Path, description = "Venue id")),
    responses(
        (status = 200, description = "Deleted venue", body = ApiEnvelope<VenueRow>),
        (status = 404, description = "Venue not found", body = ErrorResponse),
    )
)]
pub async fn delete_venue(
    State(state): State<AppState>,
    id: Result<Path<VenueId>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = id?;
    let venue = state.catalog.delete_venue(id).await?;
    Ok(Json(ApiEnvelope::deleted(venue, "Venue")))
}

/// Venue routes, relative to `/api`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/venues", get(list_venues).post(create_venue))
        .route(
            "/venues/{id}",
            get(get_venue).put(update_venue).delete(delete_venue),
        )
}
