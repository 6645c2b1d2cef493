//! Read-only sport handlers.

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::ApiEnvelope;
use crate::app_state::AppState;
use crate::domain::SportId;
use crate::error::{ApiError, ErrorResponse};
use crate::persistence::models::SportRow;

/// `GET /api/sports` — List all sports.
///
/// # Errors
///
/// Returns [`ApiError::Database`] on query failure.
#[utoipa::path(
    get,
    path = "/api/sports",
    tag = "Sports",
    summary = "List sports",
    responses(
        (status = 200, description = "All sports ordered by id", body = ApiEnvelope<Vec<SportRow>>),
        (status = 500, description = "Database failure", body = ErrorResponse),
    )
)]
pub async fn list_sports(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let sports = state.catalog.list_sports().await?;
    Ok(Json(ApiEnvelope::list(sports)))
}

/// `GET /api/sports/{id}` — Get one sport.
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] if the sport does not exist.
#[utoipa::path(
    get,
    path = "/api/sports/{id}",
    tag = "Sports",
    summary = "Get a sport",
    params(("id" = i32, Path, description = "Sport id")),
    responses(
        (status = 200, description = "Sport", body = ApiEnvelope<SportRow>),
        (status = 404, description = "Sport not found", body = ErrorResponse),
    )
)]
pub async fn get_sport(
    State(state): State<AppState>,
    id: Result<Path<SportId>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = id?;
    let sport = state.catalog.get_sport(id).await?;
    Ok(Json(ApiEnvelope::ok(sport)))
}

/// Sport routes, relative to `/api`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/sports", get(list_sports))
        .route("/sports/{id}", get(get_sport))
}
