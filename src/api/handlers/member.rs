//! Member handlers: filtered list, detail, create, update, delete.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{ApiEnvelope, MemberListParams, MemberRequest};
use crate::app_state::AppState;
use crate::domain::MemberId;
use crate::error::{ApiError, ErrorResponse};
use crate::persistence::models::{MemberDetail, MemberRow};

/// `GET /api/members` — List members, optionally filtered.
///
/// # Errors
///
/// Returns [`ApiError::Database`] on query failure.
#[utoipa::path(
    get,
    path = "/api/members",
    tag = "Members",
    summary = "List members",
    params(MemberListParams),
    responses(
        (status = 200, description = "Matching members ordered by id", body = ApiEnvelope<Vec<MemberRow>>),
        (status = 500, description = "Database failure", body = ErrorResponse),
    )
)]
pub async fn list_members(
    State(state): State<AppState>,
    params: Result<Query<MemberListParams>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(params) = params?;
    let members = state.catalog.list_members(&params.into_filter()).await?;
    Ok(Json(ApiEnvelope::list(members)))
}

/// `GET /api/members/{id}` — Member with bookings and transactions.
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] if the member does not exist.
#[utoipa::path(
    get,
    path = "/api/members/{id}",
    tag = "Members",
    summary = "Get a member",
    description = "Returns the member together with their bookings (with venue and sport names) and the transactions recorded against those bookings.",
    params(("id" = i32, Path, description = "Member id")),
    responses(
        (status = 200, description = "Member detail", body = ApiEnvelope<MemberDetail>),
        (status = 404, description = "Member not found", body = ErrorResponse),
    )
)]
pub async fn get_member(
    State(state): State<AppState>,
    id: Result<Path<MemberId>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = id?;
    let detail = state.catalog.member_detail(id).await?;
    Ok(Json(ApiEnvelope::ok(detail)))
}

/// `POST /api/members` — Create a member.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] if a required field is missing or the
/// status is unknown.
#[utoipa::path(
    post,
    path = "/api/members",
    tag = "Members",
    summary = "Create a member",
    request_body = MemberRequest,
    responses(
        (status = 201, description = "Member created", body = ApiEnvelope<MemberRow>),
        (status = 400, description = "Missing or invalid field", body = ErrorResponse),
    )
)]
pub async fn create_member(
    State(state): State<AppState>,
    body: Result<Json<MemberRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = body?;
    let member = state.catalog.create_member(req.into_new()?).await?;
    Ok((StatusCode::CREATED, Json(ApiEnvelope::ok(member))))
}

/// `PUT /api/members/{id}` — Partially update a member.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] for an unknown status and
/// [`ApiError::NotFound`] if the member does not exist.
#[utoipa::path(
    put,
    path = "/api/members/{id}",
    tag = "Members",
    summary = "Update a member",
    params(("id" = i32, Path, description = "Member id")),
    request_body = MemberRequest,
    responses(
        (status = 200, description = "Updated member", body = ApiEnvelope<MemberRow>),
        (status = 400, description = "Invalid field", body = ErrorResponse),
        (status = 404, description = "Member not found", body = ErrorResponse),
    )
)]
pub async fn update_member(
    State(state): State<AppState>,
    id: Result<Path<MemberId>, PathRejection>,
    body: Result<Json<MemberRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = id?;
    let Json(req) = body?;
    let member = state.catalog.update_member(id, req.into_changes()?).await?;
    Ok(Json(ApiEnvelope::ok(member)))
}

/// `DELETE /api/members/{id}` — Delete a member.
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] if the member does not exist.
#[utoipa::path(
    delete,
    path = "/api/members/{id}",
    tag = "Members",
    summary = "Delete a member",
    params(("id" = i32, Path, description = "Member id")),
    responses(
        (status = 200, description = "Deleted member", body = ApiEnvelope<MemberRow>),
        (status = 404, description = "Member not found", body = ErrorResponse),
    )
)]
pub async fn delete_member(
    State(state): State<AppState>,
    id: Result<Path<MemberId>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = id?;
    let member = state.catalog.delete_member(id).await?;
    Ok(Json(ApiEnvelope::deleted(member, "Member")))
}

/// Member routes, relative to `/api`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/members", get(list_members).post(create_member))
        .route(
            "/members/{id}",
            get(get_member).put(update_member).delete(delete_member),
        )
}
