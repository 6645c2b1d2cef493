//! Transaction handlers: filtered list, get, create, update, delete.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{ApiEnvelope, TransactionListParams, TransactionRequest};
use crate::app_state::AppState;
use crate::domain::TransactionId;
use crate::error::{ApiError, ErrorResponse};
use crate::persistence::models::{TransactionDetailRow, TransactionRow};

/// `GET /api/transactions` — List transactions, newest first.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] for an unreadable date bound.
#[utoipa::path(
    get,
    path = "/api/transactions",
    tag = "Transactions",
    summary = "List transactions",
    description = "Transactions left-joined with their booking, venue, and member. Standalone transactions have null joined fields.",
    params(TransactionListParams),
    responses(
        (status = 200, description = "Matching transactions", body = ApiEnvelope<Vec<TransactionDetailRow>>),
        (status = 400, description = "Invalid filter", body = ErrorResponse),
    )
)]
pub async fn list_transactions(
    State(state): State<AppState>,
    params: Result<Query<TransactionListParams>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(params) = params?;
    let transactions = state
        .catalog
        .list_transactions(&params.into_filter()?)
        .await?;
    Ok(Json(ApiEnvelope::list(transactions)))
}

/// `GET /api/transactions/{id}` — Get one transaction.
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] if the transaction does not exist.
#[utoipa::path(
    get,
    path = "/api/transactions/{id}",
    tag = "Transactions",
    summary = "Get a transaction",
    params(("id" = i32, Path, description = "Transaction id")),
    responses(
        (status = 200, description = "Transaction", body = ApiEnvelope<TransactionDetailRow>),
        (status = 404, description = "Transaction not found", body = ErrorResponse),
    )
)]
pub async fn get_transaction(
    State(state): State<AppState>,
    id: Result<Path<TransactionId>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = id?;
    let tx = state.catalog.get_transaction(id).await?;
    Ok(Json(ApiEnvelope::ok(tx)))
}

/// `POST /api/transactions` — Record a transaction.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] for missing or invalid fields and
/// [`ApiError::NotFound`] for an unknown booking.
#[utoipa::path(
    post,
    path = "/api/transactions",
    tag = "Transactions",
    summary = "Create a transaction",
    request_body = TransactionRequest,
    responses(
        (status = 201, description = "Transaction created", body = ApiEnvelope<TransactionRow>),
        (status = 400, description = "Missing or invalid field", body = ErrorResponse),
        (status = 404, description = "Booking not found", body = ErrorResponse),
    )
)]
pub async fn create_transaction(
    State(state): State<AppState>,
    body: Result<Json<TransactionRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = body?;
    let tx = state.catalog.create_transaction(req.into_new()?).await?;
    Ok((StatusCode::CREATED, Json(ApiEnvelope::ok(tx))))
}

/// `PUT /api/transactions/{id}` — Partially update a transaction.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] for invalid fields and
/// [`ApiError::NotFound`] if the transaction does not exist.
#[utoipa::path(
    put,
    path = "/api/transactions/{id}",
    tag = "Transactions",
    summary = "Update a transaction",
    params(("id" = i32, Path, description = "Transaction id")),
    request_body = TransactionRequest,
    responses(
        (status = 200, description = "Updated transaction", body = ApiEnvelope<TransactionRow>),
        (status = 400, description = "Invalid field", body = ErrorResponse),
        (status = 404, description = "Transaction not found", body = ErrorResponse),
    )
)]
pub async fn update_transaction(
    State(state): State<AppState>,
    id: Result<Path<TransactionId>, PathRejection>,
    body: Result<Json<TransactionRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = id?;
    let Json(req) = body?;
    let tx = state
        .catalog
        .update_transaction(id, req.into_changes()?)
        .await?;
    Ok(Json(ApiEnvelope::ok(tx)))
}

/// `DELETE /api/transactions/{id}` — Delete a transaction.
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] if the transaction does not exist.
#[utoipa::path(
    delete,
    path = "/api/transactions/{id}",
    tag = "Transactions",
    summary = "Delete a transaction",
    params(("id" = i32, Path, description = "Transaction id")),
    responses(
        (status = 200, description = "Deleted transaction", body = ApiEnvelope<TransactionRow>),
        (status = 404, description = "Transaction not found", body = ErrorResponse),
    )
)]
pub async fn delete_transaction(
    State(state): State<AppState>,
    id: Result<Path<TransactionId>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = id?;
    let tx = state.catalog.delete_transaction(id).await?;
    Ok(Json(ApiEnvelope::deleted(tx, "Transaction")))
}

/// Transaction routes, relative to `/api`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/transactions", get(list_transactions).post(create_transaction))
        .route(
            "/transactions/{id}",
            get(get_transaction)
                .put(update_transaction)
                .delete(delete_transaction),
        )
}
