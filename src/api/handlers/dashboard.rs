//! Dashboard handlers: metrics summary and the coaching tab.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{ApiEnvelope, DashboardParams, DashboardResponse};
use crate::app_state::AppState;
use crate::domain::YearMonth;
use crate::error::{ApiError, ErrorResponse};
use crate::persistence::models::TransactionDetailRow;

/// `GET /api/dashboard` — Summary metrics and daily revenue.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] for a malformed `venue` or `month`.
#[utoipa::path(
    get,
    path = "/api/dashboard",
    tag = "Dashboard",
    summary = "Dashboard metrics",
    description = "Recomputes the summary cards and the daily revenue series from the full record set. The venue filter narrows booking-derived figures only; member, revenue, and refund figures and the revenue series always cover every venue.",
    params(DashboardParams),
    responses(
        (status = 200, description = "Dashboard metrics", body = ApiEnvelope<DashboardResponse>),
        (status = 400, description = "Invalid venue or month", body = ErrorResponse),
        (status = 500, description = "Database failure", body = ErrorResponse),
    )
)]
pub async fn get_dashboard(
    State(state): State<AppState>,
    params: Result<Query<DashboardParams>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(params) = params?;
    let filter = params.into_filter(YearMonth::current())?;
    let dashboard = state.dashboard.dashboard(&filter).await?;
    Ok(Json(ApiEnvelope::ok(DashboardResponse::from(dashboard))))
}

/// `GET /api/dashboard/coaching` — All coaching transactions.
///
/// # Errors
///
/// Returns [`ApiError::Database`] on query failure.
#[utoipa::path(
    get,
    path = "/api/dashboard/coaching",
    tag = "Dashboard",
    summary = "Coaching transactions",
    responses(
        (status = 200, description = "Coaching transactions, newest first", body = ApiEnvelope<Vec<TransactionDetailRow>>),
        (status = 500, description = "Database failure", body = ErrorResponse),
    )
)]
pub async fn list_coaching(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let transactions = state.dashboard.coaching_transactions().await?;
    Ok(Json(ApiEnvelope::list(transactions)))
}

/// Dashboard routes, relative to `/api`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(get_dashboard))
        .route("/dashboard/coaching", get(list_coaching))
}
