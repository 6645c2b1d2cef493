//! System endpoints: service banner, health check, and the 404 fallback.

use std::collections::BTreeMap;

use axum::extract::State;
use axum::http::{Method, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;
use crate::error::ErrorResponse;

/// Service banner returned by `GET /`.
#[derive(Debug, Serialize, ToSchema)]
pub struct BannerResponse {
    success: bool,
    message: &'static str,
    version: &'static str,
    #[schema(value_type = Object)]
    endpoints: BTreeMap<&'static str, &'static str>,
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    success: bool,
    message: &'static str,
    timestamp: String,
    version: &'static str,
    database: &'static str,
}

/// `GET /` — Service name, version, and endpoint map.
#[utoipa::path(
    get,
    path = "/",
    tag = "System",
    summary = "Service banner",
    responses(
        (status = 200, description = "Service banner", body = BannerResponse),
    )
)]
pub async fn root_handler() -> impl IntoResponse {
    let endpoints = BTreeMap::from([
        ("health", "/health"),
        ("venues", "/api/venues"),
        ("sports", "/api/sports"),
        ("members", "/api/members"),
        ("bookings", "/api/bookings"),
        ("transactions", "/api/transactions"),
        ("dashboard", "/api/dashboard"),
    ]);
    Json(BannerResponse {
        success: true,
        message: "Sports Booking API",
        version: env!("CARGO_PKG_VERSION"),
        endpoints,
    })
}

/// `GET /health` — Service health status.
///
/// Always 200 while the process is serving; `database` reports whether a
/// trivial query succeeded.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service status, version, current timestamp, and database reachability.",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse),
    )
)]
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let database = if state.catalog.repository().ping().await {
        "connected"
    } else {
        tracing::warn!("health check could not reach the database");
        "unavailable"
    };
    (
        StatusCode::OK,
        Json(HealthResponse {
            success: true,
            message: "API is running",
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION"),
            database,
        }),
    )
}

/// Fallback for unmatched routes.
pub async fn not_found_handler(method: Method, uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new(
            "Route not found",
            Some(format!("Cannot {method} {}", uri.path())),
        )),
    )
}

/// System routes mounted at the root level (not under /api).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
}
