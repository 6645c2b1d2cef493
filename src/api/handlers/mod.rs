//! REST endpoint handlers organized by resource.

pub mod booking;
pub mod dashboard;
pub mod member;
pub mod sport;
pub mod system;
pub mod transaction;
pub mod venue;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(venue::routes())
        .merge(sport::routes())
        .merge(member::routes())
        .merge(booking::routes())
        .merge(transaction::routes())
        .merge(dashboard::routes())
}
