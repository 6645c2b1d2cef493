//! API error type with HTTP status mapping.
//!
//! [`ApiError`] is the single error type for handlers and services. Each
//! variant maps to an HTTP status and renders the failure envelope
//! described on [`ErrorResponse`].

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::InvalidVariant;
use crate::domain::metrics::InvalidVenueFilter;
use crate::domain::month::InvalidMonth;

/// JSON body of every failed request.
///
/// ```json
/// {
///   "success": false,
///   "error": "Failed to fetch venues",
///   "message": "pool timed out while waiting for an open connection"
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Always `false`.
    pub success: bool,
    /// Short description of what failed.
    pub error: String,
    /// Underlying cause, when there is one worth showing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    /// Builds a failure body.
    #[must_use]
    pub fn new(error: impl Into<String>, message: Option<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            message,
        }
    }
}

/// Server-side error with HTTP status mapping.
///
/// | Variant      | HTTP Status               |
/// |--------------|---------------------------|
/// | `Validation` | 400 Bad Request           |
/// | `NotFound`   | 404 Not Found             |
/// | `Database`   | 500 Internal Server Error |
/// | `Internal`   | 500 Internal Server Error |
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Request was malformed or failed a business rule.
    #[error("{0}")]
    Validation(String),

    /// The named record does not exist, e.g. `"Venue"`.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// A query failed. `action` reads like `"Failed to fetch venues"`.
    #[error("{action}: {source}")]
    Database {
        /// What the server was trying to do.
        action: &'static str,
        /// Driver error.
        #[source]
        source: sqlx::Error,
    },

    /// Anything else.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Returns a closure converting a [`sqlx::Error`] into
    /// [`ApiError::Database`] tagged with `action`.
    ///
    /// Intended for `.map_err(ApiError::database("Failed to fetch venues"))`.
    pub fn database(action: &'static str) -> impl FnOnce(sqlx::Error) -> Self {
        move |source| Self::Database { action, source }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Database { .. } | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn to_body(&self) -> ErrorResponse {
        match self {
            Self::Database { action, source } => {
                ErrorResponse::new(*action, Some(source.to_string()))
            }
            Self::Internal(detail) => {
                ErrorResponse::new("Internal server error", Some(detail.clone()))
            }
            other => ErrorResponse::new(other.to_string(), None),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let mut response = axum::Json(self.to_body()).into_response();
        *response.status_mut() = status;
        response
    }
}

impl From<InvalidVariant> for ApiError {
    fn from(err: InvalidVariant) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<InvalidMonth> for ApiError {
    fn from(err: InvalidMonth) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<InvalidVenueFilter> for ApiError {
    fn from(err: InvalidVenueFilter) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}
