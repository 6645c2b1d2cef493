//! # playdesk
//!
//! REST API and metrics dashboard for administering a sports-venue booking
//! business: venues, sports, members, court bookings, and the payments
//! recorded against them.
//!
//! The dashboard figures (member counts, trial conversion, realized
//! revenue, booking utilization, coupon use, repeat bookings, refunds) are
//! recomputed on every request by a pure aggregator over the full record
//! set. Nothing is cached between requests.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── CatalogService, DashboardService (service/)
//!     │
//!     ├── Metrics aggregator (domain/metrics)
//!     │
//!     └── PostgresRepository (persistence/)
//!             └── PostgreSQL
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
