//! Service layer: business logic orchestration.
//!
//! [`CatalogService`] resolves references and logs record mutations;
//! [`DashboardService`] loads the record sets and hands them to the pure
//! aggregator in [`crate::domain::metrics`].

pub mod catalog_service;
pub mod dashboard_service;

pub use catalog_service::CatalogService;
pub use dashboard_service::{Dashboard, DashboardService};
