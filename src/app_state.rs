//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::persistence::PostgresRepository;
use crate::service::{CatalogService, DashboardService};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Record CRUD.
    pub catalog: Arc<CatalogService>,
    /// Dashboard aggregation.
    pub dashboard: Arc<DashboardService>,
}

impl AppState {
    /// Wires both services over one repository.
    #[must_use]
    pub fn new(repository: PostgresRepository) -> Self {
        Self {
            catalog: Arc::new(CatalogService::new(repository.clone())),
            dashboard: Arc::new(DashboardService::new(repository)),
        }
    }
}
