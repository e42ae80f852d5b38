//! Builders for the store and the HTTP state wired on top of it.

use std::sync::Arc;

use territory_backend::domain::TerritoryService;
use territory_backend::domain::ports::TerritoryRepository;
use territory_backend::inbound::http::state::HttpState;
use territory_backend::outbound::memory::InMemoryTerritoryRepository;
use territory_backend::outbound::persistence::{DbPool, DieselTerritoryRepository};
use tracing::info;

/// Pick the Diesel store when a pool exists, otherwise an in-memory one.
pub fn build_repository(pool: Option<DbPool>) -> Arc<dyn TerritoryRepository> {
    match pool {
        Some(pool) => {
            info!("using PostgreSQL territory store");
            Arc::new(DieselTerritoryRepository::new(pool))
        }
        None => {
            info!("no database configured, using in-memory territory store");
            Arc::new(InMemoryTerritoryRepository::new())
        }
    }
}

/// Wrap the store in the territory service and expose both driving ports.
pub fn build_http_state(repository: Arc<dyn TerritoryRepository>) -> HttpState {
    HttpState::from_service(Arc::new(TerritoryService::new(repository)))
}
