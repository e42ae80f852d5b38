//! HTTP server configuration object.

use std::net::SocketAddr;
use std::sync::Arc;

use territory_backend::domain::ports::TerritoryRepository;
use territory_backend::outbound::memory::InMemoryTerritoryRepository;

/// Everything `create_server` needs besides the health flags.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) repository: Arc<dyn TerritoryRepository>,
}

impl ServerConfig {
    /// Serve from the in-memory store on `bind_addr`.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            repository: Arc::new(InMemoryTerritoryRepository::new()),
        }
    }

    /// Serve from the given store instead.
    #[must_use]
    pub fn with_repository(mut self, repository: Arc<dyn TerritoryRepository>) -> Self {
        self.repository = repository;
        self
    }

    /// Store handlers will use.
    #[must_use]
    pub fn repository(&self) -> &Arc<dyn TerritoryRepository> {
        &self.repository
    }
}
