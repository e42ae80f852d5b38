//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data` and depend only on the
//! driving ports, so they can be exercised with fixtures or mocks.

use std::sync::Arc;

use crate::domain::ports::{TerritoryCommand, TerritoryQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub territories: Arc<dyn TerritoryCommand>,
    pub territories_query: Arc<dyn TerritoryQuery>,
}

impl HttpState {
    /// Construct state from separate command and query ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use territory_backend::domain::ports::{FixtureTerritoryCommand, FixtureTerritoryQuery};
    /// use territory_backend::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(
    ///     Arc::new(FixtureTerritoryCommand),
    ///     Arc::new(FixtureTerritoryQuery),
    /// );
    /// let _query = state.territories_query.clone();
    /// ```
    pub fn new(
        territories: Arc<dyn TerritoryCommand>,
        territories_query: Arc<dyn TerritoryQuery>,
    ) -> Self {
        Self {
            territories,
            territories_query,
        }
    }

    /// Construct state from one service implementing both ports.
    pub fn from_service<S>(service: Arc<S>) -> Self
    where
        S: TerritoryCommand + TerritoryQuery + 'static,
    {
        Self {
            territories: service.clone(),
            territories_query: service,
        }
    }
}
