//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`TerritoryCommand`, `TerritoryQuery`) are what inbound
//! adapters call; the driven port (`TerritoryRepository`) is what storage
//! adapters implement.

mod macros;
pub(crate) use macros::define_port_error;

mod territory_command;
mod territory_query;
mod territory_repository;

#[cfg(test)]
pub use territory_command::MockTerritoryCommand;
pub use territory_command::{
    CreateTerritoryRequest, FixtureTerritoryCommand, TerritoryCommand, UpdateTerritoryRequest,
};
#[cfg(test)]
pub use territory_query::MockTerritoryQuery;
pub use territory_query::{FixtureTerritoryQuery, TerritoryQuery, TerritoryView};
#[cfg(test)]
pub use territory_repository::MockTerritoryRepository;
pub use territory_repository::{
    FixtureTerritoryRepository, TerritoryRepository, TerritoryRepositoryError,
};
