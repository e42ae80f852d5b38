//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! The territory repository is backed by PostgreSQL via `diesel-async` with
//! `bb8` connection pooling. Row structs (`models.rs`) and the table
//! definition (`schema.rs`) stay private to this module; only domain types
//! cross the port boundary.
//!
//! Reads and writes inside a [`tracking_scope`] share one identity map, so an
//! update issued after a read mutates the instance that read returned and
//! writes only the dirty columns.
//!
//! # Example
//!
//! ```ignore
//! use territory_backend::outbound::persistence::{
//!     DbPool, DieselTerritoryRepository, PoolConfig,
//! };
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/territories")).await?;
//! let repo = DieselTerritoryRepository::new(pool);
//! ```

mod change_tracking;
mod diesel_basic_error_mapping;
mod diesel_territory_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use change_tracking::{is_tracking, tracking_scope};
pub use diesel_territory_repository::DieselTerritoryRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
