//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed territory store using Diesel ORM
//! - **memory**: in-process territory store for local runs and tests
//!
//! Adapters translate between domain types and storage representations. They
//! contain no business rules.

pub mod memory;
pub mod persistence;
