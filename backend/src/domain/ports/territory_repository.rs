//! Port for territory persistence.
//!
//! The [`TerritoryRepository`] trait is the store contract: list, lookup,
//! insert with a store-assigned id, update, and delete. Adapters own the
//! change-tracking protocol behind `update`, so callers never hold two
//! independent copies of the same row.

use async_trait::async_trait;

use crate::domain::{Territory, TerritoryId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by territory repository adapters.
    pub enum TerritoryRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "territory repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "territory repository query failed: {message}",
    }
}

/// Port for territory storage and retrieval.
///
/// # Update protocol
///
/// `update` resolves the row it writes to through the adapter's own tracked
/// instance for that id when one exists, copies the incoming scalar fields
/// onto it, replaces the collection fields, and commits only when something
/// changed. It returns `None` when the row no longer exists.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TerritoryRepository: Send + Sync {
    /// Fetch every territory ordered by id.
    async fn list_all(&self) -> Result<Vec<Territory>, TerritoryRepositoryError>;

    /// Fetch a territory by id, returning `None` when absent.
    async fn find_by_id(
        &self,
        id: TerritoryId,
    ) -> Result<Option<Territory>, TerritoryRepositoryError>;

    /// Insert a territory and return it with its assigned id.
    ///
    /// The incoming `id` is ignored.
    async fn create(&self, territory: &Territory) -> Result<Territory, TerritoryRepositoryError>;

    /// Persist new field values for an existing territory.
    ///
    /// Returns the stored territory, or `None` when the id is not present.
    async fn update(
        &self,
        territory: &Territory,
    ) -> Result<Option<Territory>, TerritoryRepositoryError>;

    /// Remove a territory, returning `true` when a row was deleted.
    async fn delete(&self, id: TerritoryId) -> Result<bool, TerritoryRepositoryError>;
}

/// Fixture implementation for tests that do not exercise storage.
///
/// Lookups return nothing, inserts echo the input with id `1`, and updates and
/// deletes report the row as missing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTerritoryRepository;

#[async_trait]
impl TerritoryRepository for FixtureTerritoryRepository {
    async fn list_all(&self) -> Result<Vec<Territory>, TerritoryRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_by_id(
        &self,
        _id: TerritoryId,
    ) -> Result<Option<Territory>, TerritoryRepositoryError> {
        Ok(None)
    }

    async fn create(&self, territory: &Territory) -> Result<Territory, TerritoryRepositoryError> {
        let id = TerritoryId::new(1)
            .map_err(|err| TerritoryRepositoryError::query(err.to_string()))?;
        Ok(territory.clone().with_id(id))
    }

    async fn update(
        &self,
        _territory: &Territory,
    ) -> Result<Option<Territory>, TerritoryRepositoryError> {
        Ok(None)
    }

    async fn delete(&self, _id: TerritoryId) -> Result<bool, TerritoryRepositoryError> {
        Ok(false)
    }
}
