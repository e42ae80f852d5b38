//! In-process territory store.
//!
//! Used when no database URL is configured and by HTTP tests. Rows live in a
//! `BTreeMap` so listing is naturally ordered by id, and ids come from a
//! counter that starts at 1 and never reuses a value.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{TerritoryRepository, TerritoryRepositoryError};
use crate::domain::{Territory, TerritoryId};

#[derive(Debug)]
struct Rows {
    next_id: i32,
    by_id: BTreeMap<TerritoryId, Territory>,
}

impl Default for Rows {
    fn default() -> Self {
        Self {
            next_id: 1,
            by_id: BTreeMap::new(),
        }
    }
}

/// `TerritoryRepository` backed by a mutex-guarded map.
#[derive(Debug, Default)]
pub struct InMemoryTerritoryRepository {
    rows: Mutex<Rows>,
}

impl InMemoryTerritoryRepository {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn rows(&self) -> MutexGuard<'_, Rows> {
        self.rows.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl TerritoryRepository for InMemoryTerritoryRepository {
    async fn list_all(&self) -> Result<Vec<Territory>, TerritoryRepositoryError> {
        Ok(self.rows().by_id.values().cloned().collect())
    }

    async fn find_by_id(
        &self,
        id: TerritoryId,
    ) -> Result<Option<Territory>, TerritoryRepositoryError> {
        Ok(self.rows().by_id.get(&id).cloned())
    }

    async fn create(&self, territory: &Territory) -> Result<Territory, TerritoryRepositoryError> {
        let mut rows = self.rows();
        let id = TerritoryId::new(rows.next_id)
            .map_err(|err| TerritoryRepositoryError::query(err.to_string()))?;
        rows.next_id = rows
            .next_id
            .checked_add(1)
            .ok_or_else(|| TerritoryRepositoryError::query("territory id space exhausted"))?;

        let stored = territory.clone().with_id(id);
        rows.by_id.insert(id, stored.clone());
        debug!(territory_id = %id, "stored territory in memory");
        Ok(stored)
    }

    async fn update(
        &self,
        territory: &Territory,
    ) -> Result<Option<Territory>, TerritoryRepositoryError> {
        let mut rows = self.rows();
        let Some(stored) = rows.by_id.get_mut(&territory.id) else {
            return Ok(None);
        };
        stored.name.clone_from(&territory.name);
        stored.zip_codes = territory.zip_codes.clone();
        stored.demographics = territory.demographics.clone();
        Ok(Some(stored.clone()))
    }

    async fn delete(&self, id: TerritoryId) -> Result<bool, TerritoryRepositoryError> {
        Ok(self.rows().by_id.remove(&id).is_some())
    }
}
