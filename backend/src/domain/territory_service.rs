//! Territory domain service.
//!
//! [`TerritoryService`] implements both driving ports by sequencing the rule
//! engine, the mapper, and the repository. Store failures are translated here
//! so raw adapter errors never reach inbound adapters.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::ports::{
    CreateTerritoryRequest, TerritoryCommand, TerritoryQuery, TerritoryRepository,
    TerritoryRepositoryError, TerritoryView, UpdateTerritoryRequest,
};
use crate::domain::{
    Error, Territory, TerritoryId, apply_update, to_entity, to_view, validate_territory,
};

fn map_repository_error(error: TerritoryRepositoryError) -> Error {
    match error {
        TerritoryRepositoryError::Connection { message } => {
            Error::store_unavailable(format!("territory repository unavailable: {message}"))
        }
        TerritoryRepositoryError::Query { message } => {
            Error::internal(format!("territory repository error: {message}"))
        }
    }
}

fn not_found(id: TerritoryId) -> Error {
    warn!(territory_id = %id, "territory not found");
    Error::not_found(format!("territory {id} not found"))
}

/// Territory service implementing the command and query driving ports.
pub struct TerritoryService<R: ?Sized> {
    territory_repo: Arc<R>,
}

impl<R: ?Sized> Clone for TerritoryService<R> {
    fn clone(&self) -> Self {
        Self {
            territory_repo: Arc::clone(&self.territory_repo),
        }
    }
}

impl<R: ?Sized> TerritoryService<R> {
    /// Create a new service with the territory repository.
    pub const fn new(territory_repo: Arc<R>) -> Self {
        Self { territory_repo }
    }
}

impl<R> TerritoryService<R>
where
    R: TerritoryRepository + ?Sized,
{
    async fn require(&self, id: TerritoryId) -> Result<Territory, Error> {
        self.territory_repo
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found(id))
    }
}

#[async_trait]
impl<R> TerritoryQuery for TerritoryService<R>
where
    R: TerritoryRepository + ?Sized,
{
    async fn list(&self) -> Result<Vec<TerritoryView>, Error> {
        info!("listing territories");
        let territories = self
            .territory_repo
            .list_all()
            .await
            .map_err(map_repository_error)?;
        Ok(territories.into_iter().map(to_view).collect())
    }

    async fn get(&self, id: TerritoryId) -> Result<TerritoryView, Error> {
        info!(territory_id = %id, "fetching territory");
        self.require(id).await.map(to_view)
    }
}

#[async_trait]
impl<R> TerritoryCommand for TerritoryService<R>
where
    R: TerritoryRepository + ?Sized,
{
    async fn create(&self, request: CreateTerritoryRequest) -> Result<TerritoryView, Error> {
        if let Err(failure) = validate_territory(&request) {
            warn!(violations = failure.violations().len(), "rejected territory create");
            return Err(failure.into());
        }

        let created = self
            .territory_repo
            .create(&to_entity(request))
            .await
            .map_err(map_repository_error)?;
        info!(territory_id = %created.id, "created territory");
        Ok(to_view(created))
    }

    async fn update(
        &self,
        id: TerritoryId,
        request: UpdateTerritoryRequest,
    ) -> Result<TerritoryView, Error> {
        if let Err(failure) = validate_territory(&request) {
            warn!(
                territory_id = %id,
                violations = failure.violations().len(),
                "rejected territory update"
            );
            return Err(failure.into());
        }

        let existing = self.require(id).await?;
        let updated = self
            .territory_repo
            .update(&apply_update(&existing, request))
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found(id))?;
        info!(territory_id = %id, "updated territory");
        Ok(to_view(updated))
    }

    async fn delete(&self, id: TerritoryId) -> Result<(), Error> {
        self.require(id).await?;
        let deleted = self
            .territory_repo
            .delete(id)
            .await
            .map_err(map_repository_error)?;
        if !deleted {
            return Err(not_found(id));
        }
        info!(territory_id = %id, "deleted territory");
        Ok(())
    }
}

#[cfg(test)]
#[path = "territory_service_tests.rs"]
mod tests;
