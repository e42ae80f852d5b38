//! PostgreSQL-backed `TerritoryRepository` implementation using Diesel ORM.
//!
//! Demographics are stored as compact JSON text. Reads attach rows to the
//! per-operation identity map (see [`super::change_tracking`]) and updates
//! write only the columns that actually changed.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{TerritoryRepository, TerritoryRepositoryError};
use crate::domain::{Demographics, Territory, TerritoryId};

use super::change_tracking::{TrackedTerritory, with_identity_map};
use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewTerritoryRow, TerritoryRow};
use super::pool::{DbPool, PoolError};
use super::schema::territories;

/// Diesel-backed implementation of the territory repository port.
#[derive(Clone)]
pub struct DieselTerritoryRepository {
    pool: DbPool,
}

impl DieselTerritoryRepository {
    /// Create a new repository with the given connection pool.
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn load(&self, id: TerritoryId) -> Result<Option<Territory>, TerritoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<TerritoryRow> = territories::table
            .find(id.as_i32())
            .select(TerritoryRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_territory).transpose()
    }

    /// Find the instance to update: the tracked one if attached, otherwise a
    /// fresh read. The caller becomes the sole owner until it re-attaches it.
    ///
    /// The flag is `true` when the instance came from the identity map and so
    /// may describe a row another request has since deleted.
    async fn acquire(
        &self,
        id: TerritoryId,
    ) -> Result<Option<(TrackedTerritory, bool)>, TerritoryRepositoryError> {
        if let Some(tracked) = with_identity_map(|map| map.take(id)).flatten() {
            return Ok(Some((tracked, true)));
        }
        Ok(self
            .load(id)
            .await?
            .map(|territory| (TrackedTerritory::attach(territory), false)))
    }

    async fn exists(&self, id: TerritoryId) -> Result<bool, TerritoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::select(diesel::dsl::exists(territories::table.find(id.as_i32())))
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)
    }
}

fn map_pool_error(error: PoolError) -> TerritoryRepositoryError {
    map_basic_pool_error(error, |message| {
        TerritoryRepositoryError::connection(message)
    })
}

fn map_diesel_error(error: diesel::result::Error) -> TerritoryRepositoryError {
    map_basic_diesel_error(
        error,
        TerritoryRepositoryError::query,
        TerritoryRepositoryError::connection,
    )
}

fn encode_demographics(demographics: &Demographics) -> Result<String, TerritoryRepositoryError> {
    demographics
        .to_json_text()
        .map_err(|err| TerritoryRepositoryError::query(format!("encode demographics: {err}")))
}

/// Convert a database row into a domain territory.
fn row_to_territory(row: TerritoryRow) -> Result<Territory, TerritoryRepositoryError> {
    let TerritoryRow {
        id,
        name,
        zip_codes,
        demographics,
    } = row;

    let id = TerritoryId::new(id).map_err(|err| TerritoryRepositoryError::query(err.to_string()))?;
    let demographics = Demographics::from_json_text(&demographics).map_err(|err| {
        TerritoryRepositoryError::query(format!("decode demographics of territory {id}: {err}"))
    })?;

    Ok(Territory {
        id,
        name,
        zip_codes,
        demographics,
    })
}

/// Attach a loaded row to the identity map, preferring an already tracked
/// instance.
fn resolve(territory: Territory) -> Territory {
    with_identity_map(|map| map.resolve(&territory)).unwrap_or(territory)
}

#[async_trait]
impl TerritoryRepository for DieselTerritoryRepository {
    async fn list_all(&self) -> Result<Vec<Territory>, TerritoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<TerritoryRow> = territories::table
            .order(territories::id.asc())
            .select(TerritoryRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter()
            .map(|row| row_to_territory(row).map(resolve))
            .collect()
    }

    async fn find_by_id(
        &self,
        id: TerritoryId,
    ) -> Result<Option<Territory>, TerritoryRepositoryError> {
        Ok(self.load(id).await?.map(resolve))
    }

    async fn create(&self, territory: &Territory) -> Result<Territory, TerritoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewTerritoryRow {
            name: &territory.name,
            zip_codes: &territory.zip_codes,
            demographics: encode_demographics(&territory.demographics)?,
        };

        let row = diesel::insert_into(territories::table)
            .values(&new_row)
            .returning(TerritoryRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let created = row_to_territory(row)?;
        debug!(territory_id = %created.id, "inserted territory row");
        Ok(resolve(created))
    }

    async fn update(
        &self,
        territory: &Territory,
    ) -> Result<Option<Territory>, TerritoryRepositoryError> {
        let Some((mut tracked, from_map)) = self.acquire(territory.id).await? else {
            return Ok(None);
        };
        tracked.apply(territory);

        let changeset = tracked
            .changes()
            .map_err(|err| TerritoryRepositoryError::query(format!("encode demographics: {err}")))?;
        if changeset.is_empty() {
            if from_map && !self.exists(territory.id).await? {
                debug!(territory_id = %territory.id, "tracked territory vanished");
                return Ok(None);
            }
            debug!(territory_id = %territory.id, "territory unchanged, skipping write");
            let current = tracked.current().clone();
            with_identity_map(|map| map.put(tracked));
            return Ok(Some(current));
        }

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let affected = diesel::update(territories::table.find(territory.id.as_i32()))
            .set(&changeset)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        if affected == 0 {
            debug!(territory_id = %territory.id, "territory vanished before update");
            return Ok(None);
        }

        tracked.mark_persisted();
        let current = tracked.current().clone();
        with_identity_map(|map| map.put(tracked));
        Ok(Some(current))
    }

    async fn delete(&self, id: TerritoryId) -> Result<bool, TerritoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let affected = diesel::delete(territories::table.find(id.as_i32()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        with_identity_map(|map| map.evict(id));
        Ok(affected > 0)
    }
}
