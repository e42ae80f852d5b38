//! Driving port for territory reads.
//!
//! Inbound adapters use this port to list and fetch territories as
//! [`TerritoryView`] projections without importing persistence concerns.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Demographics, Error, TerritoryId};

/// Outward projection of a territory.
///
/// Structurally identical to [`crate::domain::Territory`]; it exists so the
/// wire contract does not move when the stored shape does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TerritoryView {
    /// Store-assigned identifier.
    pub id: TerritoryId,
    /// Display name.
    pub name: String,
    /// Postal codes in stored order.
    pub zip_codes: Vec<String>,
    /// Open-ended attributes.
    pub demographics: Demographics,
}

/// Domain use-case port for reading territories.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TerritoryQuery: Send + Sync {
    /// List every territory ordered by id.
    async fn list(&self) -> Result<Vec<TerritoryView>, Error>;

    /// Fetch one territory.
    ///
    /// # Errors
    /// Returns a not-found error when `id` is absent.
    async fn get(&self, id: TerritoryId) -> Result<TerritoryView, Error>;
}

/// Fixture query backed by nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTerritoryQuery;

#[async_trait]
impl TerritoryQuery for FixtureTerritoryQuery {
    async fn list(&self) -> Result<Vec<TerritoryView>, Error> {
        Ok(Vec::new())
    }

    async fn get(&self, id: TerritoryId) -> Result<TerritoryView, Error> {
        Err(Error::not_found(format!("territory {id} not found")))
    }
}
