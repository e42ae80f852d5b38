//! Driving port for territory mutations.
//!
//! HTTP handlers call [`TerritoryCommand`] to create, update, and delete
//! territories. Implementations validate payloads before anything reaches the
//! store.

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{Demographics, Error, TerritoryId};

use super::TerritoryView;

/// Treat an explicit JSON `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Payload for creating a territory.
///
/// Missing or `null` fields deserialize to empty values so that they are
/// reported by the rule engine rather than rejected by the JSON reader.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateTerritoryRequest {
    /// Display name.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Postal codes in order.
    #[serde(deserialize_with = "null_as_default")]
    pub zip_codes: Vec<String>,
    /// Open-ended attributes.
    #[serde(deserialize_with = "null_as_default")]
    pub demographics: Demographics,
}

/// Payload replacing the mutable fields of an existing territory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateTerritoryRequest {
    /// Display name.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Postal codes in order.
    #[serde(deserialize_with = "null_as_default")]
    pub zip_codes: Vec<String>,
    /// Open-ended attributes.
    #[serde(deserialize_with = "null_as_default")]
    pub demographics: Demographics,
}

/// Domain use-case port for territory mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TerritoryCommand: Send + Sync {
    /// Validate and insert a new territory.
    ///
    /// # Errors
    /// Returns a validation error when the payload breaks a rule, or a store
    /// error when the insert fails.
    async fn create(&self, request: CreateTerritoryRequest) -> Result<TerritoryView, Error>;

    /// Validate and apply new field values to an existing territory.
    ///
    /// # Errors
    /// Returns a validation error, a not-found error when `id` is absent, or a
    /// store error.
    async fn update(
        &self,
        id: TerritoryId,
        request: UpdateTerritoryRequest,
    ) -> Result<TerritoryView, Error>;

    /// Delete a territory.
    ///
    /// # Errors
    /// Returns a not-found error when `id` is absent, or a store error.
    async fn delete(&self, id: TerritoryId) -> Result<(), Error>;
}

/// Fixture command that echoes payloads back without storing them.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTerritoryCommand;

#[async_trait]
impl TerritoryCommand for FixtureTerritoryCommand {
    async fn create(&self, request: CreateTerritoryRequest) -> Result<TerritoryView, Error> {
        let id = TerritoryId::new(1).map_err(|err| Error::internal(err.to_string()))?;
        Ok(TerritoryView {
            id,
            name: request.name,
            zip_codes: request.zip_codes,
            demographics: request.demographics,
        })
    }

    async fn update(
        &self,
        id: TerritoryId,
        request: UpdateTerritoryRequest,
    ) -> Result<TerritoryView, Error> {
        Ok(TerritoryView {
            id,
            name: request.name,
            zip_codes: request.zip_codes,
            demographics: request.demographics,
        })
    }

    async fn delete(&self, _id: TerritoryId) -> Result<(), Error> {
        Ok(())
    }
}
