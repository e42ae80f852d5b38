//! Pure conversions between payloads, entities, and views.

use super::{Territory, TerritoryId};
use crate::domain::ports::{CreateTerritoryRequest, TerritoryView, UpdateTerritoryRequest};

/// Build an unsaved entity from a create payload.
///
/// The id is left at [`TerritoryId::UNASSIGNED`] for the store to fill in.
#[must_use]
pub fn to_entity(request: CreateTerritoryRequest) -> Territory {
    Territory {
        id: TerritoryId::UNASSIGNED,
        name: request.name,
        zip_codes: request.zip_codes,
        demographics: request.demographics,
    }
}

/// Overwrite the mutable fields of a copy of `existing`, keeping its id.
///
/// # Examples
/// ```
/// use territory_backend::domain::ports::{CreateTerritoryRequest, UpdateTerritoryRequest};
/// use territory_backend::domain::{apply_update, to_entity};
///
/// let existing = to_entity(CreateTerritoryRequest {
///     name: "Old".to_owned(),
///     ..CreateTerritoryRequest::default()
/// });
/// let update = UpdateTerritoryRequest {
///     name: "New".to_owned(),
///     ..UpdateTerritoryRequest::default()
/// };
/// let updated = apply_update(&existing, update);
/// assert_eq!(updated.id, existing.id);
/// assert_eq!(updated.name, "New");
/// ```
#[must_use]
pub fn apply_update(existing: &Territory, request: UpdateTerritoryRequest) -> Territory {
    Territory {
        id: existing.id,
        name: request.name,
        zip_codes: request.zip_codes,
        demographics: request.demographics,
    }
}

/// Project an entity to its outward view.
#[must_use]
pub fn to_view(territory: Territory) -> TerritoryView {
    TerritoryView {
        id: territory.id,
        name: territory.name,
        zip_codes: territory.zip_codes,
        demographics: territory.demographics,
    }
}

impl From<CreateTerritoryRequest> for Territory {
    fn from(request: CreateTerritoryRequest) -> Self {
        to_entity(request)
    }
}

impl From<Territory> for TerritoryView {
    fn from(territory: Territory) -> Self {
        to_view(territory)
    }
}
