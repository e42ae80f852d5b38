//! Per-operation identity map and dirty checking for territory rows.
//!
//! Every row the Diesel repository reads inside a [`tracking_scope`] is
//! recorded once, together with a snapshot of its persisted column values.
//! Later reads of the same id resolve to the tracked instance, and updates
//! mutate that instance in place instead of building a second copy of the row.
//! Outside a scope the repository falls back to untracked, single-call
//! behaviour.
//!
//! The identity map lives in task-local storage, so it is only visible to the
//! task that opened the scope. Borrows never span an `.await`.

use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;

use tokio::task_local;

use crate::domain::{Demographics, DemographicsFingerprint, Territory, TerritoryId};

use super::models::TerritoryChangeset;

task_local! {
    static IDENTITY_MAP: RefCell<IdentityMap>;
}

/// Run `fut` with a fresh, empty identity map in scope.
pub async fn tracking_scope<Fut>(fut: Fut) -> Fut::Output
where
    Fut: Future,
{
    IDENTITY_MAP
        .scope(RefCell::new(IdentityMap::default()), fut)
        .await
}

/// Returns `true` when called inside [`tracking_scope`].
#[must_use]
pub fn is_tracking() -> bool {
    IDENTITY_MAP.try_with(|_| ()).is_ok()
}

/// Apply `f` to the identity map in scope, or return `None` outside a scope.
pub(crate) fn with_identity_map<T>(f: impl FnOnce(&mut IdentityMap) -> T) -> Option<T> {
    IDENTITY_MAP
        .try_with(|cell| f(&mut cell.borrow_mut()))
        .ok()
}

/// Column values as last read from or written to the database.
#[derive(Debug, Clone)]
struct PersistedSnapshot {
    name: String,
    zip_codes: Vec<String>,
    demographics: Demographics,
    fingerprint: DemographicsFingerprint,
}

impl PersistedSnapshot {
    fn of(territory: &Territory) -> Self {
        Self {
            name: territory.name.clone(),
            zip_codes: territory.zip_codes.clone(),
            demographics: territory.demographics.clone(),
            fingerprint: territory.demographics.fingerprint(),
        }
    }

    /// Fingerprints settle the common case; equal digests are confirmed with
    /// a deep comparison.
    fn demographics_differ(&self, current: &Demographics) -> bool {
        current.fingerprint() != self.fingerprint || *current != self.demographics
    }
}

/// A territory row attached to the identity map.
#[derive(Debug, Clone)]
pub(crate) struct TrackedTerritory {
    current: Territory,
    persisted: PersistedSnapshot,
}

impl TrackedTerritory {
    /// Attach a freshly loaded row.
    pub(crate) fn attach(territory: Territory) -> Self {
        let persisted = PersistedSnapshot::of(&territory);
        Self {
            current: territory,
            persisted,
        }
    }

    pub(crate) const fn id(&self) -> TerritoryId {
        self.current.id
    }

    pub(crate) const fn current(&self) -> &Territory {
        &self.current
    }

    /// Copy incoming values onto the tracked instance.
    ///
    /// Scalars are assigned field by field; collection fields are replaced
    /// wholesale because a field copy does not reach into them.
    pub(crate) fn apply(&mut self, incoming: &Territory) {
        self.current.name.clone_from(&incoming.name);
        self.current.zip_codes = incoming.zip_codes.clone();
        self.current.demographics = incoming.demographics.clone();
    }

    /// Columns whose current value differs from the persisted snapshot.
    ///
    /// # Errors
    /// Returns the serializer error if the demographics cannot be encoded.
    pub(crate) fn changes(&self) -> Result<TerritoryChangeset, serde_json::Error> {
        let mut changeset = TerritoryChangeset::default();
        if self.current.name != self.persisted.name {
            changeset.name = Some(self.current.name.clone());
        }
        if self.current.zip_codes != self.persisted.zip_codes {
            changeset.zip_codes = Some(self.current.zip_codes.clone());
        }
        if self.persisted.demographics_differ(&self.current.demographics) {
            changeset.demographics = Some(self.current.demographics.to_json_text()?);
        }
        Ok(changeset)
    }

    /// Record the current values as persisted after a successful write.
    pub(crate) fn mark_persisted(&mut self) {
        self.persisted = PersistedSnapshot::of(&self.current);
    }
}

/// Tracked rows keyed by id.
#[derive(Debug, Default)]
pub(crate) struct IdentityMap {
    entries: HashMap<TerritoryId, TrackedTerritory>,
}

impl IdentityMap {
    /// Resolve a loaded row against the map.
    ///
    /// Returns the tracked instance when the id is already attached, otherwise
    /// attaches a copy of `loaded` and returns it unchanged.
    pub(crate) fn resolve(&mut self, loaded: &Territory) -> Territory {
        self.entries
            .entry(loaded.id)
            .or_insert_with(|| TrackedTerritory::attach(loaded.clone()))
            .current()
            .clone()
    }

    /// Detach a tracked row so the caller is its only owner.
    pub(crate) fn take(&mut self, id: TerritoryId) -> Option<TrackedTerritory> {
        self.entries.remove(&id)
    }

    /// Attach (or re-attach) a tracked row.
    pub(crate) fn put(&mut self, tracked: TrackedTerritory) {
        self.entries.insert(tracked.id(), tracked);
    }

    /// Forget a row.
    pub(crate) fn evict(&mut self, id: TerritoryId) {
        self.entries.remove(&id);
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
