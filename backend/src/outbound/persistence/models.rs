//! Internal Diesel row models.
//!
//! These structs mirror `schema.rs` and never leave the persistence module.

use diesel::prelude::*;

use super::schema::territories;

/// Row read from the `territories` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = territories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TerritoryRow {
    pub id: i32,
    pub name: String,
    pub zip_codes: Vec<String>,
    pub demographics: String,
}

/// Insertable row; the id comes from the identity column.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = territories)]
pub(crate) struct NewTerritoryRow<'a> {
    pub name: &'a str,
    pub zip_codes: &'a [String],
    pub demographics: String,
}

/// Dirty-column changeset; `None` columns are left out of the `UPDATE`.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = territories)]
pub(crate) struct TerritoryChangeset {
    pub name: Option<String>,
    pub zip_codes: Option<Vec<String>>,
    pub demographics: Option<String>,
}

impl TerritoryChangeset {
    /// Returns `true` when no column is dirty.
    pub(crate) const fn is_empty(&self) -> bool {
        self.name.is_none() && self.zip_codes.is_none() && self.demographics.is_none()
    }
}
