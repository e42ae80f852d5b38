//! Territory data model.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::Demographics;

/// Maximum allowed length for a territory name, in characters.
pub const TERRITORY_NAME_MAX: usize = 100;

static ZIP_CODE_RE: OnceLock<Regex> = OnceLock::new();

fn zip_code_regex() -> &'static Regex {
    ZIP_CODE_RE.get_or_init(|| {
        // `\d` would also accept non-ASCII digits.
        let pattern = "^[0-9]{5}$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("zip code regex failed to compile: {error}"))
    })
}

/// Returns `true` when `value` is exactly five ASCII digits.
///
/// # Examples
/// ```
/// use territory_backend::domain::is_valid_zip_code;
///
/// assert!(is_valid_zip_code("98101"));
/// assert!(!is_valid_zip_code("9810"));
/// ```
#[must_use]
pub fn is_valid_zip_code(value: &str) -> bool {
    zip_code_regex().is_match(value)
}

/// Validation errors returned by [`TerritoryId::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TerritoryIdError {
    /// Identifiers assigned by the store are always positive.
    #[error("territory id must be positive, got {0}")]
    NotPositive(i32),
}

/// Store-assigned territory identifier.
///
/// [`TerritoryId::UNASSIGNED`] marks an entity that has not been inserted yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TerritoryId(i32);

impl TerritoryId {
    /// Sentinel for entities the store has not assigned an id to.
    pub const UNASSIGNED: Self = Self(0);

    /// Validate and construct a store-assigned identifier.
    ///
    /// # Errors
    /// Returns [`TerritoryIdError::NotPositive`] for zero or negative values.
    pub const fn new(value: i32) -> Result<Self, TerritoryIdError> {
        if value > 0 {
            Ok(Self(value))
        } else {
            Err(TerritoryIdError::NotPositive(value))
        }
    }

    /// Raw integer value.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self.0
    }

    /// Returns `true` for the unassigned sentinel.
    #[must_use]
    pub const fn is_unassigned(self) -> bool {
        self.0 == Self::UNASSIGNED.0
    }
}

impl fmt::Display for TerritoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i32> for TerritoryId {
    type Error = TerritoryIdError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Persisted sales territory.
///
/// ## Invariants
/// - `id` is assigned by the store on create and never changes afterwards.
/// - Entities reaching the store have passed the rule engine, so `name` is
///   non-empty, `zip_codes` is non-empty, and every zip code is five digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Territory {
    /// Store-assigned identifier, [`TerritoryId::UNASSIGNED`] before insert.
    pub id: TerritoryId,
    /// Display name.
    pub name: String,
    /// Postal codes in caller-supplied order.
    pub zip_codes: Vec<String>,
    /// Open-ended attributes.
    pub demographics: Demographics,
}

impl Territory {
    /// Return a copy carrying the supplied identifier.
    #[must_use]
    pub fn with_id(mut self, id: TerritoryId) -> Self {
        self.id = id;
        self
    }
}
