//! Domain primitives, rules, and services for sales territories.
//!
//! Purpose: Define the territory record model, the rule engine deciding
//! whether a create/update payload is acceptable, the pure mapping between
//! payloads, entities, and views, and the service that sequences them against
//! the persistence port.
//!
//! Public surface:
//! - Error (alias to `error::Error`): transport agnostic failure.
//! - Territory, TerritoryId: persisted entity and its identifier.
//! - Demographics, DemographicValue: dynamically typed attribute map.
//! - validate_territory: rule engine entry point.
//! - TerritoryService: orchestrator implementing the driving ports.

pub mod demographics;
pub mod error;
pub mod ports;
pub mod territory;
pub mod territory_mapping;
pub mod territory_rules;
pub mod territory_seed;
pub mod territory_service;
pub mod trace_id;

pub use self::demographics::{
    DemographicNumber, DemographicValue, Demographics, DemographicsFingerprint,
};
pub use self::error::{Error, ErrorCode, FieldErrors};
pub use self::territory::{
    TERRITORY_NAME_MAX, Territory, TerritoryId, TerritoryIdError, is_valid_zip_code,
};
pub use self::territory_mapping::{apply_update, to_entity, to_view};
pub use self::territory_rules::{
    FieldViolation, TerritoryField, TerritoryFields, ValidationFailure, validate_territory,
};
pub use self::territory_seed::{SeedOutcome, sample_territories, seed_sample_territories};
pub use self::territory_service::TerritoryService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use territory_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::not_found("territory 7 not found"))
/// }
/// assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
