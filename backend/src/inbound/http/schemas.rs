//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror their wire shape and are registered with utoipa under
//! the domain type's name.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ports::TerritoryView`].
#[derive(ToSchema)]
#[schema(as = TerritoryView, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct TerritoryViewSchema {
    /// Store-assigned identifier.
    #[schema(minimum = 1, example = 1)]
    id: i32,
    /// Display name.
    #[schema(max_length = 100, example = "Northwest Region")]
    name: String,
    /// Five-digit postal codes in order.
    #[schema(example = json!(["98101", "98102"]))]
    zip_codes: Vec<String>,
    /// Open-ended attributes; values may be any JSON type.
    #[schema(value_type = Object, example = json!({"population": 2_500_000, "growthRate": 3.2}))]
    demographics: serde_json::Value,
}

/// OpenAPI schema for [`crate::domain::ports::CreateTerritoryRequest`].
#[derive(ToSchema)]
#[schema(as = CreateTerritoryRequest, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct CreateTerritoryRequestSchema {
    /// Display name, 1 to 100 characters.
    #[schema(max_length = 100, example = "Northwest Region")]
    name: String,
    /// At least one five-digit postal code.
    #[schema(example = json!(["98101"]))]
    zip_codes: Vec<String>,
    /// Attributes with non-empty names and values.
    #[schema(value_type = Object, example = json!({"population": 2_500_000}))]
    demographics: serde_json::Value,
}

/// OpenAPI schema for [`crate::domain::ports::UpdateTerritoryRequest`].
#[derive(ToSchema)]
#[schema(as = UpdateTerritoryRequest, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UpdateTerritoryRequestSchema {
    /// Replacement name.
    #[schema(max_length = 100, example = "Cascadia")]
    name: String,
    /// Replacement postal codes.
    #[schema(example = json!(["98101", "98109"]))]
    zip_codes: Vec<String>,
    /// Replacement attributes.
    #[schema(value_type = Object)]
    demographics: serde_json::Value,
}
