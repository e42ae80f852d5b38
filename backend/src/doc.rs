//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the territory and health endpoints together with the
//! schema wrappers from [`crate::inbound::http::schemas`] and the
//! [`ProblemDetails`] error body. The document backs Swagger UI in debug
//! builds and is exported by the `openapi-dump` binary.

use crate::inbound::http::error::ProblemDetails;
use crate::inbound::http::schemas::{
    CreateTerritoryRequestSchema, TerritoryViewSchema, UpdateTerritoryRequestSchema,
};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Sales territory API",
        description = "Create, read, update, and delete sales territories."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::territories::list_territories,
        crate::inbound::http::territories::get_territory,
        crate::inbound::http::territories::create_territory,
        crate::inbound::http::territories::update_territory,
        crate::inbound::http::territories::delete_territory,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        TerritoryViewSchema,
        CreateTerritoryRequestSchema,
        UpdateTerritoryRequestSchema,
        ProblemDetails
    )),
    tags(
        (name = "territories", description = "Sales territory records"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
