//! Territory HTTP handlers.
//!
//! ```text
//! GET    /territories
//! GET    /territories/{id}
//! POST   /territories
//! PUT    /territories/{id}
//! DELETE /territories/{id}
//! ```
//!
//! The same routes are also mounted under `/api/territories`.

use actix_web::http::header;
use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::domain::ports::{CreateTerritoryRequest, TerritoryView, UpdateTerritoryRequest};
use crate::domain::{Error, TerritoryId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::{ProblemDetails, json_error_handler, path_error_handler};
use crate::inbound::http::schemas::{
    CreateTerritoryRequestSchema, TerritoryViewSchema, UpdateTerritoryRequestSchema,
};
use crate::inbound::http::state::HttpState;

/// Route prefixes the territory scope is mounted under.
pub const TERRITORY_PREFIXES: [&str; 2] = ["/territories", "/api/territories"];

/// Ids that cannot exist are reported exactly like absent ones.
fn parse_id(raw: i32) -> Result<TerritoryId, Error> {
    TerritoryId::try_from(raw).map_err(|_| Error::not_found(format!("territory {raw} not found")))
}

/// List every territory ordered by id.
#[utoipa::path(
    get,
    path = "/territories",
    responses(
        (status = 200, description = "All territories", body = [TerritoryViewSchema]),
        (status = 500, description = "Store failure", body = ProblemDetails,
            content_type = "application/problem+json")
    ),
    tags = ["territories"],
    operation_id = "listTerritories"
)]
#[get("")]
pub async fn list_territories(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<TerritoryView>>> {
    let views = state.territories_query.list().await?;
    Ok(web::Json(views))
}

/// Fetch one territory.
#[utoipa::path(
    get,
    path = "/territories/{id}",
    params(("id" = i32, Path, description = "Territory identifier")),
    responses(
        (status = 200, description = "The territory", body = TerritoryViewSchema),
        (status = 404, description = "No territory with this id", body = ProblemDetails,
            content_type = "application/problem+json"),
        (status = 500, description = "Store failure", body = ProblemDetails,
            content_type = "application/problem+json")
    ),
    tags = ["territories"],
    operation_id = "getTerritory"
)]
#[get("/{id}")]
pub async fn get_territory(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<TerritoryView>> {
    let id = parse_id(path.into_inner())?;
    let view = state.territories_query.get(id).await?;
    Ok(web::Json(view))
}

/// Create a territory.
#[utoipa::path(
    post,
    path = "/territories",
    request_body = CreateTerritoryRequestSchema,
    responses(
        (status = 201, description = "Territory created", body = TerritoryViewSchema,
            headers(("Location" = String, description = "URL of the new territory"))),
        (status = 400, description = "Unreadable body", body = ProblemDetails,
            content_type = "application/problem+json"),
        (status = 422, description = "Validation failed", body = ProblemDetails,
            content_type = "application/problem+json"),
        (status = 500, description = "Store failure", body = ProblemDetails,
            content_type = "application/problem+json")
    ),
    tags = ["territories"],
    operation_id = "createTerritory"
)]
#[post("")]
pub async fn create_territory(
    state: web::Data<HttpState>,
    payload: web::Json<CreateTerritoryRequest>,
) -> ApiResult<HttpResponse> {
    let view = state.territories.create(payload.into_inner()).await?;
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/territories/{}", view.id)))
        .json(view))
}

/// Replace the fields of an existing territory.
#[utoipa::path(
    put,
    path = "/territories/{id}",
    params(("id" = i32, Path, description = "Territory identifier")),
    request_body = UpdateTerritoryRequestSchema,
    responses(
        (status = 200, description = "Territory updated", body = TerritoryViewSchema),
        (status = 400, description = "Unreadable body", body = ProblemDetails,
            content_type = "application/problem+json"),
        (status = 404, description = "No territory with this id", body = ProblemDetails,
            content_type = "application/problem+json"),
        (status = 422, description = "Validation failed", body = ProblemDetails,
            content_type = "application/problem+json"),
        (status = 500, description = "Store failure", body = ProblemDetails,
            content_type = "application/problem+json")
    ),
    tags = ["territories"],
    operation_id = "updateTerritory"
)]
#[put("/{id}")]
pub async fn update_territory(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<UpdateTerritoryRequest>,
) -> ApiResult<web::Json<TerritoryView>> {
    let id = parse_id(path.into_inner())?;
    let view = state.territories.update(id, payload.into_inner()).await?;
    Ok(web::Json(view))
}

/// Delete a territory.
#[utoipa::path(
    delete,
    path = "/territories/{id}",
    params(("id" = i32, Path, description = "Territory identifier")),
    responses(
        (status = 204, description = "Territory deleted"),
        (status = 404, description = "No territory with this id", body = ProblemDetails,
            content_type = "application/problem+json"),
        (status = 500, description = "Store failure", body = ProblemDetails,
            content_type = "application/problem+json")
    ),
    tags = ["territories"],
    operation_id = "deleteTerritory"
)]
#[delete("/{id}")]
pub async fn delete_territory(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let id = parse_id(path.into_inner())?;
    state.territories.delete(id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Mount the territory routes under every prefix in [`TERRITORY_PREFIXES`].
///
/// Unreadable JSON bodies are answered with a 400 problem response and ids
/// that are not integers with a 404 one.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use territory_backend::inbound::http::territories;
///
/// let _app = App::new().configure(territories::configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    for prefix in TERRITORY_PREFIXES {
        cfg.service(
            web::scope(prefix)
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .app_data(web::PathConfig::default().error_handler(path_error_handler))
                .service(list_territories)
                .service(get_territory)
                .service(create_territory)
                .service(update_territory)
                .service(delete_territory),
        );
    }
}

#[cfg(test)]
#[path = "territories_tests.rs"]
mod tests;
