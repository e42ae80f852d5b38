//! HTTP adapter mapping for domain errors.
//!
//! Domain [`Error`] values leave the service as `application/problem+json`
//! bodies. Store and internal failures keep their detail only in debug
//! builds; release builds return the title alone.

use actix_web::error::{JsonPayloadError, PathError};
use actix_web::http::header::HeaderValue;
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use utoipa::ToSchema;

use crate::domain::{Error, ErrorCode, FieldErrors, TRACE_ID_HEADER};

pub use crate::domain::ApiResult;

/// Media type of every error body.
pub const PROBLEM_JSON: &str = "application/problem+json";

/// Error body returned for 4xx and 5xx responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProblemDetails {
    /// Short summary of the failure category.
    #[schema(example = "One or more validation errors occurred.")]
    pub title: String,
    /// HTTP status code.
    #[schema(example = 422)]
    pub status: u16,
    /// Human-readable explanation, omitted when there is nothing safe to say.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Messages per lower-cased payload field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>, example = json!({"name": ["Name is required"]}))]
    pub errors: Option<FieldErrors>,
    /// Correlation identifier matching the `trace-id` response header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "3f2b8c1e-7a4d-4e0f-9b6a-2c5d8e1f0a3b")]
    pub trace_id: Option<String>,
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::ValidationFailed => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::StoreUnavailable | ErrorCode::InternalError => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn title_for(code: ErrorCode) -> &'static str {
    match code {
        ErrorCode::InvalidRequest => "Invalid request",
        ErrorCode::ValidationFailed => "One or more validation errors occurred.",
        ErrorCode::NotFound => "Not Found",
        ErrorCode::StoreUnavailable => "Store unavailable",
        ErrorCode::InternalError => "Internal server error",
    }
}

/// Build the problem body for `error`.
///
/// `expose_internals` keeps the detail of 5xx errors; handlers pass
/// `cfg!(debug_assertions)`.
pub fn problem_for(error: &Error, expose_internals: bool) -> ProblemDetails {
    let code = error.code();
    let detail = match code {
        ErrorCode::InvalidRequest => Some(error.message().to_owned()),
        ErrorCode::ValidationFailed | ErrorCode::NotFound => None,
        ErrorCode::StoreUnavailable | ErrorCode::InternalError => {
            expose_internals.then(|| error.message().to_owned())
        }
    };
    ProblemDetails {
        title: title_for(code).to_owned(),
        status: status_for(code).as_u16(),
        detail,
        errors: error.field_errors().cloned(),
        trace_id: error.trace_id().map(str::to_owned),
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!(code = ?self.code(), message = self.message(), "request failed");
        }

        let mut builder = HttpResponse::build(status);
        if let Some(value) = self
            .trace_id()
            .and_then(|id| HeaderValue::from_str(id).ok())
        {
            builder.insert_header((TRACE_ID_HEADER, value));
        }

        let problem = problem_for(self, cfg!(debug_assertions));
        match serde_json::to_string(&problem) {
            Ok(body) => builder.content_type(PROBLEM_JSON).body(body),
            Err(err) => {
                error!(error = %err, "failed to encode problem body");
                builder.finish()
            }
        }
    }
}

/// Turn malformed JSON bodies into a 400 problem response.
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    warn!(path = %req.path(), error = %err, "rejected unreadable request body");
    Error::invalid_request(err.to_string()).into()
}

/// Answer path segments that cannot name a territory with a 404 problem
/// response.
pub fn path_error_handler(err: PathError, req: &HttpRequest) -> actix_web::Error {
    warn!(path = %req.path(), error = %err, "rejected unparseable path segment");
    Error::not_found(format!("no territory at {}", req.path())).into()
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
