//! Sales territory backend library modules.
//!
//! The crate follows a hexagonal layout: `domain` holds the record model,
//! rule engine, mapper, ports, and orchestrating service; `inbound` and
//! `outbound` hold the HTTP and persistence adapters.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::{CatchPanic, Trace, UnitOfWork};
