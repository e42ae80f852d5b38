//! HTTP inbound adapter exposing the territory REST endpoints.

pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
pub mod territories;

pub use error::ApiResult;
